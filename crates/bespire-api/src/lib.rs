//! # bespire-api
//!
//! HTTP API layer for Bespire. Defines the Axum router, request/response
//! DTOs, the auth extractor, and the mapping from domain errors to HTTP
//! responses.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;
