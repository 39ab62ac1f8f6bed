//! HTTP handlers, organized by domain.

pub mod files;
pub mod health;
pub mod requests;
pub mod tags;
pub mod trash;
pub mod upload;
