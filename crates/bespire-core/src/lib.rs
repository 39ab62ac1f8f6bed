//! # bespire-core
//!
//! Core crate for the Bespire asset backend. Contains configuration
//! schemas, the unified error system, and the object-store trait seam.
//!
//! This crate has **no** internal dependencies on other Bespire crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
