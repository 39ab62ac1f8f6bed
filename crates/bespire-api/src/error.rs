//! Maps domain `AppError` to HTTP responses.
//!
//! The `IntoResponse` impl for `AppError` lives in `bespire-core` alongside
//! the type itself (coherence requires the impl in the defining crate); the
//! response body type is re-exported here for API consumers.

pub use bespire_core::error::ApiErrorResponse;
