//! Object-store provider implementations.

pub mod http;
pub mod memory;
