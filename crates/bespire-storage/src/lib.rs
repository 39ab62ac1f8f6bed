//! # bespire-storage
//!
//! Object-store implementations for Bespire. The production provider
//! forwards payloads to an external HTTP upload endpoint; the in-memory
//! provider backs tests and local development.

pub mod providers;

use std::sync::Arc;

use bespire_core::config::StorageConfig;
use bespire_core::error::AppError;
use bespire_core::traits::ObjectStore;

use providers::http::HttpObjectStore;
use providers::memory::MemoryObjectStore;

/// Build the configured object-store provider.
pub fn build_object_store(config: &StorageConfig) -> Result<Arc<dyn ObjectStore>, AppError> {
    match config.provider.as_str() {
        "http" => Ok(Arc::new(HttpObjectStore::new(config)?)),
        "memory" => Ok(Arc::new(MemoryObjectStore::new())),
        other => Err(AppError::configuration(format!(
            "Unknown storage provider '{other}'"
        ))),
    }
}
