//! Object-store trait for the external blob provider.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// A binary payload handed to the provider.
#[derive(Debug, Clone)]
pub struct ObjectUpload {
    /// Original file name (used by the provider for content negotiation).
    pub file_name: String,
    /// MIME type, if the caller supplied one.
    pub content_type: Option<String>,
    /// The payload bytes.
    pub data: Bytes,
}

/// What the provider hands back after a successful store.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct StoredObject {
    /// Public URL of the stored object.
    pub url: String,
    /// Provider-side identifier of the object.
    pub object_id: String,
}

/// Trait for object-storage backends.
///
/// The production implementation forwards to an external HTTP endpoint;
/// an in-memory implementation exists for tests. The trait is defined here
/// in `bespire-core` and implemented in `bespire-storage`.
#[async_trait]
pub trait ObjectStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "http", "memory").
    fn provider_type(&self) -> &str;

    /// Check whether the provider is reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Store a payload and return its URL and provider identifier.
    ///
    /// A single attempt; callers do not retry.
    async fn put(&self, upload: ObjectUpload) -> AppResult<StoredObject>;
}
