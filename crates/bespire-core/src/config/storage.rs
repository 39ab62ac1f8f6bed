//! Object-storage provider configuration.

use serde::{Deserialize, Serialize};

/// Object-storage configuration.
///
/// The blob provider is an external HTTP service; Bespire only records the
/// URL it hands back. The `memory` provider exists for tests and local
/// development.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Which provider to use: `http` or `memory`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Base URL of the external upload endpoint.
    #[serde(default = "default_upload_endpoint")]
    pub upload_endpoint: String,
    /// Maximum accepted upload size in bytes (default 50 MB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
    /// Timeout for outbound provider requests, in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            upload_endpoint: default_upload_endpoint(),
            max_upload_size_bytes: default_max_upload(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

fn default_provider() -> String {
    "http".to_string()
}

fn default_upload_endpoint() -> String {
    "http://localhost:9000".to_string()
}

fn default_max_upload() -> u64 {
    50 * 1024 * 1024
}

fn default_request_timeout() -> u64 {
    30
}
