//! HTTP object-store provider.
//!
//! Forwards payloads as multipart form uploads to the external blob
//! service and records the URL and file id it hands back. Uploads are a
//! single attempt; on failure the caller surfaces the error unchanged.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, warn};

use bespire_core::config::StorageConfig;
use bespire_core::error::AppError;
use bespire_core::result::AppResult;
use bespire_core::traits::{ObjectStore, ObjectUpload, StoredObject};

/// Response body of the external upload endpoint.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    url: String,
    #[serde(rename = "fileId")]
    object_id: String,
}

/// Object store backed by an external HTTP upload service.
#[derive(Debug, Clone)]
pub struct HttpObjectStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpObjectStore {
    /// Build a provider from configuration.
    pub fn new(config: &StorageConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    bespire_core::error::ErrorKind::Configuration,
                    "Failed to build storage HTTP client",
                    e,
                )
            })?;

        Ok(Self {
            client,
            base_url: config.upload_endpoint.trim_end_matches('/').to_string(),
        })
    }

    fn upload_url(&self) -> String {
        format!("{}/upload/image", self.base_url)
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    fn provider_type(&self) -> &str {
        "http"
    }

    async fn health_check(&self) -> AppResult<bool> {
        let result = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await;

        match result {
            Ok(resp) => Ok(resp.status().is_success()),
            Err(e) => {
                warn!(error = %e, "Storage provider health check failed");
                Ok(false)
            }
        }
    }

    async fn put(&self, upload: ObjectUpload) -> AppResult<StoredObject> {
        let mut part =
            reqwest::multipart::Part::bytes(upload.data.to_vec()).file_name(upload.file_name);
        if let Some(content_type) = &upload.content_type {
            part = part.mime_str(content_type).map_err(|e| {
                AppError::with_source(
                    bespire_core::error::ErrorKind::Validation,
                    format!("Invalid content type '{content_type}'"),
                    e,
                )
            })?;
        }
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(self.upload_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    bespire_core::error::ErrorKind::ExternalService,
                    "Upload request to storage provider failed",
                    e,
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_provider_failure(status, &body));
        }

        let stored: UploadResponse = response.json().await.map_err(|e| {
            AppError::with_source(
                bespire_core::error::ErrorKind::ExternalService,
                "Storage provider returned an unreadable response",
                e,
            )
        })?;

        debug!(url = %stored.url, object_id = %stored.object_id, "Stored object");
        Ok(StoredObject {
            url: stored.url,
            object_id: stored.object_id,
        })
    }
}

/// Map an upstream failure status to a caller-facing error.
fn map_provider_failure(status: StatusCode, body: &str) -> AppError {
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNSUPPORTED_MEDIA_TYPE => {
            AppError::validation("Unsupported file type")
        }
        StatusCode::PAYLOAD_TOO_LARGE => AppError::validation("File too large"),
        s if s.is_server_error() => AppError::external_service(format!(
            "Storage provider error ({s}): {}",
            body.chars().take(200).collect::<String>()
        )),
        s => AppError::external_service(format!("Storage provider rejected upload ({s})")),
    }
}
