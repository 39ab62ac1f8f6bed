//! Two-phase upload pipeline: store the blob, then create the entry row.
//!
//! There is no compensation step. If the row insert fails after the blob
//! was stored, the blob is orphaned at the provider and its URL is logged.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{info, warn};
use uuid::Uuid;

use bespire_core::error::AppError;
use bespire_core::result::AppResult;
use bespire_core::traits::{ObjectStore, ObjectUpload};
use bespire_database::repositories::file_entry::FileEntryRepository;
use bespire_entity::file_entry::{AccessLabel, CreateFileEntry, EntryKind, FileEntry};

use crate::context::Principal;
use crate::file::ensure_parent_folder;
use crate::file::service::validated_name;

/// Handles file uploads into the workspace library.
#[derive(Debug, Clone)]
pub struct UploadService {
    /// File entry repository.
    entries: Arc<FileEntryRepository>,
    /// Object store provider.
    store: Arc<dyn ObjectStore>,
    /// Maximum accepted payload size in bytes.
    max_size_bytes: u64,
}

/// Data for a single upload.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Owning workspace.
    pub workspace_id: Uuid,
    /// Destination folder; `None` uploads to workspace root.
    pub parent_id: Option<Uuid>,
    /// Original file name; the extension is derived from it.
    pub file_name: String,
    /// MIME type, if the client supplied one.
    pub content_type: Option<String>,
    /// The payload.
    pub data: Bytes,
    /// Initial tags.
    pub tags: Vec<String>,
    /// Initial visibility labels.
    pub access: Vec<AccessLabel>,
}

impl UploadService {
    /// Creates a new upload service.
    pub fn new(
        entries: Arc<FileEntryRepository>,
        store: Arc<dyn ObjectStore>,
        max_size_bytes: u64,
    ) -> Self {
        Self {
            entries,
            store,
            max_size_bytes,
        }
    }

    /// Uploads a payload and records it as a file entry.
    ///
    /// Validation happens before the blob is stored; the provider call is a
    /// single attempt with no retry.
    pub async fn upload_file(
        &self,
        principal: &Principal,
        upload: UploadRequest,
    ) -> AppResult<FileEntry> {
        let name = validated_name(&upload.file_name)?;

        if upload.data.is_empty() {
            return Err(AppError::validation("Upload payload is empty"));
        }
        if upload.data.len() as u64 > self.max_size_bytes {
            return Err(AppError::validation(format!(
                "File exceeds the {} byte upload limit",
                self.max_size_bytes
            )));
        }

        if let Some(parent_id) = upload.parent_id {
            ensure_parent_folder(&self.entries, upload.workspace_id, parent_id).await?;
        }

        let size_bytes = upload.data.len() as i64;
        let ext = FileEntry::extension_of(&name);

        let stored = self
            .store
            .put(ObjectUpload {
                file_name: name.clone(),
                content_type: upload.content_type,
                data: upload.data,
            })
            .await?;

        let created = self
            .entries
            .create(&CreateFileEntry {
                workspace_id: upload.workspace_id,
                parent_id: upload.parent_id,
                kind: EntryKind::File,
                name,
                url: Some(stored.url.clone()),
                ext,
                size_bytes: Some(size_bytes),
                tags: upload.tags,
                access: if upload.access.is_empty() {
                    vec![AccessLabel::All]
                } else {
                    upload.access
                },
                created_by: Some(principal.user_id),
            })
            .await
            .inspect_err(|_| {
                warn!(url = %stored.url, "Entry insert failed after blob store; object orphaned");
            })?;

        info!(
            user_id = %principal.user_id,
            file_id = %created.id,
            size_bytes,
            "File uploaded"
        );

        Ok(created)
    }
}
