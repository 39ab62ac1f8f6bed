//! File library services: entry CRUD, trash lifecycle, and uploads.

pub mod service;
pub mod trash;
pub mod upload;

pub use service::FileEntryService;
pub use trash::{BulkOutcome, TrashService};
pub use upload::UploadService;

use std::sync::Arc;

use uuid::Uuid;

use bespire_core::error::AppError;
use bespire_core::result::AppResult;
use bespire_database::repositories::file_entry::FileEntryRepository;
use bespire_entity::file_entry::FileEntry;

/// Load a prospective parent and check it can contain new children.
///
/// The parent must exist, be a folder, be live, and belong to the same
/// workspace as the child being placed.
pub(crate) async fn ensure_parent_folder(
    entries: &Arc<FileEntryRepository>,
    workspace_id: Uuid,
    parent_id: Uuid,
) -> AppResult<FileEntry> {
    let parent = entries
        .find_by_id(parent_id)
        .await?
        .ok_or_else(|| AppError::not_found("Parent folder not found"))?;

    if !parent.is_folder() {
        return Err(AppError::validation("Parent entry is not a folder"));
    }
    if !parent.lifecycle.is_live() {
        return Err(AppError::conflict("Parent folder is in the trash"));
    }
    if parent.workspace_id != workspace_id {
        return Err(AppError::validation(
            "Parent folder belongs to a different workspace",
        ));
    }

    Ok(parent)
}
