//! Trash lifecycle: soft delete, restore, and permanent removal.
//!
//! Trashing detaches an entry from its parent, so a restore always lands
//! at workspace root. Children of a trashed folder are untouched; they
//! stay live in the tree under their own parents.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use bespire_core::error::AppError;
use bespire_core::result::AppResult;
use bespire_database::repositories::file_entry::FileEntryRepository;
use bespire_entity::file_entry::FileEntry;

use crate::context::Principal;

/// Per-id result of a bulk trash or restore operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BulkOutcome {
    /// Ids that were processed.
    pub succeeded: Vec<Uuid>,
    /// Ids that failed, with the reason.
    pub failed: Vec<BulkFailure>,
}

/// A single failed id within a bulk operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkFailure {
    /// The id that failed.
    pub id: Uuid,
    /// Why it failed.
    pub reason: String,
}

/// Handles the trash lifecycle of file entries.
#[derive(Debug, Clone)]
pub struct TrashService {
    /// File entry repository.
    entries: Arc<FileEntryRepository>,
}

impl TrashService {
    /// Creates a new trash service.
    pub fn new(entries: Arc<FileEntryRepository>) -> Self {
        Self { entries }
    }

    /// Moves an entry to the trash.
    ///
    /// The entry is detached from its parent in the same statement that
    /// stamps `deleted_at`. Trashing an already-trashed entry is a conflict.
    pub async fn move_to_trash(&self, principal: &Principal, id: Uuid) -> AppResult<FileEntry> {
        let entry = self
            .entries
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Entry not found"))?;

        if !entry.lifecycle.is_live() {
            return Err(AppError::conflict("Entry is already in the trash"));
        }

        let trashed = self
            .entries
            .move_to_trash(id, principal.request_time)
            .await?;

        info!(user_id = %principal.user_id, entry_id = %id, "Entry moved to trash");

        Ok(trashed)
    }

    /// Restores an entry from the trash. It reappears at workspace root.
    pub async fn restore(&self, principal: &Principal, id: Uuid) -> AppResult<FileEntry> {
        let entry = self
            .entries
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Entry not found"))?;

        if entry.lifecycle.is_live() {
            return Err(AppError::conflict("Entry is not in the trash"));
        }

        let restored = self.entries.restore(id).await?;

        info!(user_id = %principal.user_id, entry_id = %id, "Entry restored from trash");

        Ok(restored)
    }

    /// Permanently deletes an entry row. Returns whether a row was removed.
    ///
    /// The stored blob is not reclaimed: the provider's object id is not
    /// persisted on the entry, so the URL is logged and left behind.
    pub async fn delete_permanent(&self, principal: &Principal, id: Uuid) -> AppResult<bool> {
        let entry = self.entries.find_by_id(id).await?;

        let deleted = self.entries.delete(id).await?;

        if deleted {
            if let Some(url) = entry.and_then(|e| e.url) {
                warn!(entry_id = %id, url = %url, "Entry deleted; stored object left unreclaimed");
            }
            info!(user_id = %principal.user_id, entry_id = %id, "Entry permanently deleted");
        }

        Ok(deleted)
    }

    /// Trashes a batch of entries, continuing past per-id failures.
    pub async fn trash_many(&self, principal: &Principal, ids: &[Uuid]) -> AppResult<BulkOutcome> {
        let mut outcome = BulkOutcome::default();
        for &id in ids {
            match self.move_to_trash(principal, id).await {
                Ok(_) => outcome.succeeded.push(id),
                Err(e) => {
                    warn!(entry_id = %id, error = %e, "Bulk trash skipped an entry");
                    outcome.failed.push(BulkFailure {
                        id,
                        reason: e.message.clone(),
                    });
                }
            }
        }
        Ok(outcome)
    }

    /// Restores a batch of entries, continuing past per-id failures.
    pub async fn restore_many(&self, principal: &Principal, ids: &[Uuid]) -> AppResult<BulkOutcome> {
        let mut outcome = BulkOutcome::default();
        for &id in ids {
            match self.restore(principal, id).await {
                Ok(_) => outcome.succeeded.push(id),
                Err(e) => {
                    warn!(entry_id = %id, error = %e, "Bulk restore skipped an entry");
                    outcome.failed.push(BulkFailure {
                        id,
                        reason: e.message.clone(),
                    });
                }
            }
        }
        Ok(outcome)
    }
}
