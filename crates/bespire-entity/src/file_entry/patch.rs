//! Typed partial update for file entries.
//!
//! Replaces the dynamic patch objects of the original design: every
//! updatable field is an explicit `Option`, and the merge is a pure
//! function from (existing, patch) to the new row state.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::model::{AccessLabel, FileEntry};

/// Optional-field patch applied to an existing [`FileEntry`].
///
/// `parent_id` is doubly optional: the outer `None` leaves the parent
/// untouched, `Some(None)` moves the entry to workspace root.
#[derive(Debug, Clone, Default)]
pub struct FileEntryPatch {
    /// New display name.
    pub name: Option<String>,
    /// New parent folder; `Some(None)` means move to root.
    pub parent_id: Option<Option<Uuid>>,
    /// Replacement tag set.
    pub tags: Option<Vec<String>>,
    /// Replacement visibility labels.
    pub access: Option<Vec<AccessLabel>>,
}

impl FileEntryPatch {
    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.parent_id.is_none()
            && self.tags.is_none()
            && self.access.is_none()
    }

    /// Whether the patch re-parents the entry.
    pub fn moves_entry(&self) -> bool {
        self.parent_id.is_some()
    }

    /// Merge this patch into `entry`, producing the new row state.
    pub fn apply_to(&self, mut entry: FileEntry, now: DateTime<Utc>) -> FileEntry {
        if let Some(name) = &self.name {
            entry.name = name.clone();
        }
        if let Some(parent_id) = self.parent_id {
            entry.parent_id = parent_id;
        }
        if let Some(tags) = &self.tags {
            entry.tags = tags.clone();
        }
        if let Some(access) = &self.access {
            entry.access = access.clone();
        }
        entry.updated_at = now;
        entry
    }
}
