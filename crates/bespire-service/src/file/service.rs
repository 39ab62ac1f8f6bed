//! Core file entry operations: listing, folder paths, creation, updates.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use bespire_core::error::AppError;
use bespire_core::result::AppResult;
use bespire_database::repositories::file_entry::FileEntryRepository;
use bespire_entity::file_entry::{
    AccessLabel, CreateFileEntry, EntryKind, FileEntry, FileEntryPatch,
};

use crate::context::Principal;
use crate::file::ensure_parent_folder;

/// Maximum accepted length for entry and tag names.
pub(crate) const MAX_NAME_LENGTH: usize = 255;

/// Handles file entry reads, folder creation, and metadata updates.
#[derive(Debug, Clone)]
pub struct FileEntryService {
    /// File entry repository.
    entries: Arc<FileEntryRepository>,
}

impl FileEntryService {
    /// Creates a new file entry service.
    pub fn new(entries: Arc<FileEntryRepository>) -> Self {
        Self { entries }
    }

    /// Lists entries under a parent, folders first.
    ///
    /// `parent_id = None` lists the workspace root. Trashed entries appear
    /// only when `include_deleted` is set.
    pub async fn list_entries(
        &self,
        workspace_id: Uuid,
        parent_id: Option<Uuid>,
        kind: Option<EntryKind>,
        include_deleted: bool,
    ) -> AppResult<Vec<FileEntry>> {
        self.entries
            .list(workspace_id, parent_id, kind, include_deleted)
            .await
    }

    /// Gets a single entry, regardless of lifecycle state.
    pub async fn get_entry(&self, id: Uuid) -> AppResult<FileEntry> {
        self.entries
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Entry not found"))
    }

    /// Resolves the ancestor chain of an entry, root first, ending with
    /// the entry itself.
    ///
    /// An unknown id yields an empty chain rather than an error; callers
    /// render it as an empty breadcrumb.
    pub async fn folder_path(&self, id: Uuid) -> AppResult<Vec<FileEntry>> {
        self.entries.find_ancestors(id).await
    }

    /// Creates a folder, optionally inside an existing live folder.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_folder(
        &self,
        principal: &Principal,
        workspace_id: Uuid,
        name: &str,
        parent_id: Option<Uuid>,
        tags: Vec<String>,
        access: Vec<AccessLabel>,
    ) -> AppResult<FileEntry> {
        let name = validated_name(name)?;

        if let Some(parent_id) = parent_id {
            ensure_parent_folder(&self.entries, workspace_id, parent_id).await?;
        }

        let folder = self
            .entries
            .create(&CreateFileEntry {
                workspace_id,
                parent_id,
                kind: EntryKind::Folder,
                name,
                url: None,
                ext: None,
                size_bytes: None,
                tags: normalized_tags(tags),
                access: if access.is_empty() {
                    vec![AccessLabel::All]
                } else {
                    access
                },
                created_by: Some(principal.user_id),
            })
            .await?;

        info!(user_id = %principal.user_id, folder_id = %folder.id, "Folder created");

        Ok(folder)
    }

    /// Records a file entry directly, without going through the upload
    /// pipeline. Used when the binary already lives in object storage.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_file(
        &self,
        principal: &Principal,
        workspace_id: Uuid,
        name: &str,
        parent_id: Option<Uuid>,
        url: Option<String>,
        size_bytes: Option<i64>,
        tags: Vec<String>,
        access: Vec<AccessLabel>,
    ) -> AppResult<FileEntry> {
        let name = validated_name(name)?;

        if let Some(parent_id) = parent_id {
            ensure_parent_folder(&self.entries, workspace_id, parent_id).await?;
        }

        let ext = FileEntry::extension_of(&name);
        let file = self
            .entries
            .create(&CreateFileEntry {
                workspace_id,
                parent_id,
                kind: EntryKind::File,
                name,
                url,
                ext,
                size_bytes,
                tags,
                access: if access.is_empty() {
                    vec![AccessLabel::All]
                } else {
                    access
                },
                created_by: Some(principal.user_id),
            })
            .await?;

        info!(user_id = %principal.user_id, file_id = %file.id, "File record created");

        Ok(file)
    }

    /// Applies a partial update to an entry.
    ///
    /// Re-parenting is validated: the target must be a live folder in the
    /// same workspace, and moving a folder under its own descendant is
    /// rejected. An empty patch returns the entry unchanged.
    pub async fn update_entry(
        &self,
        principal: &Principal,
        id: Uuid,
        patch: FileEntryPatch,
    ) -> AppResult<FileEntry> {
        let entry = self.get_entry(id).await?;

        if patch.is_empty() {
            return Ok(entry);
        }

        if let Some(name) = &patch.name {
            validated_name(name)?;
        }

        if patch.moves_entry() {
            if !entry.lifecycle.is_live() {
                return Err(AppError::conflict("Cannot move an entry that is in the trash"));
            }
            if let Some(Some(target_id)) = patch.parent_id {
                if target_id == id {
                    return Err(AppError::validation("An entry cannot be its own parent"));
                }
                ensure_parent_folder(&self.entries, entry.workspace_id, target_id).await?;
                self.ensure_not_descendant(id, target_id).await?;
            }
        }

        let updated = self
            .entries
            .update(&patch.apply_to(entry, principal.request_time))
            .await?;

        info!(user_id = %principal.user_id, entry_id = %id, "Entry updated");

        Ok(updated)
    }

    /// Renames an entry.
    pub async fn rename(&self, principal: &Principal, id: Uuid, name: &str) -> AppResult<FileEntry> {
        let name = validated_name(name)?;
        self.get_entry(id).await?;

        let renamed = self.entries.rename(id, &name).await?;

        info!(user_id = %principal.user_id, entry_id = %id, "Entry renamed");

        Ok(renamed)
    }

    /// Replaces the tag set of an entry. Blank tags are dropped.
    pub async fn update_tags(
        &self,
        principal: &Principal,
        id: Uuid,
        tags: Vec<String>,
    ) -> AppResult<FileEntry> {
        self.get_entry(id).await?;

        let tags = normalized_tags(tags);
        let updated = self.entries.set_tags(id, &tags).await?;

        info!(user_id = %principal.user_id, entry_id = %id, "Entry tags replaced");

        Ok(updated)
    }

    /// Reject a move that would place an entry under its own subtree.
    ///
    /// The target's ancestor chain containing the moved entry means the
    /// target is a descendant.
    async fn ensure_not_descendant(&self, entry_id: Uuid, target_id: Uuid) -> AppResult<()> {
        let chain = self.entries.find_ancestors(target_id).await?;
        if chain.iter().any(|ancestor| ancestor.id == entry_id) {
            return Err(AppError::validation(
                "Cannot move a folder into its own subtree",
            ));
        }
        Ok(())
    }
}

/// Trim tags and drop the ones left blank.
pub(crate) fn normalized_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Trim a name and reject empty or oversized results.
pub(crate) fn validated_name(name: &str) -> AppResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("Name cannot be empty"));
    }
    if trimmed.len() > MAX_NAME_LENGTH {
        return Err(AppError::validation(format!(
            "Name exceeds {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(trimmed.to_string())
}
