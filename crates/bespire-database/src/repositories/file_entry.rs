//! File entry repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use bespire_core::error::{AppError, ErrorKind};
use bespire_core::result::AppResult;
use bespire_entity::file_entry::{CreateFileEntry, EntryKind, FileEntry};

/// Depth cap for the ancestor walk. Legal trees never approach this; the
/// cap keeps a pre-existing `parent_id` cycle from hanging the query.
const MAX_ANCESTOR_DEPTH: i32 = 64;

/// Repository for file/folder entry CRUD and tree queries.
#[derive(Debug, Clone)]
pub struct FileEntryRepository {
    pool: PgPool,
}

impl FileEntryRepository {
    /// Create a new file entry repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an entry by ID, regardless of lifecycle state.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<FileEntry>> {
        sqlx::query_as::<_, FileEntry>("SELECT * FROM file_entries WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find entry", e))
    }

    /// List entries under a parent within a workspace.
    ///
    /// `parent_id = None` lists the workspace root. Trashed entries are
    /// excluded unless `include_deleted` is set. Folders sort before files.
    pub async fn list(
        &self,
        workspace_id: Uuid,
        parent_id: Option<Uuid>,
        kind: Option<EntryKind>,
        include_deleted: bool,
    ) -> AppResult<Vec<FileEntry>> {
        sqlx::query_as::<_, FileEntry>(
            "SELECT * FROM file_entries \
             WHERE workspace_id = $1 \
               AND (($2::uuid IS NULL AND parent_id IS NULL) OR parent_id = $2) \
               AND ($3::text IS NULL OR kind = $3) \
               AND ($4 OR deleted_at IS NULL) \
             ORDER BY kind DESC, name ASC",
        )
        .bind(workspace_id)
        .bind(parent_id)
        .bind(kind.map(|k| k.to_string()))
        .bind(include_deleted)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list entries", e))
    }

    /// Get the ancestor chain for an entry, root first, ending with the
    /// entry itself.
    ///
    /// A dangling `parent_id` (parent permanently deleted) stops the walk
    /// early rather than erroring. Returns an empty chain for an unknown id.
    pub async fn find_ancestors(&self, id: Uuid) -> AppResult<Vec<FileEntry>> {
        sqlx::query_as::<_, FileEntry>(
            "WITH RECURSIVE ancestors AS ( \
                SELECT e.*, 0 AS hops FROM file_entries e WHERE e.id = $1 \
                UNION ALL \
                SELECT p.*, a.hops + 1 FROM file_entries p \
                    INNER JOIN ancestors a ON p.id = a.parent_id \
                WHERE a.hops < $2 \
             ) SELECT * FROM ancestors ORDER BY hops DESC",
        )
        .bind(id)
        .bind(MAX_ANCESTOR_DEPTH)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find ancestors", e))
    }

    /// Create a new entry.
    pub async fn create(&self, data: &CreateFileEntry) -> AppResult<FileEntry> {
        let access: Vec<String> = data.access.iter().map(|a| a.to_string()).collect();

        sqlx::query_as::<_, FileEntry>(
            "INSERT INTO file_entries \
                (workspace_id, parent_id, kind, name, url, ext, size_bytes, tags, access, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING *",
        )
        .bind(data.workspace_id)
        .bind(data.parent_id)
        .bind(data.kind.to_string())
        .bind(&data.name)
        .bind(&data.url)
        .bind(&data.ext)
        .bind(data.size_bytes)
        .bind(&data.tags)
        .bind(&access)
        .bind(data.created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create entry", e))
    }

    /// Persist the mutable fields of an entry.
    ///
    /// `kind` is fixed at creation and `url`/`ext`/`size_bytes` are set once
    /// at upload, so neither is written here.
    pub async fn update(&self, entry: &FileEntry) -> AppResult<FileEntry> {
        let access: Vec<String> = entry.access.iter().map(|a| a.to_string()).collect();

        sqlx::query_as::<_, FileEntry>(
            "UPDATE file_entries \
             SET parent_id = $2, name = $3, tags = $4, access = $5, updated_at = $6 \
             WHERE id = $1 RETURNING *",
        )
        .bind(entry.id)
        .bind(entry.parent_id)
        .bind(&entry.name)
        .bind(&entry.tags)
        .bind(&access)
        .bind(entry.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update entry", e))?
        .ok_or_else(|| AppError::not_found(format!("Entry {} not found", entry.id)))
    }

    /// Rename an entry.
    pub async fn rename(&self, id: Uuid, new_name: &str) -> AppResult<FileEntry> {
        sqlx::query_as::<_, FileEntry>(
            "UPDATE file_entries SET name = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(new_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to rename entry", e))?
        .ok_or_else(|| AppError::not_found(format!("Entry {id} not found")))
    }

    /// Replace the tag set of an entry.
    pub async fn set_tags(&self, id: Uuid, tags: &[String]) -> AppResult<FileEntry> {
        sqlx::query_as::<_, FileEntry>(
            "UPDATE file_entries SET tags = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(tags)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to set tags", e))?
        .ok_or_else(|| AppError::not_found(format!("Entry {id} not found")))
    }

    /// Move an entry to the trash.
    ///
    /// Sets `deleted_at` and detaches the entry from its parent in the same
    /// statement; a later restore therefore lands at workspace root.
    pub async fn move_to_trash(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<FileEntry> {
        sqlx::query_as::<_, FileEntry>(
            "UPDATE file_entries \
             SET deleted_at = $2, parent_id = NULL, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to trash entry", e))?
        .ok_or_else(|| AppError::not_found(format!("Entry {id} not found")))
    }

    /// Restore an entry from the trash. `parent_id` stays as-is (root).
    pub async fn restore(&self, id: Uuid) -> AppResult<FileEntry> {
        sqlx::query_as::<_, FileEntry>(
            "UPDATE file_entries SET deleted_at = NULL, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to restore entry", e))?
        .ok_or_else(|| AppError::not_found(format!("Entry {id} not found")))
    }

    /// Permanently delete an entry row. Reachable from any lifecycle state.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM file_entries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete entry", e))?;
        Ok(result.rows_affected() > 0)
    }
}
