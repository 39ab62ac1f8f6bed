//! Tag repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use bespire_core::error::{AppError, ErrorKind};
use bespire_core::result::AppResult;
use bespire_entity::tag::{CreateTag, Tag};

/// Repository for the per-workspace tag vocabulary.
///
/// No uniqueness constraint exists on `(workspace_id, name)`; dedup is a
/// best-effort check-before-insert performed by the service layer.
#[derive(Debug, Clone)]
pub struct TagRepository {
    pool: PgPool,
}

impl TagRepository {
    /// Create a new tag repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List tags in a workspace, optionally filtered by a literal
    /// (case-insensitive) substring match.
    pub async fn list(&self, workspace_id: Uuid, search: Option<&str>) -> AppResult<Vec<Tag>> {
        sqlx::query_as::<_, Tag>(
            "SELECT * FROM tags \
             WHERE workspace_id = $1 \
               AND ($2::text IS NULL OR name ILIKE '%' || $2 || '%') \
             ORDER BY name ASC",
        )
        .bind(workspace_id)
        .bind(search.map(escape_like))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list tags", e))
    }

    /// Find a tag by exact (case-sensitive) name.
    pub async fn find_by_name(&self, workspace_id: Uuid, name: &str) -> AppResult<Option<Tag>> {
        sqlx::query_as::<_, Tag>("SELECT * FROM tags WHERE workspace_id = $1 AND name = $2")
            .bind(workspace_id)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find tag", e))
    }

    /// Insert a new tag.
    pub async fn create(&self, data: &CreateTag) -> AppResult<Tag> {
        sqlx::query_as::<_, Tag>(
            "INSERT INTO tags (workspace_id, name, created_by) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(data.workspace_id)
        .bind(&data.name)
        .bind(data.created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create tag", e))
    }
}

/// Escape LIKE wildcards so a search term matches itself literally.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
