//! Request changelog repository.
//!
//! Append-only: snapshots are inserted and listed, never updated. No
//! retention policy exists; every mutation adds a row.

use sqlx::PgPool;
use uuid::Uuid;

use bespire_core::error::{AppError, ErrorKind};
use bespire_core::result::AppResult;
use bespire_entity::request::{NewRequestSnapshot, RequestSnapshot};

/// Repository for request changelog snapshots.
#[derive(Debug, Clone)]
pub struct ChangelogRepository {
    pool: PgPool,
}

impl ChangelogRepository {
    /// Create a new changelog repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a snapshot.
    pub async fn insert(&self, data: &NewRequestSnapshot) -> AppResult<RequestSnapshot> {
        sqlx::query_as::<_, RequestSnapshot>(
            "INSERT INTO request_snapshots \
                (request_id, changed_fields, title, status, priority, due_date, \
                 internal_due_date, assignees, brand_id, service_id, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) RETURNING *",
        )
        .bind(data.request_id)
        .bind(&data.changed_fields)
        .bind(&data.title)
        .bind(data.status.to_string())
        .bind(data.priority.to_string())
        .bind(data.due_date)
        .bind(data.internal_due_date)
        .bind(&data.assignees)
        .bind(data.brand_id)
        .bind(data.service_id)
        .bind(data.created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert snapshot", e))
    }

    /// List snapshots for a request, newest first.
    pub async fn list_for_request(&self, request_id: Uuid) -> AppResult<Vec<RequestSnapshot>> {
        sqlx::query_as::<_, RequestSnapshot>(
            "SELECT * FROM request_snapshots WHERE request_id = $1 ORDER BY created_at DESC",
        )
        .bind(request_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list snapshots", e))
    }
}
