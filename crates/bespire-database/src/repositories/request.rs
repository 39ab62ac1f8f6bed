//! Request repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use bespire_core::error::{AppError, ErrorKind};
use bespire_core::result::AppResult;
use bespire_entity::request::{CreateRequest, Request, RequestStatus};

/// Repository for service request rows.
#[derive(Debug, Clone)]
pub struct RequestRepository {
    pool: PgPool,
}

impl RequestRepository {
    /// Create a new request repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a request by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Request>> {
        sqlx::query_as::<_, Request>("SELECT * FROM requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find request", e))
    }

    /// Create a new request in the `pending` state.
    pub async fn create(&self, data: &CreateRequest) -> AppResult<Request> {
        sqlx::query_as::<_, Request>(
            "INSERT INTO requests \
                (workspace_id, title, status, priority, due_date, internal_due_date, \
                 assignees, brand_id, service_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
        )
        .bind(data.workspace_id)
        .bind(&data.title)
        .bind(RequestStatus::Pending.to_string())
        .bind(data.priority.to_string())
        .bind(data.due_date)
        .bind(data.internal_due_date)
        .bind(&data.assignees)
        .bind(data.brand_id)
        .bind(data.service_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create request", e))
    }

    /// Persist the mutable fields of a request.
    pub async fn update(&self, request: &Request) -> AppResult<Request> {
        sqlx::query_as::<_, Request>(
            "UPDATE requests \
             SET title = $2, status = $3, priority = $4, due_date = $5, \
                 internal_due_date = $6, assignees = $7, brand_id = $8, \
                 service_id = $9, updated_at = $10 \
             WHERE id = $1 RETURNING *",
        )
        .bind(request.id)
        .bind(&request.title)
        .bind(request.status.to_string())
        .bind(request.priority.to_string())
        .bind(request.due_date)
        .bind(request.internal_due_date)
        .bind(&request.assignees)
        .bind(request.brand_id)
        .bind(request.service_id)
        .bind(request.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update request", e))?
        .ok_or_else(|| AppError::not_found(format!("Request {} not found", request.id)))
    }
}
