//! Display-name lookups for read-time denormalization.
//!
//! The changelog stores assignee/brand/service ids; readers want names.
//! These queries resolve id batches in one round trip each.

use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use bespire_core::error::{AppError, ErrorKind};
use bespire_core::result::AppResult;

/// Repository for resolving ids to display names.
#[derive(Debug, Clone)]
pub struct LookupRepository {
    pool: PgPool,
}

impl LookupRepository {
    /// Create a new lookup repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Resolve user ids to display names. Unknown ids are simply absent
    /// from the result.
    pub async fn member_names(&self, ids: &[Uuid]) -> AppResult<HashMap<Uuid, String>> {
        self.names("SELECT id, display_name FROM users WHERE id = ANY($1)", ids)
            .await
    }

    /// Resolve brand ids to names.
    pub async fn brand_names(&self, ids: &[Uuid]) -> AppResult<HashMap<Uuid, String>> {
        self.names("SELECT id, name FROM brands WHERE id = ANY($1)", ids)
            .await
    }

    /// Resolve service ids to names.
    pub async fn service_names(&self, ids: &[Uuid]) -> AppResult<HashMap<Uuid, String>> {
        self.names("SELECT id, name FROM services WHERE id = ANY($1)", ids)
            .await
    }

    async fn names(&self, sql: &str, ids: &[Uuid]) -> AppResult<HashMap<Uuid, String>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(Uuid, String)> = sqlx::query_as(sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to resolve display names", e)
            })?;

        Ok(rows.into_iter().collect())
    }
}
