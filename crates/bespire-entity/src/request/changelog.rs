//! Append-only request changelog snapshots.
//!
//! Each mutation of a request records the names of the fields that changed
//! together with the post-change values of a fixed field subset. Snapshots
//! are never updated or compacted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use bespire_core::error::AppError;

use super::model::{Request, RequestPriority, RequestStatus};

/// Compute which tracked fields differ between two request states.
///
/// Pure; the service calls this with the pre- and post-patch rows. Assignee
/// order is not significant to the comparison.
pub fn changed_fields(before: &Request, after: &Request) -> Vec<String> {
    let mut changed = Vec::new();

    if before.title != after.title {
        changed.push("title".to_string());
    }
    if before.status != after.status {
        changed.push("status".to_string());
    }
    if before.priority != after.priority {
        changed.push("priority".to_string());
    }
    if before.due_date != after.due_date {
        changed.push("due_date".to_string());
    }
    if before.internal_due_date != after.internal_due_date {
        changed.push("internal_due_date".to_string());
    }
    {
        let mut a = before.assignees.clone();
        let mut b = after.assignees.clone();
        a.sort();
        b.sort();
        if a != b {
            changed.push("assignees".to_string());
        }
    }
    if before.brand_id != after.brand_id {
        changed.push("brand_id".to_string());
    }
    if before.service_id != after.service_id {
        changed.push("service_id".to_string());
    }

    changed
}

/// A stored changelog snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestSnapshot {
    /// Unique snapshot identifier.
    pub id: Uuid,
    /// The request this snapshot belongs to.
    pub request_id: Uuid,
    /// Names of the fields the mutation changed.
    pub changed_fields: Vec<String>,
    /// Post-change title.
    pub title: String,
    /// Post-change status.
    pub status: RequestStatus,
    /// Post-change priority.
    pub priority: RequestPriority,
    /// Post-change client due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Post-change internal deadline.
    pub internal_due_date: Option<DateTime<Utc>>,
    /// Post-change assignee set.
    pub assignees: Vec<Uuid>,
    /// Post-change brand.
    pub brand_id: Option<Uuid>,
    /// Post-change service line.
    pub service_id: Option<Uuid>,
    /// Who performed the mutation.
    pub created_by: Option<Uuid>,
    /// When the snapshot was recorded.
    pub created_at: DateTime<Utc>,
}

impl sqlx::FromRow<'_, PgRow> for RequestSnapshot {
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        let status: String = row.try_get("status")?;
        let status = status
            .parse()
            .map_err(|e: AppError| sqlx::Error::ColumnDecode {
                index: "status".into(),
                source: Box::new(e),
            })?;
        let priority: String = row.try_get("priority")?;
        let priority = priority
            .parse()
            .map_err(|e: AppError| sqlx::Error::ColumnDecode {
                index: "priority".into(),
                source: Box::new(e),
            })?;

        Ok(Self {
            id: row.try_get("id")?,
            request_id: row.try_get("request_id")?,
            changed_fields: row.try_get("changed_fields")?,
            title: row.try_get("title")?,
            status,
            priority,
            due_date: row.try_get("due_date")?,
            internal_due_date: row.try_get("internal_due_date")?,
            assignees: row.try_get("assignees")?,
            brand_id: row.try_get("brand_id")?,
            service_id: row.try_get("service_id")?,
            created_by: row.try_get("created_by")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

/// Data required to insert a new snapshot.
#[derive(Debug, Clone)]
pub struct NewRequestSnapshot {
    /// The request this snapshot belongs to.
    pub request_id: Uuid,
    /// Names of the fields that changed.
    pub changed_fields: Vec<String>,
    /// Post-change title.
    pub title: String,
    /// Post-change status.
    pub status: RequestStatus,
    /// Post-change priority.
    pub priority: RequestPriority,
    /// Post-change client due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Post-change internal deadline.
    pub internal_due_date: Option<DateTime<Utc>>,
    /// Post-change assignee set.
    pub assignees: Vec<Uuid>,
    /// Post-change brand.
    pub brand_id: Option<Uuid>,
    /// Post-change service line.
    pub service_id: Option<Uuid>,
    /// Who performed the mutation.
    pub created_by: Option<Uuid>,
}

impl NewRequestSnapshot {
    /// Capture the post-change state of `request`.
    pub fn capture(request: &Request, changed_fields: Vec<String>, actor: Option<Uuid>) -> Self {
        Self {
            request_id: request.id,
            changed_fields,
            title: request.title.clone(),
            status: request.status,
            priority: request.priority,
            due_date: request.due_date,
            internal_due_date: request.internal_due_date,
            assignees: request.assignees.clone(),
            brand_id: request.brand_id,
            service_id: request.service_id,
            created_by: actor,
        }
    }
}
