//! Service request entity model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use bespire_core::error::AppError;

/// Workflow state of a request. The workflow is fixed; requests only move
/// between these states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Submitted, not yet picked up.
    Pending,
    /// Being worked on by the team.
    InProgress,
    /// Waiting on client review.
    NeedsReview,
    /// Delivered and accepted.
    Completed,
    /// Abandoned by the client or the team.
    Cancelled,
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::NeedsReview => "needs_review",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        };
        write!(f, "{s}")
    }
}

impl FromStr for RequestStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "needs_review" => Ok(Self::NeedsReview),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(AppError::validation(format!(
                "Unknown request status '{other}'"
            ))),
        }
    }
}

/// Request priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestPriority {
    /// No rush.
    Low,
    /// Default.
    Medium,
    /// Ahead of the queue.
    High,
    /// Drop everything.
    Urgent,
}

impl fmt::Display for RequestPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        };
        write!(f, "{s}")
    }
}

impl FromStr for RequestPriority {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            other => Err(AppError::validation(format!(
                "Unknown request priority '{other}'"
            ))),
        }
    }
}

/// A client service request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    /// Unique request identifier.
    pub id: Uuid,
    /// Owning workspace.
    pub workspace_id: Uuid,
    /// Request title.
    pub title: String,
    /// Workflow state.
    pub status: RequestStatus,
    /// Priority.
    pub priority: RequestPriority,
    /// Client-facing due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Internal team deadline.
    pub internal_due_date: Option<DateTime<Utc>>,
    /// Assigned team members.
    pub assignees: Vec<Uuid>,
    /// Brand the work is for.
    pub brand_id: Option<Uuid>,
    /// Service line the request falls under.
    pub service_id: Option<Uuid>,
    /// When the request was created.
    pub created_at: DateTime<Utc>,
    /// When the request was last updated.
    pub updated_at: DateTime<Utc>,
}

impl sqlx::FromRow<'_, PgRow> for Request {
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
            workspace_id: row.try_get("workspace_id")?,
            title: row.try_get("title")?,
            status,
            priority,
            due_date: row.try_get("due_date")?,
            internal_due_date: row.try_get("internal_due_date")?,
            assignees: row.try_get("assignees")?,
            brand_id: row.try_get("brand_id")?,
            service_id: row.try_get("service_id")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// Data required to create a new request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRequest {
    /// Owning workspace.
    pub workspace_id: Uuid,
    /// Request title.
    pub title: String,
    /// Initial priority.
    pub priority: RequestPriority,
    /// Client-facing due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Internal team deadline.
    pub internal_due_date: Option<DateTime<Utc>>,
    /// Assigned team members.
    pub assignees: Vec<Uuid>,
    /// Brand the work is for.
    pub brand_id: Option<Uuid>,
    /// Service line the request falls under.
    pub service_id: Option<Uuid>,
}

/// Optional-field patch applied to an existing [`Request`].
///
/// Nullable fields use the double-`Option` convention: the outer `None`
/// leaves the field untouched, `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct RequestPatch {
    /// New title.
    pub title: Option<String>,
    /// New workflow state.
    pub status: Option<RequestStatus>,
    /// New priority.
    pub priority: Option<RequestPriority>,
    /// New client due date; `Some(None)` clears it.
    pub due_date: Option<Option<DateTime<Utc>>>,
    /// New internal deadline; `Some(None)` clears it.
    pub internal_due_date: Option<Option<DateTime<Utc>>>,
    /// Replacement assignee set.
    pub assignees: Option<Vec<Uuid>>,
    /// New brand; `Some(None)` clears it.
    pub brand_id: Option<Option<Uuid>>,
    /// New service line; `Some(None)` clears it.
    pub service_id: Option<Option<Uuid>>,
}

impl RequestPatch {
    /// Merge this patch into `request`, producing the new row state.
    pub fn apply_to(&self, mut request: Request, now: DateTime<Utc>) -> Request {
        if let Some(title) = &self.title {
            request.title = title.clone();
        }
        if let Some(status) = self.status {
            request.status = status;
        }
        if let Some(priority) = self.priority {
            request.priority = priority;
        }
        if let Some(due_date) = self.due_date {
            request.due_date = due_date;
        }
        if let Some(internal_due_date) = self.internal_due_date {
            request.internal_due_date = internal_due_date;
        }
        if let Some(assignees) = &self.assignees {
            request.assignees = assignees.clone();
        }
        if let Some(brand_id) = self.brand_id {
            request.brand_id = brand_id;
        }
        if let Some(service_id) = self.service_id {
            request.service_id = service_id;
        }
        request.updated_at = now;
        request
    }
}
