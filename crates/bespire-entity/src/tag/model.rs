//! Tag entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A tag in a workspace's vocabulary.
///
/// Names are expected to be unique per workspace, but the store does not
/// enforce it; two concurrent creates can race in duplicates.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tag {
    /// Unique tag identifier.
    pub id: Uuid,
    /// Owning workspace.
    pub workspace_id: Uuid,
    /// Tag name, matched case-sensitively on reuse.
    pub name: String,
    /// Who created the tag, when known.
    pub created_by: Option<Uuid>,
    /// When the tag was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTag {
    /// Owning workspace.
    pub workspace_id: Uuid,
    /// Tag name.
    pub name: String,
    /// Creator.
    pub created_by: Option<Uuid>,
}
