//! Request DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use uuid::Uuid;
use validator::Validate;

use bespire_entity::file_entry::{AccessLabel, EntryKind};
use bespire_entity::request::{RequestPriority, RequestStatus};

/// Distinguishes an absent field from an explicit `null`.
///
/// Serde collapses both to `None` by default; wrapping the field in
/// `Option<Option<T>>` with this deserializer keeps `null` as `Some(None)`
/// so a PATCH-style body can clear nullable columns.
pub fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(de).map(Some)
}

/// Query parameters for GET /api/files.
#[derive(Debug, Clone, Deserialize)]
pub struct ListEntriesQuery {
    /// Workspace to list.
    pub workspace_id: Uuid,
    /// Parent folder; absent lists the workspace root.
    pub parent_id: Option<Uuid>,
    /// Restrict to files or folders.
    pub kind: Option<EntryKind>,
    /// Include trashed entries.
    #[serde(default)]
    pub include_deleted: bool,
}

/// Body for POST /api/folders.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateFolderRequest {
    /// Owning workspace.
    pub workspace_id: Uuid,
    /// Folder name.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Parent folder; absent creates at workspace root.
    pub parent_id: Option<Uuid>,
    /// Initial tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Visibility labels; defaults to All.
    #[serde(default)]
    pub access: Vec<AccessLabel>,
}

/// Body for POST /api/files.
///
/// Records a file whose binary already lives in object storage; the usual
/// path is the multipart upload endpoint.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateFileRequest {
    /// Owning workspace.
    pub workspace_id: Uuid,
    /// File name; the extension is derived from it.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Parent folder; absent creates at workspace root.
    pub parent_id: Option<Uuid>,
    /// Object-storage URL.
    pub url: Option<String>,
    /// Payload size in bytes.
    pub size_bytes: Option<i64>,
    /// Initial tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Visibility labels; defaults to All.
    #[serde(default)]
    pub access: Vec<AccessLabel>,
}

/// Body for PUT /api/files/{id}.
///
/// `parent_id: null` moves the entry to workspace root; omitting the field
/// leaves the parent unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEntryRequest {
    /// New display name.
    pub name: Option<String>,
    /// New parent; `null` moves to root.
    #[serde(default, deserialize_with = "double_option")]
    pub parent_id: Option<Option<Uuid>>,
    /// Replacement tag set.
    pub tags: Option<Vec<String>>,
    /// Replacement visibility labels.
    pub access: Option<Vec<AccessLabel>>,
}

/// Body for PUT /api/files/{id}/name.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RenameRequest {
    /// New display name.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
}

/// Body for PUT /api/files/{id}/tags.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTagsRequest {
    /// Replacement tag set.
    pub tags: Vec<String>,
}

/// Body for the bulk trash/restore endpoints.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BulkIdsRequest {
    /// Entry ids to process.
    #[validate(length(min = 1, max = 100))]
    pub ids: Vec<Uuid>,
}

/// Query parameters for GET /api/tags.
#[derive(Debug, Clone, Deserialize)]
pub struct ListTagsQuery {
    /// Workspace to list.
    pub workspace_id: Uuid,
    /// Substring filter.
    pub search: Option<String>,
}

/// Body for POST /api/tags.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTagRequest {
    /// Owning workspace.
    pub workspace_id: Uuid,
    /// Tag name.
    #[validate(length(min = 1, max = 255))]
    pub name: String,
}

/// Body for POST /api/requests.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRequestBody {
    /// Owning workspace.
    pub workspace_id: Uuid,
    /// Request title.
    #[validate(length(min = 1, max = 500))]
    pub title: String,
    /// Initial priority; defaults to medium.
    pub priority: Option<RequestPriority>,
    /// Client-facing due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Internal team deadline.
    pub internal_due_date: Option<DateTime<Utc>>,
    /// Assigned team members.
    #[serde(default)]
    pub assignees: Vec<Uuid>,
    /// Brand the work is for.
    pub brand_id: Option<Uuid>,
    /// Service line.
    pub service_id: Option<Uuid>,
}

/// Body for PUT /api/requests/{id}.
///
/// Nullable fields use `null` to clear and omission to leave unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRequestBody {
    /// New title.
    pub title: Option<String>,
    /// New workflow state.
    pub status: Option<RequestStatus>,
    /// New priority.
    pub priority: Option<RequestPriority>,
    /// New client due date; `null` clears it.
    #[serde(default, deserialize_with = "double_option")]
    pub due_date: Option<Option<DateTime<Utc>>>,
    /// New internal deadline; `null` clears it.
    #[serde(default, deserialize_with = "double_option")]
    pub internal_due_date: Option<Option<DateTime<Utc>>>,
    /// Replacement assignee set.
    pub assignees: Option<Vec<Uuid>>,
    /// New brand; `null` clears it.
    #[serde(default, deserialize_with = "double_option")]
    pub brand_id: Option<Option<Uuid>>,
    /// New service line; `null` clears it.
    #[serde(default, deserialize_with = "double_option")]
    pub service_id: Option<Option<Uuid>>,
}
