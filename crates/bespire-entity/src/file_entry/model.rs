//! File entry entity model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use bespire_core::error::AppError;

use super::lifecycle::Lifecycle;

/// Discriminates files from folders within the single entry table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A binary asset with a stored URL.
    File,
    /// A container for other entries.
    Folder,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Folder => write!(f, "folder"),
        }
    }
}

impl FromStr for EntryKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "file" => Ok(Self::File),
            "folder" => Ok(Self::Folder),
            other => Err(AppError::validation(format!("Unknown entry kind '{other}'"))),
        }
    }
}

/// Visibility label attached to an entry. Only the first label is consulted
/// by consumers today; the list form is kept for forward compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessLabel {
    /// Visible to everyone in the workspace.
    All,
    /// Visible to the internal team only.
    Team,
    /// Visible to the creator only.
    Private,
}

impl fmt::Display for AccessLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "All"),
            Self::Team => write!(f, "Team"),
            Self::Private => write!(f, "Private"),
        }
    }
}

impl FromStr for AccessLabel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "All" => Ok(Self::All),
            "Team" => Ok(Self::Team),
            "Private" => Ok(Self::Private),
            other => Err(AppError::validation(format!(
                "Unknown access label '{other}'"
            ))),
        }
    }
}

/// A file or folder in a workspace tree.
///
/// Files carry `url`/`ext`/`size_bytes`, set once at upload; folders leave
/// them empty. `parent_id = None` means the entry sits at workspace root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEntry {
    /// Unique entry identifier.
    pub id: Uuid,
    /// Owning workspace; every query scopes by this.
    pub workspace_id: Uuid,
    /// Containing folder, or `None` at workspace root.
    pub parent_id: Option<Uuid>,
    /// Whether this is a file or a folder.
    pub kind: EntryKind,
    /// Display name; folder names are not unique.
    pub name: String,
    /// Object-storage URL (files only).
    pub url: Option<String>,
    /// Lowercased extension taken from the name at upload (files only).
    pub ext: Option<String>,
    /// Payload size in bytes (files only).
    pub size_bytes: Option<i64>,
    /// Workspace-vocabulary tags; order irrelevant.
    pub tags: Vec<String>,
    /// Visibility labels; the first is authoritative.
    pub access: Vec<AccessLabel>,
    /// Live or Trashed; serialized as a nullable `deleted_at`.
    #[serde(rename = "deleted_at")]
    pub lifecycle: Lifecycle,
    /// Who created the entry, when known.
    pub created_by: Option<Uuid>,
    /// When the entry was created.
    pub created_at: DateTime<Utc>,
    /// When the entry was last updated.
    pub updated_at: DateTime<Utc>,
}

impl FileEntry {
    /// Whether the entry sits at workspace root.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Whether this entry is a folder.
    pub fn is_folder(&self) -> bool {
        self.kind == EntryKind::Folder
    }

    /// The effective visibility label (first in the list, default All).
    pub fn visibility(&self) -> AccessLabel {
        self.access.first().copied().unwrap_or(AccessLabel::All)
    }

    /// Extension (lowercase) parsed from a file name, if any.
    pub fn extension_of(name: &str) -> Option<String> {
        name.rsplit('.')
            .next()
            .filter(|ext| *ext != name && !ext.is_empty())
            .map(|ext| ext.to_lowercase())
    }
}

impl sqlx::FromRow<'_, PgRow> for FileEntry {
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        let kind: String = row.try_get("kind")?;
        let kind = kind.parse().map_err(|e: AppError| sqlx::Error::ColumnDecode {
            index: "kind".into(),
            source: Box::new(e),
        })?;

        let access: Vec<String> = row.try_get("access")?;
        let access = access
            .iter()
            .map(|label| label.parse())
            .collect::<Result<Vec<AccessLabel>, AppError>>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "access".into(),
                source: Box::new(e),
            })?;

        let deleted_at: Option<DateTime<Utc>> = row.try_get("deleted_at")?;

        Ok(Self {
            id: row.try_get("id")?,
            workspace_id: row.try_get("workspace_id")?,
            parent_id: row.try_get("parent_id")?,
            kind,
            name: row.try_get("name")?,
            url: row.try_get("url")?,
            ext: row.try_get("ext")?,
            size_bytes: row.try_get("size_bytes")?,
            tags: row.try_get("tags")?,
            access,
            lifecycle: Lifecycle::from_deleted_at(deleted_at),
            created_by: row.try_get("created_by")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// Data required to create a new entry row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFileEntry {
    /// Owning workspace.
    pub workspace_id: Uuid,
    /// Containing folder (None for root).
    pub parent_id: Option<Uuid>,
    /// File or folder.
    pub kind: EntryKind,
    /// Display name.
    pub name: String,
    /// Object-storage URL (files only).
    pub url: Option<String>,
    /// Extension (files only).
    pub ext: Option<String>,
    /// Size in bytes (files only).
    pub size_bytes: Option<i64>,
    /// Initial tags.
    pub tags: Vec<String>,
    /// Initial visibility labels.
    pub access: Vec<AccessLabel>,
    /// Creator.
    pub created_by: Option<Uuid>,
}
