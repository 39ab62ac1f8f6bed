//! Multipart upload handler.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Multipart, State};
use bytes::Bytes;
use uuid::Uuid;

use bespire_core::error::AppError;
use bespire_entity::file_entry::{AccessLabel, FileEntry};
use bespire_service::file::upload::UploadRequest;

use crate::dto::response::ApiResponse;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/files/upload
///
/// Multipart form fields:
/// - `file` (required): the payload; its file name becomes the entry name
/// - `workspace_id` (required)
/// - `parent_id`: destination folder, absent for workspace root
/// - `tags`: repeatable, one tag per field
/// - `access`: repeatable visibility labels
pub async fn upload_file(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<FileEntry>>, AppError> {
    let mut workspace_id: Option<Uuid> = None;
    let mut parent_id: Option<Uuid> = None;
    let mut tags: Vec<String> = Vec::new();
    let mut access: Vec<AccessLabel> = Vec::new();
    let mut file: Option<(String, Option<String>, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Malformed multipart body: {e}")))?
    {
        match field.name().unwrap_or_default() {
            "file" => {
                let file_name = field
                    .file_name()
                    .map(String::from)
                    .ok_or_else(|| AppError::validation("File part is missing a file name"))?;
                let content_type = field.content_type().map(String::from);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Failed to read file part: {e}")))?;
                file = Some((file_name, content_type, data));
            }
            "workspace_id" => {
                workspace_id = Some(parse_text_field(field, "workspace_id").await?);
            }
            "parent_id" => {
                parent_id = Some(parse_text_field(field, "parent_id").await?);
            }
            "tags" => {
                let tag = read_text(field, "tags").await?;
                if !tag.trim().is_empty() {
                    tags.push(tag.trim().to_string());
                }
            }
            "access" => {
                let label = read_text(field, "access").await?;
                access.push(label.trim().parse()?);
            }
            _ => {}
        }
    }

    let workspace_id =
        workspace_id.ok_or_else(|| AppError::validation("workspace_id field is required"))?;
    let (file_name, content_type, data) =
        file.ok_or_else(|| AppError::validation("file field is required"))?;

    let entry = state
        .upload_service
        .upload_file(
            &auth,
            UploadRequest {
                workspace_id,
                parent_id,
                file_name,
                content_type,
                data,
                tags,
                access,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(entry)))
}

async fn read_text(field: axum::extract::multipart::Field<'_>, name: &str) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::validation(format!("Failed to read {name} field: {e}")))
}

async fn parse_text_field<T>(
    field: axum::extract::multipart::Field<'_>,
    name: &str,
) -> Result<T, AppError>
where
    T: FromStr,
{
    read_text(field, name)
        .await?
        .trim()
        .parse::<T>()
        .map_err(|_| AppError::validation(format!("Invalid {name} field")))
}
