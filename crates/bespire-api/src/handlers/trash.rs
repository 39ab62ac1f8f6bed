//! Trash lifecycle handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;
use validator::Validate;

use bespire_core::error::AppError;
use bespire_entity::file_entry::FileEntry;
use bespire_service::file::trash::BulkOutcome;

use crate::dto::request::BulkIdsRequest;
use crate::dto::response::ApiResponse;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/files/{id}/trash
pub async fn trash_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<FileEntry>>, AppError> {
    let entry = state.trash_service.move_to_trash(&auth, id).await?;
    Ok(Json(ApiResponse::ok(entry)))
}

/// POST /api/files/{id}/restore
pub async fn restore_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<FileEntry>>, AppError> {
    let entry = state.trash_service.restore(&auth, id).await?;
    Ok(Json(ApiResponse::ok(entry)))
}

/// POST /api/files/trash
pub async fn trash_bulk(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<BulkIdsRequest>,
) -> Result<Json<ApiResponse<BulkOutcome>>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let outcome = state.trash_service.trash_many(&auth, &req.ids).await?;
    Ok(Json(ApiResponse::ok(outcome)))
}

/// POST /api/files/restore
pub async fn restore_bulk(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<BulkIdsRequest>,
) -> Result<Json<ApiResponse<BulkOutcome>>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let outcome = state.trash_service.restore_many(&auth, &req.ids).await?;
    Ok(Json(ApiResponse::ok(outcome)))
}
