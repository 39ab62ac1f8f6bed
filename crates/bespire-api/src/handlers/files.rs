//! File entry handlers: listing, paths, folder creation, updates.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;
use validator::Validate;

use bespire_core::error::AppError;
use bespire_entity::file_entry::{FileEntry, FileEntryPatch};

use crate::dto::request::{
    CreateFileRequest, CreateFolderRequest, ListEntriesQuery, RenameRequest, UpdateEntryRequest,
    UpdateTagsRequest,
};
use crate::dto::response::{ApiResponse, DeleteResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/files
pub async fn list_entries(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListEntriesQuery>,
) -> Result<Json<ApiResponse<Vec<FileEntry>>>, AppError> {
    let entries = state
        .file_service
        .list_entries(
            query.workspace_id,
            query.parent_id,
            query.kind,
            query.include_deleted,
        )
        .await?;

    Ok(Json(ApiResponse::ok(entries)))
}

/// GET /api/files/{id}
pub async fn get_entry(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<FileEntry>>, AppError> {
    let entry = state.file_service.get_entry(id).await?;
    Ok(Json(ApiResponse::ok(entry)))
}

/// GET /api/files/{id}/path
pub async fn folder_path(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<FileEntry>>>, AppError> {
    let chain = state.file_service.folder_path(id).await?;
    Ok(Json(ApiResponse::ok(chain)))
}

/// POST /api/folders
pub async fn create_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateFolderRequest>,
) -> Result<Json<ApiResponse<FileEntry>>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let folder = state
        .file_service
        .create_folder(
            &auth,
            req.workspace_id,
            &req.name,
            req.parent_id,
            req.tags,
            req.access,
        )
        .await?;

    Ok(Json(ApiResponse::ok(folder)))
}

/// POST /api/files
pub async fn create_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateFileRequest>,
) -> Result<Json<ApiResponse<FileEntry>>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let file = state
        .file_service
        .create_file(
            &auth,
            req.workspace_id,
            &req.name,
            req.parent_id,
            req.url,
            req.size_bytes,
            req.tags,
            req.access,
        )
        .await?;

    Ok(Json(ApiResponse::ok(file)))
}

/// PUT /api/files/{id}
pub async fn update_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateEntryRequest>,
) -> Result<Json<ApiResponse<FileEntry>>, AppError> {
    let patch = FileEntryPatch {
        name: req.name,
        parent_id: req.parent_id,
        tags: req.tags,
        access: req.access,
    };

    let entry = state.file_service.update_entry(&auth, id, patch).await?;
    Ok(Json(ApiResponse::ok(entry)))
}

/// PUT /api/files/{id}/name
pub async fn rename_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<RenameRequest>,
) -> Result<Json<ApiResponse<FileEntry>>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let entry = state.file_service.rename(&auth, id, &req.name).await?;
    Ok(Json(ApiResponse::ok(entry)))
}

/// PUT /api/files/{id}/tags
pub async fn update_entry_tags(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTagsRequest>,
) -> Result<Json<ApiResponse<FileEntry>>, AppError> {
    let entry = state.file_service.update_tags(&auth, id, req.tags).await?;
    Ok(Json(ApiResponse::ok(entry)))
}

/// DELETE /api/files/{id}
pub async fn delete_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DeleteResponse>>, AppError> {
    let deleted = state.trash_service.delete_permanent(&auth, id).await?;
    Ok(Json(ApiResponse::ok(DeleteResponse { deleted })))
}
