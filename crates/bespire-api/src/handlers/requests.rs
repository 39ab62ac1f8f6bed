//! Request update and changelog handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;
use validator::Validate;

use bespire_core::error::AppError;
use bespire_entity::request::{CreateRequest, Request, RequestPatch, RequestPriority};
use bespire_service::request::service::ChangelogEntryView;

use crate::dto::request::{CreateRequestBody, UpdateRequestBody};
use crate::dto::response::ApiResponse;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/requests
pub async fn create_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateRequestBody>,
) -> Result<Json<ApiResponse<Request>>, AppError> {
    body.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let request = state
        .request_service
        .create_request(
            &auth,
            CreateRequest {
                workspace_id: body.workspace_id,
                title: body.title,
                priority: body.priority.unwrap_or(RequestPriority::Medium),
                due_date: body.due_date,
                internal_due_date: body.internal_due_date,
                assignees: body.assignees,
                brand_id: body.brand_id,
                service_id: body.service_id,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(request)))
}

/// GET /api/requests/{id}
pub async fn get_request(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Request>>, AppError> {
    let request = state.request_service.get_request(id).await?;
    Ok(Json(ApiResponse::ok(request)))
}

/// PUT /api/requests/{id}
pub async fn update_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateRequestBody>,
) -> Result<Json<ApiResponse<Request>>, AppError> {
    if let Some(title) = &body.title {
        if title.trim().is_empty() {
            return Err(AppError::validation("Title cannot be empty"));
        }
    }

    let patch = RequestPatch {
        title: body.title,
        status: body.status,
        priority: body.priority,
        due_date: body.due_date,
        internal_due_date: body.internal_due_date,
        assignees: body.assignees,
        brand_id: body.brand_id,
        service_id: body.service_id,
    };

    let request = state.request_service.update_request(&auth, id, patch).await?;
    Ok(Json(ApiResponse::ok(request)))
}

/// GET /api/requests/{id}/changelog
pub async fn changelog(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<ChangelogEntryView>>>, AppError> {
    let entries = state.request_service.changelog(id).await?;
    Ok(Json(ApiResponse::ok(entries)))
}
