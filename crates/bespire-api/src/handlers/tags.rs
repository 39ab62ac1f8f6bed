//! Tag vocabulary handlers.

use axum::Json;
use axum::extract::{Query, State};
use validator::Validate;

use bespire_core::error::AppError;
use bespire_entity::tag::Tag;

use crate::dto::request::{CreateTagRequest, ListTagsQuery};
use crate::dto::response::ApiResponse;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/tags
pub async fn list_tags(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListTagsQuery>,
) -> Result<Json<ApiResponse<Vec<Tag>>>, AppError> {
    let tags = state
        .tag_service
        .list_tags(query.workspace_id, query.search.as_deref())
        .await?;

    Ok(Json(ApiResponse::ok(tags)))
}

/// POST /api/tags
pub async fn create_tag(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateTagRequest>,
) -> Result<Json<ApiResponse<Tag>>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let tag = state
        .tag_service
        .create_tag(&auth, req.workspace_id, &req.name)
        .await?;

    Ok(Json(ApiResponse::ok(tag)))
}
