//! Route definitions for the Bespire HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.storage.max_upload_size_bytes as usize;

    let api_routes = Router::new()
        .merge(file_routes())
        .merge(trash_routes())
        .merge(tag_routes())
        .merge(request_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// File and folder listing, creation, updates, and uploads.
fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/files", get(handlers::files::list_entries))
        .route("/files", post(handlers::files::create_file))
        .route("/files/upload", post(handlers::upload::upload_file))
        .route("/files/{id}", get(handlers::files::get_entry))
        .route("/files/{id}", put(handlers::files::update_entry))
        .route("/files/{id}", delete(handlers::files::delete_entry))
        .route("/files/{id}/path", get(handlers::files::folder_path))
        .route("/files/{id}/name", put(handlers::files::rename_entry))
        .route("/files/{id}/tags", put(handlers::files::update_entry_tags))
        .route("/folders", post(handlers::files::create_folder))
}

/// Trash lifecycle, single and bulk.
fn trash_routes() -> Router<AppState> {
    Router::new()
        .route("/files/trash", post(handlers::trash::trash_bulk))
        .route("/files/restore", post(handlers::trash::restore_bulk))
        .route("/files/{id}/trash", post(handlers::trash::trash_entry))
        .route("/files/{id}/restore", post(handlers::trash::restore_entry))
}

/// Tag vocabulary.
fn tag_routes() -> Router<AppState> {
    Router::new()
        .route("/tags", get(handlers::tags::list_tags))
        .route("/tags", post(handlers::tags::create_tag))
}

/// Request updates and changelog.
fn request_routes() -> Router<AppState> {
    Router::new()
        .route("/requests", post(handlers::requests::create_request))
        .route("/requests/{id}", get(handlers::requests::get_request))
        .route("/requests/{id}", put(handlers::requests::update_request))
        .route(
            "/requests/{id}/changelog",
            get(handlers::requests::changelog),
        )
}

/// Health check endpoints (no auth required).
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}

/// Build CORS layer from configuration.
fn build_cors_layer(state: &AppState) -> CorsLayer {
    let origins = &state.config.server.cors_allowed_origins;

    let allow_origin = if origins.contains(&"*".to_string()) {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins.iter().filter_map(|o| o.parse().ok()))
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}
