//! Application state shared across all handlers.

use std::sync::Arc;

use sqlx::PgPool;

use bespire_core::config::AppConfig;
use bespire_core::traits::ObjectStore;

use bespire_database::repositories::changelog::ChangelogRepository;
use bespire_database::repositories::file_entry::FileEntryRepository;
use bespire_database::repositories::lookup::LookupRepository;
use bespire_database::repositories::request::RequestRepository;
use bespire_database::repositories::tag::TagRepository;

use bespire_service::file::service::FileEntryService;
use bespire_service::file::trash::TrashService;
use bespire_service::file::upload::UploadService;
use bespire_service::request::service::RequestService;
use bespire_service::tag::service::TagService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,
    /// Object store provider.
    pub object_store: Arc<dyn ObjectStore>,

    /// File entry repository.
    pub file_entry_repo: Arc<FileEntryRepository>,
    /// Tag repository.
    pub tag_repo: Arc<TagRepository>,
    /// Request repository.
    pub request_repo: Arc<RequestRepository>,
    /// Changelog repository.
    pub changelog_repo: Arc<ChangelogRepository>,
    /// Display-name lookup repository.
    pub lookup_repo: Arc<LookupRepository>,

    /// File entry service.
    pub file_service: Arc<FileEntryService>,
    /// Trash lifecycle service.
    pub trash_service: Arc<TrashService>,
    /// Upload service.
    pub upload_service: Arc<UploadService>,
    /// Tag service.
    pub tag_service: Arc<TagService>,
    /// Request service.
    pub request_service: Arc<RequestService>,
}

impl AppState {
    /// Wires repositories and services over a connected pool.
    pub fn new(config: AppConfig, db_pool: PgPool, object_store: Arc<dyn ObjectStore>) -> Self {
        let file_entry_repo = Arc::new(FileEntryRepository::new(db_pool.clone()));
        let tag_repo = Arc::new(TagRepository::new(db_pool.clone()));
        let request_repo = Arc::new(RequestRepository::new(db_pool.clone()));
        let changelog_repo = Arc::new(ChangelogRepository::new(db_pool.clone()));
        let lookup_repo = Arc::new(LookupRepository::new(db_pool.clone()));

        let file_service = Arc::new(FileEntryService::new(Arc::clone(&file_entry_repo)));
        let trash_service = Arc::new(TrashService::new(Arc::clone(&file_entry_repo)));
        let upload_service = Arc::new(UploadService::new(
            Arc::clone(&file_entry_repo),
            Arc::clone(&object_store),
            config.storage.max_upload_size_bytes,
        ));
        let tag_service = Arc::new(TagService::new(Arc::clone(&tag_repo)));
        let request_service = Arc::new(RequestService::new(
            Arc::clone(&request_repo),
            Arc::clone(&changelog_repo),
            Arc::clone(&lookup_repo),
        ));

        Self {
            config: Arc::new(config),
            db_pool,
            object_store,
            file_entry_repo,
            tag_repo,
            request_repo,
            changelog_repo,
            lookup_repo,
            file_service,
            trash_service,
            upload_service,
            tag_service,
            request_service,
        }
    }
}
