//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;
use uuid::Uuid;

use bespire_api::router::build_router;
use bespire_api::state::AppState;
use bespire_core::config::{AppConfig, DatabaseConfig, StorageConfig};
use bespire_storage::providers::memory::MemoryObjectStore;

/// Test application context.
pub struct TestApp {
    /// The Axum router for making test requests.
    pub router: Router,
    /// Database pool for direct queries.
    pub db_pool: PgPool,
    /// A seeded user for authenticated requests.
    pub user_id: Uuid,
    /// A workspace id shared by seeded data.
    pub workspace_id: Uuid,
}

impl TestApp {
    /// Create a test application backed by a real database.
    ///
    /// Returns `None` when `BESPIRE_TEST_DATABASE_URL` is unset so the
    /// suite degrades gracefully on machines without PostgreSQL.
    pub async fn try_new() -> Option<Self> {
        let url = std::env::var("BESPIRE_TEST_DATABASE_URL").ok()?;

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(&url)
            .await
            .expect("Failed to connect to test database");

        bespire_database::migration::run_migrations(&db_pool)
            .await
            .expect("Failed to run migrations");

        Self::clean_database(&db_pool).await;

        let user_id = Uuid::new_v4();
        sqlx::query("INSERT INTO users (id, display_name) VALUES ($1, $2)")
            .bind(user_id)
            .bind("Test User")
            .execute(&db_pool)
            .await
            .expect("Failed to seed test user");

        let state = AppState::new(
            test_config(&url),
            db_pool.clone(),
            Arc::new(MemoryObjectStore::new()),
        );

        Some(Self {
            router: build_router(state),
            db_pool,
            user_id,
            workspace_id: Uuid::new_v4(),
        })
    }

    /// Create a test application without a database connection.
    ///
    /// The pool is lazy and never connects; only routes that skip the
    /// database (health, auth rejection) are exercised against it.
    pub fn lazy() -> Self {
        let url = "postgres://localhost:5432/bespire_unused";
        let db_pool = PgPoolOptions::new()
            .connect_lazy(url)
            .expect("Failed to build lazy pool");

        let state = AppState::new(
            test_config(url),
            db_pool.clone(),
            Arc::new(MemoryObjectStore::new()),
        );

        Self {
            router: build_router(state),
            db_pool,
            user_id: Uuid::new_v4(),
            workspace_id: Uuid::new_v4(),
        }
    }

    /// Clean all test data from the database.
    async fn clean_database(pool: &PgPool) {
        let tables = [
            "request_snapshots",
            "requests",
            "file_entries",
            "tags",
            "brands",
            "services",
            "users",
        ];

        for table in &tables {
            let query = format!("DELETE FROM {table}");
            let _ = sqlx::query(&query).execute(pool).await;
        }
    }

    /// Make a JSON request to the test app.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        user: Option<Uuid>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        self.request_raw(method, path, "application/json", body_str.into_bytes(), user)
            .await
    }

    /// Make a request with an arbitrary content type and raw body.
    pub async fn request_raw(
        &self,
        method: &str,
        path: &str,
        content_type: &str,
        body: Vec<u8>,
        user: Option<Uuid>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", content_type);

        if let Some(user) = user {
            req = req.header("x-user-id", user.to_string());
        }

        let req = req.body(Body::from(body)).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Create a folder via the API and return its id.
    pub async fn create_folder(&self, name: &str, parent_id: Option<Uuid>) -> Uuid {
        let body = serde_json::json!({
            "workspace_id": self.workspace_id,
            "name": name,
            "parent_id": parent_id,
        });

        let response = self
            .request("POST", "/api/folders", Some(body), Some(self.user_id))
            .await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Folder create failed: {:?}",
            response.body
        );

        response.data_id()
    }
}

/// Configuration pointing at the given database with in-memory storage.
fn test_config(url: &str) -> AppConfig {
    AppConfig {
        server: Default::default(),
        database: DatabaseConfig {
            url: url.to_string(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout_seconds: 5,
            idle_timeout_seconds: 60,
        },
        storage: StorageConfig {
            provider: "memory".to_string(),
            ..Default::default()
        },
        logging: Default::default(),
    }
}

/// Response from a test request.
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Parsed JSON body.
    pub body: Value,
}

impl TestResponse {
    /// The `data` object of a success envelope.
    pub fn data(&self) -> &Value {
        self.body.get("data").expect("Response has no data field")
    }

    /// The `data.id` field parsed as a UUID.
    pub fn data_id(&self) -> Uuid {
        self.data()
            .get("id")
            .and_then(|v| v.as_str())
            .and_then(|s| s.parse().ok())
            .expect("Response data has no id")
    }
}
