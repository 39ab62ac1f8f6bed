//! Integration tests for the tag vocabulary.

use http::StatusCode;
use serde_json::json;

use bespire_database::repositories::tag::TagRepository;
use bespire_entity::tag::CreateTag;

use crate::helpers::TestApp;

#[tokio::test]
async fn create_tag_reuses_exact_name() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let first = app
        .request(
            "POST",
            "/api/tags",
            Some(json!({ "workspace_id": app.workspace_id, "name": "Logo" })),
            Some(app.user_id),
        )
        .await;
    assert_eq!(first.status, StatusCode::OK);

    let second = app
        .request(
            "POST",
            "/api/tags",
            Some(json!({ "workspace_id": app.workspace_id, "name": "  Logo " })),
            Some(app.user_id),
        )
        .await;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(first.data_id(), second.data_id());
}

#[tokio::test]
async fn tag_names_are_case_sensitive() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let upper = app
        .request(
            "POST",
            "/api/tags",
            Some(json!({ "workspace_id": app.workspace_id, "name": "Logo" })),
            Some(app.user_id),
        )
        .await;
    let lower = app
        .request(
            "POST",
            "/api/tags",
            Some(json!({ "workspace_id": app.workspace_id, "name": "logo" })),
            Some(app.user_id),
        )
        .await;

    assert_ne!(upper.data_id(), lower.data_id());
}

#[tokio::test]
async fn listing_filters_by_substring() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    for name in ["brand-refresh", "logo", "rebrand"] {
        app.request(
            "POST",
            "/api/tags",
            Some(json!({ "workspace_id": app.workspace_id, "name": name })),
            Some(app.user_id),
        )
        .await;
    }

    let response = app
        .request(
            "GET",
            &format!("/api/tags?workspace_id={}&search=brand", app.workspace_id),
            None,
            Some(app.user_id),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let names: Vec<&str> = response
        .data()
        .as_array()
        .expect("data is an array")
        .iter()
        .filter_map(|t| t["name"].as_str())
        .collect();
    assert_eq!(names, vec!["brand-refresh", "rebrand"]);
}

#[tokio::test]
async fn search_wildcards_match_literally() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    for name in ["q_3", "qx3"] {
        app.request(
            "POST",
            "/api/tags",
            Some(json!({ "workspace_id": app.workspace_id, "name": name })),
            Some(app.user_id),
        )
        .await;
    }

    let response = app
        .request(
            "GET",
            &format!("/api/tags?workspace_id={}&search=q_3", app.workspace_id),
            None,
            Some(app.user_id),
        )
        .await;

    let names: Vec<&str> = response
        .data()
        .as_array()
        .expect("data is an array")
        .iter()
        .filter_map(|t| t["name"].as_str())
        .collect();
    assert_eq!(names, vec!["q_3"]);
}

#[tokio::test]
async fn concurrent_creates_can_duplicate_a_name() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    // Two callers can pass the check-before-insert window together; with
    // no unique constraint on (workspace_id, name), both inserts land.
    let repo = TagRepository::new(app.db_pool.clone());
    let data = CreateTag {
        workspace_id: app.workspace_id,
        name: "logo".to_string(),
        created_by: None,
    };

    let (first, second) = tokio::join!(repo.create(&data), repo.create(&data));
    let first = first.expect("first insert");
    let second = second.expect("second insert");
    assert_ne!(first.id, second.id);

    let listing = app
        .request(
            "GET",
            &format!("/api/tags?workspace_id={}", app.workspace_id),
            None,
            Some(app.user_id),
        )
        .await;
    let duplicates = listing
        .data()
        .as_array()
        .expect("data is an array")
        .iter()
        .filter(|t| t["name"] == "logo")
        .count();
    assert_eq!(duplicates, 2);
}

#[tokio::test]
async fn blank_tag_name_is_rejected() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let response = app
        .request(
            "POST",
            "/api/tags",
            Some(json!({ "workspace_id": app.workspace_id, "name": "" })),
            Some(app.user_id),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
