//! Integration tests for request updates and the changelog.

use http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use crate::helpers::TestApp;

async fn create_request(app: &TestApp, title: &str) -> Uuid {
    let response = app
        .request(
            "POST",
            "/api/requests",
            Some(json!({
                "workspace_id": app.workspace_id,
                "title": title,
                "priority": "medium",
            })),
            Some(app.user_id),
        )
        .await;
    assert_eq!(
        response.status,
        StatusCode::OK,
        "Request create failed: {:?}",
        response.body
    );
    response.data_id()
}

#[tokio::test]
async fn update_appends_changelog_snapshot() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let id = create_request(&app, "Landing page refresh").await;

    let response = app
        .request(
            "PUT",
            &format!("/api/requests/{id}"),
            Some(json!({ "status": "in_progress", "priority": "high" })),
            Some(app.user_id),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["status"], "in_progress");

    let changelog = app
        .request(
            "GET",
            &format!("/api/requests/{id}/changelog"),
            None,
            Some(app.user_id),
        )
        .await;
    assert_eq!(changelog.status, StatusCode::OK);

    let entries = changelog.data().as_array().expect("data is an array");
    assert_eq!(entries.len(), 2);

    // Newest first: the update precedes the creation snapshot.
    assert_eq!(entries[0]["changed_fields"], json!(["status", "priority"]));
    assert_eq!(entries[0]["status"], "in_progress");
    assert_eq!(entries[1]["changed_fields"], json!(["created"]));

    // Actor resolved through the users table.
    assert_eq!(entries[0]["actor"]["name"], "Test User");
}

#[tokio::test]
async fn noop_update_records_nothing() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let id = create_request(&app, "Social kit").await;

    let response = app
        .request(
            "PUT",
            &format!("/api/requests/{id}"),
            Some(json!({ "status": "pending" })),
            Some(app.user_id),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let changelog = app
        .request(
            "GET",
            &format!("/api/requests/{id}/changelog"),
            None,
            Some(app.user_id),
        )
        .await;
    assert_eq!(
        changelog.data().as_array().map(Vec::len),
        Some(1),
        "No-op update must not add a snapshot"
    );
}

#[tokio::test]
async fn null_clears_due_date() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let id = create_request(&app, "Banner set").await;

    let set = app
        .request(
            "PUT",
            &format!("/api/requests/{id}"),
            Some(json!({ "due_date": "2026-09-15T12:00:00Z" })),
            Some(app.user_id),
        )
        .await;
    assert_eq!(set.status, StatusCode::OK);
    assert!(!set.data()["due_date"].is_null());

    let cleared = app
        .request(
            "PUT",
            &format!("/api/requests/{id}"),
            Some(json!({ "due_date": null })),
            Some(app.user_id),
        )
        .await;
    assert_eq!(cleared.status, StatusCode::OK);
    assert!(cleared.data()["due_date"].is_null());

    let changelog = app
        .request(
            "GET",
            &format!("/api/requests/{id}/changelog"),
            None,
            Some(app.user_id),
        )
        .await;
    let entries = changelog.data().as_array().expect("data is an array");
    assert_eq!(entries[0]["changed_fields"], json!(["due_date"]));
}

#[tokio::test]
async fn assignee_names_resolve_and_unknowns_stay_null() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let ghost = Uuid::new_v4();
    let id = create_request(&app, "Deck polish").await;

    app.request(
        "PUT",
        &format!("/api/requests/{id}"),
        Some(json!({ "assignees": [app.user_id, ghost] })),
        Some(app.user_id),
    )
    .await;

    let changelog = app
        .request(
            "GET",
            &format!("/api/requests/{id}/changelog"),
            None,
            Some(app.user_id),
        )
        .await;
    let latest = &changelog.data().as_array().expect("data is an array")[0];

    let assignees = latest["assignees"].as_array().expect("assignees array");
    assert_eq!(assignees.len(), 2);
    for assignee in assignees {
        if assignee["id"] == json!(app.user_id) {
            assert_eq!(assignee["name"], "Test User");
        } else {
            assert!(assignee["name"].is_null());
        }
    }
}

#[tokio::test]
async fn changelog_of_unknown_request_is_not_found() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let response = app
        .request(
            "GET",
            "/api/requests/00000000-0000-0000-0000-999999999999/changelog",
            None,
            Some(app.user_id),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
