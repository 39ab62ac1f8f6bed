//! Integration tests for the trash lifecycle.

use http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn trashed_entry_leaves_default_listing() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let folder = app.create_folder("Old campaigns", None).await;

    let response = app
        .request(
            "POST",
            &format!("/api/files/{folder}/trash"),
            None,
            Some(app.user_id),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(!response.data()["deleted_at"].is_null());

    let listing = app
        .request(
            "GET",
            &format!("/api/files?workspace_id={}", app.workspace_id),
            None,
            Some(app.user_id),
        )
        .await;
    assert_eq!(listing.data().as_array().map(Vec::len), Some(0));

    let with_deleted = app
        .request(
            "GET",
            &format!(
                "/api/files?workspace_id={}&include_deleted=true",
                app.workspace_id
            ),
            None,
            Some(app.user_id),
        )
        .await;
    assert_eq!(with_deleted.data().as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn trashing_folder_leaves_children_live() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let parent = app.create_folder("Parent", None).await;
    let child = app.create_folder("Child", Some(parent)).await;

    app.request(
        "POST",
        &format!("/api/files/{parent}/trash"),
        None,
        Some(app.user_id),
    )
    .await;

    let response = app
        .request(
            "GET",
            &format!("/api/files/{child}"),
            None,
            Some(app.user_id),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.data()["deleted_at"].is_null());
    assert_eq!(
        response.data()["parent_id"].as_str().map(String::from),
        Some(parent.to_string())
    );
}

#[tokio::test]
async fn restore_lands_at_workspace_root() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let parent = app.create_folder("Parent", None).await;
    let child = app.create_folder("Child", Some(parent)).await;

    app.request(
        "POST",
        &format!("/api/files/{child}/trash"),
        None,
        Some(app.user_id),
    )
    .await;

    let response = app
        .request(
            "POST",
            &format!("/api/files/{child}/restore"),
            None,
            Some(app.user_id),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.data()["deleted_at"].is_null());
    assert!(response.data()["parent_id"].is_null());
}

#[tokio::test]
async fn double_trash_and_stray_restore_conflict() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let folder = app.create_folder("Once", None).await;

    let response = app
        .request(
            "POST",
            &format!("/api/files/{folder}/restore"),
            None,
            Some(app.user_id),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    app.request(
        "POST",
        &format!("/api/files/{folder}/trash"),
        None,
        Some(app.user_id),
    )
    .await;

    let response = app
        .request(
            "POST",
            &format!("/api/files/{folder}/trash"),
            None,
            Some(app.user_id),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn permanent_delete_removes_the_row() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let folder = app.create_folder("Gone", None).await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/files/{folder}"),
            None,
            Some(app.user_id),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["deleted"], true);

    let response = app
        .request(
            "GET",
            &format!("/api/files/{folder}"),
            None,
            Some(app.user_id),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let again = app
        .request(
            "DELETE",
            &format!("/api/files/{folder}"),
            None,
            Some(app.user_id),
        )
        .await;
    assert_eq!(again.status, StatusCode::OK);
    assert_eq!(again.data()["deleted"], false);
}

#[tokio::test]
async fn bulk_trash_reports_per_id_outcomes() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let a = app.create_folder("A", None).await;
    let b = app.create_folder("B", None).await;

    app.request(
        "POST",
        &format!("/api/files/{b}/trash"),
        None,
        Some(app.user_id),
    )
    .await;

    let response = app
        .request(
            "POST",
            "/api/files/trash",
            Some(json!({ "ids": [a, b] })),
            Some(app.user_id),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let outcome = response.data();
    assert_eq!(outcome["succeeded"], json!([a]));
    assert_eq!(outcome["failed"][0]["id"], json!(b));

    let restore = app
        .request(
            "POST",
            "/api/files/restore",
            Some(json!({ "ids": [a, b] })),
            Some(app.user_id),
        )
        .await;
    assert_eq!(
        restore.data()["succeeded"].as_array().map(Vec::len),
        Some(2)
    );
}
