//! Integration tests for file entry listing, folders, paths, and updates.

use http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn folders_sort_before_files_at_root() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    app.create_folder("Zeta assets", None).await;
    app.create_folder("Alpha assets", None).await;

    let response = app
        .request(
            "GET",
            &format!("/api/files?workspace_id={}", app.workspace_id),
            None,
            Some(app.user_id),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let entries = response.data().as_array().expect("data is an array");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["name"], "Alpha assets");
    assert_eq!(entries[1]["name"], "Zeta assets");
    assert!(entries.iter().all(|e| e["kind"] == "folder"));
}

#[tokio::test]
async fn listing_scopes_to_parent() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let parent = app.create_folder("Campaigns", None).await;
    app.create_folder("Q3", Some(parent)).await;
    app.create_folder("Unrelated", None).await;

    let response = app
        .request(
            "GET",
            &format!(
                "/api/files?workspace_id={}&parent_id={parent}",
                app.workspace_id
            ),
            None,
            Some(app.user_id),
        )
        .await;

    let entries = response.data().as_array().expect("data is an array");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["name"], "Q3");
}

#[tokio::test]
async fn folder_path_lists_ancestors_root_first() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let root = app.create_folder("Brand", None).await;
    let mid = app.create_folder("Logos", Some(root)).await;
    let leaf = app.create_folder("Dark", Some(mid)).await;

    let response = app
        .request(
            "GET",
            &format!("/api/files/{leaf}/path"),
            None,
            Some(app.user_id),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let chain = response.data().as_array().expect("data is an array");
    let names: Vec<&str> = chain.iter().filter_map(|e| e["name"].as_str()).collect();
    assert_eq!(names, vec!["Brand", "Logos", "Dark"]);
}

#[tokio::test]
async fn path_of_unknown_entry_is_empty() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let response = app
        .request(
            "GET",
            "/api/files/00000000-0000-0000-0000-999999999999/path",
            None,
            Some(app.user_id),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data().as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn get_entry_not_found() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let response = app
        .request(
            "GET",
            "/api/files/00000000-0000-0000-0000-999999999999",
            None,
            Some(app.user_id),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_folder_under_file_is_rejected() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let response = app
        .request(
            "POST",
            "/api/folders",
            Some(json!({
                "workspace_id": app.workspace_id,
                "name": "Nested",
                "parent_id": "00000000-0000-0000-0000-999999999999",
            })),
            Some(app.user_id),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn blank_folder_name_is_rejected() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let response = app
        .request(
            "POST",
            "/api/folders",
            Some(json!({
                "workspace_id": app.workspace_id,
                "name": "   ",
            })),
            Some(app.user_id),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_folder_accepts_initial_tags() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let response = app
        .request(
            "POST",
            "/api/folders",
            Some(json!({
                "workspace_id": app.workspace_id,
                "name": "Campaign kit",
                "tags": ["  campaign ", "", "q3"],
            })),
            Some(app.user_id),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["tags"], json!(["campaign", "q3"]));
}

#[tokio::test]
async fn create_file_records_metadata() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let folder = app.create_folder("Docs", None).await;

    let response = app
        .request(
            "POST",
            "/api/files",
            Some(json!({
                "workspace_id": app.workspace_id,
                "name": "brief.docx",
                "parent_id": folder,
                "url": "https://cdn.example.com/brief.docx",
                "size_bytes": 2048,
                "tags": ["brief"],
            })),
            Some(app.user_id),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let entry = response.data();
    assert_eq!(entry["kind"], "file");
    assert_eq!(entry["ext"], "docx");
    assert_eq!(entry["size_bytes"], 2048);
    assert_eq!(entry["access"], json!(["All"]));
}

#[tokio::test]
async fn null_parent_moves_entry_to_root() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let parent = app.create_folder("Outer", None).await;
    let child = app.create_folder("Inner", Some(parent)).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/files/{child}"),
            Some(json!({ "parent_id": null })),
            Some(app.user_id),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.data()["parent_id"].is_null());
}

#[tokio::test]
async fn moving_folder_into_own_subtree_is_rejected() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let outer = app.create_folder("Outer", None).await;
    let inner = app.create_folder("Inner", Some(outer)).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/files/{outer}"),
            Some(json!({ "parent_id": inner })),
            Some(app.user_id),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "PUT",
            &format!("/api/files/{outer}"),
            Some(json!({ "parent_id": outer })),
            Some(app.user_id),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn rename_and_retag() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let folder = app.create_folder("Drafts", None).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/files/{folder}/name"),
            Some(json!({ "name": "Finals" })),
            Some(app.user_id),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["name"], "Finals");

    let response = app
        .request(
            "PUT",
            &format!("/api/files/{folder}/tags"),
            Some(json!({ "tags": ["logo", "  q3  ", ""] })),
            Some(app.user_id),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["tags"], json!(["logo", "q3"]));
}
