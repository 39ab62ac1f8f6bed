//! Integration tests for the multipart upload endpoint.

use http::StatusCode;
use uuid::Uuid;

use crate::helpers::TestApp;

const BOUNDARY: &str = "bespire-test-boundary";

fn multipart_body(workspace_id: Uuid, parent_id: Option<Uuid>, file_name: &str) -> Vec<u8> {
    let mut body = String::new();

    body.push_str(&format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"workspace_id\"\r\n\r\n{workspace_id}\r\n"
    ));
    if let Some(parent_id) = parent_id {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"parent_id\"\r\n\r\n{parent_id}\r\n"
        ));
    }
    body.push_str(&format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"tags\"\r\n\r\nlogo\r\n"
    ));
    body.push_str(&format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
         Content-Type: image/png\r\n\r\nnot-really-a-png\r\n"
    ));
    body.push_str(&format!("--{BOUNDARY}--\r\n"));

    body.into_bytes()
}

fn content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}

#[tokio::test]
async fn upload_creates_file_entry_with_metadata() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let folder = app.create_folder("Assets", None).await;

    let response = app
        .request_raw(
            "POST",
            "/api/files/upload",
            &content_type(),
            multipart_body(app.workspace_id, Some(folder), "Logo.PNG"),
            Some(app.user_id),
        )
        .await;

    assert_eq!(
        response.status,
        StatusCode::OK,
        "Upload failed: {:?}",
        response.body
    );
    let entry = response.data();
    assert_eq!(entry["kind"], "file");
    assert_eq!(entry["name"], "Logo.PNG");
    assert_eq!(entry["ext"], "png");
    assert_eq!(entry["size_bytes"], 16);
    assert_eq!(entry["tags"][0], "logo");
    assert!(
        entry["url"]
            .as_str()
            .is_some_and(|u| u.starts_with("memory://"))
    );
}

#[tokio::test]
async fn upload_into_trashed_folder_is_rejected() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let folder = app.create_folder("Doomed", None).await;
    app.request(
        "POST",
        &format!("/api/files/{folder}/trash"),
        None,
        Some(app.user_id),
    )
    .await;

    let response = app
        .request_raw(
            "POST",
            "/api/files/upload",
            &content_type(),
            multipart_body(app.workspace_id, Some(folder), "late.pdf"),
            Some(app.user_id),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn upload_without_workspace_is_rejected() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };

    let body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"a.txt\"\r\n\r\nhi\r\n--{BOUNDARY}--\r\n"
    )
    .into_bytes();

    let response = app
        .request_raw(
            "POST",
            "/api/files/upload",
            &content_type(),
            body,
            Some(app.user_id),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
