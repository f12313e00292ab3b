//! Integration tests for approval, relocation, and the directory picker.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::{self, TestApp};

async fn submitted(app: &TestApp) -> String {
    app.mkdirs(&["media/gallery/2024", "media/docs"]);
    app.set_base("media").await;
    let response = app.submit_file("Vacation Photo", "img.png", b"\x89PNG").await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    response.data()["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_admin_routes_require_credential() {
    let app = TestApp::new().await;

    let missing = app.request("GET", "/api/admin/uploads", None, None).await;
    assert_eq!(missing.status, StatusCode::FORBIDDEN);

    let wrong = app
        .request("GET", "/api/admin/directories", None, Some("guess"))
        .await;
    assert_eq!(wrong.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_directory_picker_lists_configured_tree() {
    let app = TestApp::new().await;
    app.mkdirs(&["media/gallery/2024", "media/docs"]);

    let empty = app.admin("GET", "/api/admin/directories", None).await;
    assert_eq!(empty.data(), &json!([]));

    app.set_base("media").await;
    let response = app.admin("GET", "/api/admin/directories", None).await;
    assert_eq!(response.status, StatusCode::OK);

    let options = response.data().as_array().unwrap();
    let mut paths: Vec<&str> = options.iter().map(|o| o["path"].as_str().unwrap()).collect();
    paths.sort();
    assert_eq!(paths, vec!["media/docs", "media/gallery", "media/gallery/2024"]);
    for option in options {
        assert_eq!(option["path"], option["label"]);
    }
}

#[tokio::test]
async fn test_approve_moves_file_into_target() {
    let app = TestApp::new().await;
    let id = submitted(&app).await;

    let response = app
        .admin(
            "PUT",
            &format!("/api/admin/uploads/{id}/approval"),
            Some(json!({ "approved": "1", "target_directory": "media/gallery/2024" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    let dest = app.path("media/gallery/2024/img.png");
    let data = response.data();
    assert_eq!(data["outcome"], "relocated");
    assert_eq!(data["path"], &*dest.to_string_lossy());
    assert_eq!(data["upload"]["status"], "approved");
    assert_eq!(data["upload"]["public_file_url"], serde_json::Value::Null);

    assert!(helpers::exists(&dest));
    assert!(!helpers::exists(&app.path("uploads/user-uploads/img.png")));

    let again = app
        .admin(
            "PUT",
            &format!("/api/admin/uploads/{id}/approval"),
            Some(json!({ "approved": "1", "target_directory": "media/gallery/2024" })),
        )
        .await;
    assert_eq!(again.status, StatusCode::OK);
    assert_eq!(again.data()["outcome"], "already_in_place");
    assert!(helpers::exists(&dest));
}

#[tokio::test]
async fn test_traversal_target_rejected() {
    let app = TestApp::new().await;
    let id = submitted(&app).await;

    let response = app
        .admin(
            "PUT",
            &format!("/api/admin/uploads/{id}/approval"),
            Some(json!({ "approved": "1", "target_directory": "../../etc" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let view = app.admin("GET", &format!("/api/admin/uploads/{id}"), None).await;
    assert_eq!(view.data()["approved"], false);
    assert!(helpers::exists(&app.path("uploads/user-uploads/img.png")));
}

#[tokio::test]
async fn test_destination_collision_is_conflict() {
    let app = TestApp::new().await;
    let id = submitted(&app).await;
    std::fs::write(app.path("media/docs/img.png"), "existing").unwrap();

    let response = app
        .admin(
            "PUT",
            &format!("/api/admin/uploads/{id}/approval"),
            Some(json!({ "approved": "1", "target_directory": "media/docs" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert!(response.message().contains("img.png"));
    assert_eq!(
        std::fs::read_to_string(app.path("media/docs/img.png")).unwrap(),
        "existing"
    );
}

#[tokio::test]
async fn test_unknown_upload_and_bad_flag() {
    let app = TestApp::new().await;
    let id = submitted(&app).await;

    let missing = app
        .admin(
            "PUT",
            "/api/admin/uploads/00000000-0000-0000-0000-000000000000/approval",
            Some(json!({ "approved": "1", "target_directory": "" })),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let bad_flag = app
        .admin(
            "PUT",
            &format!("/api/admin/uploads/{id}/approval"),
            Some(json!({ "approved": "maybe" })),
        )
        .await;
    assert_eq!(bad_flag.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_filters_by_status() {
    let app = TestApp::new().await;
    let id = submitted(&app).await;
    app.submit_file("Second", "b.png", b"b").await;

    app.admin(
        "PUT",
        &format!("/api/admin/uploads/{id}/approval"),
        Some(json!({ "approved": "1" })),
    )
    .await;

    let pending = app
        .admin("GET", "/api/admin/uploads?status=pending&per_page=10", None)
        .await;
    assert_eq!(pending.status, StatusCode::OK);
    assert_eq!(pending.data()["total"], 1);
    assert_eq!(pending.data()["items"][0]["title"], "Second");

    let bad = app.admin("GET", "/api/admin/uploads?status=rejected", None).await;
    assert_eq!(bad.status, StatusCode::BAD_REQUEST);
}
