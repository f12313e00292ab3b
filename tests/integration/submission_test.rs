//! Integration tests for end-user submission.

use axum::http::StatusCode;

use crate::helpers::{self, TestApp};

#[tokio::test]
async fn test_submit_creates_pending_upload() {
    let app = TestApp::new().await;

    let response = app.submit_file("Vacation Photo", "img.png", b"\x89PNG").await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(
        response.data()["message"],
        "Your upload has been submitted and is pending approval."
    );
    let id = response.data()["id"].as_str().unwrap().to_string();

    let view = app.admin("GET", &format!("/api/admin/uploads/{id}"), None).await;
    assert_eq!(view.status, StatusCode::OK);
    let data = view.data();
    assert_eq!(data["title"], "Vacation Photo");
    assert_eq!(data["status"], "pending");
    assert_eq!(data["approved"], false);
    assert_eq!(data["file_missing"], false);
    assert_eq!(data["submitted_by"], "alice");
    assert_eq!(data["public_file_url"], "/uploads/user-uploads/img.png");
    assert!(helpers::exists(&app.path("uploads/user-uploads/img.png")));
}

#[tokio::test]
async fn test_empty_title_rejected_without_side_effects() {
    let app = TestApp::new().await;

    let response = app.submit_file("   ", "img.png", b"data").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "Please provide a title for the upload.");
    assert!(!helpers::exists(&app.path("uploads/user-uploads/img.png")));

    let list = app.admin("GET", "/api/admin/uploads", None).await;
    assert_eq!(list.data()["total"], 0);
}

#[tokio::test]
async fn test_missing_file_rejected() {
    let app = TestApp::new().await;

    let response = app
        .submit(
            &[
                ("title", "No file"),
                ("authorization_token", helpers::SUBMISSION_TOKEN),
            ],
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "Please upload a file.");
}

#[tokio::test]
async fn test_invalid_token_rejected() {
    let app = TestApp::new().await;

    let response = app
        .submit(
            &[("title", "Forged"), ("authorization_token", "wrong")],
            Some(("img.png", &b"data"[..])),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(
        response.message(),
        "Submission could not be verified. Please reload the form and try again."
    );
    assert!(!app.path("uploads").exists());
}

#[tokio::test]
async fn test_client_path_reduced_to_base_name() {
    let app = TestApp::new().await;

    let response = app.submit_file("Sneaky", "../../escape.txt", b"x").await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert!(helpers::exists(&app.path("uploads/user-uploads/escape.txt")));
    assert!(!app.root.parent().unwrap().join("escape.txt").exists());
}
