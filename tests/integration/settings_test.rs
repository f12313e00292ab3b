//! Integration tests for settings and health.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_settings_round_trip_sanitized() {
    let app = TestApp::new().await;

    let initial = app.admin("GET", "/api/admin/settings", None).await;
    assert_eq!(initial.status, StatusCode::OK);
    assert_eq!(initial.data()["target_base_directory"], "");

    let saved = app
        .admin(
            "PUT",
            "/api/admin/settings",
            Some(json!({ "target_base_directory": " <b>media</b> " })),
        )
        .await;
    assert_eq!(saved.status, StatusCode::OK);
    assert_eq!(saved.data()["target_base_directory"], "media");

    let read = app.admin("GET", "/api/admin/settings", None).await;
    assert_eq!(read.data()["target_base_directory"], "media");
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["status"], "ok");
    assert_eq!(response.data()["storage"], true);
    assert_eq!(response.data()["database"], "memory");
}
