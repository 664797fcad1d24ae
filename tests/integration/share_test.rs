//! Integration tests for share creation, lookup, and removal over HTTP.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{CHART, TestApp};

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["database"], "connected");
}

#[tokio::test]
async fn test_create_share_and_visit() {
    let app = TestApp::new().await;
    let cookie = app.sign_in(7).await;

    let response = app.create_share(&cookie, Some("my-year")).await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["path"], "my-year");

    let response = app.request("GET", "/api/share/my-year", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["chart"], CHART);
    assert_eq!(response.body["github_user_id"], 7);
    assert!(response.body["created_at"].is_string());
}

#[tokio::test]
async fn test_create_share_with_generated_path() {
    let app = TestApp::new().await;
    let cookie = app.sign_in(7).await;

    let response = app.create_share(&cookie, None).await;
    assert_eq!(response.status, StatusCode::OK);
    let path = response.body["path"].as_str().unwrap().to_string();
    assert_eq!(path.len(), 11);

    let response = app
        .request("GET", &format!("/api/share/{path}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_create_share_requires_session() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/create-share",
            Some(json!({ "chart": CHART })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request(
            "POST",
            "/api/create-share",
            Some(json!({ "chart": CHART })),
            Some("__Host-session=bogus"),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_share_errors() {
    let app = TestApp::new().await;
    let cookie = app.sign_in(7).await;

    let response = app.create_share(&cookie, Some("no")).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error_type"], "path");
    assert_eq!(response.body["message"], "url must be at least 4 characters long");

    let response = app
        .request(
            "POST",
            "/api/create-share",
            Some(json!({ "chart": "0Qew", "custom_path": "good-path" })),
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error_type"], "chart");

    app.create_share(&cookie, Some("taken")).await;
    let other = app.sign_in(8).await;
    let response = app.create_share(&other, Some("taken")).await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error_type"], "path");
    assert_eq!(response.body["message"], "url is not available");
}

#[tokio::test]
async fn test_validate_path() {
    let app = TestApp::new().await;
    let cookie = app.sign_in(7).await;
    app.create_share(&cookie, Some("taken")).await;

    let cases = [
        ("free-path", true, None),
        ("taken", false, Some("url is not available")),
        ("abc", false, Some("url must be at least 4 characters long")),
        ("bad path", false, Some("use a-z, A-Z, 0-9, '-' characters only")),
    ];
    for (path, avail, cause) in cases {
        let response = app
            .request("POST", "/api/validate-path", Some(json!({ "path": path })), None)
            .await;
        assert_eq!(response.status, StatusCode::OK, "{path}");
        assert_eq!(response.body["avail"], avail, "{path}");
        match cause {
            Some(cause) => assert_eq!(response.body["cause"], cause, "{path}"),
            None => assert!(response.body.get("cause").is_none(), "{path}"),
        }
    }
}

#[tokio::test]
async fn test_missing_share_is_not_found() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/api/share/nothing-here", None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error_type"], "not_found");
}

#[tokio::test]
async fn test_list_and_remove_shares() {
    let app = TestApp::new().await;
    let alice = app.sign_in(1).await;
    let bob = app.sign_in(2).await;

    app.create_share(&alice, Some("alice-one")).await;
    app.create_share(&alice, Some("alice-two")).await;
    app.create_share(&bob, Some("bob-one")).await;

    let response = app.request("GET", "/api/shares", None, Some(&alice)).await;
    assert_eq!(response.status, StatusCode::OK);
    let paths: Vec<_> = response
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["path"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(paths, ["alice-one", "alice-two"]);

    // Bob cannot remove Alice's share; the call still succeeds.
    let response = app
        .request(
            "POST",
            "/api/remove-share",
            Some(json!({ "path": "alice-one" })),
            Some(&bob),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let response = app.request("GET", "/api/share/alice-one", None, None).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request(
            "POST",
            "/api/remove-share",
            Some(json!({ "path": "alice-one" })),
            Some(&alice),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({}));
    let response = app.request("GET", "/api/share/alice-one", None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_public_base_url() {
    let mut config = helpers::test_config();
    config.shares.public_base_url = Some("https://charts.example/s/".to_string());
    let app = TestApp::with_config(config).await;
    let cookie = app.sign_in(7).await;

    let response = app.create_share(&cookie, Some("my-year")).await;
    assert_eq!(response.body["url"], "https://charts.example/s/my-year");
}
