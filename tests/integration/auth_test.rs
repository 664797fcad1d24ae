//! Integration tests for the GitHub sign-in flow against a local stand-in
//! for the GitHub endpoints.

mod helpers;

use axum::Json;
use axum::Router;
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::{get, post};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use helpers::{TestApp, TestResponse};

const GOOD_CODE: &str = "good-code";
const ACCESS_TOKEN: &str = "tok-123";
const GITHUB_USER_ID: u64 = 4242;

async fn access_token(Json(body): Json<Value>) -> Json<Value> {
    if body["code"] == GOOD_CODE && body["client_id"] == "test-client" {
        Json(json!({ "access_token": ACCESS_TOKEN, "token_type": "bearer", "scope": "" }))
    } else {
        Json(json!({
            "error": "bad_verification_code",
            "error_description": "The code passed is incorrect or expired."
        }))
    }
}

async fn user(headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    let expected = format!("Bearer {ACCESS_TOKEN}");
    match headers.get(header::AUTHORIZATION) {
        Some(value) if value == expected.as_str() => {
            Ok(Json(json!({ "id": GITHUB_USER_ID, "login": "octocat" })))
        }
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

/// Starts the fake GitHub server and returns its base URL.
async fn spawn_github() -> String {
    let router = Router::new()
        .route("/login/oauth/access_token", post(access_token))
        .route("/user", get(user));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

async fn app_with_github() -> TestApp {
    let base = spawn_github().await;
    let mut config = helpers::test_config();
    config.github.client_id = "test-client".to_string();
    config.github.client_secret = "test-secret".to_string();
    config.github.authorize_url = format!("{base}/login/oauth/authorize");
    config.github.token_url = format!("{base}/login/oauth/access_token");
    config.github.user_url = format!("{base}/user");
    TestApp::with_config(config).await
}

fn state_cookie(app: &TestApp) -> &str {
    &app.state.config.session.state_cookie_name
}

fn session_cookie(app: &TestApp) -> &str {
    &app.state.config.session.cookie_name
}

/// Runs the login step and returns the issued state value.
async fn begin_login(app: &TestApp) -> (TestResponse, String) {
    let response = app.request("GET", "/auth/github/login", None, None).await;
    let state = response
        .cookie(state_cookie(app))
        .expect("login must set the state cookie");
    (response, state)
}

#[tokio::test]
async fn test_login_redirects_to_github() {
    let app = app_with_github().await;
    let (response, state) = begin_login(&app).await;

    assert!(response.status.is_redirection());
    let location = response.location().unwrap();
    assert!(location.contains("/login/oauth/authorize?"));
    assert!(location.contains("client_id=test-client"));
    assert!(location.contains(&format!("state={state}")));
    assert_eq!(state.len(), 43);
}

#[tokio::test]
async fn test_full_sign_in_flow() {
    let app = app_with_github().await;
    let (_, state) = begin_login(&app).await;

    let callback = app
        .request(
            "GET",
            &format!("/auth/github/callback?code={GOOD_CODE}&state={state}"),
            None,
            Some(&format!("{}={state}", state_cookie(&app))),
        )
        .await;
    assert_eq!(callback.status, StatusCode::SEE_OTHER);
    assert_eq!(callback.location(), Some("/"));
    let session = callback
        .cookie(session_cookie(&app))
        .expect("callback must set the session cookie");
    assert!(!session.is_empty());
    let cookie = format!("{}={session}", session_cookie(&app));

    let me = app.request("GET", "/api/user-info", None, Some(&cookie)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["github_user_id"], GITHUB_USER_ID);

    let created = app.create_share(&cookie, Some("octo-year")).await;
    assert_eq!(created.status, StatusCode::OK);

    let logout = app.request("POST", "/auth/logout", None, Some(&cookie)).await;
    assert_eq!(logout.status, StatusCode::OK);
    assert_eq!(logout.cookie(session_cookie(&app)).as_deref(), Some(""));

    let me = app.request("GET", "/api/user-info", None, Some(&cookie)).await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_callback_rejects_state_mismatch() {
    let app = app_with_github().await;
    let (_, state) = begin_login(&app).await;

    let response = app
        .request(
            "GET",
            &format!("/auth/github/callback?code={GOOD_CODE}&state=forged"),
            None,
            Some(&format!("{}={state}", state_cookie(&app))),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(response.cookie(session_cookie(&app)).is_none());
}

#[tokio::test]
async fn test_callback_requires_state_cookie() {
    let app = app_with_github().await;
    let (_, state) = begin_login(&app).await;

    let response = app
        .request(
            "GET",
            &format!("/auth/github/callback?code={GOOD_CODE}&state={state}"),
            None,
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_callback_with_denied_authorization() {
    let app = app_with_github().await;
    let (_, state) = begin_login(&app).await;

    let response = app
        .request(
            "GET",
            &format!("/auth/github/callback?error=access_denied&state={state}"),
            None,
            Some(&format!("{}={state}", state_cookie(&app))),
        )
        .await;
    assert!(response.status.is_redirection());
    assert_eq!(response.location(), Some("/"));
    assert!(response.cookie(session_cookie(&app)).is_none());
}

#[tokio::test]
async fn test_callback_missing_code() {
    let app = app_with_github().await;
    let (_, state) = begin_login(&app).await;

    let response = app
        .request(
            "GET",
            &format!("/auth/github/callback?state={state}"),
            None,
            Some(&format!("{}={state}", state_cookie(&app))),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_callback_with_refused_code() {
    let app = app_with_github().await;
    let (_, state) = begin_login(&app).await;

    let response = app
        .request(
            "GET",
            &format!("/auth/github/callback?code=stale&state={state}"),
            None,
            Some(&format!("{}={state}", state_cookie(&app))),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert!(response.cookie(session_cookie(&app)).is_none());
}

#[tokio::test]
async fn test_logout_without_session() {
    let app = TestApp::new().await;
    let response = app.request("POST", "/auth/logout", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({}));
}

#[tokio::test]
async fn test_logout_with_malformed_cookie() {
    let app = TestApp::new().await;
    let cookie = format!("{}=not-a-token", session_cookie(&app));
    let response = app.request("POST", "/auth/logout", None, Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_user_info_requires_session() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/api/user-info", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "AUTHENTICATION");
}
