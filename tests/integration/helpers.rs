//! Shared test helpers for integration tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use chartshare_api::{AppState, build_router};
use chartshare_core::config::AppConfig;
use chartshare_database::DatabasePool;
use chartshare_database::migration::run_migrations;

/// A chart for 2023 with only January 1st active.
pub const CHART: &str = "0B-eA";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for driving services directly
    pub state: AppState,
}

impl TestApp {
    /// Create a new test application on a private in-memory database
    pub async fn new() -> Self {
        Self::with_config(test_config()).await
    }

    /// Create a test application with a custom configuration
    pub async fn with_config(config: AppConfig) -> Self {
        let db = DatabasePool::in_memory()
            .await
            .expect("Failed to open test database");
        run_migrations(db.pool())
            .await
            .expect("Failed to run migrations");

        let state = AppState::new(config, db).expect("Failed to build state");
        let router = build_router(state.clone());
        Self { router, state }
    }

    /// Start a session for `owner_id` and return the `Cookie` header value
    pub async fn sign_in(&self, owner_id: u64) -> String {
        let token = self
            .state
            .session_service
            .new_session(owner_id)
            .await
            .expect("Failed to create session");
        format!("{}={}", self.state.config.session.cookie_name, token)
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        cookie: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(cookie) = cookie {
            req = req.header(header::COOKIE, cookie);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Create a share over HTTP and return the response
    pub async fn create_share(&self, cookie: &str, custom_path: Option<&str>) -> TestResponse {
        let mut body = serde_json::json!({ "chart": CHART });
        if let Some(path) = custom_path {
            body["custom_path"] = Value::from(path);
        }
        self.request("POST", "/api/create-share", Some(body), Some(cookie))
            .await
    }
}

/// Configuration used by integration tests
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.session.secure_cookies = false;
    config
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// Value of the cookie `name` set by this response, if any
    pub fn cookie(&self, name: &str) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .filter_map(|v| v.split(';').next())
            .filter_map(|pair| pair.split_once('='))
            .find(|(n, _)| *n == name)
            .map(|(_, value)| value.to_string())
    }

    /// The `Location` header
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }
}
