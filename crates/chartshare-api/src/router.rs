//! Route definitions for the Chartshare HTTP API.
//!
//! Share endpoints are mounted under `/api`, GitHub sign-in under `/auth`.

use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let server = &state.config.server;
    let body_limit = server.max_body_bytes;
    let timeout = Duration::from_secs(server.request_timeout_seconds);
    let cors = build_cors_layer(&server.cors);

    Router::new()
        .nest("/api", share_routes().merge(health_routes()))
        .nest("/auth", auth_routes())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(request_logging))
        .with_state(state)
}

/// Share creation, lookup, and removal
fn share_routes() -> Router<AppState> {
    Router::new()
        .route("/validate-path", post(handlers::share::validate_path))
        .route("/create-share", post(handlers::share::create_share))
        .route("/share/{path}", get(handlers::share::get_share))
        .route("/shares", get(handlers::share::list_shares))
        .route("/remove-share", post(handlers::share::remove_share))
        .route("/user-info", get(handlers::auth::user_info))
}

/// GitHub OAuth web flow and logout
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/github/login", get(handlers::auth::github_login))
        .route("/github/callback", get(handlers::auth::github_callback))
        .route("/logout", post(handlers::auth::logout))
}

/// Health check endpoints (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
