//! # chartshare-api
//!
//! HTTP API layer for Chartshare built on Axum.
//!
//! Provides the share endpoints, GitHub sign-in, the session-cookie
//! extractor, request logging, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod oauth;
pub mod router;
pub mod state;

pub use app::run_server;
pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
