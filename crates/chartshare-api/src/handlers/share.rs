//! Share handlers.

use axum::Json;
use axum::extract::{Path, State};
use serde_json::{Value, json};

use chartshare_entity::PathError;
use chartshare_service::{CreateShareRequest as NewShareRequest, ShareError};

use crate::dto::request::{CreateShareRequest, RemoveShareRequest, ValidatePathRequest};
use crate::dto::response::{
    CreateShareResponse, ShareInfoResponse, ShareSummary, ValidatePathResponse,
};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/validate-path
///
/// Invalid or taken paths are reported in the body, not as errors.
pub async fn validate_path(
    State(state): State<AppState>,
    Json(req): Json<ValidatePathRequest>,
) -> Result<Json<ValidatePathResponse>, ApiError> {
    let response = match state.share_service.is_path_avail(&req.path).await {
        Ok(true) => ValidatePathResponse {
            avail: true,
            cause: None,
        },
        Ok(false) => ValidatePathResponse {
            avail: false,
            cause: Some(PathError::Unavailable.to_string()),
        },
        Err(ShareError::Path(reason)) => ValidatePathResponse {
            avail: false,
            cause: Some(reason.to_string()),
        },
        Err(e) => return Err(e.into()),
    };
    Ok(Json(response))
}

/// POST /api/create-share
pub async fn create_share(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateShareRequest>,
) -> Result<Json<CreateShareResponse>, ApiError> {
    let path = state
        .share_service
        .create_share(NewShareRequest {
            owner_id: auth.owner_id,
            chart: req.chart,
            custom_path: req.custom_path,
        })
        .await?;

    let url = state
        .config
        .shares
        .public_base_url
        .as_deref()
        .map(|base| format!("{base}{path}"));
    Ok(Json(CreateShareResponse { path, url }))
}

/// GET /api/share/{path}
pub async fn get_share(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<Json<ShareInfoResponse>, ApiError> {
    let share = state.share_service.get_share(&path).await?;
    Ok(Json(ShareInfoResponse {
        chart: share.chart,
        github_user_id: share.owner_id,
        created_at: share.created_at,
    }))
}

/// GET /api/shares
pub async fn list_shares(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<ShareSummary>>, ApiError> {
    let shares = state
        .share_service
        .get_all_user_shares(auth.owner_id)
        .await?
        .into_iter()
        .map(|share| ShareSummary {
            path: share.path,
            chart: share.chart,
            created_at: share.created_at,
        })
        .collect();
    Ok(Json(shares))
}

/// POST /api/remove-share
pub async fn remove_share(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<RemoveShareRequest>,
) -> Result<Json<Value>, ApiError> {
    state
        .share_service
        .remove_share(&req.path, auth.owner_id)
        .await?;
    Ok(Json(json!({})))
}
