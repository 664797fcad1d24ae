//! `AuthUser` extractor: resolves the session cookie to a GitHub user ID.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use chartshare_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// The signed-in user making the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    /// GitHub user ID bound to the session.
    pub owner_id: u64,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let cookie = jar
            .get(&state.config.session.cookie_name)
            .ok_or_else(|| AppError::authentication("Not signed in"))?;

        let owner_id = state.session_service.validate(cookie.value()).await?;
        Ok(Self { owner_id })
    }
}
