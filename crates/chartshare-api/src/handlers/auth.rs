//! GitHub sign-in, sign-out, and current user handlers.

use axum::Json;
use axum::extract::{Query, State};
use axum::response::Redirect;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde_json::{Value, json};
use tracing::{debug, info};

use chartshare_core::config::SessionConfig;
use chartshare_core::error::{AppError, ErrorKind};

use crate::dto::request::OAuthCallbackParams;
use crate::dto::response::UserInfoResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::oauth::GithubClient;
use crate::state::AppState;

/// Lifetime of the OAuth state cookie.
const STATE_COOKIE_MINUTES: i64 = 10;

fn cookie(
    config: &SessionConfig,
    name: &str,
    value: String,
    max_age: time::Duration,
) -> Cookie<'static> {
    Cookie::build((name.to_string(), value))
        .path("/")
        .http_only(true)
        .secure(config.secure_cookies)
        .same_site(SameSite::Lax)
        .max_age(max_age)
        .build()
}

fn removal(config: &SessionConfig, name: &str) -> Cookie<'static> {
    Cookie::build((name.to_string(), ""))
        .path("/")
        .secure(config.secure_cookies)
        .build()
}

/// GET /auth/github/login
pub async fn github_login(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect), ApiError> {
    let config = &state.config.session;
    let oauth_state = GithubClient::new_state();
    let url = state.github.authorize_url(&oauth_state)?;

    let jar = jar.add(cookie(
        config,
        &config.state_cookie_name,
        oauth_state,
        time::Duration::minutes(STATE_COOKIE_MINUTES),
    ));
    Ok((jar, Redirect::to(url.as_str())))
}

/// GET /auth/github/callback
pub async fn github_callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<OAuthCallbackParams>,
) -> Result<(CookieJar, Redirect), ApiError> {
    let config = &state.config.session;
    let expected = jar
        .get(&config.state_cookie_name)
        .map(|c| c.value().to_string());
    let jar = jar.remove(removal(config, &config.state_cookie_name));

    if let Some(error) = params.error {
        debug!(%error, "GitHub sign-in was not completed");
        return Ok((jar, Redirect::to("/")));
    }

    match (expected, params.state) {
        (Some(expected), Some(received)) if expected == received => {}
        _ => return Err(AppError::authentication("OAuth state mismatch").into()),
    }

    let code = params
        .code
        .filter(|code| !code.is_empty())
        .ok_or_else(|| AppError::validation("Missing authorization code"))?;

    let access_token = state.github.exchange_code(&code).await?;
    let owner_id = state.github.fetch_user_id(&access_token).await?;
    let token = state.session_service.new_session(owner_id).await?;
    info!(owner_id, "User signed in");

    let max_age = time::Duration::seconds(i64::try_from(config.ttl_seconds).unwrap_or(i64::MAX));
    let jar = jar.add(cookie(config, &config.cookie_name, token, max_age));
    Ok((jar, Redirect::to("/")))
}

/// POST /auth/logout
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<Value>), ApiError> {
    let config = &state.config.session;
    if let Some(session) = jar.get(&config.cookie_name) {
        match state.session_service.remove(session.value()).await {
            Ok(()) => {}
            Err(e) if e.kind == ErrorKind::Validation => {
                debug!(error = %e, "Ignoring malformed session cookie on logout");
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok((jar.remove(removal(config, &config.cookie_name)), Json(json!({}))))
}

/// GET /api/user-info
pub async fn user_info(auth: AuthUser) -> Json<UserInfoResponse> {
    Json(UserInfoResponse {
        github_user_id: auth.owner_id,
    })
}
