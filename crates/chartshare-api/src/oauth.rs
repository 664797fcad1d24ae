//! GitHub OAuth web flow client.

use std::fmt;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;
use rand::rngs::OsRng;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use chartshare_core::config::GithubConfig;
use chartshare_core::error::{AppError, ErrorKind};
use chartshare_core::result::AppResult;

/// Number of random bytes in an OAuth `state` value.
const STATE_BYTES: usize = 32;

#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    grant_type: &'static str,
    client_id: &'a str,
    client_secret: &'a str,
    code: &'a str,
}

/// GitHub reports token errors with a 200 status and these fields set.
#[derive(Debug, Default, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: String,
    #[serde(default)]
    token_type: String,
    #[serde(default)]
    error: String,
    #[serde(default)]
    error_description: String,
}

#[derive(Debug, Deserialize)]
struct GithubUser {
    id: u64,
    #[serde(default)]
    login: String,
}

/// Talks to GitHub on behalf of the sign-in handlers.
#[derive(Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    config: GithubConfig,
}

impl fmt::Debug for GithubClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GithubClient")
            .field("client_id", &self.config.client_id)
            .field("authorize_url", &self.config.authorize_url)
            .finish_non_exhaustive()
    }
}

impl GithubClient {
    /// Builds a client with the configured timeout.
    pub fn new(config: &GithubConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("chartshare/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;
        Ok(Self {
            http,
            config: config.clone(),
        })
    }

    /// Returns a fresh random `state` value for the CSRF cookie.
    pub fn new_state() -> String {
        let mut bytes = [0u8; STATE_BYTES];
        OsRng.fill_bytes(&mut bytes);
        URL_SAFE_NO_PAD.encode(bytes)
    }

    /// URL the browser is sent to for authorization.
    pub fn authorize_url(&self, state: &str) -> AppResult<Url> {
        Url::parse_with_params(
            &self.config.authorize_url,
            &[("client_id", self.config.client_id.as_str()), ("state", state)],
        )
        .map_err(|e| {
            AppError::with_source(ErrorKind::Configuration, "Invalid GitHub authorize URL", e)
        })
    }

    /// Exchanges an authorization code for an access token.
    pub async fn exchange_code(&self, code: &str) -> AppResult<String> {
        let response = self
            .http
            .post(&self.config.token_url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&TokenRequest {
                grant_type: "authorization_code",
                client_id: &self.config.client_id,
                client_secret: &self.config.client_secret,
                code,
            })
            .send()
            .await
            .map_err(|e| external("Failed to send access token request", e))?;

        if !response.status().is_success() {
            return Err(AppError::external_service(format!(
                "Access token request failed with status {}",
                response.status()
            )));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| external("Failed to parse access token response", e))?;

        if !body.error.is_empty() {
            warn!(error = %body.error, description = %body.error_description, "GitHub refused the code");
            return Err(AppError::external_service(format!(
                "GitHub refused the authorization code: {}",
                body.error
            )));
        }
        if !body.token_type.eq_ignore_ascii_case("bearer") {
            return Err(AppError::external_service(format!(
                "Unexpected token type '{}'",
                body.token_type
            )));
        }
        Ok(body.access_token)
    }

    /// Returns the GitHub user ID the access token belongs to.
    pub async fn fetch_user_id(&self, access_token: &str) -> AppResult<u64> {
        let response = self
            .http
            .get(&self.config.user_url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| external("Failed to send user data request", e))?;

        if !response.status().is_success() {
            return Err(AppError::external_service(format!(
                "User data request failed with status {}",
                response.status()
            )));
        }

        let user: GithubUser = response
            .json()
            .await
            .map_err(|e| external("Failed to parse user data", e))?;
        debug!(github_user_id = user.id, login = %user.login, "Fetched GitHub user");
        Ok(user.id)
    }
}

fn external(message: &str, err: reqwest::Error) -> AppError {
    AppError::with_source(ErrorKind::ExternalService, message, err)
}
