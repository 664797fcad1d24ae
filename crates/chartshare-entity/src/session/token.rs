//! Session cookie token: owner ID and random session ID, base64url encoded.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use thiserror::Error;

/// Length of the random part of a session.
pub const SESSION_ID_LEN: usize = 32;

const TOKEN_LEN: usize = 8 + SESSION_ID_LEN;

/// Reasons a session cookie value cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionTokenError {
    /// Not valid unpadded base64url.
    #[error("malformed session token")]
    Malformed,
    /// Decoded to the wrong number of bytes.
    #[error("session token has invalid length")]
    InvalidLength,
}

/// The value carried by the session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionToken {
    /// GitHub user ID.
    pub owner_id: u64,
    /// Random session identifier.
    pub session_id: [u8; SESSION_ID_LEN],
}

impl SessionToken {
    /// Encodes the token as unpadded base64url of `owner_id (BE) || session_id`.
    pub fn encode(&self) -> String {
        let mut bin = [0u8; TOKEN_LEN];
        bin[..8].copy_from_slice(&self.owner_id.to_be_bytes());
        bin[8..].copy_from_slice(&self.session_id);
        URL_SAFE_NO_PAD.encode(bin)
    }

    /// Parses a cookie value.
    pub fn decode(value: &str) -> Result<Self, SessionTokenError> {
        if value.len() * 6 / 8 > TOKEN_LEN || value.contains(['\r', '\n']) {
            return Err(SessionTokenError::Malformed);
        }
        let bin = URL_SAFE_NO_PAD
            .decode(value)
            .map_err(|_| SessionTokenError::Malformed)?;
        let bin: [u8; TOKEN_LEN] = bin
            .try_into()
            .map_err(|_| SessionTokenError::InvalidLength)?;

        let mut owner = [0u8; 8];
        owner.copy_from_slice(&bin[..8]);
        let mut session_id = [0u8; SESSION_ID_LEN];
        session_id.copy_from_slice(&bin[8..]);

        Ok(Self {
            owner_id: u64::from_be_bytes(owner),
            session_id,
        })
    }
}
