//! Random public path generation.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;
use rand::rngs::OsRng;

/// Number of random bytes behind a generated path.
pub const GENERATED_PATH_BYTES: usize = 8;

/// Generates public paths for shares created without a custom path.
#[derive(Debug, Clone)]
pub struct LinkService;

impl LinkService {
    /// Creates a new link service.
    pub fn new() -> Self {
        Self
    }

    /// Returns 8 bytes from the OS random source as unpadded base64url
    /// (11 characters).
    ///
    /// Generated paths may contain `_`, which custom paths cannot, and are
    /// not run through the path validator.
    pub fn generate_path(&self) -> String {
        let mut bytes = [0u8; GENERATED_PATH_BYTES];
        OsRng.fill_bytes(&mut bytes);
        URL_SAFE_NO_PAD.encode(bytes)
    }
}

impl Default for LinkService {
    fn default() -> Self {
        Self::new()
    }
}
