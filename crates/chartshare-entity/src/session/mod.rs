//! Login session entities.

pub mod model;
pub mod token;

pub use model::Session;
pub use token::{SESSION_ID_LEN, SessionToken, SessionTokenError};
