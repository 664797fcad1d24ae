//! # chartshare-database
//!
//! SQLite connection management, schema migrations, and the concrete
//! repositories backing shares and login sessions.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::{SessionRepository, ShareRepository};
