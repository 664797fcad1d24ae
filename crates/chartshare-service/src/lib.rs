//! # chartshare-service
//!
//! Business logic for Chartshare. [`ShareService`] allocates public share
//! paths under a per-owner quota; [`SessionService`] issues and checks login
//! sessions.
//!
//! Services take their dependencies at construction time via `Arc`s.

pub mod session;
pub mod share;

pub use session::SessionService;
pub use share::{
    CreateShareRequest, LinkService, MemoryShareStore, ShareError, ShareService, ShareStore,
};
