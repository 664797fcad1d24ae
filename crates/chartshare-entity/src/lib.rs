//! # chartshare-entity
//!
//! Domain values for Chartshare: the year-scoped activity chart and its
//! canonical text codec, the public path rules, and the share and session
//! records persisted by `chartshare-database`.
//!
//! Everything here is pure and free of shared state.

pub mod chart;
pub mod path;
pub mod session;
pub mod share;

pub use chart::{ChartDocument, ChartError};
pub use path::{PathError, validate_path};
pub use session::{Session, SessionToken};
pub use share::{NewShare, Share, ShareRecord};
