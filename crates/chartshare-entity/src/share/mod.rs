//! Share domain entities.

pub mod model;

pub use model::{NewShare, Share, ShareRecord};
