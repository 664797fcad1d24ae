//! Share allocation: path selection, quota enforcement, and lookup.

pub mod error;
pub mod link;
pub mod memory;
pub mod service;
pub mod store;

pub use error::ShareError;
pub use link::LinkService;
pub use memory::MemoryShareStore;
pub use service::{CreateShareRequest, ShareService};
pub use store::ShareStore;
