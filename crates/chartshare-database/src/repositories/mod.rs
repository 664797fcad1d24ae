//! Repository implementations for all Chartshare entities.

pub mod session;
pub mod share;

pub use session::SessionRepository;
pub use share::ShareRepository;

/// SQLite integers are signed; GitHub IDs are stored bit-for-bit.
pub(crate) fn to_db_id(id: u64) -> i64 {
    id as i64
}

pub(crate) fn from_db_id(id: i64) -> u64 {
    id as u64
}
