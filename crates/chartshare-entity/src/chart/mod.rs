//! Year-scoped activity charts and their canonical token encoding.

pub mod codec;
pub mod document;

use thiserror::Error;

pub use codec::{decode, encode, encode_bytes};
pub use document::{ChartDocument, days_in_year};

/// Number of bytes holding the big-endian year.
pub const YEAR_LEN: usize = 2;
/// Number of bytes holding the day bitmap (`ceil(366 / 8)`).
pub const DAYS_LEN: usize = 46;
/// Length of the full raw chart layout.
pub const RAW_LEN: usize = YEAR_LEN + DAYS_LEN;
/// Highest day number a bitmap can address.
pub const MAX_DAYS: u16 = 366;

/// Errors produced by the chart codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChartError {
    /// The token is malformed or not in canonical form.
    #[error("invalid chart encoding")]
    InvalidEncoding,
    /// The raw chart does not have the expected layout.
    #[error("invalid chart document")]
    InvalidDocument,
    /// A day number outside `1..=days_in_year` was addressed.
    #[error("day {0} is outside of the chart year")]
    DayOutOfRange(u16),
}
