//! Share entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::chart::{self, ChartDocument, ChartError};

/// Data required to persist a new share.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShare {
    /// GitHub user ID of the owner.
    pub owner_id: u64,
    /// Public path, unique across all shares.
    pub path: String,
    /// The shared chart.
    pub chart: ChartDocument,
}

/// A share as stored: the chart is kept in its 48-byte raw layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareRecord {
    /// GitHub user ID of the owner.
    pub owner_id: u64,
    /// Public path.
    pub path: String,
    /// Raw chart bytes.
    pub chart: Vec<u8>,
    /// When the share was created.
    pub created_at: DateTime<Utc>,
}

impl ShareRecord {
    /// Converts the stored row into its public form, re-encoding the chart.
    pub fn into_share(self) -> Result<Share, ChartError> {
        let chart = chart::encode_bytes(&self.chart)?;
        Ok(Share {
            owner_id: self.owner_id,
            path: self.path,
            chart,
            created_at: self.created_at,
        })
    }
}

/// A share as returned to callers, with the chart as its canonical token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Share {
    /// GitHub user ID of the owner.
    pub owner_id: u64,
    /// Public path.
    pub path: String,
    /// Canonical chart token.
    pub chart: String,
    /// When the share was created.
    pub created_at: DateTime<Utc>,
}
