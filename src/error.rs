//! Pricing error taxonomy.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::registry::StoreError;

/// Result alias for fare operations.
pub type FareResult<T> = Result<T, FareError>;

/// Failure of a single fare calculation; the ticket keeps no price.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FareError {
    /// Exit time missing or earlier than entry time.
    #[error("Out time provided is incorrect: in={in_time}, out={out_time:?}")]
    InvalidTimeRange {
        /// Entry timestamp of the ticket.
        in_time: DateTime<Utc>,
        /// Offending exit timestamp, if any.
        out_time: Option<DateTime<Utc>>,
    },

    /// Vehicle type code outside the known categories.
    #[error("Unknown parking type: {0}")]
    UnknownVehicleType(String),

    /// Prior-session lookup failed.
    #[error("Session history lookup failed: {0}")]
    History(#[from] StoreError),
}
