//! Errors surfaced by a guarded call.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Failure of a call made through a circuit breaker.
///
/// `E` is the error type of the wrapped operation, passed through unchanged.
#[derive(Debug, Error)]
pub enum BreakerError<E> {
    /// The gate rejected the call; the operation was not invoked.
    #[error("circuit breaker is open until {next_attempt}")]
    Open {
        /// Earliest instant at which a probe will be admitted.
        next_attempt: DateTime<Utc>,
    },

    /// The operation ran and failed. Always counted as a breaker failure.
    #[error("guarded operation failed: {0}")]
    Operation(#[source] E),
}

impl<E> BreakerError<E> {
    /// Returns `true` when the call was rejected without being attempted.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }
}
