//! Construction-time configuration for a circuit breaker.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use thiserror::Error;

const fn non_zero(value: u32) -> NonZeroU32 {
    match NonZeroU32::new(value) {
        Some(count) => count,
        None => NonZeroU32::MIN,
    }
}

const DEFAULT_FAILURE_THRESHOLD: NonZeroU32 = non_zero(3);
const DEFAULT_OPEN_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_SUCCESS_THRESHOLD: NonZeroU32 = non_zero(2);

/// Thresholds and cooldown fixed for the lifetime of a breaker.
///
/// Missing fields fall back to their defaults when deserializing, and zero
/// thresholds are rejected.
///
/// # Examples
///
/// ```
/// use tripwire::breaker::domain::BreakerConfig;
///
/// let config = BreakerConfig::default();
/// assert_eq!(config.failure_threshold.get(), 3);
/// assert_eq!(config.open_timeout_ms, 5_000);
/// assert_eq!(config.success_threshold.get(), 2);
///
/// let loaded = BreakerConfig::from_json_str(r#"{ "open_timeout_ms": 250 }"#)
///     .expect("valid breaker config");
/// assert_eq!(loaded.open_timeout_ms, 250);
/// assert_eq!(loaded.failure_threshold.get(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakerConfig {
    /// Consecutive failures in `CLOSED` that trip the breaker.
    pub failure_threshold: NonZeroU32,
    /// Cooldown in milliseconds before an `OPEN` breaker may probe again.
    pub open_timeout_ms: u64,
    /// Consecutive `HALF_OPEN` successes required to close the breaker.
    pub success_threshold: NonZeroU32,
}

impl Default for BreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: DEFAULT_FAILURE_THRESHOLD,
            open_timeout_ms: DEFAULT_OPEN_TIMEOUT_MS,
            success_threshold: DEFAULT_SUCCESS_THRESHOLD,
        }
    }
}

impl BreakerConfig {
    /// Creates a configuration from explicit values.
    #[must_use]
    pub const fn new(
        failure_threshold: NonZeroU32,
        open_timeout_ms: u64,
        success_threshold: NonZeroU32,
    ) -> Self {
        Self {
            failure_threshold,
            open_timeout_ms,
            success_threshold,
        }
    }

    /// Trips on the first failure and waits longer before probing.
    ///
    /// Suited to operations where every failed attempt is expensive.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            failure_threshold: NonZeroU32::MIN,
            open_timeout_ms: 30_000,
            success_threshold: non_zero(3),
        }
    }

    /// Tolerates bursts of failures and recovers after a single probe.
    #[must_use]
    pub const fn lenient() -> Self {
        Self {
            failure_threshold: non_zero(10),
            open_timeout_ms: 1_000,
            success_threshold: NonZeroU32::MIN,
        }
    }

    /// Loads a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`BreakerConfigError::Parse`] when the document is malformed,
    /// has fields of the wrong type, or carries a zero threshold.
    pub fn from_json_str(json: &str) -> Result<Self, BreakerConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Returns the cooldown as a signed duration, saturating at the
    /// representable maximum.
    #[must_use]
    pub fn open_timeout(&self) -> TimeDelta {
        i64::try_from(self.open_timeout_ms)
            .ok()
            .and_then(TimeDelta::try_milliseconds)
            .unwrap_or(TimeDelta::MAX)
    }
}

/// Errors returned while loading a breaker configuration.
#[derive(Debug, Error)]
pub enum BreakerConfigError {
    /// The configuration document could not be decoded.
    #[error("invalid breaker configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
