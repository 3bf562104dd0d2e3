//! Breaker states and the pure transition rules between them.

use super::BreakerConfig;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Observable state of a circuit breaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CircuitState {
    /// Calls flow through; failures are being counted.
    Closed,
    /// Calls are rejected until the cooldown elapses.
    Open,
    /// Calls flow through as recovery probes.
    HalfOpen,
}

impl CircuitState {
    /// Returns the canonical display representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Closed => "CLOSED",
            Self::Open => "OPEN",
            Self::HalfOpen => "HALF_OPEN",
        }
    }
}

impl TryFrom<&str> for CircuitState {
    type Error = ParseCircuitStateError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "CLOSED" => Ok(Self::Closed),
            "OPEN" => Ok(Self::Open),
            "HALF_OPEN" => Ok(Self::HalfOpen),
            _ => Err(ParseCircuitStateError(value.to_owned())),
        }
    }
}

/// Error returned while parsing a circuit state name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown circuit state: {0}")]
pub struct ParseCircuitStateError(pub String);

/// Result of a guarded operation as seen by the breaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallOutcome {
    /// The operation completed successfully.
    Success,
    /// The operation failed.
    Failure,
}

/// Decision taken by the gate for one attempted call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The call may run; the breaker moves to the enclosed snapshot first.
    Allowed(BreakerSnapshot),
    /// The call must not run.
    Rejected {
        /// Earliest instant at which a probe will be admitted.
        next_attempt: DateTime<Utc>,
    },
}

/// Complete mutable state of a breaker at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakerSnapshot {
    state: CircuitState,
    failure_count: u32,
    success_count: u32,
    next_attempt: Option<DateTime<Utc>>,
}

impl Default for BreakerSnapshot {
    fn default() -> Self {
        Self::closed()
    }
}

impl BreakerSnapshot {
    /// Returns the initial snapshot: `CLOSED` with zeroed counters.
    #[must_use]
    pub const fn closed() -> Self {
        Self {
            state: CircuitState::Closed,
            failure_count: 0,
            success_count: 0,
            next_attempt: None,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> CircuitState {
        self.state
    }

    /// Returns the consecutive failure count.
    #[must_use]
    pub const fn failure_count(&self) -> u32 {
        self.failure_count
    }

    /// Returns the consecutive `HALF_OPEN` success count.
    #[must_use]
    pub const fn success_count(&self) -> u32 {
        self.success_count
    }

    /// Returns the earliest probe instant while the breaker is tripped.
    #[must_use]
    pub const fn next_attempt(&self) -> Option<DateTime<Utc>> {
        self.next_attempt
    }

    /// Runs the gate for a call attempted at `now`.
    ///
    /// An `OPEN` breaker whose cooldown has elapsed (`now >= next_attempt`)
    /// moves to `HALF_OPEN` and admits the call that observed it.
    #[must_use]
    pub fn admit(self, now: DateTime<Utc>) -> Admission {
        match (self.state, self.next_attempt) {
            (CircuitState::Open, Some(next_attempt)) if now < next_attempt => {
                Admission::Rejected { next_attempt }
            }
            (CircuitState::Open, _) => Admission::Allowed(Self {
                state: CircuitState::HalfOpen,
                success_count: 0,
                ..self
            }),
            (CircuitState::Closed | CircuitState::HalfOpen, _) => Admission::Allowed(self),
        }
    }

    /// Folds the outcome of an admitted call into the snapshot.
    ///
    /// An outcome arriving while the snapshot is already `OPEN` belongs to a
    /// call admitted before a concurrent trip and is ignored.
    #[must_use]
    pub fn record(self, outcome: CallOutcome, now: DateTime<Utc>, config: &BreakerConfig) -> Self {
        match (self.state, outcome) {
            (CircuitState::Closed, CallOutcome::Success) => Self {
                failure_count: 0,
                ..self
            },
            (CircuitState::Closed, CallOutcome::Failure) => {
                let failure_count = self.failure_count.saturating_add(1);
                if failure_count >= config.failure_threshold.get() {
                    Self::open(failure_count, now, config)
                } else {
                    Self {
                        failure_count,
                        ..self
                    }
                }
            }
            (CircuitState::HalfOpen, CallOutcome::Success) => {
                let success_count = self.success_count.saturating_add(1);
                if success_count >= config.success_threshold.get() {
                    Self::closed()
                } else {
                    Self {
                        success_count,
                        ..self
                    }
                }
            }
            (CircuitState::HalfOpen, CallOutcome::Failure) => {
                Self::open(self.failure_count.saturating_add(1), now, config)
            }
            (CircuitState::Open, _) => self,
        }
    }

    fn open(failure_count: u32, now: DateTime<Utc>, config: &BreakerConfig) -> Self {
        let next_attempt = now
            .checked_add_signed(config.open_timeout())
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self {
            state: CircuitState::Open,
            failure_count,
            success_count: 0,
            next_attempt: Some(next_attempt),
        }
    }
}
