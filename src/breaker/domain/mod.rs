//! Domain model for the circuit breaker.
//!
//! State changes are expressed as pure functions over [`BreakerSnapshot`] so
//! that every transition can be exercised without a running clock.

mod config;
mod error;
mod state;

pub use config::{BreakerConfig, BreakerConfigError};
pub use error::BreakerError;
pub use state::{Admission, BreakerSnapshot, CallOutcome, CircuitState, ParseCircuitStateError};
