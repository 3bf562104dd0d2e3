//! Failure isolation for remote-like operations.
//!
//! A circuit breaker stops invoking an operation that keeps failing, waits
//! out a cooldown, then probes for recovery before letting traffic through
//! again. The module follows the same hexagonal split as the task context:
//!
//! - Domain types and the pure transition rules in [`domain`]
//! - The clock-driven, lock-guarded gate in [`services`]

pub mod domain;
pub mod services;
