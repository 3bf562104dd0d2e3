//! Task lifecycle management guarded by a circuit breaker.
//!
//! Task creation and status changes reach a remote-like gateway through the
//! breaker, and each successful change is appended to an event log that the
//! read side projects into metrics and recent-activity windows. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Command and query services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
