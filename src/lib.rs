//! Tripwire: circuit-breaker-guarded task commands with an event log.
//!
//! Task creation and status updates are treated as remote operations that
//! may be slow or fail. A circuit breaker decides whether each attempt may
//! run, trips after repeated failures, and probes for recovery once a
//! cooldown has passed. Every successful mutation is appended to an
//! immutable event log from which read-side projections are derived.
//!
//! # Architecture
//!
//! Tripwire follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports
//!
//! # Modules
//!
//! - [`breaker`]: Circuit breaker state machine and gate
//! - [`task`]: Task commands, event log and projections
//! - [`clock`]: Deterministic clock for tests and simulations

pub mod breaker;
pub mod clock;
pub mod task;
