//! Port contracts for task lifecycle management.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod event_store;
pub mod gateway;
pub mod repository;

pub use event_store::{EventStore, EventStoreError, EventStoreResult};
pub use gateway::{TaskGateway, TaskGatewayError, TaskGatewayResult};
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
