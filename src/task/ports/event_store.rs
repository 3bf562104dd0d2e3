//! Event store port for the append-only task event log.

use crate::task::domain::DomainEvent;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for event store operations.
pub type EventStoreResult<T> = Result<T, EventStoreError>;

/// Append-only, ordered log of domain events.
///
/// No operation removes or reorders recorded events. Reads return owned
/// snapshots, so callers cannot alter the log through them.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Appends an event to the end of the log.
    ///
    /// # Errors
    ///
    /// Returns [`EventStoreError::Persistence`] when the log cannot be
    /// written.
    async fn append(&self, event: DomainEvent) -> EventStoreResult<()>;

    /// Returns every recorded event in append order.
    ///
    /// # Errors
    ///
    /// Returns [`EventStoreError::Persistence`] when the log cannot be read.
    async fn all(&self) -> EventStoreResult<Vec<DomainEvent>>;

    /// Returns at most `limit` of the latest events, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`EventStoreError::Persistence`] when the log cannot be read.
    async fn recent(&self, limit: usize) -> EventStoreResult<Vec<DomainEvent>>;
}

/// Errors returned by event store implementations.
#[derive(Debug, Clone, Error)]
pub enum EventStoreError {
    /// Persistence-layer failure.
    #[error("event store error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl EventStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
