//! In-memory append-only event log.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::task::{
    domain::DomainEvent,
    ports::{EventStore, EventStoreError, EventStoreResult},
};

/// Process-lifetime event log backed by a vector.
///
/// Deliberately not `Clone`: each command service owns its own log.
#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    events: RwLock<Vec<DomainEvent>>,
}

impl InMemoryEventStore {
    /// Creates an empty event log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl ToString) -> EventStoreError {
    EventStoreError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn append(&self, event: DomainEvent) -> EventStoreResult<()> {
        self.events.write().map_err(poisoned)?.push(event);
        Ok(())
    }

    async fn all(&self) -> EventStoreResult<Vec<DomainEvent>> {
        Ok(self.events.read().map_err(poisoned)?.clone())
    }

    async fn recent(&self, limit: usize) -> EventStoreResult<Vec<DomainEvent>> {
        let events = self.events.read().map_err(poisoned)?;
        Ok(events.iter().rev().take(limit).cloned().collect())
    }
}
