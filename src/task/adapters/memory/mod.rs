//! In-memory adapters for the task event log and task lookup.

mod event_store;
mod task;

pub use event_store::InMemoryEventStore;
pub use task::InMemoryTaskRepository;
