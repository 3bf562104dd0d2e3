//! Domain model for task lifecycle tracking.
//!
//! Tasks are the aggregates protected by the circuit breaker; every
//! successful mutation is recorded as an immutable [`DomainEvent`] carrying a
//! full snapshot of the task.

mod error;
mod event;
mod ids;
mod task;

pub use error::{ParseTaskPriorityError, ParseTaskStatusError};
pub use event::{DomainEvent, DomainEventKind};
pub use ids::TaskId;
pub use task::{PersistedTaskData, Task, TaskPriority, TaskStatus};
