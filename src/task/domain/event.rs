//! Immutable domain events recorded for every task mutation.

use super::{Task, TaskId, TaskStatus};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Kind of task mutation an event records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainEventKind {
    /// A task was created.
    TaskCreated,
    /// A task's status changed to anything other than `completed`.
    TaskUpdated,
    /// A task's status changed to `completed`.
    TaskCompleted,
    /// Reserved for failed tasks. Status changes to `failed` are currently
    /// recorded as [`DomainEventKind::TaskUpdated`].
    TaskFailed,
}

impl DomainEventKind {
    /// Returns the event kind recorded when a task moves to `status`.
    #[must_use]
    pub const fn for_status_change(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Completed => Self::TaskCompleted,
            TaskStatus::Pending | TaskStatus::InProgress | TaskStatus::Failed => Self::TaskUpdated,
        }
    }

    /// Returns the canonical event name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TaskCreated => "TASK_CREATED",
            Self::TaskUpdated => "TASK_UPDATED",
            Self::TaskCompleted => "TASK_COMPLETED",
            Self::TaskFailed => "TASK_FAILED",
        }
    }
}

/// A recorded task mutation.
///
/// The payload is a full snapshot of the task after the mutation, and the
/// aggregate identifier always equals the payload's identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainEvent {
    #[serde(rename = "type")]
    kind: DomainEventKind,
    payload: Task,
    timestamp: DateTime<Utc>,
    aggregate_id: TaskId,
}

impl DomainEvent {
    /// Records the creation of `task`.
    #[must_use]
    pub fn task_created(task: &Task, clock: &impl Clock) -> Self {
        Self::new(DomainEventKind::TaskCreated, task, clock)
    }

    /// Records a status change that produced `task`.
    #[must_use]
    pub fn status_changed(task: &Task, clock: &impl Clock) -> Self {
        Self::new(
            DomainEventKind::for_status_change(task.status()),
            task,
            clock,
        )
    }

    fn new(kind: DomainEventKind, task: &Task, clock: &impl Clock) -> Self {
        Self {
            kind,
            payload: task.clone(),
            timestamp: clock.utc(),
            aggregate_id: task.id(),
        }
    }

    /// Returns the event kind.
    #[must_use]
    pub const fn kind(&self) -> DomainEventKind {
        self.kind
    }

    /// Returns the task snapshot taken when the event was recorded.
    #[must_use]
    pub const fn payload(&self) -> &Task {
        &self.payload
    }

    /// Returns the event creation time.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns the identifier of the task the event belongs to.
    #[must_use]
    pub const fn aggregate_id(&self) -> TaskId {
        self.aggregate_id
    }
}
