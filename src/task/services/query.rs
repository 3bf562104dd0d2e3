//! Read side: pure projections over tasks and the event log.

use crate::task::domain::{DomainEvent, Task, TaskPriority, TaskStatus};
use serde::{Deserialize, Serialize};

/// Window size used when a consumer has no preference.
pub const DEFAULT_RECENT_EVENT_LIMIT: usize = 5;

/// Counts of tasks by status, plus the number of high-priority tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskMetrics {
    /// Number of tasks.
    pub total: usize,
    /// Tasks with status `completed`.
    pub completed: usize,
    /// Tasks with status `in_progress`.
    pub in_progress: usize,
    /// Tasks with status `pending`.
    pub pending: usize,
    /// Tasks with status `failed`.
    pub failed: usize,
    /// Tasks with priority `high`, whatever their status.
    pub high_priority: usize,
}

impl TaskMetrics {
    fn count(mut self, task: &Task) -> Self {
        self.total += 1;
        match task.status() {
            TaskStatus::Pending => self.pending += 1,
            TaskStatus::InProgress => self.in_progress += 1,
            TaskStatus::Completed => self.completed += 1,
            TaskStatus::Failed => self.failed += 1,
        }
        if task.priority() == TaskPriority::High {
            self.high_priority += 1;
        }
        self
    }
}

/// Side-effect-free projections used by presentation code.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskQueryService;

impl TaskQueryService {
    /// Aggregates status and priority counts over `tasks`.
    #[must_use]
    pub fn task_metrics(tasks: &[Task]) -> TaskMetrics {
        tasks.iter().fold(TaskMetrics::default(), TaskMetrics::count)
    }

    /// Returns the last `limit` events, most recent first.
    ///
    /// Shorter logs are returned whole, still reversed; a zero limit yields
    /// nothing.
    #[must_use]
    pub fn recent_events(events: &[DomainEvent], limit: usize) -> Vec<DomainEvent> {
        events.iter().rev().take(limit).cloned().collect()
    }
}
