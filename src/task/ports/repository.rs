//! Repository port for looking tasks up by identifier.

use crate::task::domain::{Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Latest-snapshot storage for tasks.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores `task`, replacing any earlier snapshot with the same identifier.
    ///
    /// A replaced task keeps its original position in [`TaskRepository::all`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the snapshot cannot
    /// be written.
    async fn save(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the repository cannot
    /// be read.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns every stored task in first-saved order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the repository cannot
    /// be read.
    async fn all(&self) -> TaskRepositoryResult<Vec<Task>>;

    /// Removes a task, returning the snapshot that was stored.
    ///
    /// Used to undo a save whose event could not be recorded.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the snapshot cannot
    /// be deleted.
    async fn remove(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
