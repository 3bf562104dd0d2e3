//! Gateway port for the remote-like side of task mutations.
//!
//! The gateway stands in for whatever slow, fallible service a task change
//! has to reach. Calls through it are the ones the circuit breaker guards.

use crate::task::domain::Task;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task gateway operations.
pub type TaskGatewayResult<T> = Result<T, TaskGatewayError>;

/// Remote operations performed for each task mutation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskGateway: Send + Sync {
    /// Submits a newly constructed task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskGatewayError`] when the remote side fails.
    async fn create_task(&self, task: &Task) -> TaskGatewayResult<()>;

    /// Submits a task whose status has changed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskGatewayError`] when the remote side fails.
    async fn update_task(&self, task: &Task) -> TaskGatewayResult<()>;
}

/// Errors returned by task gateway implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskGatewayError {
    /// The remote side could not be reached.
    #[error("task service unavailable: {0}")]
    Unavailable(String),

    /// The remote side was reached but failed the operation.
    #[error("task operation failed: {0}")]
    Remote(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskGatewayError {
    /// Wraps a remote failure.
    pub fn remote(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Remote(Arc::new(err))
    }
}
