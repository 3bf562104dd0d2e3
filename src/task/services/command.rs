//! Write side: task mutations gated by a circuit breaker.

use crate::breaker::{
    domain::{BreakerConfig, BreakerError, BreakerSnapshot, CircuitState},
    services::CircuitBreaker,
};
use crate::task::{
    adapters::memory::{InMemoryEventStore, InMemoryTaskRepository},
    domain::{DomainEvent, Task, TaskId, TaskPriority, TaskStatus},
    ports::{
        EventStore, EventStoreError, TaskGateway, TaskGatewayError, TaskRepository,
        TaskRepositoryError,
    },
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Service-level errors for task commands.
#[derive(Debug, Error)]
pub enum TaskCommandError {
    /// The circuit breaker rejected the call; nothing was attempted.
    #[error("task service degraded, retry after {next_attempt}")]
    BreakerOpen {
        /// Earliest instant at which the breaker admits a probe.
        next_attempt: DateTime<Utc>,
    },

    /// The remote operation ran and failed.
    #[error(transparent)]
    OperationFailed(#[from] TaskGatewayError),

    /// No task with the identifier is known to this service.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The event log could not be accessed.
    #[error(transparent)]
    EventStore(#[from] EventStoreError),

    /// The task repository could not be accessed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

impl From<BreakerError<TaskGatewayError>> for TaskCommandError {
    fn from(err: BreakerError<TaskGatewayError>) -> Self {
        match err {
            BreakerError::Open { next_attempt } => Self::BreakerOpen { next_attempt },
            BreakerError::Operation(source) => Self::OperationFailed(source),
        }
    }
}

/// Result type for task command operations.
pub type TaskCommandResult<T> = Result<T, TaskCommandError>;

/// Command service wired to in-memory storage.
pub type InMemoryTaskCommandService<G, C> =
    TaskCommandService<G, InMemoryEventStore, InMemoryTaskRepository, C>;

/// Performs task mutations through a circuit breaker and records them.
///
/// Each successful mutation appends exactly one event; a rejected or failed
/// mutation appends none. The service owns its breaker, event store and
/// repository outright.
pub struct TaskCommandService<G, S, R, C>
where
    G: TaskGateway,
    S: EventStore,
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    gateway: Arc<G>,
    events: S,
    repository: R,
    clock: Arc<C>,
    breaker: CircuitBreaker<C>,
}

impl<G, C> TaskCommandService<G, InMemoryEventStore, InMemoryTaskRepository, C>
where
    G: TaskGateway,
    C: Clock + Send + Sync,
{
    /// Creates a service with a fresh in-memory event log and repository.
    #[must_use]
    pub fn in_memory(gateway: Arc<G>, clock: Arc<C>, config: BreakerConfig) -> Self {
        Self::new(
            gateway,
            InMemoryEventStore::new(),
            InMemoryTaskRepository::new(),
            clock,
            config,
        )
    }
}

impl<G, S, R, C> TaskCommandService<G, S, R, C>
where
    G: TaskGateway,
    S: EventStore,
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a service with its own circuit breaker.
    #[must_use]
    pub fn new(
        gateway: Arc<G>,
        events: S,
        repository: R,
        clock: Arc<C>,
        config: BreakerConfig,
    ) -> Self {
        let breaker = CircuitBreaker::new(config, Arc::clone(&clock));
        Self {
            gateway,
            events,
            repository,
            clock,
            breaker,
        }
    }

    /// Creates a pending task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCommandError::BreakerOpen`] when the breaker rejects the
    /// call, [`TaskCommandError::OperationFailed`] when the gateway fails, or
    /// a storage error when the task or its event cannot be recorded.
    pub async fn create_task(
        &self,
        title: impl Into<String>,
        priority: TaskPriority,
    ) -> TaskCommandResult<Task> {
        let task_title = title.into();
        let outcome = self
            .breaker
            .execute(move || async move {
                let task = Task::new(task_title, priority, &*self.clock);
                self.gateway.create_task(&task).await?;
                Ok::<_, TaskGatewayError>(task)
            })
            .await;
        let task = outcome.inspect_err(|err| warn!(error = %err, "task creation failed"))?;

        self.record(&task, DomainEvent::task_created(&task, &*self.clock))
            .await?;
        info!(task_id = %task.id(), priority = task.priority().as_str(), "task created");
        Ok(task)
    }

    /// Moves `task` to `status`.
    ///
    /// The task is taken by value; no check is made that the transition is
    /// sensible. Completing a task records a `TASK_COMPLETED` event and every
    /// other status records `TASK_UPDATED`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCommandError::BreakerOpen`] when the breaker rejects the
    /// call, [`TaskCommandError::OperationFailed`] when the gateway fails, or
    /// a storage error when the task or its event cannot be recorded.
    pub async fn update_task_status(
        &self,
        task: Task,
        status: TaskStatus,
    ) -> TaskCommandResult<Task> {
        let task_id = task.id();
        let outcome = self
            .breaker
            .execute(move || async move {
                let updated = task.with_status(status, &*self.clock);
                self.gateway.update_task(&updated).await?;
                Ok::<_, TaskGatewayError>(updated)
            })
            .await;
        let updated = outcome
            .inspect_err(|err| warn!(%task_id, error = %err, "task status update failed"))?;

        self.record(&updated, DomainEvent::status_changed(&updated, &*self.clock))
            .await?;
        info!(%task_id, status = status.as_str(), "task status updated");
        Ok(updated)
    }

    /// Moves the stored task with identifier `id` to `status`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCommandError::TaskNotFound`] before consulting the
    /// breaker when the task is unknown, otherwise the errors of
    /// [`TaskCommandService::update_task_status`].
    pub async fn update_task_status_by_id(
        &self,
        id: TaskId,
        status: TaskStatus,
    ) -> TaskCommandResult<Task> {
        let task = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(TaskCommandError::TaskNotFound(id))?;
        self.update_task_status(task, status).await
    }

    /// Returns the full event log in append order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCommandError::EventStore`] when the log cannot be read.
    pub async fn events(&self) -> TaskCommandResult<Vec<DomainEvent>> {
        Ok(self.events.all().await?)
    }

    /// Returns the latest snapshot of every task, in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCommandError::Repository`] when the repository cannot be
    /// read.
    pub async fn tasks(&self) -> TaskCommandResult<Vec<Task>> {
        Ok(self.repository.all().await?)
    }

    /// Returns the current breaker state.
    #[must_use]
    pub fn breaker_state(&self) -> CircuitState {
        self.breaker.state()
    }

    /// Returns the full breaker state, including counters.
    #[must_use]
    pub fn breaker_snapshot(&self) -> BreakerSnapshot {
        self.breaker.snapshot()
    }

    /// Saves the snapshot and appends its event as one unit.
    ///
    /// When the append fails the repository is put back to the snapshot it
    /// held before, so a failed command leaves neither a task nor an event.
    async fn record(&self, task: &Task, event: DomainEvent) -> TaskCommandResult<()> {
        let previous = self.repository.find_by_id(task.id()).await?;
        self.repository.save(task).await?;
        if let Err(err) = self.events.append(event).await {
            self.restore(task.id(), previous).await;
            return Err(err.into());
        }
        Ok(())
    }

    async fn restore(&self, id: TaskId, previous: Option<Task>) {
        let restored = match previous {
            Some(snapshot) => self.repository.save(&snapshot).await,
            None => self.repository.remove(id).await.map(drop),
        };
        if let Err(err) = restored {
            warn!(task_id = %id, error = %err, "failed to roll back task snapshot");
        }
    }
}
