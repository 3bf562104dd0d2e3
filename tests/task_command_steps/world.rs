//! Shared world state for task command BDD scenarios.

use std::sync::Arc;

use rstest::fixture;
use tripwire::{
    breaker::domain::BreakerConfig,
    clock::ManualClock,
    task::{
        adapters::simulated::SimulatedTaskGateway,
        domain::Task,
        services::{InMemoryTaskCommandService, TaskCommandError},
    },
};

/// Service type used by the BDD world.
pub type TestTaskService = InMemoryTaskCommandService<SimulatedTaskGateway, ManualClock>;

/// Scenario world for task command behaviour tests.
pub struct TaskCommandWorld {
    pub service: TestTaskService,
    pub gateway: Arc<SimulatedTaskGateway>,
    pub last_task: Option<Task>,
    pub last_result: Option<Result<Task, TaskCommandError>>,
}

impl TaskCommandWorld {
    /// Creates a world around a fresh service with an instant gateway.
    #[must_use]
    pub fn new() -> Self {
        let gateway = Arc::new(SimulatedTaskGateway::instant());
        let service = InMemoryTaskCommandService::in_memory(
            Arc::clone(&gateway),
            Arc::new(ManualClock::starting_now()),
            BreakerConfig::default(),
        );

        Self {
            service,
            gateway,
            last_task: None,
            last_result: None,
        }
    }

    /// Stores a command result, remembering the task when it succeeded.
    pub fn remember(&mut self, result: Result<Task, TaskCommandError>) {
        if let Ok(ref task) = result {
            self.last_task = Some(task.clone());
        }
        self.last_result = Some(result);
    }
}

impl Default for TaskCommandWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskCommandWorld {
    TaskCommandWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
