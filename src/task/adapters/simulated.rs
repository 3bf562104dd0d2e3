//! Gateway that imitates a slow remote task service.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::debug;

use crate::task::{
    domain::Task,
    ports::{TaskGateway, TaskGatewayError, TaskGatewayResult},
};

/// Latency applied by [`SimulatedTaskGateway::default`].
pub const DEFAULT_SIMULATED_LATENCY: Duration = Duration::from_millis(250);

/// Gateway that sleeps for a fixed latency and then accepts the call.
///
/// An outage can be switched on with [`SimulatedTaskGateway::set_failing`],
/// after which every call fails with [`TaskGatewayError::Unavailable`] once
/// the latency has elapsed.
#[derive(Debug)]
pub struct SimulatedTaskGateway {
    latency: Duration,
    failing: AtomicBool,
}

impl SimulatedTaskGateway {
    /// Creates a healthy gateway with the given latency.
    #[must_use]
    pub const fn new(latency: Duration) -> Self {
        Self {
            latency,
            failing: AtomicBool::new(false),
        }
    }

    /// Creates a healthy gateway that answers immediately.
    #[must_use]
    pub const fn instant() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Returns the simulated latency.
    #[must_use]
    pub const fn latency(&self) -> Duration {
        self.latency
    }

    /// Starts or ends a simulated outage.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Returns `true` while a simulated outage is in effect.
    #[must_use]
    pub fn is_failing(&self) -> bool {
        self.failing.load(Ordering::SeqCst)
    }

    async fn round_trip(&self, operation: &'static str, task: &Task) -> TaskGatewayResult<()> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.is_failing() {
            return Err(TaskGatewayError::Unavailable(format!(
                "simulated outage during {operation}"
            )));
        }
        debug!(task_id = %task.id(), operation, "simulated task service accepted call");
        Ok(())
    }
}

impl Default for SimulatedTaskGateway {
    fn default() -> Self {
        Self::new(DEFAULT_SIMULATED_LATENCY)
    }
}

#[async_trait]
impl TaskGateway for SimulatedTaskGateway {
    async fn create_task(&self, task: &Task) -> TaskGatewayResult<()> {
        self.round_trip("create", task).await
    }

    async fn update_task(&self, task: &Task) -> TaskGatewayResult<()> {
        self.round_trip("update", task).await
    }
}
