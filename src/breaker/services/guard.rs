//! Clock-driven circuit breaker wrapping arbitrary async operations.

use crate::breaker::domain::{
    Admission, BreakerConfig, BreakerError, BreakerSnapshot, CallOutcome, CircuitState,
};
use mockable::Clock;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Single-process circuit breaker.
///
/// The gate check and the outcome update each run inside one critical
/// section; the lock is released while the operation itself is awaited.
pub struct CircuitBreaker<C>
where
    C: Clock + Send + Sync,
{
    config: BreakerConfig,
    clock: Arc<C>,
    snapshot: Mutex<BreakerSnapshot>,
}

impl<C> CircuitBreaker<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a closed breaker.
    #[must_use]
    pub const fn new(config: BreakerConfig, clock: Arc<C>) -> Self {
        Self {
            config,
            clock,
            snapshot: Mutex::new(BreakerSnapshot::closed()),
        }
    }

    /// Returns the configuration fixed at construction.
    #[must_use]
    pub const fn config(&self) -> &BreakerConfig {
        &self.config
    }

    /// Returns the current state without side effects.
    #[must_use]
    pub fn state(&self) -> CircuitState {
        self.snapshot().state()
    }

    /// Returns a copy of the full breaker state.
    #[must_use]
    pub fn snapshot(&self) -> BreakerSnapshot {
        *self.lock()
    }

    /// Runs `operation` through the gate.
    ///
    /// The operation is invoked at most once. Its result is returned after the
    /// breaker has recorded the outcome.
    ///
    /// # Errors
    ///
    /// Returns [`BreakerError::Open`] without invoking the operation while the
    /// breaker is open and its cooldown has not elapsed, or
    /// [`BreakerError::Operation`] carrying the operation's own error.
    pub async fn execute<T, E, F, Fut>(&self, operation: F) -> Result<T, BreakerError<E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.admit::<E>()?;
        let result = operation().await;
        let outcome = match result {
            Ok(_) => CallOutcome::Success,
            Err(_) => CallOutcome::Failure,
        };
        self.record(outcome);
        result.map_err(BreakerError::Operation)
    }

    fn admit<E>(&self) -> Result<(), BreakerError<E>> {
        let now = self.clock.utc();
        let mut snapshot = self.lock();
        match snapshot.admit(now) {
            Admission::Allowed(admitted) => {
                if snapshot.state() == CircuitState::Open {
                    info!(
                        failure_count = admitted.failure_count(),
                        "circuit half-open, probing operation"
                    );
                }
                *snapshot = admitted;
                Ok(())
            }
            Admission::Rejected { next_attempt } => {
                debug!(%next_attempt, "circuit open, call rejected");
                Err(BreakerError::Open { next_attempt })
            }
        }
    }

    fn record(&self, outcome: CallOutcome) {
        let now = self.clock.utc();
        let mut snapshot = self.lock();
        let previous = snapshot.state();
        let next = snapshot.record(outcome, now, &self.config);
        match (previous, next.state()) {
            (CircuitState::Closed | CircuitState::HalfOpen, CircuitState::Open) => warn!(
                failure_count = next.failure_count(),
                next_attempt = ?next.next_attempt(),
                "circuit opened"
            ),
            (CircuitState::HalfOpen, CircuitState::Closed) => info!("circuit closed"),
            _ => {}
        }
        *snapshot = next;
    }

    fn lock(&self) -> MutexGuard<'_, BreakerSnapshot> {
        self.snapshot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
