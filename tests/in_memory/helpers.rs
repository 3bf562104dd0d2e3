//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use rstest::fixture;
use tripwire::{
    breaker::domain::BreakerConfig,
    clock::ManualClock,
    task::{adapters::simulated::SimulatedTaskGateway, services::InMemoryTaskCommandService},
};

/// Service type used across the in-memory integration tests.
pub type TestService = InMemoryTaskCommandService<SimulatedTaskGateway, ManualClock>;

/// Wiring for one test: the service plus handles on its collaborators.
pub struct Harness {
    pub service: TestService,
    pub gateway: Arc<SimulatedTaskGateway>,
    pub clock: Arc<ManualClock>,
}

/// Provides a service backed by an instant simulated gateway and a manual
/// clock, using the default breaker configuration.
#[fixture]
pub fn harness() -> Harness {
    let gateway = Arc::new(SimulatedTaskGateway::instant());
    let clock = Arc::new(ManualClock::starting_now());
    let service = InMemoryTaskCommandService::in_memory(
        Arc::clone(&gateway),
        Arc::clone(&clock),
        BreakerConfig::default(),
    );
    Harness {
        service,
        gateway,
        clock,
    }
}
