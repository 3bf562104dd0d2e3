//! Given steps for circuit breaker BDD scenarios.

use super::world::BreakerWorld;
use rstest_bdd_macros::given;
use std::num::NonZeroU32;
use tripwire::breaker::domain::BreakerConfig;

#[given(
    "a circuit breaker with failure threshold {failures:u32}, open timeout {timeout:u64} ms and success threshold {successes:u32}"
)]
fn breaker_with_config(
    world: &mut BreakerWorld,
    failures: u32,
    timeout: u64,
    successes: u32,
) -> Result<(), eyre::Report> {
    let failure_threshold =
        NonZeroU32::new(failures).ok_or_else(|| eyre::eyre!("failure threshold must be positive"))?;
    let success_threshold =
        NonZeroU32::new(successes).ok_or_else(|| eyre::eyre!("success threshold must be positive"))?;
    world.configure(BreakerConfig::new(
        failure_threshold,
        timeout,
        success_threshold,
    ));
    Ok(())
}
