//! Then steps for task command BDD scenarios.

use super::world::{TaskCommandWorld, run_async};
use rstest_bdd_macros::then;
use tripwire::{breaker::domain::CircuitState, task::services::TaskCommandError};

#[then("the event log contains {count:usize} events")]
fn event_log_size(world: &TaskCommandWorld, count: usize) -> Result<(), eyre::Report> {
    let events = run_async(world.service.events())?;
    if events.len() != count {
        return Err(eyre::eyre!(
            "expected {count} events, found {}",
            events.len()
        ));
    }
    Ok(())
}

#[then(r#"the latest event is "{kind}""#)]
fn latest_event_is(world: &TaskCommandWorld, kind: String) -> Result<(), eyre::Report> {
    let events = run_async(world.service.events())?;
    let latest = events
        .last()
        .ok_or_else(|| eyre::eyre!("event log is empty"))?;
    if latest.kind().as_str() != kind {
        return Err(eyre::eyre!(
            "expected latest event {kind}, found {}",
            latest.kind().as_str()
        ));
    }
    Ok(())
}

#[then("every event payload matches its aggregate id")]
fn payloads_match(world: &TaskCommandWorld) -> Result<(), eyre::Report> {
    let events = run_async(world.service.events())?;
    if let Some(event) = events
        .iter()
        .find(|event| event.payload().id() != event.aggregate_id())
    {
        return Err(eyre::eyre!("event payload does not match aggregate: {event:?}"));
    }
    Ok(())
}

#[then(r#"the breaker state is "{state}""#)]
fn breaker_state_is(world: &TaskCommandWorld, state: String) -> Result<(), eyre::Report> {
    let expected = CircuitState::try_from(state.as_str())
        .map_err(|err| eyre::eyre!("invalid expected state in scenario: {err}"))?;
    let actual = world.service.breaker_state();
    if actual != expected {
        return Err(eyre::eyre!(
            "expected state {}, found {}",
            expected.as_str(),
            actual.as_str()
        ));
    }
    Ok(())
}

#[then("the last command was rejected by the breaker")]
fn last_command_rejected(world: &TaskCommandWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no command has been issued"))?;
    if !matches!(result, Err(TaskCommandError::BreakerOpen { .. })) {
        return Err(eyre::eyre!("expected breaker rejection, got {result:?}"));
    }
    Ok(())
}
