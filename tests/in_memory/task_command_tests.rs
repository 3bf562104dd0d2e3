//! In-memory integration tests for breaker-guarded task commands.

use super::helpers::{Harness, harness};
use rstest::rstest;
use tripwire::{
    breaker::domain::CircuitState,
    task::{
        domain::{DomainEventKind, TaskPriority, TaskStatus},
        ports::TaskGatewayError,
        services::TaskCommandError,
    },
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_lifecycle_is_recorded_in_order(harness: Harness) -> eyre::Result<()> {
    let service = &harness.service;

    let task = service.create_task("Prepare demo", TaskPriority::High).await?;
    let started = service
        .update_task_status(task.clone(), TaskStatus::InProgress)
        .await?;
    let done = service
        .update_task_status(started, TaskStatus::Completed)
        .await?;

    let kinds: Vec<DomainEventKind> = service
        .events()
        .await?
        .iter()
        .map(|event| event.kind())
        .collect();
    eyre::ensure!(
        kinds
            == vec![
                DomainEventKind::TaskCreated,
                DomainEventKind::TaskUpdated,
                DomainEventKind::TaskCompleted,
            ]
    );
    eyre::ensure!(service.tasks().await? == vec![done]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn every_event_payload_matches_its_aggregate(harness: Harness) -> eyre::Result<()> {
    let service = &harness.service;
    for priority in [TaskPriority::Low, TaskPriority::Medium, TaskPriority::High] {
        let task = service.create_task("Bulk", priority).await?;
        service.update_task_status(task, TaskStatus::Failed).await?;
    }

    let events = service.events().await?;

    eyre::ensure!(events.len() == 6);
    eyre::ensure!(
        events
            .iter()
            .all(|event| event.payload().id() == event.aggregate_id())
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn outage_trips_breaker_and_leaves_log_untouched(harness: Harness) -> eyre::Result<()> {
    let service = &harness.service;
    let task = service.create_task("Before outage", TaskPriority::Low).await?;
    harness.gateway.set_failing(true);

    for _ in 0..3 {
        let result = service
            .update_task_status(task.clone(), TaskStatus::InProgress)
            .await;
        eyre::ensure!(matches!(
            result,
            Err(TaskCommandError::OperationFailed(
                TaskGatewayError::Unavailable(_)
            ))
        ));
    }
    eyre::ensure!(service.breaker_state() == CircuitState::Open);

    harness.gateway.set_failing(false);
    let rejected = service.create_task("During cooldown", TaskPriority::Low).await;
    eyre::ensure!(matches!(
        rejected,
        Err(TaskCommandError::BreakerOpen { .. })
    ));

    eyre::ensure!(service.events().await?.len() == 1);
    eyre::ensure!(service.tasks().await? == vec![task]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn service_recovers_once_cooldown_elapses(harness: Harness) -> eyre::Result<()> {
    let service = &harness.service;
    harness.gateway.set_failing(true);
    for _ in 0..3 {
        assert!(service.create_task("Lost", TaskPriority::Low).await.is_err());
    }
    harness.gateway.set_failing(false);
    harness.clock.advance_millis(5_001);

    service.create_task("Probe one", TaskPriority::Low).await?;
    eyre::ensure!(service.breaker_state() == CircuitState::HalfOpen);
    service.create_task("Probe two", TaskPriority::Low).await?;

    let snapshot = service.breaker_snapshot();
    eyre::ensure!(snapshot.state() == CircuitState::Closed);
    eyre::ensure!(snapshot.failure_count() == 0);
    eyre::ensure!(snapshot.success_count() == 0);
    eyre::ensure!(service.events().await?.len() == 2);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn separate_services_do_not_share_breakers(harness: Harness) -> eyre::Result<()> {
    let other = super::helpers::harness();
    harness.gateway.set_failing(true);
    for _ in 0..3 {
        assert!(harness.service.create_task("Lost", TaskPriority::Low).await.is_err());
    }

    other.service.create_task("Unaffected", TaskPriority::Low).await?;

    eyre::ensure!(harness.service.breaker_state() == CircuitState::Open);
    eyre::ensure!(other.service.breaker_state() == CircuitState::Closed);
    eyre::ensure!(harness.service.events().await?.is_empty());
    eyre::ensure!(other.service.events().await?.len() == 1);
    Ok(())
}
