//! In-memory integration tests for read-side projections.

use super::helpers::{Harness, harness};
use rstest::rstest;
use tripwire::task::{
    domain::{TaskPriority, TaskStatus},
    services::{DEFAULT_RECENT_EVENT_LIMIT, TaskMetrics, TaskQueryService},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn metrics_follow_live_task_collection(harness: Harness) -> eyre::Result<()> {
    let service = &harness.service;
    let first = service.create_task("One", TaskPriority::Low).await?;
    let second = service.create_task("Two", TaskPriority::Medium).await?;
    service.create_task("Three", TaskPriority::Low).await?;
    let fourth = service.create_task("Four", TaskPriority::High).await?;
    service.update_task_status(first, TaskStatus::Completed).await?;
    service.update_task_status(second, TaskStatus::Completed).await?;
    service.update_task_status(fourth, TaskStatus::InProgress).await?;

    let metrics = TaskQueryService::task_metrics(&service.tasks().await?);

    eyre::ensure!(
        metrics
            == TaskMetrics {
                total: 4,
                completed: 2,
                in_progress: 1,
                pending: 1,
                failed: 0,
                high_priority: 1,
            },
        "unexpected metrics {metrics:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn recent_events_window_is_newest_first(harness: Harness) -> eyre::Result<()> {
    let service = &harness.service;
    let mut created = Vec::new();
    for index in 0..10 {
        harness.clock.advance_millis(100);
        created.push(service.create_task(format!("Task {index}"), TaskPriority::Low).await?);
    }

    let events = service.events().await?;
    let recent = TaskQueryService::recent_events(&events, DEFAULT_RECENT_EVENT_LIMIT);

    let recent_ids: Vec<_> = recent.iter().map(|event| event.aggregate_id()).collect();
    let expected_ids: Vec<_> = created.iter().rev().take(5).map(|task| task.id()).collect();
    eyre::ensure!(recent_ids == expected_ids);
    Ok(())
}
