mod support;

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use goal_sender::adapters::outbound::{LogLevel, RecordingLogger, SimulatedExecutor};
use goal_sender::application::observe_events;
use goal_sender::config::SimulatorConfig;
use goal_sender::domains::navigation::*;
use support::ManualExecutor;

/// Round-trip through the actor so everything sent before this call is handled.
async fn settle(handle: &DispatchHandle) -> DispatchStatus {
    handle.status().await.unwrap()
}

#[tokio::test]
async fn test_actor_dispatches_in_order() {
    let executor = ManualExecutor::new();
    let (handle, _task) = DispatchActor::spawn(
        executor.clone(),
        GoalPoseBuilder::default(),
        16,
        None,
        RecordingLogger::new(),
    );

    handle.submit_goal(1.0, 2.0).await.unwrap();
    handle.submit_goal(3.0, 4.0).await.unwrap();

    let status = settle(&handle).await;
    assert_eq!(status.state, DispatchState::Dispatching);
    assert_eq!(status.queue_len(), 2);
    assert_eq!(executor.submitted_goals(), vec![Goal::new(1.0, 2.0)]);

    executor.complete_latest(GoalOutcome::Succeeded);
    let status = settle(&handle).await;
    assert_eq!(status.pending, vec![Goal::new(3.0, 4.0)]);
    assert_eq!(executor.submitted_goals(), vec![Goal::new(1.0, 2.0), Goal::new(3.0, 4.0)]);

    executor.complete_latest(GoalOutcome::Aborted);
    let status = settle(&handle).await;
    assert_eq!(status.state, DispatchState::Idle);
    assert_eq!(status.in_flight, None);
    assert_eq!(executor.requests().len(), 2);
}

#[tokio::test]
async fn test_concurrent_producers_never_double_submit() {
    let executor = ManualExecutor::new();
    let (handle, _task) = DispatchActor::spawn(
        executor.clone(),
        GoalPoseBuilder::default(),
        4,
        None,
        RecordingLogger::new(),
    );

    let producers: Vec<_> = (0..4)
        .map(|p| {
            let handle = handle.clone();
            tokio::spawn(async move {
                for i in 0..5 {
                    handle.submit_goal(p as f64, i as f64).await.unwrap();
                }
            })
        })
        .collect();

    let completer = {
        let executor = executor.clone();
        let handle = handle.clone();
        tokio::spawn(async move {
            let mut completed = 0;
            while completed < 20 {
                assert!(executor.outstanding() <= 1);
                if let Some(id) = executor.last_submission() {
                    if executor.take_notifier(id).map(|n| n.done(GoalOutcome::Succeeded)).is_some() {
                        completed += 1;
                    }
                }
                handle.status().await.unwrap();
                tokio::task::yield_now().await;
            }
        })
    };

    for producer in producers {
        producer.await.unwrap();
    }
    tokio::time::timeout(Duration::from_secs(5), completer)
        .await
        .expect("all goals should complete")
        .unwrap();

    let status = settle(&handle).await;
    assert_eq!(status.state, DispatchState::Idle);
    assert_eq!(executor.requests().len(), 20);

    // Each producer's goals keep their relative order.
    for p in 0..4 {
        let ys: Vec<f64> = executor
            .submitted_goals()
            .iter()
            .filter(|g| g.x == p as f64)
            .map(|g| g.y)
            .collect();
        assert_eq!(ys, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    }
}

#[tokio::test]
async fn test_actor_finishes_queue_after_handles_drop() {
    let executor = ManualExecutor::new();
    let (handle, task) = DispatchActor::spawn(
        executor.clone(),
        GoalPoseBuilder::default(),
        16,
        None,
        RecordingLogger::new(),
    );

    handle.submit_goal(1.0, 1.0).await.unwrap();
    handle.submit_goal(2.0, 2.0).await.unwrap();
    settle(&handle).await;
    drop(handle);

    tokio::task::yield_now().await;
    assert!(!task.is_finished());

    executor.complete_latest(GoalOutcome::Succeeded);
    // Wait for the second submission to appear before completing it.
    tokio::time::timeout(Duration::from_secs(1), async {
        while executor.requests().len() < 2 {
            tokio::task::yield_now().await;
        }
    })
    .await
    .unwrap();
    executor.complete_latest(GoalOutcome::Succeeded);

    tokio::time::timeout(Duration::from_secs(1), task)
        .await
        .expect("actor should stop once drained")
        .unwrap();
}

#[tokio::test]
async fn test_actor_stops_after_refused_dispatch() {
    let executor = ManualExecutor::new();
    let logger = RecordingLogger::new();
    let (handle, task) = DispatchActor::spawn(
        executor.clone(),
        GoalPoseBuilder::default(),
        16,
        None,
        logger.clone(),
    );

    handle.submit_goal(1.0, 1.0).await.unwrap();
    handle.submit_goal(2.0, 2.0).await.unwrap();
    settle(&handle).await;

    executor.fail_next_submit();
    executor.complete_latest(GoalOutcome::Succeeded);
    let status = settle(&handle).await;
    assert_eq!(status.state, DispatchState::Idle);
    assert!(status.pending.is_empty());
    drop(handle);

    tokio::time::timeout(Duration::from_secs(1), task)
        .await
        .expect("actor should stop once nothing is in flight")
        .unwrap();
    assert!(logger.contains(LogLevel::Warn, "REJECTED"));
    // The lost report of the refused submission is ignored, not misreported.
    assert!(logger.contains(LogLevel::Warn, "Ignoring executor completion"));
    assert!(!logger.contains(LogLevel::Error, "applied, but the next dispatch failed"));
}

#[tokio::test]
async fn test_events_reach_observer() {
    let executor = ManualExecutor::new();
    let (event_sender, event_receiver) = mpsc::channel(64);
    let observer = tokio::spawn(observe_events(event_receiver));
    let (handle, task) = DispatchActor::spawn(
        executor.clone(),
        GoalPoseBuilder::default(),
        16,
        Some(event_sender),
        RecordingLogger::new(),
    );

    handle.submit_goal(1.0, 2.0).await.unwrap();
    handle.submit_goal(3.0, 4.0).await.unwrap();
    settle(&handle).await;
    executor.complete_latest(GoalOutcome::Preempted);
    settle(&handle).await;
    executor.complete_latest(GoalOutcome::Succeeded);
    drop(handle);

    tokio::time::timeout(Duration::from_secs(1), task).await.unwrap().unwrap();
    let projection = observer.await.unwrap();

    assert_eq!(projection.goals_received, 2);
    assert_eq!(projection.goals_dispatched, 2);
    assert_eq!(projection.goals_succeeded, 1);
    assert_eq!(projection.failures_by_outcome.get(&GoalOutcome::Preempted), Some(&1));
}

#[tokio::test]
async fn test_simulated_executor_treats_nan_failure_rate_as_zero() {
    let logger = RecordingLogger::new();
    let config = SimulatorConfig {
        drive_time_ms: 5,
        failure_rate: f64::NAN,
        ready_after_polls: 0,
    };
    let executor = Arc::new(SimulatedExecutor::new(&config, logger.clone()));
    assert!(logger.contains(LogLevel::Warn, "not finite"));

    let (event_sender, event_receiver) = mpsc::channel(64);
    let observer = tokio::spawn(observe_events(event_receiver));
    let (handle, task) = DispatchActor::spawn(
        executor.clone(),
        GoalPoseBuilder::default(),
        16,
        Some(event_sender),
        logger.clone(),
    );
    handle.submit_goal(4.0, 5.0).await.unwrap();
    drop(handle);

    tokio::time::timeout(Duration::from_secs(5), task).await.unwrap().unwrap();
    let projection = observer.await.unwrap();
    assert_eq!(projection.goals_succeeded, 1);
    assert_eq!(executor.position(), Position2D { x: 4.0, y: 5.0 });
}

#[tokio::test]
async fn test_simulated_executor_drains_queue() {
    let logger = RecordingLogger::new();
    let config = SimulatorConfig {
        drive_time_ms: 10,
        failure_rate: 0.0,
        ready_after_polls: 0,
    };
    let executor = Arc::new(SimulatedExecutor::new(&config, logger.clone()));
    let (handle, task) = DispatchActor::spawn(
        executor.clone(),
        GoalPoseBuilder::default(),
        16,
        None,
        logger.clone(),
    );

    for i in 1..=3 {
        handle.submit_goal(i as f64, 0.0).await.unwrap();
    }
    drop(handle);

    tokio::time::timeout(Duration::from_secs(5), task).await.unwrap().unwrap();
    assert_eq!(executor.submitted(), 3);
    assert_eq!(executor.position(), Position2D { x: 3.0, y: 0.0 });
}
