use crate::common::{DomainError, DomainResult};
use crate::domains::logger::DynLogger;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::mpsc;

use super::events::NavigationEvent;
use super::ports::{CompletionNotifier, ExecutorSignal, NavigationExecutor};
use super::queue::GoalQueue;
use super::types::{
    DispatchState, DispatchStatus, Goal, GoalOutcome, GoalPoseBuilder, GoalRequest, Position2D,
    SubmissionId,
};

/// Drains the goal queue one goal at a time against the navigation executor.
///
/// The controller owns the queue. Queue and state only change in
/// [`on_goal_arrived`](Self::on_goal_arrived) and
/// [`on_executor_done`](Self::on_executor_done); callers must serialize those
/// two calls (the [`DispatchActor`](super::actors::DispatchActor) does).
pub struct DispatchController {
    queue: GoalQueue,
    in_flight: Option<SubmissionId>,
    next_submission: SubmissionId,
    pose_builder: GoalPoseBuilder,
    executor: Arc<dyn NavigationExecutor>,
    signals: mpsc::UnboundedSender<ExecutorSignal>,
    logger: DynLogger,
    uncommitted_events: Vec<NavigationEvent>,
}

impl DispatchController {
    pub fn new(
        executor: Arc<dyn NavigationExecutor>,
        pose_builder: GoalPoseBuilder,
        signals: mpsc::UnboundedSender<ExecutorSignal>,
        logger: DynLogger,
    ) -> Self {
        Self {
            queue: GoalQueue::new(),
            in_flight: None,
            next_submission: 1,
            pose_builder,
            executor,
            signals,
            logger,
            uncommitted_events: Vec::new(),
        }
    }

    pub fn state(&self) -> DispatchState {
        match self.in_flight {
            Some(_) => DispatchState::Dispatching,
            None => DispatchState::Idle,
        }
    }

    pub fn in_flight(&self) -> Option<SubmissionId> {
        self.in_flight
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn front(&self) -> DomainResult<&Goal> {
        self.queue.front()
    }

    /// Idle with nothing left to send.
    pub fn is_drained(&self) -> bool {
        self.in_flight.is_none() && self.queue.is_empty()
    }

    pub fn status(&self) -> DispatchStatus {
        DispatchStatus {
            state: self.state(),
            in_flight: self.in_flight,
            pending: self.queue.iter().copied().collect(),
        }
    }

    /// Queue a new goal and submit it right away if the executor is idle.
    pub fn on_goal_arrived(&mut self, goal: Goal) -> DomainResult<()> {
        self.queue.enqueue(goal);
        self.logger.info(&format!(
            "Queued goal {} ({} goal(s) in queue)",
            goal,
            self.queue.len()
        ));
        self.add_event(NavigationEvent::GoalQueued {
            goal,
            queue_len: self.queue.len(),
            timestamp: Utc::now(),
        });

        match self.state() {
            DispatchState::Idle => self.dispatch_front(),
            DispatchState::Dispatching => Ok(()),
        }
    }

    /// Retire the in-flight goal and move on to the next one.
    ///
    /// Every terminal outcome advances the queue; failures are reported, not retried.
    /// Errors mean the completion was not applied.
    pub fn on_executor_done(
        &mut self,
        submission_id: SubmissionId,
        outcome: GoalOutcome,
    ) -> DomainResult<()> {
        match self.in_flight {
            None => return Err(DomainError::NoGoalInFlight { submission_id }),
            Some(expected) if expected != submission_id => {
                return Err(DomainError::StaleCompletion {
                    expected,
                    actual: submission_id,
                })
            }
            Some(_) => {}
        }

        let goal = self.queue.dequeue()?;
        self.in_flight = None;
        self.record_finished(submission_id, goal, outcome);

        self.dispatch_front()
    }

    pub fn on_executor_active(&mut self, submission_id: SubmissionId) {
        if self.in_flight != Some(submission_id) {
            return;
        }
        self.logger
            .info(&format!("Goal submission {} just went active", submission_id));
        self.add_event(NavigationEvent::GoalActive {
            submission_id,
            timestamp: Utc::now(),
        });
    }

    pub fn on_executor_feedback(&mut self, submission_id: SubmissionId, position: Option<Position2D>) {
        if self.in_flight != Some(submission_id) {
            return;
        }
        self.add_event(NavigationEvent::GoalFeedback {
            submission_id,
            position,
            timestamp: Utc::now(),
        });
    }

    /// Submit the front goal, or go idle when the queue is empty.
    ///
    /// A goal the executor refuses finishes as [`GoalOutcome::Rejected`] and the
    /// next one is tried, so a non-empty queue always has a goal in flight.
    fn dispatch_front(&mut self) -> DomainResult<()> {
        loop {
            let goal = match self.queue.front() {
                Ok(goal) => *goal,
                Err(_) => break,
            };
            let submission_id = self.next_submission;
            self.next_submission += 1;

            let target_pose = self.pose_builder.build(&goal);
            let request = GoalRequest {
                submission_id,
                goal,
                target_pose: target_pose.clone(),
            };
            let notifier = CompletionNotifier::new(submission_id, self.signals.clone());

            self.logger
                .info(&format!("Sending goal {} as submission {}", goal, submission_id));
            match self.executor.submit(request, notifier) {
                Ok(()) => {
                    self.in_flight = Some(submission_id);
                    self.add_event(NavigationEvent::GoalDispatched {
                        submission_id,
                        target_pose,
                        timestamp: Utc::now(),
                    });
                    return Ok(());
                }
                Err(e) => {
                    self.logger.error(&format!(
                        "Executor refused submission {} for goal {}: {}",
                        submission_id, goal, e
                    ));
                    let goal = self.queue.dequeue()?;
                    self.record_finished(submission_id, goal, GoalOutcome::Rejected);
                }
            }
        }

        self.logger.info("Goal queue drained, executor idle");
        self.add_event(NavigationEvent::DispatcherIdle {
            timestamp: Utc::now(),
        });
        Ok(())
    }

    fn record_finished(&mut self, submission_id: SubmissionId, goal: Goal, outcome: GoalOutcome) {
        if outcome.is_success() {
            self.logger.info(&format!(
                "Goal {} finished in state [{}]",
                goal, outcome
            ));
        } else {
            let failure = DomainError::GoalExecutionFailed {
                submission_id,
                outcome,
            };
            self.logger.warn(&format!("{} (goal {})", failure, goal));
        }
        self.add_event(NavigationEvent::GoalFinished {
            submission_id,
            goal,
            outcome,
            remaining: self.queue.len(),
            timestamp: Utc::now(),
        });
    }

    fn add_event(&mut self, event: NavigationEvent) {
        self.uncommitted_events.push(event);
    }

    pub fn uncommitted_events(&self) -> &[NavigationEvent] {
        &self.uncommitted_events
    }

    /// Hand over the uncommitted events, leaving the buffer empty.
    pub fn take_events(&mut self) -> Vec<NavigationEvent> {
        std::mem::take(&mut self.uncommitted_events)
    }
}
