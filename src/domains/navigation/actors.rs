// Navigation actors - single owner of the dispatch controller
use crate::common::{ApplicationError, ApplicationResult, DomainError};
use crate::domains::logger::DynLogger;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use super::controller::DispatchController;
use super::events::NavigationEvent;
use super::ports::{ExecutorSignal, NavigationExecutor};
use super::types::{DispatchStatus, Goal, GoalPoseBuilder};

#[derive(Debug)]
pub enum DispatchCommand {
    SubmitGoal(Goal),
    Status(oneshot::Sender<DispatchStatus>),
}

/// Cloneable front door to a running [`DispatchActor`].
#[derive(Clone)]
pub struct DispatchHandle {
    command_sender: mpsc::Sender<DispatchCommand>,
}

impl DispatchHandle {
    pub async fn submit_goal(&self, x: f64, y: f64) -> ApplicationResult<()> {
        self.command_sender
            .send(DispatchCommand::SubmitGoal(Goal::new(x, y)))
            .await
            .map_err(|e| ApplicationError::ChannelClosed(format!("Failed to send goal: {}", e)))
    }

    pub async fn status(&self) -> ApplicationResult<DispatchStatus> {
        let (reply, response) = oneshot::channel();
        self.command_sender
            .send(DispatchCommand::Status(reply))
            .await
            .map_err(|e| ApplicationError::ChannelClosed(format!("Failed to request status: {}", e)))?;
        response
            .await
            .map_err(|e| ApplicationError::ChannelClosed(format!("Status reply dropped: {}", e)))
    }
}

/// Event loop owning the [`DispatchController`].
///
/// Goal arrivals and executor signals are handled one message at a time, so
/// the two controller transitions never interleave.
pub struct DispatchActor {
    controller: DispatchController,
    commands: mpsc::Receiver<DispatchCommand>,
    signals: mpsc::UnboundedReceiver<ExecutorSignal>,
    event_sender: Option<mpsc::Sender<NavigationEvent>>,
    logger: DynLogger,
}

impl DispatchActor {
    pub fn new(
        executor: Arc<dyn NavigationExecutor>,
        pose_builder: GoalPoseBuilder,
        command_capacity: usize,
        event_sender: Option<mpsc::Sender<NavigationEvent>>,
        logger: DynLogger,
    ) -> (Self, DispatchHandle) {
        let (command_sender, commands) = mpsc::channel(command_capacity.max(1));
        let (signal_sender, signals) = mpsc::unbounded_channel();
        let controller = DispatchController::new(executor, pose_builder, signal_sender, logger.clone());

        let actor = Self {
            controller,
            commands,
            signals,
            event_sender,
            logger,
        };
        (actor, DispatchHandle { command_sender })
    }

    /// Build the actor and run it on the current tokio runtime.
    pub fn spawn(
        executor: Arc<dyn NavigationExecutor>,
        pose_builder: GoalPoseBuilder,
        command_capacity: usize,
        event_sender: Option<mpsc::Sender<NavigationEvent>>,
        logger: DynLogger,
    ) -> (DispatchHandle, JoinHandle<()>) {
        let (actor, handle) = Self::new(executor, pose_builder, command_capacity, event_sender, logger);
        let task = tokio::spawn(actor.run());
        (handle, task)
    }

    /// Runs until every handle is dropped and no goal is in flight.
    pub async fn run(mut self) {
        let mut commands_open = true;

        loop {
            if !commands_open && self.controller.in_flight().is_none() {
                if !self.controller.is_drained() {
                    self.logger.warn(&format!(
                        "Abandoning {} goal(s) with nothing in flight",
                        self.controller.queue_len()
                    ));
                }
                break;
            }

            // Executor signals first, so a completion is never overtaken by later commands.
            tokio::select! {
                biased;

                signal = self.signals.recv() => match signal {
                    Some(signal) => self.handle_signal(signal),
                    None => break,
                },
                command = self.commands.recv(), if commands_open => match command {
                    Some(command) => self.handle_command(command),
                    None => {
                        commands_open = false;
                        if !self.controller.is_drained() {
                            self.logger.info(&format!(
                                "All dispatch handles dropped, finishing {} remaining goal(s)",
                                self.controller.queue_len()
                            ));
                        }
                    }
                },
            }

            self.publish_events();
        }

        self.logger.info("Dispatch actor stopped");
    }

    fn handle_command(&mut self, command: DispatchCommand) {
        match command {
            DispatchCommand::SubmitGoal(goal) => {
                if let Err(e) = self.controller.on_goal_arrived(goal) {
                    self.logger.error(&format!("Failed to dispatch goal {}: {}", goal, e));
                }
            }
            DispatchCommand::Status(reply) => {
                let _ = reply.send(self.controller.status());
            }
        }
    }

    fn handle_signal(&mut self, signal: ExecutorSignal) {
        match signal {
            ExecutorSignal::Active { submission_id } => {
                self.controller.on_executor_active(submission_id)
            }
            ExecutorSignal::Feedback { submission_id, position } => {
                self.controller.on_executor_feedback(submission_id, position)
            }
            ExecutorSignal::Done { submission_id, outcome } => {
                match self.controller.on_executor_done(submission_id, outcome) {
                    Ok(()) => {}
                    Err(e @ (DomainError::NoGoalInFlight { .. } | DomainError::StaleCompletion { .. })) => {
                        self.logger.warn(&format!("Ignoring executor completion: {}", e));
                    }
                    Err(e) => {
                        self.logger.error(&format!(
                            "Completion of submission {} applied, but the next dispatch failed: {}",
                            submission_id, e
                        ));
                    }
                }
            }
        }
    }

    fn publish_events(&mut self) {
        let events = self.controller.take_events();
        let Some(sender) = &self.event_sender else {
            return;
        };
        for event in events {
            // Observers must not stall dispatching; drop on full.
            if let Err(e) = sender.try_send(event) {
                self.logger.warn(&format!("Dropping navigation event: {}", e));
            }
        }
    }
}
