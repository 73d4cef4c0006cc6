use crate::common::DomainResult;
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::mpsc;

use super::types::{GoalOutcome, GoalRequest, Position2D, SubmissionId};

/// Port to the external single-slot navigation executor.
///
/// `submit` must not block: the executor reports progress and the terminal
/// outcome later through the [`CompletionNotifier`] it is handed.
#[async_trait]
pub trait NavigationExecutor: Send + Sync {
    fn submit(&self, request: GoalRequest, notifier: CompletionNotifier) -> DomainResult<()>;

    /// Wait up to `timeout` for the executor to accept goals.
    async fn wait_until_ready(&self, timeout: Duration) -> bool;
}

/// Signals flowing back from the executor to the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutorSignal {
    Active {
        submission_id: SubmissionId,
    },
    Feedback {
        submission_id: SubmissionId,
        position: Option<Position2D>,
    },
    Done {
        submission_id: SubmissionId,
        outcome: GoalOutcome,
    },
}

/// One-shot completion handle for a single submission.
///
/// `done` consumes the notifier so a submission reports its outcome at most
/// once. A notifier dropped without reporting reports `Lost`.
#[derive(Debug)]
pub struct CompletionNotifier {
    submission_id: SubmissionId,
    signals: mpsc::UnboundedSender<ExecutorSignal>,
    finished: bool,
}

impl CompletionNotifier {
    pub fn new(submission_id: SubmissionId, signals: mpsc::UnboundedSender<ExecutorSignal>) -> Self {
        Self {
            submission_id,
            signals,
            finished: false,
        }
    }

    pub fn submission_id(&self) -> SubmissionId {
        self.submission_id
    }

    pub fn active(&self) {
        let _ = self.signals.send(ExecutorSignal::Active {
            submission_id: self.submission_id,
        });
    }

    pub fn feedback(&self, position: Option<Position2D>) {
        let _ = self.signals.send(ExecutorSignal::Feedback {
            submission_id: self.submission_id,
            position,
        });
    }

    pub fn done(mut self, outcome: GoalOutcome) {
        self.send_done(outcome);
    }

    fn send_done(&mut self, outcome: GoalOutcome) {
        if self.finished {
            return;
        }
        self.finished = true;
        // The receiver only disappears at shutdown.
        let _ = self.signals.send(ExecutorSignal::Done {
            submission_id: self.submission_id,
            outcome,
        });
    }
}

impl Drop for CompletionNotifier {
    fn drop(&mut self) {
        self.send_done(GoalOutcome::Lost);
    }
}
