#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use goal_sender::common::{DomainError, DomainResult};
use goal_sender::domains::navigation::{
    CompletionNotifier, Goal, GoalOutcome, GoalRequest, NavigationExecutor, SubmissionId,
};

/// Executor whose goals only finish when the test says so.
#[derive(Default)]
pub struct ManualExecutor {
    requests: Mutex<Vec<GoalRequest>>,
    notifiers: Mutex<HashMap<SubmissionId, CompletionNotifier>>,
    fail_next: AtomicBool,
    unready: AtomicBool,
}

impl ManualExecutor {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn requests(&self) -> Vec<GoalRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn submitted_goals(&self) -> Vec<Goal> {
        self.requests().iter().map(|r| r.goal).collect()
    }

    pub fn last_submission(&self) -> Option<SubmissionId> {
        self.requests().last().map(|r| r.submission_id)
    }

    /// Submissions whose notifier has not reported yet.
    pub fn outstanding(&self) -> usize {
        self.notifiers.lock().unwrap().len()
    }

    pub fn take_notifier(&self, id: SubmissionId) -> Option<CompletionNotifier> {
        self.notifiers.lock().unwrap().remove(&id)
    }

    /// Report `outcome` for submission `id` through its notifier.
    pub fn complete(&self, id: SubmissionId, outcome: GoalOutcome) {
        let notifier = self.take_notifier(id).expect("no outstanding notifier");
        notifier.done(outcome);
    }

    pub fn complete_latest(&self, outcome: GoalOutcome) -> SubmissionId {
        let id = self.last_submission().expect("nothing submitted");
        self.complete(id, outcome);
        id
    }

    pub fn fail_next_submit(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    pub fn set_unready(&self) {
        self.unready.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl NavigationExecutor for ManualExecutor {
    fn submit(&self, request: GoalRequest, notifier: CompletionNotifier) -> DomainResult<()> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(DomainError::InfrastructureError("executor offline".to_string()));
        }
        self.notifiers
            .lock()
            .unwrap()
            .insert(request.submission_id, notifier);
        self.requests.lock().unwrap().push(request);
        Ok(())
    }

    async fn wait_until_ready(&self, timeout: Duration) -> bool {
        if self.unready.load(Ordering::SeqCst) {
            tokio::time::sleep(timeout).await;
            return false;
        }
        true
    }
}
