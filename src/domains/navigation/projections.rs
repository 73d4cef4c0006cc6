// Navigation projections - counters folded from the dispatcher event stream
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::events::NavigationEvent;
use super::types::GoalOutcome;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DispatchProjection {
    pub goals_received: usize,
    pub goals_dispatched: usize,
    pub goals_succeeded: usize,
    pub failures_by_outcome: HashMap<GoalOutcome, usize>,
    pub last_outcome: Option<GoalOutcome>,
}

impl DispatchProjection {
    pub fn apply(&mut self, event: &NavigationEvent) {
        match event {
            NavigationEvent::GoalQueued { .. } => self.goals_received += 1,
            NavigationEvent::GoalDispatched { .. } => self.goals_dispatched += 1,
            NavigationEvent::GoalFinished { outcome, .. } => {
                if outcome.is_success() {
                    self.goals_succeeded += 1;
                } else {
                    *self.failures_by_outcome.entry(*outcome).or_insert(0) += 1;
                }
                self.last_outcome = Some(*outcome);
            }
            NavigationEvent::GoalActive { .. }
            | NavigationEvent::GoalFeedback { .. }
            | NavigationEvent::DispatcherIdle { .. } => {}
        }
    }

    pub fn goals_failed(&self) -> usize {
        self.failures_by_outcome.values().sum()
    }
}
