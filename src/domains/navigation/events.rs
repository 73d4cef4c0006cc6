use crate::common::DomainEvent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::types::{Goal, GoalOutcome, Position2D, SubmissionId, TargetPose};

pub const DISPATCHER_ID: &str = "goal-dispatcher";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum NavigationEvent {
    GoalQueued {
        goal: Goal,
        queue_len: usize,
        timestamp: DateTime<Utc>,
    },
    GoalDispatched {
        submission_id: SubmissionId,
        target_pose: TargetPose,
        timestamp: DateTime<Utc>,
    },
    GoalActive {
        submission_id: SubmissionId,
        timestamp: DateTime<Utc>,
    },
    GoalFeedback {
        submission_id: SubmissionId,
        position: Option<Position2D>,
        timestamp: DateTime<Utc>,
    },
    GoalFinished {
        submission_id: SubmissionId,
        goal: Goal,
        outcome: GoalOutcome,
        remaining: usize,
        timestamp: DateTime<Utc>,
    },
    DispatcherIdle {
        timestamp: DateTime<Utc>,
    },
}

impl DomainEvent for NavigationEvent {
    fn event_type(&self) -> &'static str {
        match self {
            NavigationEvent::GoalQueued { .. } => "GoalQueued",
            NavigationEvent::GoalDispatched { .. } => "GoalDispatched",
            NavigationEvent::GoalActive { .. } => "GoalActive",
            NavigationEvent::GoalFeedback { .. } => "GoalFeedback",
            NavigationEvent::GoalFinished { .. } => "GoalFinished",
            NavigationEvent::DispatcherIdle { .. } => "DispatcherIdle",
        }
    }

    fn source_id(&self) -> &str {
        DISPATCHER_ID
    }

    fn submission_id(&self) -> Option<u64> {
        match self {
            NavigationEvent::GoalDispatched { submission_id, .. }
            | NavigationEvent::GoalActive { submission_id, .. }
            | NavigationEvent::GoalFeedback { submission_id, .. }
            | NavigationEvent::GoalFinished { submission_id, .. } => Some(*submission_id),
            NavigationEvent::GoalQueued { .. } | NavigationEvent::DispatcherIdle { .. } => None,
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            NavigationEvent::GoalQueued { timestamp, .. } => *timestamp,
            NavigationEvent::GoalDispatched { timestamp, .. } => *timestamp,
            NavigationEvent::GoalActive { timestamp, .. } => *timestamp,
            NavigationEvent::GoalFeedback { timestamp, .. } => *timestamp,
            NavigationEvent::GoalFinished { timestamp, .. } => *timestamp,
            NavigationEvent::DispatcherIdle { timestamp } => *timestamp,
        }
    }
}
