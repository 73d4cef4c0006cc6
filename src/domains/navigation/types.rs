use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sequence number tying executor signals to the submission they belong to.
pub type SubmissionId = u64;

/// A single (x, y) navigation target in the map frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub x: f64,
    pub y: f64,
}

impl Goal {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position2D {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Default for Quaternion {
    /// The fixed heading every goal has been sent with so far.
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.8,
            w: -0.6,
        }
    }
}

/// Stamped pose handed to the navigation executor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetPose {
    pub frame_id: String,
    pub stamp: DateTime<Utc>,
    pub position: Position2D,
    pub orientation: Quaternion,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalRequest {
    pub submission_id: SubmissionId,
    pub goal: Goal,
    pub target_pose: TargetPose,
}

/// Terminal state reported by the executor for one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GoalOutcome {
    Succeeded,
    Aborted,
    Preempted,
    Rejected,
    Recalled,
    Lost,
}

impl GoalOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, GoalOutcome::Succeeded)
    }
}

impl fmt::Display for GoalOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GoalOutcome::Succeeded => "SUCCEEDED",
            GoalOutcome::Aborted => "ABORTED",
            GoalOutcome::Preempted => "PREEMPTED",
            GoalOutcome::Rejected => "REJECTED",
            GoalOutcome::Recalled => "RECALLED",
            GoalOutcome::Lost => "LOST",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DispatchState {
    Idle,
    Dispatching,
}

/// Snapshot of the dispatcher, answered by the actor on request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchStatus {
    pub state: DispatchState,
    pub in_flight: Option<SubmissionId>,
    pub pending: Vec<Goal>,
}

impl DispatchStatus {
    pub fn queue_len(&self) -> usize {
        self.pending.len()
    }
}

/// Builds the pose submitted for a goal.
///
/// Orientation is not derived from the travel direction; every goal gets
/// `default_orientation`. Swap this builder out to make headings goal-aware.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalPoseBuilder {
    pub frame_id: String,
    pub default_orientation: Quaternion,
}

impl Default for GoalPoseBuilder {
    fn default() -> Self {
        Self {
            frame_id: "map".to_string(),
            default_orientation: Quaternion::default(),
        }
    }
}

impl GoalPoseBuilder {
    pub fn new(frame_id: impl Into<String>, default_orientation: Quaternion) -> Self {
        Self {
            frame_id: frame_id.into(),
            default_orientation,
        }
    }

    pub fn build(&self, goal: &Goal) -> TargetPose {
        TargetPose {
            frame_id: self.frame_id.clone(),
            stamp: Utc::now(),
            position: Position2D { x: goal.x, y: goal.y },
            orientation: self.default_orientation,
        }
    }
}
