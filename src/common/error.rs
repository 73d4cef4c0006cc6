use thiserror::Error;

use crate::domains::navigation::GoalOutcome;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Goal queue is empty")]
    EmptyQueue,

    #[error("Navigation executor unavailable after {attempts} readiness polls")]
    ExecutorUnavailable { attempts: u32 },

    #[error("Malformed landmark record on line {line}: {reason}")]
    MalformedLandmarkRecord { line: usize, reason: String },

    #[error("Goal execution failed: submission {submission_id} finished as {outcome}")]
    GoalExecutionFailed { submission_id: u64, outcome: GoalOutcome },

    #[error("Completion received while no goal is in flight (submission {submission_id})")]
    NoGoalInFlight { submission_id: u64 },

    #[error("Stale completion: in-flight submission is {expected}, got {actual}")]
    StaleCompletion { expected: u64, actual: u64 },

    #[error("Invalid command: {reason}")]
    InvalidCommand { reason: String },

    #[error("Infrastructure error: {0}")]
    InfrastructureError(String),
}

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Channel closed: {0}")]
    ChannelClosed(String),

    #[error("Configuration error: {0}")]
    Configuration(#[from] anyhow::Error),
}

pub type DomainResult<T> = Result<T, DomainError>;
pub type ApplicationResult<T> = Result<T, ApplicationError>;
