//! Queues navigation goals and hands them to a navigation executor one at a
//! time, and serves destination lists read from a landmark file.

pub mod adapters;
pub mod application;
pub mod common;
pub mod config;
pub mod domains;

pub use crate::config::Config;
pub use common::{ApplicationError, ApplicationResult, DomainError, DomainResult};
pub use domains::destinations::{DestinationDirectory, DestinationList, Landmark};
pub use domains::navigation::{DispatchActor, DispatchHandle, Goal, GoalOutcome, NavigationExecutor};
