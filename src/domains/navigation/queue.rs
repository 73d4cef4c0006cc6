use std::collections::VecDeque;

use super::types::Goal;
use crate::common::{DomainError, DomainResult};

/// Pending goals in dispatch order.
///
/// Strict FIFO: no reordering, no dedup and no capacity bound. The head is the
/// goal currently handed to the executor (if any) and only leaves the queue
/// through [`GoalQueue::dequeue`] once that goal has finished.
#[derive(Debug, Clone, Default)]
pub struct GoalQueue {
    goals: VecDeque<Goal>,
}

impl GoalQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, goal: Goal) {
        self.goals.push_back(goal);
    }

    pub fn front(&self) -> DomainResult<&Goal> {
        self.goals.front().ok_or(DomainError::EmptyQueue)
    }

    pub fn dequeue(&mut self) -> DomainResult<Goal> {
        self.goals.pop_front().ok_or(DomainError::EmptyQueue)
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Goal> {
        self.goals.iter()
    }
}
