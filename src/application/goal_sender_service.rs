use crate::common::{ApplicationResult, DomainError, DomainResult};
use crate::config::ExecutorConfig;
use crate::domains::destinations::{DestinationList, DestinationRequest};
use crate::domains::navigation::{DispatchHandle, DispatchStatus, NavigationExecutor};
use crate::domains::DynLogger;

use super::DestinationService;

/// Front door for the two inbound flows: goals and destination requests.
pub struct GoalSenderService {
    dispatch: DispatchHandle,
    destinations: DestinationService,
    logger: DynLogger,
}

impl GoalSenderService {
    pub fn new(dispatch: DispatchHandle, destinations: DestinationService, logger: DynLogger) -> Self {
        Self { dispatch, destinations, logger }
    }

    pub async fn handle_goal(&self, x: f64, y: f64) -> ApplicationResult<()> {
        if !x.is_finite() || !y.is_finite() {
            let e = DomainError::InvalidCommand {
                reason: format!("goal ({}, {}) is not finite", x, y),
            };
            self.logger.warn(&e.to_string());
            return Err(e.into());
        }
        self.logger.info(&format!("Goal received: x: {} y: {}", x, y));
        self.dispatch.submit_goal(x, y).await
    }

    pub fn handle_destination_request(&self, request: &DestinationRequest) -> DomainResult<DestinationList> {
        self.destinations.handle_request(request)
    }

    pub async fn status(&self) -> ApplicationResult<DispatchStatus> {
        self.dispatch.status().await
    }
}

/// Poll the executor until it is ready, giving up after `max_ready_attempts`.
///
/// Returns the number of polls it took.
pub async fn wait_for_executor(
    executor: &dyn NavigationExecutor,
    config: &ExecutorConfig,
    logger: &DynLogger,
) -> DomainResult<u32> {
    let attempts = config.max_ready_attempts.max(1);
    for attempt in 1..=attempts {
        if executor.wait_until_ready(config.ready_timeout()).await {
            logger.info(&format!("Navigation executor '{}' is up", config.name));
            return Ok(attempt);
        }
        logger.info(&format!(
            "Waiting for the {} navigation executor to come up ({}/{})",
            config.name, attempt, attempts
        ));
    }

    let e = DomainError::ExecutorUnavailable { attempts };
    logger.error(&e.to_string());
    Err(e)
}
