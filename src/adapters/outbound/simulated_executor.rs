use async_trait::async_trait;
use rand::Rng;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::common::{DomainError, DomainResult};
use crate::config::SimulatorConfig;
use crate::domains::logger::DynLogger;
use crate::domains::navigation::{
    CompletionNotifier, GoalOutcome, GoalRequest, NavigationExecutor, Position2D,
};

/// Stand-in navigation executor that "drives" to each goal in a fixed time.
///
/// Reports active right away, one feedback at the halfway point, then a
/// terminal outcome: `Aborted` with probability `failure_rate`, else `Succeeded`.
pub struct SimulatedExecutor {
    drive_time: Duration,
    failure_rate: f64,
    ready_after_polls: u32,
    polls: AtomicU32,
    submitted: AtomicU64,
    position: Arc<Mutex<Position2D>>,
    logger: DynLogger,
}

impl SimulatedExecutor {
    pub fn new(config: &SimulatorConfig, logger: DynLogger) -> Self {
        let failure_rate = if config.failure_rate.is_finite() {
            config.failure_rate.clamp(0.0, 1.0)
        } else {
            logger.warn(&format!(
                "Simulator failure_rate {} is not finite, using 0.0",
                config.failure_rate
            ));
            0.0
        };
        Self {
            drive_time: config.drive_time(),
            failure_rate,
            ready_after_polls: config.ready_after_polls,
            polls: AtomicU32::new(0),
            submitted: AtomicU64::new(0),
            position: Arc::new(Mutex::new(Position2D { x: 0.0, y: 0.0 })),
            logger,
        }
    }

    pub fn submitted(&self) -> u64 {
        self.submitted.load(Ordering::SeqCst)
    }

    /// Where the simulated robot currently is.
    pub fn position(&self) -> Position2D {
        self.position
            .lock()
            .map(|p| *p)
            .unwrap_or(Position2D { x: 0.0, y: 0.0 })
    }
}

#[async_trait]
impl NavigationExecutor for SimulatedExecutor {
    fn submit(&self, request: GoalRequest, notifier: CompletionNotifier) -> DomainResult<()> {
        let runtime = tokio::runtime::Handle::try_current().map_err(|e| {
            DomainError::InfrastructureError(format!("Simulated executor needs a tokio runtime: {}", e))
        })?;
        self.submitted.fetch_add(1, Ordering::SeqCst);

        let drive_time = self.drive_time;
        let failure_rate = self.failure_rate;
        let position = self.position.clone();
        let logger = self.logger.clone();
        let target = request.target_pose.position;

        runtime.spawn(async move {
            notifier.active();

            sleep(drive_time / 2).await;
            let start = position.lock().map(|p| *p).unwrap_or(target);
            notifier.feedback(Some(Position2D {
                x: (start.x + target.x) / 2.0,
                y: (start.y + target.y) / 2.0,
            }));

            sleep(drive_time - drive_time / 2).await;
            let aborted = rand::thread_rng().gen_bool(failure_rate);
            let outcome = if aborted {
                GoalOutcome::Aborted
            } else {
                if let Ok(mut p) = position.lock() {
                    *p = target;
                }
                GoalOutcome::Succeeded
            };

            logger.info(&format!(
                "Simulated executor finished submission {} in state [{}]",
                notifier.submission_id(), outcome
            ));
            notifier.done(outcome);
        });

        Ok(())
    }

    async fn wait_until_ready(&self, timeout: Duration) -> bool {
        let poll = self.polls.fetch_add(1, Ordering::SeqCst) + 1;
        if poll > self.ready_after_polls {
            return true;
        }
        sleep(timeout).await;
        false
    }
}
