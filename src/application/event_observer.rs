use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::common::{EventEnvelope, EventMetadata};
use crate::domains::navigation::{DispatchProjection, NavigationEvent};

pub const DISPATCH_STREAM: &str = "goal-dispatch";

/// Drain the dispatcher event stream into a [`DispatchProjection`].
///
/// Each event is exported as an [`EventEnvelope`] at debug level and failed
/// outcomes are raised as warnings. Returns once every sender is gone.
pub async fn observe_events(mut events: mpsc::Receiver<NavigationEvent>) -> DispatchProjection {
    let mut projection = DispatchProjection::default();
    let metadata = EventMetadata::for_process("goal-sender");
    let mut sequence = 0u64;

    while let Some(event) = events.recv().await {
        projection.apply(&event);

        if let NavigationEvent::GoalFinished { submission_id, goal, outcome, .. } = &event {
            if !outcome.is_success() {
                warn!(submission_id, %goal, %outcome, "Goal did not succeed, moving on");
            }
        }

        sequence += 1;
        match EventEnvelope::wrap(&event, DISPATCH_STREAM, sequence, metadata.clone()) {
            Ok(envelope) => match serde_json::to_string(&envelope) {
                Ok(json) => debug!(target: "goal_sender::events", "{}", json),
                Err(e) => warn!("Failed to encode event envelope: {}", e),
            },
            Err(e) => warn!("Failed to wrap {:?}: {}", event, e),
        }
    }

    projection
}
