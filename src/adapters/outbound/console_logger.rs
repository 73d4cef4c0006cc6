use crate::domains::logger::DomainLogger;
use std::sync::Arc;

/// Forwards domain log lines to the installed `tracing` subscriber.
struct TracingBridge;

impl DomainLogger for TracingBridge {
    fn info(&self, msg: &str) { tracing::info!(target: "goal_sender::domain", "{}", msg); }
    fn warn(&self, msg: &str) { tracing::warn!(target: "goal_sender::domain", "{}", msg); }
    fn error(&self, msg: &str) { tracing::error!(target: "goal_sender::domain", "{}", msg); }
}

/// Initialize a console-backed DomainLogger (useful as a fallback)
pub fn init_console_logger() -> Arc<dyn DomainLogger> {
    Arc::new(TracingBridge {})
}
