use crate::domains::logger::{DomainLogger, FileLogger};
use std::str::FromStr;
use std::sync::Arc;

/// Install the fast_log appender at `path` and return a logger tagged `goal-sender`.
///
/// `level` uses the `log` crate names ("info", "warn", ...); unknown names fall back to info.
pub fn init_file_logger(path: &str, level: &str) -> Result<Arc<dyn DomainLogger>, String> {
    let filter = log::LevelFilter::from_str(level).unwrap_or(log::LevelFilter::Info);
    FileLogger::install(path, filter)
        .map_err(|e| format!("Failed to open log file {}: {}", path, e))?;
    Ok(Arc::new(FileLogger::new("goal-sender")))
}
