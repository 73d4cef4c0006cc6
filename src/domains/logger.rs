use chrono::Utc;
use log::Level;
use std::sync::Arc;

/// Logging port for the dispatcher and the destination directory.
///
/// Logging never fails from the caller's point of view; adapters swallow their own errors.
pub trait DomainLogger: Send + Sync + 'static {
    fn info(&self, msg: &str);
    fn warn(&self, msg: &str);
    fn error(&self, msg: &str);
}

pub type DynLogger = Arc<dyn DomainLogger>;

/// Writes through the `log` facade into a fast_log file appender.
///
/// Every line is tagged with `component` so several loggers can share one file.
pub struct FileLogger {
    component: &'static str,
}

impl FileLogger {
    /// Install the process-wide fast_log appender at `path`.
    ///
    /// Only one appender can be installed; a second call fails.
    pub fn install(path: &str, level: log::LevelFilter) -> Result<(), Box<dyn std::error::Error>> {
        fast_log::init(fast_log::config::Config::new().file(path).level(level))?;
        Ok(())
    }

    pub fn new(component: &'static str) -> Self {
        Self { component }
    }

    fn write(&self, level: Level, msg: &str) {
        log::log!(level, "{} [{}] {}", Utc::now().to_rfc3339(), self.component, msg);
    }
}

impl DomainLogger for FileLogger {
    fn info(&self, msg: &str) {
        self.write(Level::Info, msg);
    }

    fn warn(&self, msg: &str) {
        self.write(Level::Warn, msg);
    }

    fn error(&self, msg: &str) {
        self.write(Level::Error, msg);
    }
}
