use crate::domains::logger::{DomainLogger, DynLogger};
use std::sync::Arc;

/// Forwards every line to each of its sinks, in order.
#[derive(Default)]
pub struct MultiLogger {
    sinks: Vec<DynLogger>,
}

impl MultiLogger {
    pub fn new(sinks: Vec<DynLogger>) -> Self {
        Self { sinks }
    }

    pub fn with(mut self, sink: DynLogger) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl DomainLogger for MultiLogger {
    fn info(&self, msg: &str) {
        self.sinks.iter().for_each(|s| s.info(msg));
    }

    fn warn(&self, msg: &str) {
        self.sinks.iter().for_each(|s| s.warn(msg));
    }

    fn error(&self, msg: &str) {
        self.sinks.iter().for_each(|s| s.error(msg));
    }
}

/// Console plus a log file at `path`. Falls back to the console alone when the file cannot be opened.
pub fn init_combined_logger(path: &str, level: &str) -> DynLogger {
    let console = super::init_console_logger();
    match super::init_file_logger(path, level) {
        Ok(file) => Arc::new(MultiLogger::new(vec![console, file])) as DynLogger,
        Err(e) => {
            console.warn(&format!("{}, logging to console only", e));
            console
        }
    }
}
