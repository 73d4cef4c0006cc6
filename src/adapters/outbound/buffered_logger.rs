use crate::domains::logger::DomainLogger;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

enum Level {
    Info,
    Warn,
    Error,
}

struct LogMessage {
    level: Level,
    msg: String,
}

/// Non-blocking logger: lines go through a bounded channel to a background
/// task that forwards them to `bridge`. Lines are dropped when the channel is full.
pub struct BufferedLogger {
    sender: mpsc::Sender<LogMessage>,
    dropped: AtomicU64,
}

impl BufferedLogger {
    /// Number of lines lost to a full buffer so far.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    fn push(&self, level: Level, msg: &str) {
        let message = LogMessage { level, msg: msg.to_string() };
        if self.sender.try_send(message).is_err() {
            self.dropped.fetch_add(1, Ordering::Relaxed);
        }
    }
}

impl DomainLogger for BufferedLogger {
    fn info(&self, msg: &str) { self.push(Level::Info, msg); }
    fn warn(&self, msg: &str) { self.push(Level::Warn, msg); }
    fn error(&self, msg: &str) { self.push(Level::Error, msg); }
}

/// Must be called from inside a tokio runtime.
pub fn init_buffered_logger(bridge: Arc<dyn DomainLogger>, capacity: usize) -> Arc<BufferedLogger> {
    let (tx, mut rx) = mpsc::channel::<LogMessage>(capacity.max(1));

    tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            match message.level {
                Level::Info => bridge.info(&message.msg),
                Level::Warn => bridge.warn(&message.msg),
                Level::Error => bridge.error(&message.msg),
            }
        }
    });

    Arc::new(BufferedLogger { sender: tx, dropped: AtomicU64::new(0) })
}
