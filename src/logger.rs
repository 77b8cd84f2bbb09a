//! Client-side event logger
//!
//! Records leveled entries into a bounded in-memory buffer. Outside
//! production each entry is mirrored to a local console sink; in production
//! each entry is forwarded to a remote collector in the background. Entries
//! are buffered in both modes.

mod collector;
mod entry;
pub mod hooks;
mod ring;
mod sink;

pub use collector::{CollectorError, HttpLogCollector, LogCollector};
pub use entry::{LogEntry, LogLevel};
pub use ring::RingBuffer;
pub use sink::{ConsoleSink, TracingConsole};

use crate::config::RunMode;
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio_util::task::TaskTracker;

/// Maximum number of entries kept in memory
pub const DEFAULT_CAPACITY: usize = 1000;

const FORWARD_FAILED: &str = "Failed to send log to logging service";

/// Event logger shared by every component as `Arc<EventLogger>`
pub struct EventLogger {
    buffer: Mutex<RingBuffer<LogEntry>>,
    mode: RunMode,
    console: Arc<dyn ConsoleSink>,
    collector: Option<Arc<dyn LogCollector>>,
    forwards: TaskTracker,
}

impl EventLogger {
    pub fn new(mode: RunMode, console: Arc<dyn ConsoleSink>) -> Self {
        Self {
            buffer: Mutex::new(RingBuffer::new(DEFAULT_CAPACITY)),
            mode,
            console,
            collector: None,
            forwards: TaskTracker::new(),
        }
    }

    /// Set the remote collector used in production mode
    pub fn with_collector(mut self, collector: Arc<dyn LogCollector>) -> Self {
        self.collector = Some(collector);
        self
    }

    pub fn mode(&self) -> RunMode {
        self.mode
    }

    pub fn debug(&self, message: impl Into<String>, data: Option<Value>) {
        self.log(LogLevel::Debug, message, data);
    }

    pub fn info(&self, message: impl Into<String>, data: Option<Value>) {
        self.log(LogLevel::Info, message, data);
    }

    pub fn warn(&self, message: impl Into<String>, data: Option<Value>) {
        self.log(LogLevel::Warn, message, data);
    }

    pub fn error(&self, message: impl Into<String>, data: Option<Value>) {
        self.log(LogLevel::Error, message, data);
    }

    /// Record an entry. Never fails and never blocks on I/O.
    pub fn log(&self, level: LogLevel, message: impl Into<String>, data: Option<Value>) {
        let entry = LogEntry::new(level, message, data);
        self.buffer().push(entry.clone());

        if self.mode.is_production() {
            self.forward(entry);
        } else {
            self.console
                .write(level, &entry.console_line(), entry.data.as_ref());
        }
    }

    /// Independent, oldest-first copy of the buffered entries
    pub fn logs(&self) -> Vec<LogEntry> {
        self.buffer().snapshot()
    }

    #[allow(dead_code)] // API completeness
    pub fn len(&self) -> usize {
        self.buffer().len()
    }

    /// Wait for in-flight collector forwards to settle
    pub async fn shutdown(&self) {
        self.forwards.close();
        self.forwards.wait().await;
    }

    fn buffer(&self) -> MutexGuard<'_, RingBuffer<LogEntry>> {
        // Pushing and cloning cannot leave the buffer half-written
        self.buffer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Failures go to the console sink only; they never re-enter the logger.
    fn forward(&self, entry: LogEntry) {
        let Some(collector) = self.collector.clone() else {
            return;
        };
        let console = Arc::clone(&self.console);

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            console.write(
                LogLevel::Error,
                &format!("{FORWARD_FAILED}: no async runtime available"),
                None,
            );
            return;
        };

        self.forwards.spawn_on(
            async move {
                if let Err(e) = collector.dispatch(&entry).await {
                    console.write(LogLevel::Error, &format!("{FORWARD_FAILED}: {e}"), None);
                }
            },
            &runtime,
        );
    }
}
