//! Mock implementations for testing
//!
//! These mocks enable controller and logger tests without real I/O.

use crate::chat::{ChatBackend, ChatError, Message};
use crate::config::RunMode;
use crate::controller::ConversationController;
use crate::logger::{CollectorError, ConsoleSink, EventLogger, LogCollector, LogEntry, LogLevel};
use crate::view::{ChatView, Notification};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

// ============================================================================
// Mock Chat Backend
// ============================================================================

/// Mock backend that returns queued replies
#[derive(Default)]
pub struct MockChatBackend {
    replies: Mutex<VecDeque<Result<String, ChatError>>>,
    /// Record of every text sent
    requests: Mutex<Vec<String>>,
}

impl MockChatBackend {
    pub fn queue_reply(&self, text: impl Into<String>) {
        self.replies.lock().unwrap().push_back(Ok(text.into()));
    }

    pub fn queue_error(&self, error: ChatError) {
        self.replies.lock().unwrap().push_back(Err(error));
    }

    pub fn recorded_requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatBackend for MockChatBackend {
    async fn send(&self, text: &str) -> Result<String, ChatError> {
        self.requests.lock().unwrap().push(text.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ChatError::network("No mock reply queued")))
    }

    async fn health(&self) -> Result<(), ChatError> {
        Ok(())
    }
}

// ============================================================================
// Recording View
// ============================================================================

/// View that records what it was asked to show
#[derive(Default)]
pub struct RecordingView {
    /// Message count at each scroll
    scrolls: Mutex<Vec<usize>>,
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingView {
    pub fn scrolls(&self) -> Vec<usize> {
        self.scrolls.lock().unwrap().clone()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }
}

impl ChatView for RecordingView {
    fn scroll_to_latest(&self, messages: &[Message]) {
        self.scrolls.lock().unwrap().push(messages.len());
    }

    fn notify(&self, notification: &Notification) {
        self.notifications.lock().unwrap().push(notification.clone());
    }
}

// ============================================================================
// Logger sinks
// ============================================================================

/// Console sink that keeps every line
#[derive(Default)]
pub struct RecordingConsole {
    lines: Mutex<Vec<(LogLevel, String, Option<Value>)>>,
}

impl RecordingConsole {
    pub fn lines(&self) -> Vec<(LogLevel, String, Option<Value>)> {
        self.lines.lock().unwrap().clone()
    }
}

impl ConsoleSink for RecordingConsole {
    fn write(&self, level: LogLevel, line: &str, data: Option<&Value>) {
        self.lines
            .lock()
            .unwrap()
            .push((level, line.to_string(), data.cloned()));
    }
}

/// Collector that records entries, or rejects them all
#[derive(Default)]
pub struct RecordingCollector {
    received: Mutex<Vec<LogEntry>>,
    fail: bool,
}

impl RecordingCollector {
    pub fn failing() -> Self {
        Self {
            received: Mutex::default(),
            fail: true,
        }
    }

    pub fn received(&self) -> Vec<LogEntry> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl LogCollector for RecordingCollector {
    async fn dispatch(&self, entry: &LogEntry) -> Result<(), CollectorError> {
        if self.fail {
            return Err(CollectorError::Status(503));
        }
        self.received.lock().unwrap().push(entry.clone());
        Ok(())
    }
}

// ============================================================================
// Harness
// ============================================================================

/// Controller wired to mocks, with handles to inspect each of them
pub struct TestHarness {
    pub controller: ConversationController,
    pub backend: Arc<MockChatBackend>,
    pub view: Arc<RecordingView>,
    pub logger: Arc<EventLogger>,
}

impl TestHarness {
    pub fn new() -> Self {
        let backend = Arc::new(MockChatBackend::default());
        let view = Arc::new(RecordingView::default());
        let logger = Arc::new(EventLogger::new(
            RunMode::Development,
            Arc::new(RecordingConsole::default()),
        ));
        let controller = ConversationController::new(backend.clone(), logger.clone(), view.clone());
        Self {
            controller,
            backend,
            view,
            logger,
        }
    }
}
