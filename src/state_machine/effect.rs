//! Effects produced by state transitions

use crate::chat::Message;
use crate::logger::LogLevel;
use crate::view::Notification;
use serde_json::Value;

/// Effects to be executed after a state transition, in order
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Empty the pending input
    ClearInput,

    /// Append to the conversation
    AppendMessage(Message),

    /// Bring the newest message into view
    ScrollToLatest,

    /// Issue the backend request
    RequestReply { text: String },

    /// Show a transient notification
    Notify(Notification),

    /// Record an event with the event logger
    Log {
        level: LogLevel,
        message: String,
        data: Option<Value>,
    },
}

impl Effect {
    pub fn log(level: LogLevel, message: impl Into<String>, data: Option<Value>) -> Self {
        Effect::Log {
            level,
            message: message.into(),
            data,
        }
    }

    pub fn log_debug(message: impl Into<String>) -> Self {
        Effect::log(LogLevel::Debug, message, None)
    }

    pub fn append(message: Message) -> Self {
        Effect::AppendMessage(message)
    }
}
