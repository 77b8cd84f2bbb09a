//! Chat backend error types

use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

/// Chat backend error with classification
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ChatError {
    pub kind: ChatErrorKind,
    pub message: String,
    /// HTTP status when the backend answered
    pub status: Option<u16>,
}

impl ChatError {
    pub fn new(kind: ChatErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::Network, message)
    }

    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::Status, message).with_status(status)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::MalformedBody, message)
    }

    /// Structured detail attached to the error log entry
    pub fn to_log_data(&self) -> Value {
        json!({
            "error": {
                "kind": self.kind,
                "message": self.message,
                "status": self.status,
            }
        })
    }
}

/// Why a chat round-trip failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatErrorKind {
    /// Connection failure, timeout, or unreadable response
    Network,
    /// Backend answered with a non-2xx status
    Status,
    /// 2xx response without a string `response` field
    MalformedBody,
}
