//! Chat backend abstraction
//!
//! One request/response round-trip per user message.

mod error;
mod http;
mod message;

pub use error::{ChatError, ChatErrorKind};
pub use http::HttpChatBackend;
pub use message::Message;

use async_trait::async_trait;

/// Remote service that answers chat messages
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send one message and return the reply text
    async fn send(&self, text: &str) -> Result<String, ChatError>;

    /// Check that the backend reports itself healthy
    async fn health(&self) -> Result<(), ChatError>;
}

