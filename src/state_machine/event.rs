//! Events that drive the conversation

use crate::chat::ChatError;

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    /// User asked to send the current input
    Submit { input: String },
    /// Backend answered
    ReplyReceived { text: String },
    /// Backend call failed
    ReplyFailed { error: ChatError },
}
