//! Presentation seam between the controller and whatever renders it

use crate::chat::Message;

/// Transient, dismissible notice shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn error(description: impl Into<String>) -> Self {
        Self {
            title: "Error".to_string(),
            description: description.into(),
        }
    }

    pub fn reply_failed() -> Self {
        Self::error("Failed to get response from the server")
    }
}

/// Renders the conversation
pub trait ChatView: Send + Sync {
    /// Called after every change to `messages`; show the newest entry
    fn scroll_to_latest(&self, messages: &[Message]);

    fn notify(&self, notification: &Notification);
}
