//! Conversation state

/// Lifecycle of a single submission
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ChatState {
    /// Ready to accept a message
    #[default]
    Idle,
    /// One request in flight; further submits are rejected
    Sending,
}

impl ChatState {
    pub fn is_waiting(&self) -> bool {
        matches!(self, ChatState::Sending)
    }
}
