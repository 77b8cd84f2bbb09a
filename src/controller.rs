//! Conversation controller
//!
//! Owns the message list and pending input, feeds events through the state
//! machine and carries out the resulting effects.

use crate::chat::{ChatBackend, ChatError, Message};
use crate::logger::EventLogger;
use crate::state_machine::{transition, ChatState, Effect, Event, TransitionError};
use crate::view::ChatView;
use serde_json::json;
use std::sync::Arc;

/// How a submission ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Input was blank (or a reply arrived with nothing pending)
    Ignored,
    /// A request is already in flight
    Busy,
    Replied,
    Failed,
}

pub struct ConversationController {
    state: ChatState,
    messages: Vec<Message>,
    pending_input: String,
    backend: Arc<dyn ChatBackend>,
    logger: Arc<EventLogger>,
    view: Arc<dyn ChatView>,
}

impl ConversationController {
    pub fn new(
        backend: Arc<dyn ChatBackend>,
        logger: Arc<EventLogger>,
        view: Arc<dyn ChatView>,
    ) -> Self {
        Self {
            state: ChatState::Idle,
            messages: Vec::new(),
            pending_input: String::new(),
            backend,
            logger,
            view,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.pending_input = input.into();
    }

    pub fn is_waiting(&self) -> bool {
        self.state.is_waiting()
    }

    pub fn backend(&self) -> Arc<dyn ChatBackend> {
        Arc::clone(&self.backend)
    }

    /// Submit the pending input and wait for the reply
    pub async fn submit(&mut self) -> SubmitOutcome {
        match self.begin_submit() {
            Ok(Some(text)) => {
                let result = self.backend.send(&text).await;
                self.finish_submit(result)
            }
            Ok(None) => SubmitOutcome::Ignored,
            Err(_) => SubmitOutcome::Busy,
        }
    }

    /// First half of a submission
    ///
    /// Returns the text to send when a request should be issued, `None` for
    /// blank input. While a request is in flight the submit is rejected and
    /// the pending input is left alone.
    pub fn begin_submit(&mut self) -> Result<Option<String>, TransitionError> {
        let event = Event::Submit {
            input: self.pending_input.clone(),
        };
        self.apply(event).inspect_err(|e| {
            self.logger.debug(
                "Submission rejected",
                Some(json!({ "reason": e.to_string() })),
            );
        })
    }

    /// Second half of a submission: record the backend's answer
    pub fn finish_submit(&mut self, result: Result<String, ChatError>) -> SubmitOutcome {
        let (event, outcome) = match result {
            Ok(text) => (Event::ReplyReceived { text }, SubmitOutcome::Replied),
            Err(error) => (Event::ReplyFailed { error }, SubmitOutcome::Failed),
        };

        match self.apply(event) {
            Ok(_) => outcome,
            Err(e) => {
                self.logger.warn(
                    "Discarding unexpected reply",
                    Some(json!({ "reason": e.to_string() })),
                );
                SubmitOutcome::Ignored
            }
        }
    }

    /// Run one transition and execute its effects in order
    fn apply(&mut self, event: Event) -> Result<Option<String>, TransitionError> {
        let result = transition(&self.state, event)?;
        self.state = result.new_state;

        let mut request = None;
        for effect in result.effects {
            match effect {
                Effect::ClearInput => self.pending_input.clear(),
                Effect::AppendMessage(message) => self.messages.push(message),
                Effect::ScrollToLatest => self.view.scroll_to_latest(&self.messages),
                Effect::RequestReply { text } => request = Some(text),
                Effect::Notify(notification) => self.view.notify(&notification),
                Effect::Log {
                    level,
                    message,
                    data,
                } => self.logger.log(level, message, data),
            }
        }
        Ok(request)
    }
}
