//! Pure state transition function
//!
//! `Idle -> Sending -> Idle`, with the reply either appended or reported.

use super::{ChatState, Effect, Event};
use crate::chat::Message;
use crate::logger::LogLevel;
use crate::view::Notification;
use serde_json::json;
use thiserror::Error;

pub const EMPTY_INPUT: &str = "Empty input, ignoring submission";
pub const SENDING: &str = "Sending message to server";
pub const REPLY_RECEIVED: &str = "Received response from server";
pub const REPLY_FAILED: &str = "Failed to get response from server";
pub const INTERACTION_COMPLETED: &str = "Chat interaction completed";

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: ChatState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: ChatState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Errors that can occur during transition
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("A reply is still pending, cannot accept another message")]
    Busy,
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

/// Pure transition function: no I/O, same inputs give the same outputs
pub fn transition(state: &ChatState, event: Event) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // Idle + blank input -> Idle, input untouched
        (ChatState::Idle, Event::Submit { input }) if input.trim().is_empty() => {
            Ok(TransitionResult::new(ChatState::Idle).with_effect(Effect::log_debug(EMPTY_INPUT)))
        }

        // Idle + Submit -> Sending
        (ChatState::Idle, Event::Submit { input }) => Ok(TransitionResult::new(ChatState::Sending)
            .with_effect(Effect::log(
                LogLevel::Info,
                SENDING,
                Some(json!({ "message": input })),
            ))
            .with_effect(Effect::ClearInput)
            .with_effect(Effect::append(Message::user(input.clone())))
            .with_effect(Effect::ScrollToLatest)
            .with_effect(Effect::RequestReply { text: input })),

        // Submit action is disabled while a request is in flight
        (ChatState::Sending, Event::Submit { .. }) => Err(TransitionError::Busy),

        // Sending + reply -> Idle
        (ChatState::Sending, Event::ReplyReceived { text }) => {
            // Length in UTF-16 code units, the unit web clients report
            let length = text.encode_utf16().count();
            Ok(TransitionResult::new(ChatState::Idle)
                .with_effect(Effect::log(
                    LogLevel::Info,
                    REPLY_RECEIVED,
                    Some(json!({ "messageLength": length })),
                ))
                .with_effect(Effect::append(Message::reply(text)))
                .with_effect(Effect::ScrollToLatest)
                .with_effect(Effect::log_debug(INTERACTION_COMPLETED)))
        }

        // Sending + failure -> Idle, nothing appended
        (ChatState::Sending, Event::ReplyFailed { error }) => {
            Ok(TransitionResult::new(ChatState::Idle)
                .with_effect(Effect::log(
                    LogLevel::Error,
                    REPLY_FAILED,
                    Some(error.to_log_data()),
                ))
                .with_effect(Effect::Notify(Notification::reply_failed()))
                .with_effect(Effect::log_debug(INTERACTION_COMPLETED)))
        }

        (ChatState::Idle, Event::ReplyReceived { .. } | Event::ReplyFailed { .. }) => Err(
            TransitionError::InvalidTransition("reply arrived with no request in flight".into()),
        ),
    }
}
