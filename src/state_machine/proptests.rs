//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across arbitrary event sequences.

use super::transition::{INTERACTION_COMPLETED, REPLY_FAILED};
use super::*;
use crate::chat::{ChatError, Message};
use crate::logger::LogLevel;
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_input() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[ \t\n]{1,5}",
        "[a-zA-Z0-9 ]{1,30}",
    ]
}

fn arb_error() -> impl Strategy<Value = ChatError> {
    prop_oneof![
        "[a-z ]{0,20}".prop_map(|m| ChatError::network(m)),
        (400u16..600, "[a-z ]{0,20}").prop_map(|(status, msg)| ChatError::status(status, msg)),
        "[a-z ]{0,20}".prop_map(|m| ChatError::malformed(m)),
    ]
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        arb_input().prop_map(|input| Event::Submit { input }),
        "[a-zA-Z ]{0,30}".prop_map(|text| Event::ReplyReceived { text }),
        arb_error().prop_map(|error| Event::ReplyFailed { error }),
    ]
}

fn count<F: Fn(&Effect) -> bool>(effects: &[Effect], pred: F) -> usize {
    effects.iter().filter(|e| pred(e)).count()
}

fn is_completion(effect: &Effect) -> bool {
    matches!(effect, Effect::Log { level: LogLevel::Debug, message, .. } if message == INTERACTION_COMPLETED)
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Blank input never appends or requests anything
    #[test]
    fn blank_submit_is_noop(input in "[ \t\n]{0,8}") {
        let result = transition(&ChatState::Idle, Event::Submit { input }).unwrap();
        prop_assert_eq!(result.new_state, ChatState::Idle);
        prop_assert_eq!(count(&result.effects, |e| matches!(e, Effect::AppendMessage(_))), 0);
        prop_assert_eq!(count(&result.effects, |e| matches!(e, Effect::RequestReply { .. })), 0);
        prop_assert_eq!(count(&result.effects, |e| matches!(e, Effect::ClearInput)), 0);
    }

    /// Every accepted submit appends the user's text and requests exactly one reply
    #[test]
    fn accepted_submit_requests_once(input in "[a-zA-Z0-9]{1,10}[a-zA-Z0-9 ]{0,20}") {
        let result = transition(&ChatState::Idle, Event::Submit { input: input.clone() }).unwrap();
        prop_assert!(result.new_state.is_waiting());
        prop_assert_eq!(count(&result.effects, |e| matches!(e, Effect::RequestReply { .. })), 1);
        prop_assert_eq!(
            count(&result.effects, |e| *e == Effect::AppendMessage(Message::user(input.clone()))),
            1
        );
    }

    /// Arbitrary event sequences keep the machine consistent
    #[test]
    fn sequences_respect_lifecycle(events in prop::collection::vec(arb_event(), 0..40)) {
        let mut state = ChatState::Idle;
        let mut messages: Vec<Message> = Vec::new();

        for event in events {
            let was_waiting = state.is_waiting();
            let is_submit = matches!(event, Event::Submit { .. });
            let is_failure = matches!(event, Event::ReplyFailed { .. });

            match transition(&state, event) {
                Ok(result) => {
                    for effect in &result.effects {
                        if let Effect::AppendMessage(m) = effect {
                            messages.push(m.clone());
                        }
                    }

                    if is_submit {
                        // Only reachable from Idle
                        prop_assert!(!was_waiting);
                    } else {
                        // Replies always return to Idle and complete once
                        prop_assert!(was_waiting);
                        prop_assert_eq!(&result.new_state, &ChatState::Idle);
                        prop_assert_eq!(count(&result.effects, is_completion), 1);
                    }

                    if is_failure {
                        prop_assert_eq!(count(&result.effects, |e| matches!(e, Effect::AppendMessage(_))), 0);
                        prop_assert_eq!(
                            count(&result.effects, |e| matches!(e, Effect::Log { level: LogLevel::Error, message, .. } if message == REPLY_FAILED)),
                            1
                        );
                        prop_assert_eq!(count(&result.effects, |e| matches!(e, Effect::Notify(_))), 1);
                    }

                    state = result.new_state;
                }
                Err(TransitionError::Busy) => {
                    prop_assert!(was_waiting && is_submit);
                }
                Err(TransitionError::InvalidTransition(_)) => {
                    prop_assert!(!was_waiting && !is_submit);
                }
            }
        }

        // A reply never precedes the user message it answers
        let mut expect_user = true;
        for message in &messages {
            if !message.is_user() {
                prop_assert!(!expect_user);
            }
            expect_user = !message.is_user();
        }
    }
}
