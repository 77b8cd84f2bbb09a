//! Conversation state machine
//!
//! Pure transitions from (state, event) to a new state plus the effects the
//! controller must carry out.

mod effect;
mod event;
mod state;
mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Event;
pub use state::ChatState;
pub use transition::{transition, TransitionError};
