//! Conversation state machine for the intake dialogue
//!
//! Sequences: message capture -> address request -> confirmation/edit loop
//! -> finalization. Transitions are pure (events in, effects out); the
//! session owns the instance and the console front end renders the effects.

mod machine;
mod state;

pub use machine::{Conversation, Effect, Event};
pub use state::Phase;
