use std::fmt;

/// Phase of the intake dialogue for one citizen request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Waiting for request text (typed, or the voice-upload acknowledgment)
    Idle,
    /// Request text captured; waiting for a free-text address
    AwaitingAddress,
    /// Text and address captured; waiting for confirm or edit
    AwaitingConfirmation,
    /// Request registered; new input starts a fresh request
    Finalized,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Idle => write!(f, "Idle"),
            Phase::AwaitingAddress => write!(f, "AwaitingAddress"),
            Phase::AwaitingConfirmation => write!(f, "AwaitingConfirmation"),
            Phase::Finalized => write!(f, "Finalized"),
        }
    }
}
