use tracing::debug;

use super::state::Phase;

/// Input events produced by the chat front end.
#[derive(Debug, Clone)]
pub enum Event {
    /// A chat message: typed text, or the synthetic voice-upload token
    Message(String),
    /// A submitted address line
    Address(String),
    /// The citizen confirmed the displayed request
    Confirm,
    /// The citizen asked to re-enter the address
    Edit,
}

/// UI effects returned by a transition. Rendering lives in the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Echo the citizen's own message into the chat
    EchoCitizen(String),
    /// Ask for the address; `retry` re-prompts after an edit
    PromptAddress { retry: bool },
    /// Show the exact text/address pair that will be finalized
    ShowConfirmation { text: String, address: String },
    /// Terminal message for a registered request
    ShowCompletion { text: String, address: String },
    /// Inline recoverable error
    InlineError(String),
}

/// Conversation state for one citizen request
///
/// A pure state machine: `apply` advances the phase and returns the effects
/// to render. No I/O happens here, which is what makes the dialogue testable
/// without a front end or a network.
#[derive(Debug)]
pub struct Conversation {
    phase: Phase,
    pending_text: Option<String>,
    pending_address: Option<String>,
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            pending_text: None,
            pending_address: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn pending_text(&self) -> Option<&str> {
        self.pending_text.as_deref()
    }

    pub fn pending_address(&self) -> Option<&str> {
        self.pending_address.as_deref()
    }

    /// Apply one event, returning the effects to render.
    pub fn apply(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::Message(text) => self.on_message(text),
            Event::Address(address) => self.on_address(address),
            Event::Confirm => self.on_confirm(),
            Event::Edit => self.on_edit(),
        }
    }

    fn on_message(&mut self, text: String) -> Vec<Effect> {
        let text = text.trim().to_string();
        if text.is_empty() {
            return Vec::new();
        }

        // A message always starts (or restarts) a request, whatever was in
        // flight; the widget's main input stays live through the whole flow.
        debug!("Conversation: {} -> {}", self.phase, Phase::AwaitingAddress);
        self.pending_text = Some(text.clone());
        self.pending_address = None;
        self.phase = Phase::AwaitingAddress;

        vec![
            Effect::EchoCitizen(text),
            Effect::PromptAddress { retry: false },
        ]
    }

    fn on_address(&mut self, address: String) -> Vec<Effect> {
        if self.phase != Phase::AwaitingAddress {
            return Vec::new();
        }

        let address = address.trim().to_string();
        if address.is_empty() {
            // Rejected locally; the phase does not move
            return vec![Effect::InlineError(
                "The address cannot be empty.".to_string(),
            )];
        }

        let text = self.pending_text.clone().unwrap_or_default();
        self.pending_address = Some(address.clone());
        debug!(
            "Conversation: {} -> {}",
            self.phase,
            Phase::AwaitingConfirmation
        );
        self.phase = Phase::AwaitingConfirmation;

        vec![Effect::ShowConfirmation { text, address }]
    }

    fn on_confirm(&mut self) -> Vec<Effect> {
        if self.phase != Phase::AwaitingConfirmation {
            return Vec::new();
        }

        // The completion carries exactly the displayed pair; the pending
        // fields are cleared so new input starts a fresh request.
        let text = self.pending_text.take().unwrap_or_default();
        let address = self.pending_address.take().unwrap_or_default();
        debug!("Conversation: {} -> {}", self.phase, Phase::Finalized);
        self.phase = Phase::Finalized;

        vec![Effect::ShowCompletion { text, address }]
    }

    fn on_edit(&mut self) -> Vec<Effect> {
        if self.phase != Phase::AwaitingConfirmation {
            return Vec::new();
        }

        self.pending_address = None;
        debug!("Conversation: {} -> {}", self.phase, Phase::AwaitingAddress);
        self.phase = Phase::AwaitingAddress;

        vec![Effect::PromptAddress { retry: true }]
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn confirmation_pair(effects: &[Effect]) -> Option<(String, String)> {
        effects.iter().find_map(|e| match e {
            Effect::ShowConfirmation { text, address } => {
                Some((text.clone(), address.clone()))
            }
            _ => None,
        })
    }

    #[test]
    fn test_message_moves_idle_to_awaiting_address() {
        let mut conv = Conversation::new();
        let effects = conv.apply(Event::Message("broken streetlight".to_string()));

        assert_eq!(conv.phase(), Phase::AwaitingAddress);
        assert_eq!(conv.pending_text(), Some("broken streetlight"));
        assert!(effects.contains(&Effect::PromptAddress { retry: false }));
    }

    #[test]
    fn test_blank_message_is_ignored() {
        let mut conv = Conversation::new();
        let effects = conv.apply(Event::Message("   ".to_string()));

        assert!(effects.is_empty());
        assert_eq!(conv.phase(), Phase::Idle);
    }

    #[test]
    fn test_confirmation_shows_exact_pair() {
        let mut conv = Conversation::new();
        conv.apply(Event::Message("pothole on the bridge".to_string()));
        let effects = conv.apply(Event::Address("12 Oak Street".to_string()));

        assert_eq!(conv.phase(), Phase::AwaitingConfirmation);
        assert_eq!(
            confirmation_pair(&effects),
            Some((
                "pothole on the bridge".to_string(),
                "12 Oak Street".to_string()
            ))
        );
    }

    #[test]
    fn test_empty_address_is_rejected_in_place() {
        let mut conv = Conversation::new();
        conv.apply(Event::Message("noise complaint".to_string()));
        let effects = conv.apply(Event::Address("  ".to_string()));

        assert_eq!(conv.phase(), Phase::AwaitingAddress);
        assert!(matches!(effects.as_slice(), [Effect::InlineError(_)]));
    }

    #[test]
    fn test_edit_keeps_original_text() {
        let mut conv = Conversation::new();
        conv.apply(Event::Message("fallen tree".to_string()));
        conv.apply(Event::Address("1 Elm Road".to_string()));
        let effects = conv.apply(Event::Edit);

        assert_eq!(conv.phase(), Phase::AwaitingAddress);
        assert_eq!(conv.pending_text(), Some("fallen tree"));
        assert_eq!(conv.pending_address(), None);
        assert!(effects.contains(&Effect::PromptAddress { retry: true }));

        let effects = conv.apply(Event::Address("2 Elm Road".to_string()));
        assert_eq!(
            confirmation_pair(&effects),
            Some(("fallen tree".to_string(), "2 Elm Road".to_string()))
        );
    }

    #[test]
    fn test_confirm_finalizes_and_clears() {
        let mut conv = Conversation::new();
        conv.apply(Event::Message("graffiti".to_string()));
        conv.apply(Event::Address("5 Main Square".to_string()));
        let effects = conv.apply(Event::Confirm);

        assert_eq!(conv.phase(), Phase::Finalized);
        assert_eq!(conv.pending_text(), None);
        assert_eq!(conv.pending_address(), None);
        assert_eq!(
            effects,
            vec![Effect::ShowCompletion {
                text: "graffiti".to_string(),
                address: "5 Main Square".to_string(),
            }]
        );
    }

    #[test]
    fn test_message_after_finalize_starts_fresh() {
        let mut conv = Conversation::new();
        conv.apply(Event::Message("first".to_string()));
        conv.apply(Event::Address("somewhere".to_string()));
        conv.apply(Event::Confirm);

        let effects = conv.apply(Event::Message("second".to_string()));
        assert_eq!(conv.phase(), Phase::AwaitingAddress);
        assert_eq!(conv.pending_text(), Some("second"));
        assert!(effects.contains(&Effect::PromptAddress { retry: false }));
    }

    #[test]
    fn test_mid_flow_message_restarts_request() {
        let mut conv = Conversation::new();
        conv.apply(Event::Message("first text".to_string()));
        conv.apply(Event::Message("second text".to_string()));
        let effects = conv.apply(Event::Address("7 Hill Lane".to_string()));

        assert_eq!(
            confirmation_pair(&effects),
            Some(("second text".to_string(), "7 Hill Lane".to_string()))
        );
    }

    #[test]
    fn test_out_of_phase_events_are_noops() {
        let mut conv = Conversation::new();
        assert!(conv.apply(Event::Confirm).is_empty());
        assert!(conv.apply(Event::Edit).is_empty());
        assert!(conv.apply(Event::Address("ignored".to_string())).is_empty());
        assert_eq!(conv.phase(), Phase::Idle);
    }

    #[test]
    fn test_address_is_trimmed() {
        let mut conv = Conversation::new();
        conv.apply(Event::Message("leak".to_string()));
        conv.apply(Event::Address("  3 River Walk  ".to_string()));
        assert_eq!(conv.pending_address(), Some("3 River Walk"));
    }
}
