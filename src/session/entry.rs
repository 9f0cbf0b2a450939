use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who produced a chat line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The citizen filing the request
    Citizen,
    /// The intake service
    Service,
}

/// A single line of the session transcript
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatEntry {
    /// Who said it
    pub role: Role,

    /// Rendered text
    pub text: String,

    /// When the line was produced
    pub timestamp: DateTime<Utc>,

    /// Blocking alert (e.g. capture denied) rather than an inline chat line
    pub alert: bool,
}

impl ChatEntry {
    pub fn citizen(text: impl Into<String>) -> Self {
        Self {
            role: Role::Citizen,
            text: text.into(),
            timestamp: Utc::now(),
            alert: false,
        }
    }

    pub fn service(text: impl Into<String>) -> Self {
        Self {
            role: Role::Service,
            text: text.into(),
            timestamp: Utc::now(),
            alert: false,
        }
    }

    pub fn alert(text: impl Into<String>) -> Self {
        Self {
            role: Role::Service,
            text: text.into(),
            timestamp: Utc::now(),
            alert: true,
        }
    }
}
