//! Turn types kept in a session's history.

use crate::block::Screen;
use crate::interaction::InteractionEvent;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// One entry of a session's history.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum SessionMessage {
    /// Leading instruction; always exactly one, always first.
    System { content: String },
    User(UserTurn),
    Assistant(AssistantTurn),
}

impl SessionMessage {
    pub fn is_system(&self) -> bool {
        matches!(self, SessionMessage::System { .. })
    }

    pub fn as_assistant(&self) -> Option<&AssistantTurn> {
        match self {
            SessionMessage::Assistant(turn) => Some(turn),
            _ => None,
        }
    }
}

/// What the user contributed to a turn: free text, an interaction, an app
/// context snapshot, or any combination of them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserTurn {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<InteractionEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
    pub timestamp: DateTime<Utc>,
}

impl UserTurn {
    fn empty() -> Self {
        Self {
            text: None,
            event: None,
            context: None,
            timestamp: Utc::now(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            text: (!text.trim().is_empty()).then_some(text),
            ..Self::empty()
        }
    }

    pub fn interaction(event: InteractionEvent) -> Self {
        Self {
            event: Some(event),
            ..Self::empty()
        }
    }

    /// Nothing to send: no text, no interaction, no context.
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.event.is_none() && self.context.is_none()
    }

    /// Attaches an app context snapshot; `null` counts as no context.
    pub fn with_context(mut self, context: Option<Value>) -> Self {
        self.context = context.filter(|value| !value.is_null());
        self
    }
}

/// A screen the model produced, plus the text it was parsed from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantTurn {
    pub screen: Screen,
    pub raw_text: String,
    pub timestamp: DateTime<Utc>,
}

impl AssistantTurn {
    pub fn new(screen: Screen, raw_text: impl Into<String>) -> Self {
        Self {
            screen,
            raw_text: raw_text.into(),
            timestamp: Utc::now(),
        }
    }
}
