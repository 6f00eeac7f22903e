//! Role/content messages handed to the model client.
//!
//! A user turn becomes one content string: the free text, then a
//! `[USER_INTERACTION]` section with the event JSON, then an `[APP_CONTEXT]`
//! section with the context JSON. Absent parts are left out along with their
//! separators.

use super::message::{SessionMessage, UserTurn};
use serde::{Deserialize, Serialize};

pub const USER_INTERACTION_MARKER: &str = "[USER_INTERACTION]";
pub const APP_CONTEXT_MARKER: &str = "[APP_CONTEXT]";

const SECTION_SEPARATOR: &str = "\n\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireRole {
    System,
    User,
    Assistant,
}

impl WireRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            WireRole::System => "system",
            WireRole::User => "user",
            WireRole::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireMessage {
    pub role: WireRole,
    pub content: String,
}

impl WireMessage {
    pub fn new(role: WireRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

impl SessionMessage {
    pub fn to_wire(&self) -> WireMessage {
        match self {
            SessionMessage::System { content } => WireMessage::new(WireRole::System, content),
            SessionMessage::User(turn) => WireMessage::new(WireRole::User, user_content(turn)),
            SessionMessage::Assistant(turn) => {
                WireMessage::new(WireRole::Assistant, turn.raw_text.as_str())
            }
        }
    }
}

/// Renders a whole history, in order.
pub fn to_wire(history: &[SessionMessage]) -> Vec<WireMessage> {
    history.iter().map(SessionMessage::to_wire).collect()
}

/// The content string of a user turn.
pub fn user_content(turn: &UserTurn) -> String {
    let mut sections: Vec<String> = Vec::with_capacity(3);

    if let Some(text) = turn.text.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        sections.push(text.to_string());
    }
    if let Some(event) = &turn.event {
        sections.push(format!("{USER_INTERACTION_MARKER}\n{}", event.to_json()));
    }
    if let Some(context) = &turn.context {
        sections.push(format!("{APP_CONTEXT_MARKER}\n{context}"));
    }

    sections.join(SECTION_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Screen;
    use crate::interaction::InteractionEvent;
    use crate::session::AssistantTurn;
    use serde_json::{Value, json};

    fn slider_event() -> InteractionEvent {
        let Value::Object(action) = json!({"type": "slider_change", "value": 0.4}) else {
            unreachable!()
        };
        InteractionEvent::from_action(action)
    }

    #[test]
    fn test_text_only() {
        let turn = UserTurn::text("Plan a trip to Lisbon");
        assert_eq!(user_content(&turn), "Plan a trip to Lisbon");
    }

    #[test]
    fn test_all_sections_in_order() {
        let turn = UserTurn {
            text: Some("Make it louder".to_string()),
            ..UserTurn::interaction(slider_event())
        }
        .with_context(Some(json!({"theme": "dark"})));

        let content = user_content(&turn);
        let (text, rest) = content.split_once("\n\n").unwrap();
        assert_eq!(text, "Make it louder");
        assert!(rest.starts_with("[USER_INTERACTION]\n{"));

        let (interaction, context) = rest.split_once("\n\n[APP_CONTEXT]\n").unwrap();
        let event: Value =
            serde_json::from_str(interaction.trim_start_matches("[USER_INTERACTION]\n")).unwrap();
        assert_eq!(event["type"], "slider_change");
        assert_eq!(event["data"], json!({"value": 0.4}));
        assert_eq!(context, r#"{"theme":"dark"}"#);
    }

    #[test]
    fn test_no_leading_separator_without_text() {
        let turn = UserTurn::interaction(slider_event());
        assert!(user_content(&turn).starts_with(USER_INTERACTION_MARKER));

        let turn = UserTurn::text("").with_context(Some(json!({"n": 1})));
        assert_eq!(user_content(&turn), "[APP_CONTEXT]\n{\"n\":1}");
    }

    #[test]
    fn test_null_context_is_absent() {
        let turn = UserTurn::text("hi").with_context(Some(Value::Null));
        assert_eq!(user_content(&turn), "hi");
    }

    #[test]
    fn test_history_roles() {
        let history = vec![
            SessionMessage::System {
                content: "be a UI".to_string(),
            },
            SessionMessage::User(UserTurn::text("hello")),
            SessionMessage::Assistant(AssistantTurn::new(Screen::new("s1"), "{\"raw\":1}")),
        ];

        let wire = to_wire(&history);
        let roles: Vec<_> = wire.iter().map(|m| m.role.as_str()).collect();
        assert_eq!(roles, ["system", "user", "assistant"]);
        assert_eq!(wire[2].content, "{\"raw\":1}");
    }
}
