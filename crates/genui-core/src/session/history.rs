use super::message::{AssistantTurn, SessionMessage, UserTurn};
use super::wire::{self, WireMessage};

/// Ordered turn history that always starts with its System message.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    messages: Vec<SessionMessage>,
}

impl History {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![SessionMessage::System {
                content: system_prompt.into(),
            }],
        }
    }

    pub fn messages(&self) -> &[SessionMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Never true; the System message is always present.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn system_prompt(&self) -> &str {
        match self.messages.first() {
            Some(SessionMessage::System { content }) => content,
            _ => "",
        }
    }

    pub fn push_user(&mut self, turn: UserTurn) {
        self.messages.push(SessionMessage::User(turn));
    }

    pub fn push_assistant(&mut self, turn: AssistantTurn) {
        self.messages.push(SessionMessage::Assistant(turn));
    }

    /// Drops everything after the first `len` messages. The System message
    /// is never removed.
    pub fn truncate(&mut self, len: usize) {
        self.messages.truncate(len.max(1));
    }

    /// Keeps only the System message.
    pub fn clear(&mut self) {
        self.truncate(1);
    }

    pub fn last_assistant(&self) -> Option<&AssistantTurn> {
        self.messages.iter().rev().find_map(SessionMessage::as_assistant)
    }

    pub fn to_wire(&self) -> Vec<WireMessage> {
        wire::to_wire(&self.messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Screen;

    #[test]
    fn test_clear_keeps_system_only() {
        let mut history = History::new("prompt");
        for n in 0..4 {
            history.push_user(UserTurn::text(format!("turn {n}")));
            history.push_assistant(AssistantTurn::new(Screen::new(format!("s{n}")), "{}"));
        }
        assert_eq!(history.len(), 9);

        history.clear();
        assert_eq!(history.len(), 1);
        assert!(history.messages()[0].is_system());
        assert_eq!(history.system_prompt(), "prompt");
        assert!(history.last_assistant().is_none());
    }

    #[test]
    fn test_truncate_never_removes_system() {
        let mut history = History::new("prompt");
        history.push_user(UserTurn::text("hi"));
        history.truncate(0);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_last_assistant() {
        let mut history = History::new("prompt");
        history.push_assistant(AssistantTurn::new(Screen::new("a"), "{}"));
        history.push_user(UserTurn::text("next"));
        history.push_assistant(AssistantTurn::new(Screen::new("b"), "{}"));
        history.push_user(UserTurn::text("again"));

        assert_eq!(
            history.last_assistant().map(|t| t.screen.screen_id.as_str()),
            Some("b")
        );
    }
}
