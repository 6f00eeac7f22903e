//! Raw action payloads as a renderer produces them.

use super::event::{InteractionEvent, InteractionKind};
use crate::block::{ActionPayload, Block, Token};
use serde_json::Value;

/// Key under which a model-declared action `type` is kept once the UI kind
/// takes over `type`.
pub const MODEL_ACTION_TYPE_KEY: &str = "actionType";

/// Builds the payload a widget emits.
///
/// The block's own `action` map is the base, so anything the model attached
/// (ids, routes) comes back to it. Widget state is written on top of it.
///
/// ```ignore
/// let payload = UiAction::new(InteractionKind::SliderChange)
///     .value(0.4)
///     .field_id("volume")
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct UiAction {
    kind: InteractionKind,
    payload: ActionPayload,
}

impl UiAction {
    pub fn new(kind: InteractionKind) -> Self {
        Self {
            kind,
            payload: ActionPayload::new(),
        }
    }

    /// Starts from the model-supplied action of a block.
    pub fn from_model(kind: InteractionKind, model_action: &ActionPayload) -> Self {
        let mut payload = model_action.clone();
        if let Some(declared) = payload.shift_remove("type") {
            payload.insert(MODEL_ACTION_TYPE_KEY.to_string(), declared);
        }
        Self { kind, payload }
    }

    /// Starts from a block's primary gesture and its action map, `None` for
    /// non-interactive blocks.
    pub fn for_block(block: &Block) -> Option<Self> {
        let kind = InteractionKind::primary_for(block.kind())?;
        let base = match block.action() {
            Some(action) => Self::from_model(kind, action),
            None => Self::new(kind),
        };
        Some(match block {
            Block::Checkbox(b) => base.field_id_opt(b.id.as_deref()),
            Block::Switch(b) => base.field_id_opt(b.id.as_deref()),
            Block::TextField(b) => base.field_id_opt(b.id.as_deref()),
            Block::Slider(b) => base.field_id_opt(b.id.as_deref()),
            _ => base,
        })
    }

    pub fn kind(&self) -> InteractionKind {
        self.kind
    }

    pub fn value(self, value: impl Into<Value>) -> Self {
        self.with("value", value.into())
    }

    pub fn checked(self, checked: bool) -> Self {
        self.with("checked", Value::Bool(checked))
    }

    pub fn selected(self, selected: bool) -> Self {
        self.with("selected", Value::Bool(selected))
    }

    pub fn field_id(self, id: impl Into<String>) -> Self {
        self.with("fieldId", Value::String(id.into()))
    }

    fn field_id_opt(self, id: Option<&str>) -> Self {
        match id {
            Some(id) => self.field_id(id),
            None => self,
        }
    }

    /// Sets an arbitrary key. `type` cannot be overridden this way.
    pub fn with(mut self, key: &str, value: Value) -> Self {
        if key != "type" {
            self.payload.insert(key.to_string(), value);
        }
        self
    }

    pub fn build(self) -> ActionPayload {
        let mut payload = self.payload;
        payload.insert(
            "type".to_string(),
            Value::String(self.kind.as_str().to_string()),
        );
        payload
    }

    pub fn into_event(self) -> InteractionEvent {
        InteractionEvent::from_action(self.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{ButtonBlock, CheckboxBlock, Style, TextBlock, TextVariant};
    use serde_json::json;

    #[test]
    fn test_widget_state_on_top_of_model_action() {
        let model = match json!({"type": "set_volume", "target": "speaker", "value": 1}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };

        let payload = UiAction::from_model(InteractionKind::SliderChange, &model)
            .value(0.4)
            .field_id("volume")
            .build();

        assert_eq!(
            Value::Object(payload),
            json!({
                "type": "slider_change",
                "actionType": "set_volume",
                "target": "speaker",
                "value": 0.4,
                "fieldId": "volume"
            })
        );
    }

    #[test]
    fn test_type_key_is_reserved() {
        let event = UiAction::new(InteractionKind::FabPressed)
            .with("type", json!("hijack"))
            .into_event();
        assert_eq!(event.kind(), Some(InteractionKind::FabPressed));
    }

    #[test]
    fn test_for_block_carries_field_id() {
        let checkbox = Block::Checkbox(CheckboxBlock {
            label: "Agree".to_string(),
            id: Some("terms".to_string()),
            checked: false,
            action: ActionPayload::new(),
            style: Style::default(),
        });

        let event = UiAction::for_block(&checkbox)
            .expect("checkbox is interactive")
            .checked(true)
            .into_event();

        assert_eq!(event.event_type, "checkbox_change");
        assert_eq!(Value::Object(event.data), json!({"fieldId": "terms", "checked": true}));
    }

    #[test]
    fn test_for_block_button_and_text() {
        let mut button = ButtonBlock::new("Save");
        button.action.insert("type".to_string(), json!("save"));
        let payload = UiAction::for_block(&Block::Button(button)).unwrap().build();
        assert_eq!(payload["type"], "button_pressed");
        assert_eq!(payload["actionType"], "save");

        let text = Block::Text(TextBlock {
            text: "hi".to_string(),
            variant: TextVariant::Body,
            alignment: None,
            style: Style::default(),
        });
        assert!(UiAction::for_block(&text).is_none());
    }
}
