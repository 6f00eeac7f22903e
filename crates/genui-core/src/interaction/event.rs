//! Canonical interaction event.

use crate::block::{ActionPayload, BlockKind, Token};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{EnumIter, IntoStaticStr};

/// Event type used when an action carries no usable `type`.
pub const UNKNOWN_EVENT_TYPE: &str = "unknown";

/// Event kinds emitted by the UI layer itself.
///
/// Events are not limited to these; a model may put any `type` into a
/// block's action and it travels through unchanged.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum InteractionKind {
    ButtonPressed,
    CheckboxChange,
    SwitchChange,
    ChipSelect,
    ChipPressed,
    TextFieldSubmit,
    TextFieldChange,
    SliderChange,
    IconButtonPressed,
    FabPressed,
}

impl Token for InteractionKind {}

impl InteractionKind {
    /// The kind a widget emits on its primary gesture, `None` for blocks
    /// that are not interactive.
    pub fn primary_for(kind: BlockKind) -> Option<Self> {
        match kind {
            BlockKind::Button => Some(Self::ButtonPressed),
            BlockKind::Checkbox => Some(Self::CheckboxChange),
            BlockKind::Switch => Some(Self::SwitchChange),
            BlockKind::Chip => Some(Self::ChipSelect),
            BlockKind::TextField => Some(Self::TextFieldSubmit),
            BlockKind::Slider => Some(Self::SliderChange),
            BlockKind::IconButton => Some(Self::IconButtonPressed),
            BlockKind::Fab => Some(Self::FabPressed),
            _ => None,
        }
    }
}

/// A user action normalized for the next user turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub data: Map<String, Value>,
    pub timestamp: DateTime<Utc>,
}

impl InteractionEvent {
    pub fn new(event_type: impl Into<String>, data: Map<String, Value>) -> Self {
        Self {
            event_type: event_type.into(),
            data,
            timestamp: Utc::now(),
        }
    }

    /// Builds an event from a raw action payload.
    ///
    /// A non-blank string `type` becomes the discriminator and every other
    /// key is kept as event data. Otherwise the type is `"unknown"` and the
    /// payload, including any unusable `type` value, is kept whole.
    pub fn from_action(mut action: ActionPayload) -> Self {
        let declared = match action.get("type") {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
            _ => None,
        };
        match declared {
            Some(event_type) => {
                action.shift_remove("type");
                Self::new(event_type, action)
            }
            None => Self::new(UNKNOWN_EVENT_TYPE, action),
        }
    }

    /// The built-in kind, if the type names one.
    pub fn kind(&self) -> Option<InteractionKind> {
        InteractionKind::parse(&self.event_type)
    }

    pub fn is_unknown(&self) -> bool {
        self.event_type == UNKNOWN_EVENT_TYPE
    }

    /// Wire form: `{"type", "data", "timestamp"}` with an RFC 3339 timestamp.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> ActionPayload {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn test_slider_change_scenario() {
        let event = InteractionEvent::from_action(payload(
            json!({"type": "slider_change", "value": 0.4, "fieldId": "volume"}),
        ));

        assert_eq!(event.event_type, "slider_change");
        assert_eq!(event.kind(), Some(InteractionKind::SliderChange));
        assert_eq!(Value::Object(event.data.clone()), json!({"value": 0.4, "fieldId": "volume"}));

        let wire = event.to_json();
        assert_eq!(wire["type"], "slider_change");
        assert_eq!(wire["data"], json!({"value": 0.4, "fieldId": "volume"}));
        assert!(wire["timestamp"].as_str().is_some_and(|ts| ts.contains('T')));
    }

    #[test]
    fn test_missing_type_is_unknown() {
        let event = InteractionEvent::from_action(payload(json!({"id": 3})));
        assert!(event.is_unknown());
        assert_eq!(event.kind(), None);
        assert_eq!(event.data.get("id"), Some(&json!(3)));

        let event = InteractionEvent::from_action(payload(json!({"type": 42, "id": 3})));
        assert!(event.is_unknown());
        assert_eq!(event.data.get("type"), Some(&json!(42)));
        assert_eq!(event.data.get("id"), Some(&json!(3)));

        let event = InteractionEvent::from_action(payload(json!({"type": "  "})));
        assert!(event.is_unknown());
        assert_eq!(event.data.get("type"), Some(&json!("  ")));
    }

    #[test]
    fn test_data_keeps_payload_order() {
        let event = InteractionEvent::from_action(payload(
            json!({"type": "slider_change", "value": 0.4, "fieldId": "volume", "step": 2}),
        ));
        let keys: Vec<_> = event.data.keys().map(String::as_str).collect();
        assert_eq!(keys, ["value", "fieldId", "step"]);
    }

    #[test]
    fn test_custom_type_passes_through() {
        let event = InteractionEvent::from_action(payload(json!({"type": "open_recipe", "id": 7})));
        assert_eq!(event.event_type, "open_recipe");
        assert_eq!(event.kind(), None);
    }

    #[test]
    fn test_wire_form_reads_back() {
        let event = InteractionEvent::from_action(payload(json!({"type": "fab_pressed"})));
        let back: InteractionEvent = serde_json::from_value(event.to_json()).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_primary_kind_per_block() {
        assert_eq!(
            InteractionKind::primary_for(BlockKind::Slider),
            Some(InteractionKind::SliderChange)
        );
        assert_eq!(InteractionKind::primary_for(BlockKind::Text), None);
        assert_eq!(InteractionKind::ChipPressed.as_str(), "chip_pressed");
    }
}
