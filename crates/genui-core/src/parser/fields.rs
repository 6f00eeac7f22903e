//! Typed field access over an untrusted JSON object.
//!
//! Required readers return `Err(DropReason)` so a variant constructor can
//! bail out with `?`; optional readers never fail and fall back to `None` or
//! the supplied default when the value is absent or has the wrong type.

use super::report::DropReason;
use crate::block::{ActionPayload, Token, normalize};
use serde_json::{Map, Value};

pub(crate) struct Fields<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    pub(crate) fn new(map: &'a Map<String, Value>) -> Self {
        Self { map }
    }

    /// Looks a key up exactly, then by its delimiter-insensitive form, so
    /// `imageUrl`, `image_url` and `ImageURL` all match.
    pub(crate) fn get(&self, key: &str) -> Option<&'a Value> {
        if let Some(value) = self.map.get(key) {
            return Some(value);
        }
        let wanted = normalize(key);
        self.map
            .iter()
            .find(|(candidate, _)| normalize(candidate) == wanted)
            .map(|(_, value)| value)
    }

    // ------------------------------------------------------------------------
    // Required
    // ------------------------------------------------------------------------

    /// A non-blank string.
    pub(crate) fn required_str(&self, key: &'static str) -> Result<String, DropReason> {
        match self.get(key) {
            None | Some(Value::Null) => Err(DropReason::MissingField(key)),
            Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
            Some(_) => Err(DropReason::InvalidField(key)),
        }
    }

    /// A finite number.
    pub(crate) fn required_number(&self, key: &'static str) -> Result<f64, DropReason> {
        match self.get(key) {
            None | Some(Value::Null) => Err(DropReason::MissingField(key)),
            Some(value) => finite(value).ok_or(DropReason::InvalidField(key)),
        }
    }

    /// An array, possibly empty.
    pub(crate) fn required_array(&self, key: &'static str) -> Result<&'a Vec<Value>, DropReason> {
        match self.get(key) {
            None | Some(Value::Null) => Err(DropReason::MissingField(key)),
            Some(Value::Array(items)) => Ok(items),
            Some(_) => Err(DropReason::InvalidField(key)),
        }
    }

    // ------------------------------------------------------------------------
    // Optional
    // ------------------------------------------------------------------------

    pub(crate) fn str(&self, key: &str) -> Option<String> {
        match self.get(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
            Some(Value::Null) | None => None,
            Some(other) => {
                tracing::debug!(field = key, value = %other, "ignoring non-string field");
                None
            }
        }
    }

    pub(crate) fn str_or(&self, key: &str, default: &str) -> String {
        match self.get(key) {
            Some(Value::String(s)) => s.clone(),
            _ => default.to_string(),
        }
    }

    pub(crate) fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(finite)
    }

    pub(crate) fn number_or(&self, key: &str, default: f64) -> f64 {
        self.number(key).unwrap_or(default)
    }

    /// A non-negative whole number; fractional values are truncated.
    pub(crate) fn count_or(&self, key: &str, default: u32) -> u32 {
        match self.number(key) {
            Some(n) if n >= 0.0 && n <= f64::from(u32::MAX) => n as u32,
            _ => default,
        }
    }

    pub(crate) fn bool_or(&self, key: &str, default: bool) -> bool {
        match self.get(key) {
            Some(Value::Bool(b)) => *b,
            _ => default,
        }
    }

    pub(crate) fn token<T: Token>(&self, key: &str) -> Option<T> {
        match self.get(key) {
            Some(Value::String(s)) => {
                let parsed = T::parse(s);
                if parsed.is_none() {
                    tracing::debug!(field = key, value = %s, "unrecognized token");
                }
                parsed
            }
            _ => None,
        }
    }

    pub(crate) fn token_or<T: Token>(&self, key: &str, default: T) -> T {
        self.token(key).unwrap_or(default)
    }

    /// Action payload: objects pass through, a bare string becomes
    /// `{"type": <string>}`, anything else is `None`.
    pub(crate) fn action(&self, key: &str) -> Option<ActionPayload> {
        match self.get(key) {
            Some(Value::Object(map)) => Some(map.clone()),
            Some(Value::String(s)) if !s.trim().is_empty() => {
                let mut payload = ActionPayload::new();
                payload.insert("type".to_string(), Value::String(s.clone()));
                Some(payload)
            }
            _ => None,
        }
    }

    pub(crate) fn action_or_empty(&self, key: &str) -> ActionPayload {
        self.action(key).unwrap_or_default()
    }
}

fn finite(value: &Value) -> Option<f64> {
    value.as_f64().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Alignment;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn test_lookup_tolerates_snake_case_keys() {
        let map = object(json!({"image_url": "https://x", "Content-Description": "logo"}));
        let fields = Fields::new(&map);

        assert_eq!(fields.str("imageUrl").as_deref(), Some("https://x"));
        assert_eq!(fields.str("contentDescription").as_deref(), Some("logo"));
    }

    #[test]
    fn test_required_str_reasons() {
        let map = object(json!({"label": 3, "blank": "  "}));
        let fields = Fields::new(&map);

        assert_eq!(fields.required_str("label"), Err(DropReason::InvalidField("label")));
        assert_eq!(fields.required_str("blank"), Err(DropReason::InvalidField("blank")));
        assert_eq!(fields.required_str("headline"), Err(DropReason::MissingField("headline")));
    }

    #[test]
    fn test_required_number_rejects_strings() {
        let map = object(json!({"value": "0.5"}));
        let fields = Fields::new(&map);

        assert_eq!(fields.required_number("value"), Err(DropReason::InvalidField("value")));
    }

    #[test]
    fn test_defaults_apply_per_field() {
        let map = object(json!({"checked": "yes", "spacing": 12, "steps": -3}));
        let fields = Fields::new(&map);

        assert!(!fields.bool_or("checked", false));
        assert_eq!(fields.number_or("spacing", 8.0), 12.0);
        assert_eq!(fields.count_or("steps", 0), 0);
    }

    #[test]
    fn test_action_shorthand() {
        let map = object(json!({"a": "submit", "b": {"type": "open", "id": 4}, "c": 7}));
        let fields = Fields::new(&map);

        assert_eq!(Value::Object(fields.action_or_empty("a")), json!({"type": "submit"}));
        assert_eq!(Value::Object(fields.action_or_empty("b")), json!({"type": "open", "id": 4}));
        assert!(fields.action_or_empty("c").is_empty());
        assert!(fields.action("missing").is_none());
    }

    #[test]
    fn test_token_lookup() {
        let map = object(json!({"alignment": "CENTER", "other": "sideways"}));
        let fields = Fields::new(&map);

        assert_eq!(fields.token::<Alignment>("alignment"), Some(Alignment::Center));
        assert_eq!(fields.token::<Alignment>("other"), None);
        assert_eq!(fields.token_or("other", Alignment::Start), Alignment::Start);
    }
}
