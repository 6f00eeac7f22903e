//! Field catalog for each block kind.
//!
//! Used to describe the protocol to the model. Kept next to the taxonomy so a
//! new variant without a catalog entry fails to compile.

use super::model::BlockKind;

/// Primitive shape of a field on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldShape {
    String,
    Number,
    Bool,
    Action,
    /// One of the token spellings of the named enum.
    Token(&'static str),
    Blocks,
    Buttons,
    Items,
}

impl FieldShape {
    pub fn describe(&self) -> String {
        match self {
            FieldShape::String => "string".to_string(),
            FieldShape::Number => "number".to_string(),
            FieldShape::Bool => "boolean".to_string(),
            FieldShape::Action => "action object or string".to_string(),
            FieldShape::Token(name) => format!("{name} token"),
            FieldShape::Blocks => "block array".to_string(),
            FieldShape::Buttons => "button array".to_string(),
            FieldShape::Items => "item array".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub shape: FieldShape,
    pub required: bool,
    /// Default applied when the field is absent, rendered as wire text.
    pub default: Option<&'static str>,
}

const fn req(name: &'static str, shape: FieldShape) -> FieldSpec {
    FieldSpec {
        name,
        shape,
        required: true,
        default: None,
    }
}

const fn opt(name: &'static str, shape: FieldShape) -> FieldSpec {
    FieldSpec {
        name,
        shape,
        required: false,
        default: None,
    }
}

const fn def(name: &'static str, shape: FieldShape, default: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        shape,
        required: false,
        default: Some(default),
    }
}

use FieldShape::{Action, Blocks, Bool, Buttons, Items, Number, String as Str, Token};

impl BlockKind {
    /// Wire fields of this kind, excluding `type` and the style tokens.
    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            BlockKind::Hero => const { &[
                req("headline", Str),
                opt("subhead", Str),
                opt("eyebrow", Str),
                opt("imageUrl", Str),
                opt("alignment", Token("alignment")),
            ] },
            BlockKind::Card => const { &[
                opt("title", Str),
                opt("subtitle", Str),
                def("body", Blocks, "[]"),
                def("actions", Buttons, "[]"),
                opt("variant", Token("card variant")),
            ] },
            BlockKind::Text => const { &[
                req("text", Str),
                def("variant", Token("text variant"), "body"),
                opt("alignment", Token("alignment")),
            ] },
            BlockKind::List => const { &[req("items", Items), def("dense", Bool, "false")] },
            BlockKind::Button => const { &[
                req("label", Str),
                def("action", Action, "{}"),
                def("variant", Token("button variant"), "filled"),
                opt("role", Token("button role")),
                opt("icon", Str),
                def("enabled", Bool, "true"),
            ] },
            BlockKind::Checkbox | BlockKind::Switch => const { &[
                req("label", Str),
                opt("id", Str),
                def("checked", Bool, "false"),
                def("action", Action, "{}"),
            ] },
            BlockKind::Chip => const { &[
                req("label", Str),
                def("selected", Bool, "false"),
                def("variant", Token("chip variant"), "assist"),
                opt("icon", Str),
                def("action", Action, "{}"),
            ] },
            BlockKind::Progress => const { &[
                opt("value", Number),
                opt("label", Str),
                def("variant", Token("progress variant"), "linear"),
            ] },
            BlockKind::Divider => const { &[def("inset", Bool, "false")] },
            BlockKind::IconButton => const { &[
                req("icon", Str),
                opt("contentDescription", Str),
                def("variant", Token("icon button variant"), "standard"),
                def("action", Action, "{}"),
            ] },
            BlockKind::Fab => const { &[
                req("icon", Str),
                opt("label", Str),
                def("size", Token("fab size"), "regular"),
                def("position", Token("fab position"), "end"),
                def("action", Action, "{}"),
            ] },
            BlockKind::TextField => const { &[
                req("label", Str),
                opt("id", Str),
                opt("placeholder", Str),
                def("value", Str, "\"\""),
                def("multiline", Bool, "false"),
                def("keyboard", Token("keyboard"), "text"),
                def("action", Action, "{}"),
            ] },
            BlockKind::Slider => const { &[
                req("value", Number),
                opt("id", Str),
                opt("label", Str),
                def("min", Number, "0"),
                def("max", Number, "1"),
                def("steps", Number, "0"),
                def("action", Action, "{}"),
            ] },
            BlockKind::Badge => const { &[req("label", Str)] },
            BlockKind::Image => const { &[
                req("url", Str),
                opt("contentDescription", Str),
                opt("aspectRatio", Number),
            ] },
            BlockKind::Avatar => const { &[
                opt("initials", Str),
                opt("imageUrl", Str),
                opt("name", Str),
                def("size", Token("avatar size"), "medium"),
            ] },
            BlockKind::Row => const { &[
                def("children", Blocks, "[]"),
                opt("arrangement", Token("arrangement")),
                def("spacing", Number, "8"),
            ] },
            BlockKind::Column => const { &[
                def("children", Blocks, "[]"),
                opt("alignment", Token("alignment")),
                def("spacing", Number, "8"),
            ] },
            BlockKind::Spacer => const { &[def("height", Number, "16")] },
        }
    }

    /// Extra constraint the field table cannot express, if any.
    pub fn note(&self) -> Option<&'static str> {
        match self {
            BlockKind::Avatar => Some("needs initials or imageUrl"),
            BlockKind::Card => Some("body may be a single block; actions accept buttons only"),
            BlockKind::List => Some("items are {title, subtitle?, leadingIcon?, trailingText?, action?}"),
            BlockKind::Progress => Some("omit value for an indeterminate indicator; value is 0..1"),
            BlockKind::Slider => Some("value is clamped into [min, max]"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_kind_is_catalogued() {
        for kind in BlockKind::iter() {
            let fields = kind.fields();
            assert!(!fields.is_empty(), "{kind:?} has no fields");
        }
    }

    #[test]
    fn test_required_fields_have_no_default() {
        for kind in BlockKind::iter() {
            for field in kind.fields() {
                assert!(
                    !(field.required && field.default.is_some()),
                    "{kind:?}.{} is required and defaulted",
                    field.name
                );
            }
        }
    }
}
