//! Built-in system prompt describing the screen protocol.
//!
//! Generated from the block catalog and token enums so the model is never
//! told about a field or spelling the parser does not accept.

use crate::block::{
    Alignment, Arrangement, AvatarSize, BlockKind, ButtonRole, ButtonVariant, CardVariant,
    ChipVariant, ColorMode, Emphasis, FabPosition, FabSize, IconButtonVariant,
    KeyboardType, Motion, MotionScheme, ProgressVariant, ScreenRole, SurfaceRole, TextVariant,
    Token, Tone,
};
use crate::interaction::InteractionKind;
use crate::session::{APP_CONTEXT_MARKER, USER_INTERACTION_MARKER};
use std::fmt::Write as _;
use strum::IntoEnumIterator;

const PREAMBLE: &str = "\
You are the interface of an application. Reply to every turn with exactly one JSON object \
describing the next screen, and nothing else. Do not write prose around it. Do not use \
markdown unless you wrap the whole object in a single ```json fence.";

/// Token name as used by the catalog, with its canonical spellings.
fn token_table() -> Vec<(&'static str, Vec<&'static str>)> {
    vec![
        ("emphasis", Emphasis::spellings()),
        ("surface", SurfaceRole::spellings()),
        ("motion", Motion::spellings()),
        ("screen role", ScreenRole::spellings()),
        ("tone", Tone::spellings()),
        ("motion scheme", MotionScheme::spellings()),
        ("color mode", ColorMode::spellings()),
        ("alignment", Alignment::spellings()),
        ("arrangement", Arrangement::spellings()),
        ("text variant", TextVariant::spellings()),
        ("button variant", ButtonVariant::spellings()),
        ("button role", ButtonRole::spellings()),
        ("card variant", CardVariant::spellings()),
        ("chip variant", ChipVariant::spellings()),
        ("progress variant", ProgressVariant::spellings()),
        ("icon button variant", IconButtonVariant::spellings()),
        ("fab size", FabSize::spellings()),
        ("fab position", FabPosition::spellings()),
        ("avatar size", AvatarSize::spellings()),
        ("keyboard", KeyboardType::spellings()),
    ]
}

/// The full system prompt.
pub fn system_prompt() -> String {
    let mut out = String::with_capacity(4096);
    out.push_str(PREAMBLE);
    out.push_str("\n\n");

    out.push_str("## Screen\n");
    out.push_str(
        "{\"screenId\": string, \"role\"?: screen role, \"tone\"?: tone, \
         \"motionScheme\"?: motion scheme, \"colorMode\"?: color mode, \"blocks\": [block, ...]}\n\n",
    );

    out.push_str("## Blocks\n");
    out.push_str(
        "Every block is {\"type\": <type>, ...fields} and may also carry \"emphasis\", \
         \"surface\" and \"motion\". A block missing a required field is discarded.\n",
    );
    for kind in BlockKind::iter() {
        let _ = writeln!(out, "- {}", describe_kind(kind));
    }
    out.push('\n');

    out.push_str("## Tokens\n");
    for (name, spellings) in token_table() {
        let _ = writeln!(out, "- {name}: {}", spellings.join(" | "));
    }
    out.push('\n');

    out.push_str("## Actions\n");
    out.push_str(
        "An action is {\"type\": string, ...any keys you need}. Whatever you put in a block's \
         action is sent back to you when the user triggers it, so include ids you will need.\n\n",
    );

    out.push_str("## User turns\n");
    let kinds: Vec<&str> = InteractionKind::iter().map(|k| k.as_str()).collect();
    let _ = writeln!(
        out,
        "A user turn may contain free text, then a {USER_INTERACTION_MARKER} section with an \
         event {{\"type\", \"data\", \"timestamp\"}}, then an {APP_CONTEXT_MARKER} section with \
         application state as JSON. Event types from widgets: {}. Other types are the ones you \
         declared in an action.",
        kinds.join(", ")
    );

    out
}

/// One catalog line, e.g. `button: label (string, required), ...`.
fn describe_kind(kind: BlockKind) -> String {
    let fields: Vec<String> = kind
        .fields()
        .iter()
        .map(|field| {
            let mut line = format!("{} ({}", field.name, field.shape.describe());
            if field.required {
                line.push_str(", required");
            } else if let Some(default) = field.default {
                let _ = write!(line, ", default {default}");
            }
            line.push(')');
            line
        })
        .collect();

    let mut line = format!("{}: {}", kind.as_str(), fields.join(", "));
    if let Some(note) = kind.note() {
        let _ = write!(line, ". {note}");
    }
    line
}
