//! Enumerated tokens used by screens and blocks.
//!
//! Generators are inconsistent about casing, so every token parses through
//! [`Token::parse`], which ignores case and `_`/`-`/space delimiters:
//! `"primary_action"`, `"primaryAction"` and `"PRIMARY-ACTION"` are the same
//! token. Serialization always uses one fixed spelling per enum (snake_case,
//! except [`SurfaceRole`], which uses camelCase like the color-role names the
//! model is prompted with).

use serde::Serialize;
use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};

/// Common behaviour of every enumerated token.
pub trait Token: Copy + IntoEnumIterator + Into<&'static str> + 'static {
    /// Extra spellings accepted on input besides the canonical one.
    const ALIASES: &'static [(&'static str, Self)] = &[];

    /// Canonical wire spelling.
    fn as_str(&self) -> &'static str {
        (*self).into()
    }

    /// Resolves a loosely-spelled token, `None` when nothing matches.
    fn parse(raw: &str) -> Option<Self> {
        let key = normalize(raw);
        if key.is_empty() {
            return None;
        }

        Self::iter()
            .find(|token| normalize(token.as_str()) == key)
            .or_else(|| {
                Self::ALIASES
                    .iter()
                    .find(|(alias, _)| normalize(alias) == key)
                    .map(|(_, token)| *token)
            })
    }

    /// All canonical spellings, in declaration order.
    fn spellings() -> Vec<&'static str> {
        Self::iter().map(|token| token.as_str()).collect()
    }
}

/// Lower-cases and strips `_`, `-` and spaces.
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

// ============================================================================
// Style tokens (shared by every block)
// ============================================================================

/// Visual weight of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Emphasis {
    Hero,
    Primary,
    Secondary,
    Tertiary,
}

impl Token for Emphasis {}

/// Named color role a block is painted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter, IntoStaticStr)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum SurfaceRole {
    Primary,
    PrimaryContainer,
    Secondary,
    SecondaryContainer,
    Tertiary,
    TertiaryContainer,
    Surface,
    SurfaceVariant,
    SurfaceContainer,
    SurfaceContainerHigh,
    Error,
    ErrorContainer,
    InverseSurface,
}

impl Token for SurfaceRole {}

/// Animation intensity for a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Motion {
    Off,
    Subtle,
    Standard,
    Expressive,
}

impl Token for Motion {
    const ALIASES: &'static [(&'static str, Self)] = &[
        ("none", Motion::Off),
        ("static", Motion::Off),
        ("minimal", Motion::Subtle),
        ("emphasized", Motion::Expressive),
    ];
}

// ============================================================================
// Screen-level tokens
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ScreenRole {
    Home,
    List,
    Detail,
    Form,
    Dashboard,
    Confirmation,
    Onboarding,
    Settings,
    Error,
}

impl Token for ScreenRole {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Tone {
    Neutral,
    Friendly,
    Playful,
    Calm,
    Urgent,
    Celebratory,
    Serious,
}

impl Token for Tone {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MotionScheme {
    Standard,
    Expressive,
}

impl Token for MotionScheme {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ColorMode {
    Light,
    Dark,
    System,
}

impl Token for ColorMode {
    const ALIASES: &'static [(&'static str, Self)] = &[("auto", ColorMode::System)];
}

// ============================================================================
// Layout tokens
// ============================================================================

/// Cross-axis alignment for hero, text and column blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Alignment {
    Start,
    Center,
    End,
}

impl Token for Alignment {
    const ALIASES: &'static [(&'static str, Self)] = &[
        ("left", Alignment::Start),
        ("top", Alignment::Start),
        ("centre", Alignment::Center),
        ("middle", Alignment::Center),
        ("right", Alignment::End),
        ("bottom", Alignment::End),
    ];
}

/// Main-axis distribution of a row's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Arrangement {
    Start,
    Center,
    End,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

impl Token for Arrangement {}

// ============================================================================
// Per-variant tokens
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TextVariant {
    Display,
    Headline,
    Title,
    Body,
    Label,
    Caption,
}

impl Token for TextVariant {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ButtonVariant {
    Filled,
    Tonal,
    Outlined,
    Text,
    Elevated,
}

impl Token for ButtonVariant {}

/// Semantic role of a button within the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ButtonRole {
    PrimaryAction,
    SecondaryAction,
    Destructive,
    Navigation,
}

impl Token for ButtonRole {
    const ALIASES: &'static [(&'static str, Self)] = &[
        ("primary", ButtonRole::PrimaryAction),
        ("secondary", ButtonRole::SecondaryAction),
        ("danger", ButtonRole::Destructive),
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CardVariant {
    Elevated,
    Filled,
    Outlined,
}

impl Token for CardVariant {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ChipVariant {
    Assist,
    Filter,
    Input,
    Suggestion,
}

impl Token for ChipVariant {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ProgressVariant {
    Linear,
    Circular,
}

impl Token for ProgressVariant {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum IconButtonVariant {
    Standard,
    Filled,
    Tonal,
    Outlined,
}

impl Token for IconButtonVariant {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FabSize {
    Small,
    Regular,
    Large,
}

impl Token for FabSize {
    const ALIASES: &'static [(&'static str, Self)] = &[("medium", FabSize::Regular)];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FabPosition {
    End,
    Center,
    Start,
}

impl Token for FabPosition {
    const ALIASES: &'static [(&'static str, Self)] = &[
        ("bottom_end", FabPosition::End),
        ("right", FabPosition::End),
        ("bottom_center", FabPosition::Center),
        ("bottom_start", FabPosition::Start),
        ("left", FabPosition::Start),
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AvatarSize {
    Small,
    Medium,
    Large,
}

impl Token for AvatarSize {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum KeyboardType {
    Text,
    Number,
    Email,
    Phone,
    Password,
    Url,
}

impl Token for KeyboardType {
    const ALIASES: &'static [(&'static str, Self)] = &[
        ("numeric", KeyboardType::Number),
        ("decimal", KeyboardType::Number),
        ("tel", KeyboardType::Phone),
        ("uri", KeyboardType::Url),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ignores_case_and_delimiters() {
        for raw in ["primary_action", "primaryAction", "PRIMARY-ACTION", "Primary Action"] {
            assert_eq!(ButtonRole::parse(raw), Some(ButtonRole::PrimaryAction), "{raw}");
        }
        assert_eq!(Arrangement::parse("spaceBetween"), Arrangement::parse("space_between"));
        assert_eq!(Arrangement::parse("SPACE_EVENLY"), Some(Arrangement::SpaceEvenly));
    }

    #[test]
    fn test_unknown_token_is_none() {
        assert_eq!(Emphasis::parse("loud"), None);
        assert_eq!(Emphasis::parse(""), None);
        assert_eq!(Emphasis::parse("__"), None);
    }

    #[test]
    fn test_aliases_resolve() {
        assert_eq!(Alignment::parse("left"), Some(Alignment::Start));
        assert_eq!(ButtonRole::parse("primary"), Some(ButtonRole::PrimaryAction));
        assert_eq!(ColorMode::parse("Auto"), Some(ColorMode::System));
    }

    #[test]
    fn test_canonical_spellings() {
        assert_eq!(ButtonRole::PrimaryAction.as_str(), "primary_action");
        assert_eq!(SurfaceRole::PrimaryContainer.as_str(), "primaryContainer");
        assert_eq!(
            serde_json::to_value(SurfaceRole::SurfaceContainerHigh).unwrap(),
            "surfaceContainerHigh"
        );
        assert_eq!(serde_json::to_value(Arrangement::SpaceBetween).unwrap(), "space_between");
    }

    #[test]
    fn test_surface_role_accepts_snake_case() {
        assert_eq!(
            SurfaceRole::parse("error_container"),
            Some(SurfaceRole::ErrorContainer)
        );
    }
}
