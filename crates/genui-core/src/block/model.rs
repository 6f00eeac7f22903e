//! Block and screen domain model.
//!
//! The tree is plain data: a [`Screen`] owns its blocks, containers own their
//! children, and nothing points back up. Construction from untrusted JSON lives
//! in [`crate::parser`]; this module only defines the shapes and how they
//! serialize back to the wire format.

use super::token::{
    Alignment, Arrangement, AvatarSize, ButtonRole, ButtonVariant, CardVariant, ChipVariant,
    ColorMode, Emphasis, FabPosition, FabSize, IconButtonVariant, KeyboardType, Motion,
    MotionScheme, ProgressVariant, ScreenRole, SurfaceRole, TextVariant, Token, Tone,
};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use strum::{EnumIter, IntoStaticStr};

/// Free-form payload describing what to send back when the user interacts.
///
/// Its shape is the model's own convention; only a `type` discriminator is
/// expected (see [`crate::interaction`]).
pub type ActionPayload = Map<String, Value>;

/// Screen identifier used when the model omits `screenId`.
pub const UNKNOWN_SCREEN_ID: &str = "unknown";

fn is_false(value: &bool) -> bool {
    !*value
}

/// Style tokens every block may carry. Forwarded to the renderer untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emphasis: Option<Emphasis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surface: Option<SurfaceRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motion: Option<Motion>,
}

/// The top-level envelope produced by one assistant turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Screen {
    pub screen_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<ScreenRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<Tone>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motion_scheme: Option<MotionScheme>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_mode: Option<ColorMode>,
    pub blocks: Vec<Block>,
}

impl Screen {
    /// Creates an empty screen with no metadata.
    pub fn new(screen_id: impl Into<String>) -> Self {
        Self {
            screen_id: screen_id.into(),
            role: None,
            tone: None,
            motion_scheme: None,
            color_mode: None,
            blocks: Vec::new(),
        }
    }

    /// Serializes the screen to its wire JSON.
    pub fn to_json(&self) -> Value {
        // Every field is a string, number, bool, map or sequence.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Total number of blocks in the tree, nested ones included.
    pub fn block_count(&self) -> usize {
        self.blocks.iter().map(Block::subtree_len).sum()
    }
}

/// Discriminator of a [`Block`], one fixed `type` string per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BlockKind {
    Hero,
    Card,
    Text,
    List,
    Button,
    Checkbox,
    Switch,
    Chip,
    Progress,
    Divider,
    IconButton,
    Fab,
    TextField,
    Slider,
    Badge,
    Image,
    Avatar,
    Row,
    Column,
    Spacer,
}

impl Token for BlockKind {
    const ALIASES: &'static [(&'static str, Self)] = &[
        ("toggle", BlockKind::Switch),
        ("floating_action", BlockKind::Fab),
        ("floating_action_button", BlockKind::Fab),
        ("input", BlockKind::TextField),
        ("progress_indicator", BlockKind::Progress),
    ];
}

/// One node of the screen description.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Hero(HeroBlock),
    Card(CardBlock),
    Text(TextBlock),
    List(ListBlock),
    Button(ButtonBlock),
    Checkbox(CheckboxBlock),
    Switch(SwitchBlock),
    Chip(ChipBlock),
    Progress(ProgressBlock),
    Divider(DividerBlock),
    IconButton(IconButtonBlock),
    Fab(FabBlock),
    TextField(TextFieldBlock),
    Slider(SliderBlock),
    Badge(BadgeBlock),
    Image(ImageBlock),
    Avatar(AvatarBlock),
    Row(RowBlock),
    Column(ColumnBlock),
    Spacer(SpacerBlock),
}

impl Block {
    pub fn kind(&self) -> BlockKind {
        match self {
            Block::Hero(_) => BlockKind::Hero,
            Block::Card(_) => BlockKind::Card,
            Block::Text(_) => BlockKind::Text,
            Block::List(_) => BlockKind::List,
            Block::Button(_) => BlockKind::Button,
            Block::Checkbox(_) => BlockKind::Checkbox,
            Block::Switch(_) => BlockKind::Switch,
            Block::Chip(_) => BlockKind::Chip,
            Block::Progress(_) => BlockKind::Progress,
            Block::Divider(_) => BlockKind::Divider,
            Block::IconButton(_) => BlockKind::IconButton,
            Block::Fab(_) => BlockKind::Fab,
            Block::TextField(_) => BlockKind::TextField,
            Block::Slider(_) => BlockKind::Slider,
            Block::Badge(_) => BlockKind::Badge,
            Block::Image(_) => BlockKind::Image,
            Block::Avatar(_) => BlockKind::Avatar,
            Block::Row(_) => BlockKind::Row,
            Block::Column(_) => BlockKind::Column,
            Block::Spacer(_) => BlockKind::Spacer,
        }
    }

    /// The `type` string this block serializes with.
    pub fn type_tag(&self) -> &'static str {
        self.kind().as_str()
    }

    pub fn style(&self) -> &Style {
        match self {
            Block::Hero(b) => &b.style,
            Block::Card(b) => &b.style,
            Block::Text(b) => &b.style,
            Block::List(b) => &b.style,
            Block::Button(b) => &b.style,
            Block::Checkbox(b) => &b.style,
            Block::Switch(b) => &b.style,
            Block::Chip(b) => &b.style,
            Block::Progress(b) => &b.style,
            Block::Divider(b) => &b.style,
            Block::IconButton(b) => &b.style,
            Block::Fab(b) => &b.style,
            Block::TextField(b) => &b.style,
            Block::Slider(b) => &b.style,
            Block::Badge(b) => &b.style,
            Block::Image(b) => &b.style,
            Block::Avatar(b) => &b.style,
            Block::Row(b) => &b.style,
            Block::Column(b) => &b.style,
            Block::Spacer(b) => &b.style,
        }
    }

    /// The action payload of an interactive block, if it has one.
    pub fn action(&self) -> Option<&ActionPayload> {
        match self {
            Block::Button(b) => Some(&b.action),
            Block::Checkbox(b) => Some(&b.action),
            Block::Switch(b) => Some(&b.action),
            Block::Chip(b) => Some(&b.action),
            Block::IconButton(b) => Some(&b.action),
            Block::Fab(b) => Some(&b.action),
            Block::TextField(b) => Some(&b.action),
            Block::Slider(b) => Some(&b.action),
            _ => None,
        }
    }

    /// This block plus every block nested under it.
    pub fn subtree_len(&self) -> usize {
        match self {
            Block::Card(card) => {
                1 + card.body.iter().map(Block::subtree_len).sum::<usize>() + card.actions.len()
            }
            Block::Row(row) => 1 + row.children.iter().map(Block::subtree_len).sum::<usize>(),
            Block::Column(column) => {
                1 + column.children.iter().map(Block::subtree_len).sum::<usize>()
            }
            _ => 1,
        }
    }
}

// ============================================================================
// Variants
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroBlock {
    pub headline: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subhead: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eyebrow: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
    #[serde(flatten)]
    pub style: Style,
}

/// A grouping surface. `actions` only ever holds buttons.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardBlock {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub body: Vec<Block>,
    #[serde(serialize_with = "tagged_buttons")]
    pub actions: Vec<ButtonBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<CardVariant>,
    #[serde(flatten)]
    pub style: Style,
}

/// Writes card actions with `"type": "button"` like any other block.
fn tagged_buttons<S: Serializer>(
    buttons: &[ButtonBlock],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    #[derive(Serialize)]
    #[serde(tag = "type", rename_all = "snake_case")]
    enum Tagged<'a> {
        Button(&'a ButtonBlock),
    }

    serializer.collect_seq(buttons.iter().map(Tagged::Button))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    pub text: String,
    pub variant: TextVariant,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
    #[serde(flatten)]
    pub style: Style,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBlock {
    pub items: Vec<ListItem>,
    pub dense: bool,
    #[serde(flatten)]
    pub style: Style,
}

/// One row of a [`ListBlock`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItem {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leading_icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailing_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<ActionPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonBlock {
    pub label: String,
    pub action: ActionPayload,
    pub variant: ButtonVariant,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<ButtonRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub enabled: bool,
    #[serde(flatten)]
    pub style: Style,
}

impl ButtonBlock {
    /// A filled, enabled button with an empty action.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: ActionPayload::new(),
            variant: ButtonVariant::Filled,
            role: None,
            icon: None,
            enabled: true,
            style: Style::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckboxBlock {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub checked: bool,
    pub action: ActionPayload,
    #[serde(flatten)]
    pub style: Style,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchBlock {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub checked: bool,
    pub action: ActionPayload,
    #[serde(flatten)]
    pub style: Style,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChipBlock {
    pub label: String,
    pub selected: bool,
    pub variant: ChipVariant,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub action: ActionPayload,
    #[serde(flatten)]
    pub style: Style,
}

/// `value` of `None` means indeterminate progress.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressBlock {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub variant: ProgressVariant,
    #[serde(flatten)]
    pub style: Style,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DividerBlock {
    pub inset: bool,
    #[serde(flatten)]
    pub style: Style,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IconButtonBlock {
    pub icon: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_description: Option<String>,
    pub variant: IconButtonVariant,
    pub action: ActionPayload,
    #[serde(flatten)]
    pub style: Style,
}

/// Floating action button.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FabBlock {
    pub icon: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub size: FabSize,
    pub position: FabPosition,
    pub action: ActionPayload,
    #[serde(flatten)]
    pub style: Style,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextFieldBlock {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    pub value: String,
    #[serde(skip_serializing_if = "is_false")]
    pub multiline: bool,
    pub keyboard: KeyboardType,
    pub action: ActionPayload,
    #[serde(flatten)]
    pub style: Style,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SliderBlock {
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub min: f64,
    pub max: f64,
    pub steps: u32,
    pub action: ActionPayload,
    #[serde(flatten)]
    pub style: Style,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeBlock {
    pub label: String,
    #[serde(flatten)]
    pub style: Style,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageBlock {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<f64>,
    #[serde(flatten)]
    pub style: Style,
}

/// At least one of `initials` and `image_url` is always present.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarBlock {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initials: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub size: AvatarSize,
    #[serde(flatten)]
    pub style: Style,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowBlock {
    pub children: Vec<Block>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrangement: Option<Arrangement>,
    pub spacing: f64,
    #[serde(flatten)]
    pub style: Style,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnBlock {
    pub children: Vec<Block>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
    pub spacing: f64,
    #[serde(flatten)]
    pub style: Style,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpacerBlock {
    pub height: f64,
    #[serde(flatten)]
    pub style: Style,
}
