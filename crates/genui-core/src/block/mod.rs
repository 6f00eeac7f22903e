//! Block taxonomy.
//!
//! # Module Structure
//!
//! - `model`: the closed set of block variants and the `Screen` envelope
//! - `token`: enumerated sub-fields with loose parsing and fixed spelling
//! - `catalog`: per-kind field table used to describe the protocol

mod catalog;
mod model;
mod token;

pub use catalog::{FieldShape, FieldSpec};
pub use model::{
    ActionPayload, AvatarBlock, BadgeBlock, Block, BlockKind, ButtonBlock, CardBlock,
    CheckboxBlock, ChipBlock, ColumnBlock, DividerBlock, FabBlock, HeroBlock, IconButtonBlock,
    ImageBlock, ListBlock, ListItem, ProgressBlock, RowBlock, Screen, SliderBlock, SpacerBlock,
    Style, SwitchBlock, TextBlock, TextFieldBlock, UNKNOWN_SCREEN_ID,
};
pub use token::{
    Alignment, Arrangement, AvatarSize, ButtonRole, ButtonVariant, CardVariant, ChipVariant,
    ColorMode, Emphasis, FabPosition, FabSize, IconButtonVariant, KeyboardType, Motion,
    MotionScheme, ProgressVariant, ScreenRole, SurfaceRole, TextVariant, Token, Tone, normalize,
};
