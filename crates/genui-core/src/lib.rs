//! Declarative UI protocol for model-generated screens.
//!
//! A model describes a screen as JSON; this crate turns that untrusted text
//! into a closed, validated [`Screen`] tree and turns user actions back into
//! canonical [`InteractionEvent`]s for the next turn.
//!
//! ```text
//! generation text -> extract -> parser -> Screen -> (renderer)
//! user action -> interaction -> UserTurn -> session history -> model
//! ```
//!
//! Nothing here performs I/O. The engine that drives a model client lives in
//! `genui-interaction`.

pub mod block;
pub mod config;
pub mod error;
pub mod extract;
pub mod interaction;
pub mod parser;
pub mod prompt;
pub mod session;

pub use block::{Block, BlockKind, Screen};
pub use error::{GenUiError, Result};
pub use extract::extract_json;
pub use interaction::{InteractionEvent, InteractionKind, UiAction};
pub use parser::{ParseReport, parse_generation, parse_screen, parse_screen_with_report};
pub use session::{SessionMessage, SessionState};
