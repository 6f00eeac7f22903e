//! Session data model.
//!
//! # Module Structure
//!
//! - `message`: turn types (`SessionMessage`, `UserTurn`, `AssistantTurn`)
//! - `history`: ordered history anchored on its System message
//! - `state`: per-turn progress (`SessionState`)
//! - `wire`: role/content rendering with the section-marker convention
//!
//! The engine that drives a model lives in `genui-interaction`.

mod history;
mod message;
mod state;
mod wire;

pub use history::History;
pub use message::{AssistantTurn, SessionMessage, UserTurn};
pub use state::SessionState;
pub use wire::{
    APP_CONTEXT_MARKER, USER_INTERACTION_MARKER, WireMessage, WireRole, to_wire, user_content,
};
