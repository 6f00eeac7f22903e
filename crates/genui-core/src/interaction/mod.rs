//! Interaction event codec.
//!
//! - `event`: [`InteractionEvent`], the normalized form sent back to the model
//! - `action`: [`UiAction`], the raw payload a renderer emits for a widget

mod action;
mod event;

pub use action::{MODEL_ACTION_TYPE_KEY, UiAction};
pub use event::{InteractionEvent, InteractionKind, UNKNOWN_EVENT_TYPE};
