use crate::block::Screen;
use serde::Serialize;

/// Progress of the current turn.
///
/// `Idle -> Loading -> Streaming -> Complete | Error`. `Streaming` is purely
/// observational and is never parsed. It carries only the newest chunk;
/// concatenating the chunks of a turn in order gives the partial text.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    Idle,
    Loading,
    Streaming {
        chunk: String,
        /// Bytes of generation text received so far, this chunk included.
        received: usize,
    },
    Complete { screen: Screen },
    Error { message: String },
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Loading => "loading",
            SessionState::Streaming { .. } => "streaming",
            SessionState::Complete { .. } => "complete",
            SessionState::Error { .. } => "error",
        }
    }

    /// A generation is in flight.
    pub fn is_busy(&self) -> bool {
        matches!(self, SessionState::Loading | SessionState::Streaming { .. })
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Complete { .. } | SessionState::Error { .. })
    }
}
