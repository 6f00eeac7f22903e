//! Record of what the parser threw away.

use serde::Serialize;
use thiserror::Error;

/// Why a block was left out of the parsed tree.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "field", rename_all = "snake_case")]
pub enum DropReason {
    #[error("entry is not an object")]
    NotAnObject,
    #[error("missing type discriminator")]
    MissingType,
    #[error("unknown block type")]
    UnknownType,
    #[error("missing required field '{0}'")]
    MissingField(&'static str),
    #[error("field '{0}' has the wrong type or an invalid value")]
    InvalidField(&'static str),
    #[error("block type is not allowed in this position")]
    NotAllowedHere,
}

/// One block the parser dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DroppedBlock {
    /// Location in the input, e.g. `blocks[0].children[2]`.
    pub path: String,
    /// The declared `type`, when there was a string one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_type: Option<String>,
    pub reason: DropReason,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseReport {
    pub dropped: Vec<DroppedBlock>,
}

impl ParseReport {
    pub fn is_clean(&self) -> bool {
        self.dropped.is_empty()
    }

    pub(crate) fn drop_block(&mut self, path: &str, block_type: Option<&str>, reason: DropReason) {
        tracing::debug!(path, block_type, %reason, "dropping block");
        self.dropped.push(DroppedBlock {
            path: path.to_string(),
            block_type: block_type.map(str::to_string),
            reason,
        });
    }
}
