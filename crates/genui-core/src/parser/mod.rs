//! Validating parser: untrusted JSON in, closed typed tree out.
//!
//! A malformed block costs one widget, never the whole screen. Each variant
//! constructor yields a block or a [`DropReason`]; the container loop records
//! the reason and moves on. Only input that is not a screen object at all is
//! an error.

mod fields;
mod report;
mod variants;

pub use report::{DropReason, DroppedBlock, ParseReport};

use crate::block::{Block, BlockKind, Screen, Token, UNKNOWN_SCREEN_ID};
use crate::error::{GenUiError, Result};
use crate::extract::extract_json;
use fields::Fields;
use serde_json::Value;

/// Parses a screen object, discarding the drop report.
///
/// # Errors
///
/// Returns `InvalidFormat` when `json` is not an object or its `blocks`
/// field is missing or not an array.
pub fn parse_screen(json: &Value) -> Result<Screen> {
    parse_screen_with_report(json).map(|(screen, _)| screen)
}

/// Parses a screen object and reports every block that was dropped.
pub fn parse_screen_with_report(json: &Value) -> Result<(Screen, ParseReport)> {
    let Value::Object(map) = json else {
        return Err(GenUiError::invalid_format(format!(
            "expected a JSON object at the top level, found {}",
            describe(json)
        )));
    };
    let f = Fields::new(map);

    let raw_blocks = match f.get("blocks") {
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(GenUiError::invalid_format(format!(
                "'blocks' must be an array, found {}",
                describe(other)
            )));
        }
        None => return Err(GenUiError::invalid_format("missing 'blocks' array")),
    };

    let mut report = ParseReport::default();
    let blocks = parse_children(raw_blocks, "blocks", &mut report);

    let screen = Screen {
        screen_id: f
            .str("screenId")
            .unwrap_or_else(|| UNKNOWN_SCREEN_ID.to_string()),
        role: f.token("role"),
        tone: f.token("tone"),
        motion_scheme: f.token("motionScheme"),
        color_mode: f.token("colorMode"),
        blocks,
    };

    if !report.is_clean() {
        tracing::debug!(
            screen_id = %screen.screen_id,
            kept = screen.blocks.len(),
            dropped = report.dropped.len(),
            "parsed screen with dropped blocks"
        );
    }

    Ok((screen, report))
}

/// Parses screen JSON text.
///
/// # Errors
///
/// Returns `InvalidJson` when `text` is not JSON, otherwise as
/// [`parse_screen`].
pub fn parse_screen_text(text: &str) -> Result<Screen> {
    let json: Value = serde_json::from_str(text.trim())
        .map_err(|err| GenUiError::invalid_json(err.to_string()))?;
    parse_screen(&json)
}

/// Runs the extractor over raw generation text, then parses the candidate.
///
/// This is the whole path from a finished model reply to a screen. Prose,
/// fences and trailing chatter are tolerated; text with no JSON object in it
/// fails with `InvalidJson`.
pub fn parse_generation(text: &str) -> Result<(Screen, ParseReport)> {
    let candidate = extract_json(text);
    let json: Value = serde_json::from_str(candidate.trim())
        .map_err(|err| GenUiError::invalid_json(err.to_string()))?;
    parse_screen_with_report(&json)
}

/// Parses a single block, `None` when it fails validation.
pub fn parse_block(value: &Value, path: &str, report: &mut ParseReport) -> Option<Block> {
    let Value::Object(map) = value else {
        report.drop_block(path, None, DropReason::NotAnObject);
        return None;
    };
    let f = Fields::new(map);

    let Some(Value::String(tag)) = f.get("type") else {
        report.drop_block(path, None, DropReason::MissingType);
        return None;
    };
    let Some(kind) = BlockKind::parse(tag) else {
        report.drop_block(path, Some(tag.as_str()), DropReason::UnknownType);
        return None;
    };

    let built = match kind {
        BlockKind::Hero => variants::hero(&f).map(Block::Hero),
        BlockKind::Card => variants::card(&f, path, report).map(Block::Card),
        BlockKind::Text => variants::text(&f).map(Block::Text),
        BlockKind::List => variants::list(&f).map(Block::List),
        BlockKind::Button => variants::button(&f).map(Block::Button),
        BlockKind::Checkbox => variants::checkbox(&f).map(Block::Checkbox),
        BlockKind::Switch => variants::switch(&f).map(Block::Switch),
        BlockKind::Chip => variants::chip(&f).map(Block::Chip),
        BlockKind::Progress => variants::progress(&f).map(Block::Progress),
        BlockKind::Divider => variants::divider(&f).map(Block::Divider),
        BlockKind::IconButton => variants::icon_button(&f).map(Block::IconButton),
        BlockKind::Fab => variants::fab(&f).map(Block::Fab),
        BlockKind::TextField => variants::text_field(&f).map(Block::TextField),
        BlockKind::Slider => variants::slider(&f).map(Block::Slider),
        BlockKind::Badge => variants::badge(&f).map(Block::Badge),
        BlockKind::Image => variants::image(&f).map(Block::Image),
        BlockKind::Avatar => variants::avatar(&f).map(Block::Avatar),
        BlockKind::Row => variants::row(&f, path, report).map(Block::Row),
        BlockKind::Column => variants::column(&f, path, report).map(Block::Column),
        BlockKind::Spacer => variants::spacer(&f).map(Block::Spacer),
    };

    match built {
        Ok(block) => Some(block),
        Err(reason) => {
            report.drop_block(path, Some(kind.as_str()), reason);
            None
        }
    }
}

/// Parses an array of blocks, keeping only the valid ones in order.
pub(crate) fn parse_children(items: &[Value], path: &str, report: &mut ParseReport) -> Vec<Block> {
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| parse_block(item, &format!("{path}[{index}]"), report))
        .collect()
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
