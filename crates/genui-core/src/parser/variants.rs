//! One constructor per block kind.
//!
//! Each returns `Err` as soon as a required field fails; optional fields are
//! resolved independently of one another.

use super::fields::Fields;
use super::report::{DropReason, ParseReport};
use super::{parse_block, parse_children};
use crate::block::{
    Alignment, AvatarBlock, AvatarSize, BadgeBlock, Block, ButtonBlock, ButtonVariant,
    CardBlock, CheckboxBlock, ChipBlock, ChipVariant, ColumnBlock, DividerBlock, FabBlock,
    FabPosition, FabSize, HeroBlock, IconButtonBlock, IconButtonVariant, ImageBlock,
    KeyboardType, ListBlock, ListItem, ProgressBlock, ProgressVariant, RowBlock, SliderBlock,
    SpacerBlock, Style, SwitchBlock, TextBlock, TextFieldBlock, TextVariant,
};
use serde_json::Value;

const DEFAULT_SPACING: f64 = 8.0;
const DEFAULT_SPACER_HEIGHT: f64 = 16.0;

type Built<T> = Result<T, DropReason>;

pub(super) fn style(f: &Fields) -> Style {
    Style {
        emphasis: f.token("emphasis"),
        surface: f.token("surface"),
        motion: f.token("motion"),
    }
}

pub(super) fn hero(f: &Fields) -> Built<HeroBlock> {
    Ok(HeroBlock {
        headline: f.required_str("headline")?,
        subhead: f.str("subhead"),
        eyebrow: f.str("eyebrow"),
        image_url: f.str("imageUrl"),
        alignment: f.token("alignment"),
        style: style(f),
    })
}

pub(super) fn card(f: &Fields, path: &str, report: &mut ParseReport) -> Built<CardBlock> {
    let body = match f.get("body") {
        Some(Value::Array(items)) => parse_children(items, &format!("{path}.body"), report),
        Some(single @ Value::Object(_)) => parse_block(single, &format!("{path}.body"), report)
            .into_iter()
            .collect(),
        _ => Vec::new(),
    };

    let actions = match f.get("actions") {
        Some(Value::Array(items)) => card_actions(items, path, report),
        _ => Vec::new(),
    };

    Ok(CardBlock {
        title: f.str("title"),
        subtitle: f.str("subtitle"),
        body,
        actions,
        variant: f.token("variant"),
        style: style(f),
    })
}

/// Card actions hold buttons only; any other valid block is discarded.
fn card_actions(items: &[Value], path: &str, report: &mut ParseReport) -> Vec<ButtonBlock> {
    let mut buttons = Vec::new();
    for (index, item) in items.iter().enumerate() {
        let item_path = format!("{path}.actions[{index}]");
        match parse_block(item, &item_path, report) {
            Some(Block::Button(b)) => buttons.push(b),
            Some(other) => {
                report.drop_block(&item_path, Some(other.type_tag()), DropReason::NotAllowedHere)
            }
            None => {}
        }
    }
    buttons
}

pub(super) fn text(f: &Fields) -> Built<TextBlock> {
    Ok(TextBlock {
        text: f.required_str("text")?,
        variant: f.token_or("variant", TextVariant::Body),
        alignment: f.token("alignment"),
        style: style(f),
    })
}

/// Items without a usable `title` are skipped; the list itself survives.
pub(super) fn list(f: &Fields) -> Built<ListBlock> {
    let raw_items = f.required_array("items")?;
    let items = raw_items
        .iter()
        .filter_map(|item| match item {
            Value::Object(map) => list_item(&Fields::new(map)),
            _ => None,
        })
        .collect();

    Ok(ListBlock {
        items,
        dense: f.bool_or("dense", false),
        style: style(f),
    })
}

fn list_item(f: &Fields) -> Option<ListItem> {
    Some(ListItem {
        title: f.required_str("title").ok()?,
        subtitle: f.str("subtitle"),
        leading_icon: f.str("leadingIcon"),
        trailing_text: f.str("trailingText"),
        action: f.action("action"),
    })
}

pub(super) fn button(f: &Fields) -> Built<ButtonBlock> {
    Ok(ButtonBlock {
        label: f.required_str("label")?,
        action: f.action_or_empty("action"),
        variant: f.token_or("variant", ButtonVariant::Filled),
        role: f.token("role"),
        icon: f.str("icon"),
        enabled: f.bool_or("enabled", true),
        style: style(f),
    })
}

pub(super) fn checkbox(f: &Fields) -> Built<CheckboxBlock> {
    Ok(CheckboxBlock {
        label: f.required_str("label")?,
        id: f.str("id"),
        checked: f.bool_or("checked", false),
        action: f.action_or_empty("action"),
        style: style(f),
    })
}

pub(super) fn switch(f: &Fields) -> Built<SwitchBlock> {
    Ok(SwitchBlock {
        label: f.required_str("label")?,
        id: f.str("id"),
        checked: f.bool_or("checked", false),
        action: f.action_or_empty("action"),
        style: style(f),
    })
}

pub(super) fn chip(f: &Fields) -> Built<ChipBlock> {
    Ok(ChipBlock {
        label: f.required_str("label")?,
        selected: f.bool_or("selected", false),
        variant: f.token_or("variant", ChipVariant::Assist),
        icon: f.str("icon"),
        action: f.action_or_empty("action"),
        style: style(f),
    })
}

pub(super) fn progress(f: &Fields) -> Built<ProgressBlock> {
    Ok(ProgressBlock {
        value: f.number("value").map(|v| v.clamp(0.0, 1.0)),
        label: f.str("label"),
        variant: f.token_or("variant", ProgressVariant::Linear),
        style: style(f),
    })
}

pub(super) fn divider(f: &Fields) -> Built<DividerBlock> {
    Ok(DividerBlock {
        inset: f.bool_or("inset", false),
        style: style(f),
    })
}

pub(super) fn icon_button(f: &Fields) -> Built<IconButtonBlock> {
    Ok(IconButtonBlock {
        icon: f.required_str("icon")?,
        content_description: f.str("contentDescription"),
        variant: f.token_or("variant", IconButtonVariant::Standard),
        action: f.action_or_empty("action"),
        style: style(f),
    })
}

pub(super) fn fab(f: &Fields) -> Built<FabBlock> {
    Ok(FabBlock {
        icon: f.required_str("icon")?,
        label: f.str("label"),
        size: f.token_or("size", FabSize::Regular),
        position: f.token_or("position", FabPosition::End),
        action: f.action_or_empty("action"),
        style: style(f),
    })
}

pub(super) fn text_field(f: &Fields) -> Built<TextFieldBlock> {
    Ok(TextFieldBlock {
        label: f.required_str("label")?,
        id: f.str("id"),
        placeholder: f.str("placeholder"),
        value: f.str_or("value", ""),
        multiline: f.bool_or("multiline", false),
        keyboard: f.token_or("keyboard", KeyboardType::Text),
        action: f.action_or_empty("action"),
        style: style(f),
    })
}

pub(super) fn slider(f: &Fields) -> Built<SliderBlock> {
    let raw = f.required_number("value")?;
    let min = f.number_or("min", 0.0);
    let max = f.number_or("max", 1.0);
    let value = if min < max { raw.clamp(min, max) } else { raw };

    Ok(SliderBlock {
        value,
        id: f.str("id"),
        label: f.str("label"),
        min,
        max,
        steps: f.count_or("steps", 0),
        action: f.action_or_empty("action"),
        style: style(f),
    })
}

/// Numeric labels are common ("3 new") so they are rendered as text.
pub(super) fn badge(f: &Fields) -> Built<BadgeBlock> {
    let label = match f.get("label") {
        Some(Value::Number(n)) => n.to_string(),
        _ => f.required_str("label")?,
    };

    Ok(BadgeBlock {
        label,
        style: style(f),
    })
}

pub(super) fn image(f: &Fields) -> Built<ImageBlock> {
    Ok(ImageBlock {
        url: f.required_str("url")?,
        content_description: f.str("contentDescription"),
        aspect_ratio: f.number("aspectRatio").filter(|ratio| *ratio > 0.0),
        style: style(f),
    })
}

pub(super) fn avatar(f: &Fields) -> Built<AvatarBlock> {
    let initials = f.str("initials");
    let image_url = f.str("imageUrl");
    if initials.is_none() && image_url.is_none() {
        return Err(DropReason::MissingField("initials"));
    }

    Ok(AvatarBlock {
        initials,
        image_url,
        name: f.str("name"),
        size: f.token_or("size", AvatarSize::Medium),
        style: style(f),
    })
}

pub(super) fn row(f: &Fields, path: &str, report: &mut ParseReport) -> Built<RowBlock> {
    Ok(RowBlock {
        children: children(f, path, report),
        arrangement: f.token("arrangement"),
        spacing: f.number_or("spacing", DEFAULT_SPACING),
        style: style(f),
    })
}

pub(super) fn column(f: &Fields, path: &str, report: &mut ParseReport) -> Built<ColumnBlock> {
    Ok(ColumnBlock {
        children: children(f, path, report),
        alignment: f.token::<Alignment>("alignment"),
        spacing: f.number_or("spacing", DEFAULT_SPACING),
        style: style(f),
    })
}

pub(super) fn spacer(f: &Fields) -> Built<SpacerBlock> {
    Ok(SpacerBlock {
        height: f.number_or("height", DEFAULT_SPACER_HEIGHT),
        style: style(f),
    })
}

fn children(f: &Fields, path: &str, report: &mut ParseReport) -> Vec<Block> {
    match f.get("children") {
        Some(Value::Array(items)) => parse_children(items, &format!("{path}.children"), report),
        _ => Vec::new(),
    }
}
