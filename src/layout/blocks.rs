use crate::layout::style::LayoutStyle;
use crate::schedule::model::CategoryGroups;

/// Title shown when no event survives normalization.
pub const PLACEHOLDER_TITLE: &str = "No upcoming events";

/// One vertical unit of the rendered schedule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TextBlock {
    /// Category heading.
    Title(String),
    /// `HH:MM title` line.
    EventLine(String),
    /// Comma-separated channel list in parentheses.
    ChannelLine(String),
    /// Blank vertical gap of the given height.
    Spacer(u32),
}

impl TextBlock {
    /// Text to draw, if this block draws any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Title(t) | Self::EventLine(t) | Self::ChannelLine(t) => Some(t),
            Self::Spacer(_) => None,
        }
    }
}

/// Flatten grouped events into blocks in one linear pass.
///
/// Per group: `Title`, then per event `EventLine`, optional `ChannelLine`, `Spacer(event_gap)`,
/// then `Spacer(category_gap)`. An empty schedule becomes a single placeholder title.
pub fn build_blocks(groups: &CategoryGroups, style: &LayoutStyle) -> Vec<TextBlock> {
    if groups.is_empty() {
        return vec![TextBlock::Title(PLACEHOLDER_TITLE.to_owned())];
    }

    let mut blocks = Vec::with_capacity(groups.len() * 2 + groups.event_count() * 3);
    for group in groups {
        blocks.push(TextBlock::Title(group.name.clone()));
        for event in &group.events {
            blocks.push(TextBlock::EventLine(format!(
                "{} {}",
                event.start.format("%H:%M"),
                event.title
            )));
            if !event.channels.is_empty() {
                blocks.push(TextBlock::ChannelLine(format!(
                    "({})",
                    event.channels.join(", ")
                )));
            }
            blocks.push(TextBlock::Spacer(style.event_gap));
        }
        blocks.push(TextBlock::Spacer(style.category_gap));
    }
    blocks
}

#[cfg(test)]
#[path = "../../tests/unit/layout/blocks.rs"]
mod tests;
