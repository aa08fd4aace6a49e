use crate::foundation::core::Canvas;
use crate::layout::blocks::{TextBlock, build_blocks};
use crate::layout::style::{LayoutStyle, TextStyle};
use crate::schedule::model::CategoryGroups;

/// A block with its resolved vertical offset in content space.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacedBlock {
    /// The block.
    pub block: TextBlock,
    /// Top edge of the block, in pixels from the top of the content image.
    pub y: u32,
}

/// Exact geometry of the tall content image.
///
/// `y` offsets are the running sum of preceding block heights plus `top_pad`; `image_height` is
/// `top_pad + sum(heights) + bottom_pad`. The width is fixed to the screen width and lines that do
/// not fit are clipped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderPlan {
    /// Content image width.
    pub image_width: u32,
    /// Content image height.
    pub image_height: u32,
    /// Blank space above the first block (half a screen).
    pub top_pad: u32,
    /// Blank space below the last block (one screen).
    pub bottom_pad: u32,
    /// Blocks in drawing order.
    pub blocks: Vec<PlacedBlock>,
    /// Style the plan was measured with; drawing must use the same one.
    pub style: LayoutStyle,
}

impl RenderPlan {
    /// Pixels the content must travel so its bottom edge reaches the bottom of the screen.
    pub fn scroll_distance(&self, screen_height: u32) -> u32 {
        self.image_height.saturating_sub(screen_height)
    }

    /// Text style for a block, `None` for spacers.
    pub fn text_style(&self, block: &TextBlock) -> Option<TextStyle> {
        text_style(block, &self.style)
    }

    /// Left edge for a block's text.
    pub fn text_x(&self, block: &TextBlock) -> u32 {
        match block {
            TextBlock::ChannelLine(_) => self.style.left_pad + self.style.channel_indent,
            _ => self.style.left_pad,
        }
    }
}

/// Height of a block. The single formula used both when measuring and when drawing.
pub fn block_height(block: &TextBlock, style: &LayoutStyle) -> u32 {
    match block {
        TextBlock::Spacer(h) => *h,
        _ => text_style(block, style).map_or(0, |s| s.size_px + style.line_spacing),
    }
}

fn text_style(block: &TextBlock, style: &LayoutStyle) -> Option<TextStyle> {
    match block {
        TextBlock::Title(_) => Some(style.title),
        TextBlock::EventLine(_) => Some(style.event),
        TextBlock::ChannelLine(_) => Some(style.channel),
        TextBlock::Spacer(_) => None,
    }
}

/// Build blocks for `groups` and place them for a `screen`-sized viewport.
pub fn layout(groups: &CategoryGroups, style: &LayoutStyle, screen: Canvas) -> RenderPlan {
    place_blocks(build_blocks(groups, style), style, screen)
}

/// Place already-built blocks. Deterministic, no I/O.
pub fn place_blocks(blocks: Vec<TextBlock>, style: &LayoutStyle, screen: Canvas) -> RenderPlan {
    let top_pad = screen.height / 2;
    let bottom_pad = screen.height;

    let mut y = top_pad;
    let placed = blocks
        .into_iter()
        .map(|block| {
            let at = y;
            y += block_height(&block, style);
            PlacedBlock { block, y: at }
        })
        .collect();

    RenderPlan {
        image_width: screen.width,
        image_height: y + bottom_pad,
        top_pad,
        bottom_pad,
        blocks: placed,
        style: *style,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/plan.rs"]
mod tests;
