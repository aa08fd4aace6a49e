use crate::foundation::color::Rgba8;

/// Font size and colour for one text variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TextStyle {
    /// Nominal font size in pixels; also the line's ascent+descent for height purposes.
    pub size_px: u32,
    /// Fill colour.
    pub color: Rgba8,
}

/// Presentation parameters for the schedule layout.
///
/// Titles are larger and brighter than event lines; channel lines are smaller and dimmer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayoutStyle {
    /// Category title style.
    pub title: TextStyle,
    /// Event line style.
    pub event: TextStyle,
    /// Channel line style.
    pub channel: TextStyle,
    /// Extra vertical space added below every text line.
    pub line_spacing: u32,
    /// Spacer height after each event.
    pub event_gap: u32,
    /// Spacer height after each category.
    pub category_gap: u32,
    /// Left margin for all text.
    pub left_pad: u32,
    /// Additional left indent for channel lines.
    pub channel_indent: u32,
}

impl Default for LayoutStyle {
    fn default() -> Self {
        Self {
            title: TextStyle {
                size_px: 80,
                color: Rgba8::rgb(255, 255, 0),
            },
            event: TextStyle {
                size_px: 30,
                color: Rgba8::rgb(255, 255, 255),
            },
            channel: TextStyle {
                size_px: 15,
                color: Rgba8::rgb(160, 160, 160),
            },
            line_spacing: 20,
            event_gap: 20,
            category_gap: 56,
            left_pad: 40,
            channel_indent: 24,
        }
    }
}
