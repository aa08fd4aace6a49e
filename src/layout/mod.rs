//! Schedule layout: typed text blocks and their pixel geometry.

/// Typed text blocks built from grouped events.
pub mod blocks;
/// Block placement and content geometry.
pub mod plan;
/// Per-variant text styles and spacing.
pub mod style;
