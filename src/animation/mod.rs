//! Scroll animation: easing curves and the pure per-frame scroll function.

/// Easing curves applied to scroll progress.
pub mod ease;
/// Scroll timing and the pure frame function.
pub mod scroll;
