//! Content rasterization: text shaping and CPU drawing of a [`crate::layout::plan::RenderPlan`].

/// Frame and content pixel buffers.
pub mod frame;
/// CPU rasterizer for render plans.
pub mod raster;
/// Single-line text shaping.
pub mod text;
