use std::path::Path;

use crate::foundation::color::Rgba8;
use crate::foundation::error::{ReelError, ReelResult};
use crate::layout::plan::{RenderPlan, block_height};
use crate::render::frame::ContentCanvas;
use crate::render::text::{TextBrushRgba8, TextLayoutEngine};

/// Rows rendered per vello_cpu pass; keeps each pass inside the `u16` surface limit.
const STRIP_ROWS: u32 = 1024;

/// Turns a [`RenderPlan`] into pixels.
pub trait Rasterizer {
    /// Draw every block of `plan` onto a background-filled content canvas.
    fn rasterize(&mut self, plan: &RenderPlan) -> ReelResult<ContentCanvas>;
}

/// CPU rasterizer: Parley shaping, vello_cpu glyph filling.
pub struct CpuRasterizer {
    engine: TextLayoutEngine,
    background: Rgba8,
}

struct ShapedBlock {
    layout: parley::Layout<TextBrushRgba8>,
    x: f64,
    y: u32,
    cull_top: u32,
    cull_bottom: u32,
}

impl CpuRasterizer {
    /// Rasterizer drawing with the font at `font_path`.
    pub fn from_font_path(font_path: &Path, background: Rgba8) -> ReelResult<Self> {
        Ok(Self::new(TextLayoutEngine::from_font_path(font_path)?, background))
    }

    /// Rasterizer drawing with an already loaded font.
    pub fn new(engine: TextLayoutEngine, background: Rgba8) -> Self {
        Self { engine, background }
    }

    fn shape(&mut self, plan: &RenderPlan) -> ReelResult<Vec<ShapedBlock>> {
        let mut shaped = Vec::new();
        for placed in &plan.blocks {
            let (Some(text), Some(style)) = (placed.block.text(), plan.text_style(&placed.block))
            else {
                continue;
            };
            let layout = self
                .engine
                .layout_line(text, style.size_px as f32, style.color.into())?;
            // Descenders and accents can leave the nominal box; cull with one line of slack.
            let height = block_height(&placed.block, &plan.style);
            shaped.push(ShapedBlock {
                layout,
                x: f64::from(plan.text_x(&placed.block)),
                y: placed.y,
                cull_top: placed.y.saturating_sub(style.size_px),
                cull_bottom: placed.y + height + style.size_px,
            });
        }
        Ok(shaped)
    }

    fn draw_strip(
        &self,
        shaped: &[ShapedBlock],
        width: u16,
        strip_y: u32,
        strip_h: u16,
    ) -> vello_cpu::Pixmap {
        let mut ctx = vello_cpu::RenderContext::new(width, strip_h);
        let bg = self.background;
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(bg.r, bg.g, bg.b, bg.a));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(width),
            f64::from(strip_h),
        ));

        let strip_end = strip_y + u32::from(strip_h);
        for block in shaped
            .iter()
            .filter(|b| b.cull_bottom > strip_y && b.cull_top < strip_end)
        {
            let origin_y = f64::from(block.y) - f64::from(strip_y);
            ctx.set_transform(vello_cpu::kurbo::Affine::translate((block.x, origin_y)));
            for line in block.layout.lines() {
                for item in line.items() {
                    let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                        continue;
                    };
                    let brush = run.style().brush;
                    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                        brush.r, brush.g, brush.b, brush.a,
                    ));
                    let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    });
                    ctx.glyph_run(self.engine.font())
                        .font_size(run.run().font_size())
                        .fill_glyphs(glyphs);
                }
            }
        }

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(width, strip_h);
        ctx.render_to_pixmap(&mut pixmap);
        pixmap
    }
}

impl Rasterizer for CpuRasterizer {
    #[tracing::instrument(skip_all, fields(width = plan.image_width, height = plan.image_height))]
    fn rasterize(&mut self, plan: &RenderPlan) -> ReelResult<ContentCanvas> {
        let width = u16::try_from(plan.image_width)
            .ok()
            .filter(|w| *w > 0)
            .ok_or_else(|| {
                ReelError::render(format!(
                    "content width {} must be in 1..={}",
                    plan.image_width,
                    u16::MAX
                ))
            })?;
        if plan.image_height == 0 {
            return Err(ReelError::render("content height must be non-zero"));
        }

        let shaped = self.shape(plan)?;
        let stride = plan.image_width as usize * 4;
        let mut data = vec![0u8; stride * plan.image_height as usize];

        let mut strip_y = 0u32;
        while strip_y < plan.image_height {
            let rows = (plan.image_height - strip_y).min(STRIP_ROWS);
            // `rows <= STRIP_ROWS`, which fits in u16.
            let pixmap = self.draw_strip(&shaped, width, strip_y, rows as u16);
            let start = strip_y as usize * stride;
            data[start..start + rows as usize * stride].copy_from_slice(pixmap.data_as_u8_slice());
            strip_y += rows;
        }

        tracing::debug!(text_blocks = shaped.len(), "rasterized schedule content");
        ContentCanvas::from_premul(plan.image_width, plan.image_height, data)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
