use crate::foundation::color::Rgba8;
use crate::foundation::core::Canvas;
use crate::foundation::error::{ReelError, ReelResult};

/// A screen-sized rendered frame as RGBA8 pixels.
///
/// Frames are **premultiplied alpha**; the `premultiplied` flag makes this explicit at API
/// boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// A frame filled with one colour.
    pub fn filled(canvas: Canvas, color: Rgba8) -> Self {
        Self {
            width: canvas.width,
            height: canvas.height,
            data: color.to_premul_bytes().repeat(canvas.width as usize * canvas.height as usize),
            premultiplied: true,
        }
    }

    /// Straight-alpha copy of the pixel data, suitable for PNG output of opaque frames.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if !self.premultiplied {
            return out;
        }
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}

/// The full-height rendered schedule, one screen wide.
///
/// Pixels are premultiplied RGBA8 and fully opaque: the rasterizer paints the background colour
/// under every row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentCanvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Premultiplied RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl ContentCanvas {
    /// Wrap existing premultiplied pixel data.
    pub fn from_premul(width: u32, height: u32, data: Vec<u8>) -> ReelResult<Self> {
        if data.len() != (Canvas { width, height }).rgba_len() {
            return Err(ReelError::render(format!(
                "content buffer has {} bytes, expected {}x{}x4",
                data.len(),
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// One row of pixels.
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.width as usize * 4;
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
