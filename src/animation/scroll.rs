use crate::animation::ease::Ease;
use crate::foundation::color::Rgba8;
use crate::foundation::core::{Canvas, FrameIndex, Fps};
use crate::foundation::error::{ReelError, ReelResult};
use crate::layout::plan::RenderPlan;
use crate::render::frame::{ContentCanvas, FrameRGBA};

/// Where the content rests during the pre-roll pause.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollConvention {
    /// Content top aligned with the screen top; the first title sits mid-screen thanks to the
    /// half-screen top pad.
    #[default]
    TopAnchored,
    /// First block held just below the bottom edge, then rises into view.
    RiseFromBelow,
}

/// Immutable timing and geometry of one scroll loop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationSpec {
    /// Seconds per loop.
    pub duration_per_loop: f64,
    /// How many times the loop repeats in the output.
    pub loop_count: u32,
    /// Seconds the content rests before scrolling starts.
    pub pause_before_scroll: f64,
    /// Pixels travelled over the un-paused span: `max(0, image_height - screen_height)`.
    pub scroll_distance: u32,
    /// Easing applied to scroll progress.
    pub easing: Ease,
    /// Resting-position convention.
    pub convention: ScrollConvention,
    /// Content row shown at the top screen row while resting. Negative rows are background.
    pub start_offset: f64,
}

impl AnimationSpec {
    /// Derive a spec for `plan` shown on a `screen`-sized viewport.
    pub fn for_plan(
        plan: &RenderPlan,
        screen: Canvas,
        duration_per_loop: f64,
        loop_count: u32,
        pause_before_scroll: f64,
        easing: Ease,
        convention: ScrollConvention,
    ) -> ReelResult<Self> {
        let scroll_distance = plan.scroll_distance(screen.height);
        let start_offset = match convention {
            _ if scroll_distance == 0 => 0.0,
            ScrollConvention::TopAnchored => 0.0,
            ScrollConvention::RiseFromBelow => {
                f64::from(plan.top_pad) - f64::from(screen.height)
            }
        };
        let spec = Self {
            duration_per_loop,
            loop_count,
            pause_before_scroll,
            scroll_distance,
            easing,
            convention,
            start_offset,
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Check timing values.
    pub fn validate(&self) -> ReelResult<()> {
        if !self.duration_per_loop.is_finite() || self.duration_per_loop <= 0.0 {
            return Err(ReelError::validation("loop duration must be finite and > 0"));
        }
        if self.loop_count == 0 {
            return Err(ReelError::validation("loop count must be >= 1"));
        }
        if !self.pause_before_scroll.is_finite()
            || self.pause_before_scroll < 0.0
            || self.pause_before_scroll >= self.duration_per_loop
        {
            return Err(ReelError::validation(
                "pause before scroll must be in [0, loop duration)",
            ));
        }
        Ok(())
    }

    /// Total output duration in seconds.
    pub fn total_duration(&self) -> f64 {
        self.duration_per_loop * f64::from(self.loop_count)
    }

    /// Content row at the top of the screen `loop_t` seconds into a loop.
    pub fn offset_at(&self, loop_t: f64) -> f64 {
        if self.scroll_distance == 0 || loop_t < self.pause_before_scroll {
            return self.start_offset;
        }
        let span = self.duration_per_loop - self.pause_before_scroll;
        let progress = ((loop_t - self.pause_before_scroll) / span).clamp(0.0, 1.0);
        self.start_offset + self.easing.apply(progress) * f64::from(self.scroll_distance)
    }
}

/// Pure frame function over a rendered content canvas.
///
/// Holds no mutable state, so frames may be produced in any order and from several threads.
#[derive(Clone, Debug)]
pub struct ScrollAnimator {
    spec: AnimationSpec,
    content: ContentCanvas,
    screen: Canvas,
    background: Rgba8,
    fps: Fps,
}

impl ScrollAnimator {
    /// Build an animator. `content` must be as wide as the screen.
    pub fn new(
        spec: AnimationSpec,
        content: ContentCanvas,
        screen: Canvas,
        background: Rgba8,
        fps: Fps,
    ) -> ReelResult<Self> {
        spec.validate()?;
        if screen.width == 0 || screen.height == 0 {
            return Err(ReelError::validation("screen width/height must be non-zero"));
        }
        if content.width != screen.width {
            return Err(ReelError::validation(format!(
                "content width {} does not match screen width {}",
                content.width, screen.width
            )));
        }
        Ok(Self {
            spec,
            content,
            screen,
            background,
            fps,
        })
    }

    /// The animation spec.
    pub fn spec(&self) -> &AnimationSpec {
        &self.spec
    }

    /// Output frame rate.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Output frame size.
    pub fn screen(&self) -> Canvas {
        self.screen
    }

    /// Whole frames in one loop.
    pub fn frames_per_loop(&self) -> u64 {
        self.fps
            .secs_to_frames_round(self.spec.duration_per_loop)
            .max(1)
    }

    /// Whole frames in the full output.
    pub fn total_frames(&self) -> u64 {
        self.frames_per_loop() * u64::from(self.spec.loop_count)
    }

    /// Frame at `t` seconds from the start of the output.
    pub fn frame_at(&self, t: f64) -> FrameRGBA {
        let loop_t = t.rem_euclid(self.spec.duration_per_loop);
        self.compose(self.spec.offset_at(loop_t))
    }

    /// Frame at an absolute output frame index. Every loop maps to the same loop-relative time,
    /// so frame `i` and frame `i + frames_per_loop()` are identical.
    pub fn frame_at_index(&self, idx: FrameIndex) -> FrameRGBA {
        let loop_frame = idx.0 % self.frames_per_loop();
        let loop_t = self.fps.frames_to_secs(loop_frame);
        self.compose(self.spec.offset_at(loop_t))
    }

    fn compose(&self, offset: f64) -> FrameRGBA {
        let mut frame = FrameRGBA::filled(self.screen, self.background);
        let offset = offset.round() as i64;
        let stride = self.screen.width as usize * 4;

        for screen_y in 0..self.screen.height {
            let content_y = i64::from(screen_y) + offset;
            if content_y < 0 || content_y >= i64::from(self.content.height) {
                continue;
            }
            let src = self.content.row(content_y as u32);
            let start = screen_y as usize * stride;
            frame.data[start..start + stride].copy_from_slice(src);
        }
        frame
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/scroll.rs"]
mod tests;
