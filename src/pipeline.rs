//! The concrete generation chain: fetch, normalize, lay out, rasterize, animate, encode.

use std::path::Path;

use chrono::{DateTime, Utc};

use crate::animation::scroll::{AnimationSpec, ScrollAnimator};
use crate::audio::track::prepare_loop_audio;
use crate::config::ReelConfig;
use crate::encode::stream::{EncodeStats, EncodeThreading, encode_video};
use crate::fetch::{Fetcher, fetcher_for};
use crate::foundation::error::{ReelError, ReelResult};
use crate::layout::plan::{RenderPlan, layout};
use crate::render::raster::{CpuRasterizer, Rasterizer};
use crate::schedule::normalize::{Normalized, normalize};
use crate::schedule::source::source_for;
use crate::scheduler::cycle::Pipeline;

/// Parse a fetched body with the configured adapter and normalize it against `now`.
pub fn build_schedule(
    config: &ReelConfig,
    body: &[u8],
    now: DateTime<Utc>,
) -> ReelResult<Normalized> {
    let source = source_for(config.source.format)?;
    let raw = source.parse(body)?;
    tracing::debug!(
        adapter = source.name(),
        records = raw.record_count(),
        "parsed schedule document"
    );
    let opts = config.normalize_options();
    Ok(normalize(&raw, now.with_timezone(&opts.time_zone), &opts))
}

/// Lay out `normalized`, rasterize it and wrap the result in an animator.
pub fn build_animator(
    config: &ReelConfig,
    normalized: &Normalized,
) -> ReelResult<(RenderPlan, ScrollAnimator)> {
    let screen = config.screen();
    let plan = layout(&normalized.groups, &config.style, screen);

    let font_path = config
        .video
        .font_path
        .as_deref()
        .ok_or_else(|| ReelError::validation("video.font_path is required to render"))?;
    let mut rasterizer = CpuRasterizer::from_font_path(font_path, config.video.background)?;
    let content = rasterizer.rasterize(&plan)?;

    let v = &config.video;
    let spec = AnimationSpec::for_plan(
        &plan,
        screen,
        v.loop_duration_secs,
        v.loop_count,
        v.pause_before_scroll_secs,
        v.easing,
        v.scroll_convention,
    )?;
    tracing::info!(
        blocks = plan.blocks.len(),
        content_height = plan.image_height,
        scroll_distance = spec.scroll_distance,
        "laid out schedule"
    );
    let animator = ScrollAnimator::new(spec, content, screen, v.background, config.fps()?)?;
    Ok((plan, animator))
}

/// Encode `animator` (plus the configured background track) into `out_path`.
pub fn encode_to(
    config: &ReelConfig,
    animator: &ScrollAnimator,
    out_path: &Path,
) -> ReelResult<EncodeStats> {
    let audio = config
        .video
        .audio_path
        .as_deref()
        .and_then(|p| prepare_loop_audio(p, animator.frames_per_loop(), animator.fps()));
    let threading = EncodeThreading {
        chunk_size: config.video.chunk_size,
        threads: config.video.threads,
    };
    encode_video(
        animator,
        out_path,
        config.video.loop_strategy,
        audio.as_ref(),
        config.video.background,
        &threading,
    )
}

/// [`Pipeline`] driven by a [`ReelConfig`].
pub struct SchedulePipeline {
    config: ReelConfig,
    fetcher: Box<dyn Fetcher>,
}

impl SchedulePipeline {
    /// Validate `config` and pick the fetcher for its source URL.
    pub fn new(config: ReelConfig) -> ReelResult<Self> {
        config.validate()?;
        let fetcher = fetcher_for(&config.source.url);
        Ok(Self { config, fetcher })
    }

    /// Use a specific fetcher instead of the one implied by the URL.
    pub fn with_fetcher(config: ReelConfig, fetcher: Box<dyn Fetcher>) -> ReelResult<Self> {
        config.validate()?;
        Ok(Self { config, fetcher })
    }

    /// The configuration in use.
    pub fn config(&self) -> &ReelConfig {
        &self.config
    }
}

impl Pipeline for SchedulePipeline {
    fn fetch(&mut self) -> ReelResult<Vec<u8>> {
        self.fetcher.fetch(&self.config.fetch_request())
    }

    #[tracing::instrument(skip(self, body), fields(bytes = body.len()))]
    fn render(&mut self, body: &[u8], now: DateTime<Utc>, staging: &Path) -> ReelResult<()> {
        let normalized = build_schedule(&self.config, body, now)?;
        let (_, animator) = build_animator(&self.config, &normalized)?;
        let stats = encode_to(&self.config, &animator, staging)?;
        tracing::info!(
            events = normalized.groups.event_count(),
            categories = normalized.groups.len(),
            frames = stats.frames_total,
            audio = stats.audio,
            staging = %staging.display(),
            "staged schedule video"
        );
        Ok(())
    }
}
