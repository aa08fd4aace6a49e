//! Reel configuration: one JSON document, defaulted field by field, validated once and then
//! passed around immutably.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::TimeDelta;
use chrono_tz::Tz;

use crate::animation::ease::Ease;
use crate::animation::scroll::ScrollConvention;
use crate::encode::stream::LoopStrategy;
use crate::fetch::FetchRequest;
use crate::foundation::color::Rgba8;
use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{ReelError, ReelResult};
use crate::layout::style::LayoutStyle;
use crate::schedule::normalize::NormalizeOptions;
use crate::schedule::source::SourceFormat;
use crate::scheduler::cycle::SchedulerOptions;
use crate::scheduler::trigger::TriggerPolicy;

const DEFAULT_URL: &str = "https://dlhd.dad/";

/// Where and how the schedule is fetched.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// `http(s)://` URL, `file://` URL or local path.
    pub url: String,
    /// `Referer` header; omitted when `None`.
    pub referer: Option<String>,
    /// `User-Agent` header.
    pub user_agent: String,
    /// Request timeout.
    pub timeout_secs: u64,
    /// Document format.
    pub format: SourceFormat,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            referer: Some(DEFAULT_URL.to_string()),
            user_agent: "schedule-generator/1.0".to_string(),
            timeout_secs: 20,
            format: SourceFormat::Html,
        }
    }
}

/// Published and staging file locations.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// The file consumers read.
    pub published_path: PathBuf,
    /// The file each cycle writes before publishing.
    pub staging_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            published_path: PathBuf::from("output/schedule.mp4"),
            staging_path: PathBuf::from("output/schedule_staging.mp4"),
        }
    }
}

/// Video geometry, timing and assets.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    /// Frame width; even.
    pub width: u32,
    /// Frame height; even.
    pub height: u32,
    /// Frames per second.
    pub fps: u32,
    /// Seconds per scroll loop.
    pub loop_duration_secs: f64,
    /// Loops per output file.
    pub loop_count: u32,
    /// Seconds of rest before each loop's scroll.
    pub pause_before_scroll_secs: f64,
    /// Scroll easing.
    pub easing: Ease,
    /// Resting position of the content.
    pub scroll_convention: ScrollConvention,
    /// How loops are assembled.
    pub loop_strategy: LoopStrategy,
    /// Background colour.
    pub background: Rgba8,
    /// TrueType/OpenType font used for every line.
    pub font_path: Option<PathBuf>,
    /// Optional background music.
    pub audio_path: Option<PathBuf>,
    /// Frames generated per parallel batch.
    pub chunk_size: usize,
    /// Worker threads for frame generation; all cores when `None`.
    pub threads: Option<usize>,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fps: 24,
            loop_duration_secs: 120.0,
            loop_count: 3,
            pause_before_scroll_secs: 1.0,
            easing: Ease::Cosine,
            scroll_convention: ScrollConvention::TopAnchored,
            loop_strategy: LoopStrategy::Concat,
            background: Rgba8::rgb(0, 0, 0),
            font_path: None,
            audio_path: None,
            chunk_size: 48,
            threads: None,
        }
    }
}

/// Time zone and retention used by the normalizer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// IANA zone all times are read in.
    pub time_zone: Tz,
    /// Hours an event stays listed after it starts.
    pub retention_hours: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            time_zone: chrono_tz::Europe::London,
            retention_hours: 3,
        }
    }
}

/// Complete configuration.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ReelConfig {
    /// Feed settings.
    pub source: SourceConfig,
    /// File locations.
    pub output: OutputConfig,
    /// Video settings.
    pub video: VideoConfig,
    /// Normalizer settings.
    pub schedule: ScheduleConfig,
    /// Fonts, colours and spacing.
    pub style: LayoutStyle,
    /// When cycles run.
    pub trigger: TriggerPolicy,
}

impl ReelConfig {
    /// Parse configuration JSON.
    pub fn from_json_str(json: &str) -> ReelResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| ReelError::validation(format!("parse config JSON: {e}")))
    }

    /// Parse a configuration file from disk.
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ReelError::validation(format!("open config '{}': {e}", path.display()))
        })?;
        serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            ReelError::validation(format!("parse config '{}': {e}", path.display()))
        })
    }

    /// Check every cross-field constraint.
    pub fn validate(&self) -> ReelResult<()> {
        let v = &self.video;
        if self.source.url.trim().is_empty() {
            return Err(ReelError::validation("source.url must not be empty"));
        }
        if self.source.timeout_secs == 0 {
            return Err(ReelError::validation("source.timeout_secs must be > 0"));
        }
        if v.width == 0 || v.height == 0 {
            return Err(ReelError::validation("video width/height must be non-zero"));
        }
        if !v.width.is_multiple_of(2) || !v.height.is_multiple_of(2) {
            return Err(ReelError::validation(
                "video width/height must be even (required for yuv420p output)",
            ));
        }
        if v.width > u32::from(u16::MAX) {
            return Err(ReelError::validation(format!(
                "video width must be <= {}",
                u16::MAX
            )));
        }
        Fps::new(v.fps, 1)?;
        if !v.loop_duration_secs.is_finite() || v.loop_duration_secs <= 0.0 {
            return Err(ReelError::validation("video.loop_duration_secs must be > 0"));
        }
        if v.loop_count == 0 {
            return Err(ReelError::validation("video.loop_count must be >= 1"));
        }
        if !v.pause_before_scroll_secs.is_finite()
            || v.pause_before_scroll_secs < 0.0
            || v.pause_before_scroll_secs >= v.loop_duration_secs
        {
            return Err(ReelError::validation(
                "video.pause_before_scroll_secs must be in [0, loop_duration_secs)",
            ));
        }
        if v.threads == Some(0) {
            return Err(ReelError::validation("video.threads must be >= 1 when set"));
        }
        let s = &self.style;
        if [s.title, s.event, s.channel].iter().any(|t| t.size_px == 0) {
            return Err(ReelError::validation("font sizes must be > 0"));
        }
        if self.output.published_path == self.output.staging_path {
            return Err(ReelError::validation(
                "output.staging_path must differ from output.published_path",
            ));
        }
        self.trigger.validate()
    }

    /// Output frame size.
    pub fn screen(&self) -> Canvas {
        Canvas {
            width: self.video.width,
            height: self.video.height,
        }
    }

    /// Output frame rate.
    pub fn fps(&self) -> ReelResult<Fps> {
        Fps::new(self.video.fps, 1)
    }

    /// Retention window.
    pub fn retention(&self) -> TimeDelta {
        TimeDelta::hours(i64::from(self.schedule.retention_hours))
    }

    /// Options for the normalizer.
    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            time_zone: self.schedule.time_zone,
            retention: self.retention(),
        }
    }

    /// Request for the configured source.
    pub fn fetch_request(&self) -> FetchRequest {
        FetchRequest {
            url: self.source.url.clone(),
            referer: self.source.referer.clone(),
            user_agent: self.source.user_agent.clone(),
            timeout: Duration::from_secs(self.source.timeout_secs),
        }
    }

    /// Options for the refresh loop.
    pub fn scheduler_options(&self) -> SchedulerOptions {
        SchedulerOptions {
            trigger: self.trigger,
            time_zone: self.schedule.time_zone,
            published_path: self.output.published_path.clone(),
            staging_path: self.output.staging_path.clone(),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
