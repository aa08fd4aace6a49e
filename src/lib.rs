//! schedreel turns a sports/TV schedule feed into a looping, vertically scrolling video and keeps
//! it fresh.
//!
//! The flow for one generation cycle:
//!
//! - Fetch the feed and parse it into [`schedule::raw::RawSchedule`] records (HTML or JSON)
//! - [`normalize`] them into time-zone-correct, filtered [`CategoryGroups`]
//! - [`layout`] the groups into a [`RenderPlan`] and rasterize it into one tall canvas
//! - Drive a pure [`ScrollAnimator`] frame function through an encoder into a staging file
//! - Atomically publish the staged file through the [`Scheduler`]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod foundation;

pub mod animation;
pub mod audio;
pub mod config;
pub mod encode;
pub mod fetch;
pub mod layout;
pub mod logging;
pub mod pipeline;
pub mod render;
pub mod schedule;
pub mod scheduler;

pub use crate::foundation::color::Rgba8;
pub use crate::foundation::core::{Canvas, Fps, FrameIndex, FrameRange};
pub use crate::foundation::error::{ReelError, ReelResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::scroll::{AnimationSpec, ScrollAnimator, ScrollConvention};
pub use crate::config::ReelConfig;
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use crate::encode::sink::{AudioInputConfig, FrameSink, InMemorySink, SinkConfig};
pub use crate::encode::stream::{EncodeThreading, LoopStrategy};
pub use crate::fetch::{FetchRequest, Fetcher, FileFetcher, HttpFetcher};
pub use crate::layout::blocks::{PLACEHOLDER_TITLE, TextBlock};
pub use crate::layout::plan::{RenderPlan, layout};
pub use crate::layout::style::{LayoutStyle, TextStyle};
pub use crate::pipeline::SchedulePipeline;
pub use crate::render::frame::{ContentCanvas, FrameRGBA};
pub use crate::render::raster::{CpuRasterizer, Rasterizer};
pub use crate::schedule::model::{CategoryGroup, CategoryGroups, Event};
pub use crate::schedule::normalize::{NormalizeOptions, NormalizeReport, Normalized, normalize};
pub use crate::scheduler::clock::{Clock, ManualClock, Shutdown, SystemClock};
pub use crate::scheduler::cycle::{CycleOutcome, CycleState, Pipeline, Scheduler, SchedulerOptions};
pub use crate::scheduler::trigger::TriggerPolicy;
