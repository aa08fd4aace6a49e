use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::animation::scroll::ScrollAnimator;
use crate::audio::decode::{AudioPcm, write_f32le_file};
use crate::audio::track::repeat_loops;
use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, concat_loops};
use crate::encode::sink::{AudioInputConfig, FrameSink, SinkConfig};
use crate::foundation::color::Rgba8;
use crate::foundation::core::{FrameIndex, FrameRange};
use crate::foundation::error::{ReelError, ReelResult};

/// How the looped output is assembled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopStrategy {
    /// Render and push every frame of every loop.
    Stream,
    /// Encode one loop, then stream-copy it `loop_count` times.
    #[default]
    Concat,
}

/// Threading and chunking controls for frame generation.
#[derive(Clone, Debug)]
pub struct EncodeThreading {
    /// Frames generated per parallel batch.
    pub chunk_size: usize,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

impl Default for EncodeThreading {
    fn default() -> Self {
        Self {
            chunk_size: 48,
            threads: None,
        }
    }
}

/// Counters reported after an encode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EncodeStats {
    /// Frames rendered by the animator.
    pub frames_rendered: u64,
    /// Frames present in the output file.
    pub frames_total: u64,
    /// Whether an audio track was muxed.
    pub audio: bool,
}

/// Generate frames `range` in parallel batches and push them to `sink` in order.
///
/// Calls `begin` with `cfg` first and `end` after the last frame.
pub fn stream_frames(
    animator: &ScrollAnimator,
    range: FrameRange,
    sink: &mut dyn FrameSink,
    cfg: SinkConfig,
    threading: &EncodeThreading,
) -> ReelResult<u64> {
    let pool = build_thread_pool(threading.threads)?;
    let chunk_size = threading.chunk_size.max(1) as u64;

    sink.begin(cfg)?;
    let mut chunk_start = range.start.0;
    while chunk_start < range.end.0 {
        let chunk_end = (chunk_start + chunk_size).min(range.end.0);
        let frames: Vec<_> = pool.install(|| {
            (chunk_start..chunk_end)
                .into_par_iter()
                .map(|i| animator.frame_at_index(FrameIndex(i)))
                .collect()
        });
        for (i, frame) in (chunk_start..chunk_end).zip(&frames) {
            sink.push_frame(FrameIndex(i), frame)?;
        }
        chunk_start = chunk_end;
    }
    sink.end()?;
    Ok(range.len_frames())
}

/// Encode the full looped video to `out_path` with `ffmpeg`.
///
/// `loop_audio` is one loop's worth of PCM; it is repeated to match every loop. Intermediate
/// files live beside `out_path` and are removed on every exit path.
#[tracing::instrument(skip(animator, loop_audio, threading), fields(out = %out_path.display()))]
pub fn encode_video(
    animator: &ScrollAnimator,
    out_path: &Path,
    strategy: LoopStrategy,
    loop_audio: Option<&AudioPcm>,
    background: Rgba8,
    threading: &EncodeThreading,
) -> ReelResult<EncodeStats> {
    let loop_count = animator.spec().loop_count;
    let per_loop = animator.frames_per_loop();
    let screen = animator.screen();

    let (render_frames, audio_pcm, video_path, scratch) = match strategy {
        LoopStrategy::Stream => (
            animator.total_frames(),
            loop_audio.map(|pcm| repeat_loops(pcm, loop_count)),
            out_path.to_path_buf(),
            None,
        ),
        LoopStrategy::Concat => {
            let single = sibling_path(out_path, "loop.mp4");
            (
                per_loop,
                loop_audio.cloned(),
                single.clone(),
                Some(TempFileGuard(Some(single))),
            )
        }
    };

    let audio_guard = match &audio_pcm {
        Some(pcm) => {
            let path = sibling_path(out_path, "audio.f32le");
            write_f32le_file(&pcm.interleaved_f32, &path)?;
            Some((
                TempFileGuard(Some(path.clone())),
                AudioInputConfig {
                    path,
                    sample_rate: pcm.sample_rate,
                    channels: pcm.channels,
                },
            ))
        }
        None => None,
    };

    let cfg = SinkConfig {
        width: screen.width,
        height: screen.height,
        fps: animator.fps(),
        audio: audio_guard.as_ref().map(|(_, a)| a.clone()),
    };
    let mut sink = FfmpegSink::new(FfmpegSinkOpts {
        out_path: video_path.clone(),
        background,
    });
    let range = FrameRange::new(FrameIndex(0), FrameIndex(render_frames))?;
    let frames_rendered = stream_frames(animator, range, &mut sink, cfg, threading)?;
    drop(audio_guard);

    if scratch.is_some() {
        concat_loops(&video_path, out_path, loop_count)?;
    }
    drop(scratch);

    let stats = EncodeStats {
        frames_rendered,
        frames_total: per_loop * u64::from(loop_count),
        audio: audio_pcm.is_some(),
    };
    tracing::info!(
        ?strategy,
        frames_rendered = stats.frames_rendered,
        frames_total = stats.frames_total,
        audio = stats.audio,
        "encoded video"
    );
    Ok(stats)
}

/// `<dir>/<stem>.<suffix>` next to `path`.
fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    path.with_file_name(format!("{stem}.{suffix}"))
}

fn build_thread_pool(threads: Option<usize>) -> ReelResult<rayon::ThreadPool> {
    if threads == Some(0) {
        return Err(ReelError::validation(
            "encode threading 'threads' must be >= 1 when set",
        ));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ReelError::encode(format!("failed to build rayon thread pool: {e}")))
}

struct TempFileGuard(Option<PathBuf>);

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if let Some(path) = self.0.take() {
            let _ = std::fs::remove_file(path);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/stream.rs"]
mod tests;
