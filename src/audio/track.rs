use std::path::Path;

use crate::audio::decode::{AudioPcm, MIX_SAMPLE_RATE, decode_audio_f32_stereo};
use crate::foundation::core::Fps;

/// Convert a frame count to the nearest sample index at `sample_rate`.
pub fn frame_to_sample(frames: u64, fps: Fps, sample_rate: u32) -> u64 {
    let num = u128::from(frames) * u128::from(sample_rate) * u128::from(fps.den);
    let den = u128::from(fps.num);
    ((num + (den / 2)) / den) as u64
}

/// Trim or repeat `pcm` so it lasts exactly `target_frames` sample frames.
///
/// Shorter tracks are looped from the start, never stretched.
pub fn fit_to_length(pcm: &AudioPcm, target_frames: usize) -> AudioPcm {
    let channels = usize::from(pcm.channels.max(1));
    let src_frames = pcm.frames();
    let target_len = target_frames * channels;

    let interleaved_f32 = if src_frames == 0 {
        vec![0.0; target_len]
    } else {
        let src = &pcm.interleaved_f32[..src_frames * channels];
        src.iter().copied().cycle().take(target_len).collect()
    };

    AudioPcm {
        sample_rate: pcm.sample_rate,
        channels: pcm.channels,
        interleaved_f32,
    }
}

/// Concatenate `count` copies of `pcm`.
pub fn repeat_loops(pcm: &AudioPcm, count: u32) -> AudioPcm {
    AudioPcm {
        sample_rate: pcm.sample_rate,
        channels: pcm.channels,
        interleaved_f32: pcm.interleaved_f32.repeat(count as usize),
    }
}

/// Decode the background track at `path` and fit it to one loop of `frames_per_loop` video
/// frames.
///
/// Unreadable, corrupt or silent-by-absence files return `None`: the caller then encodes
/// without an audio track.
#[tracing::instrument(skip(fps))]
pub fn prepare_loop_audio(path: &Path, frames_per_loop: u64, fps: Fps) -> Option<AudioPcm> {
    let pcm = match decode_audio_f32_stereo(path, MIX_SAMPLE_RATE) {
        Ok(pcm) => pcm,
        Err(e) => {
            tracing::warn!(error = %e, "background audio unusable, encoding without audio");
            return None;
        }
    };
    if pcm.is_empty() {
        tracing::warn!("background audio has no samples, encoding without audio");
        return None;
    }

    let target = frame_to_sample(frames_per_loop, fps, pcm.sample_rate) as usize;
    let action = match pcm.frames().cmp(&target) {
        std::cmp::Ordering::Greater => "trimmed",
        std::cmp::Ordering::Less => "looped",
        std::cmp::Ordering::Equal => "kept",
    };
    tracing::info!(
        source_frames = pcm.frames(),
        loop_frames = target,
        action,
        "fitted background audio to one loop"
    );
    Some(fit_to_length(&pcm, target))
}

#[cfg(test)]
#[path = "../../tests/unit/audio/track.rs"]
mod tests;
