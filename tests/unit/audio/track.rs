use super::*;

fn stereo(frames: &[(f32, f32)]) -> AudioPcm {
    AudioPcm {
        sample_rate: 8,
        channels: 2,
        interleaved_f32: frames.iter().flat_map(|&(l, r)| [l, r]).collect(),
    }
}

#[test]
fn frame_to_sample_uses_rational_fps() {
    let fps = Fps {
        num: 30_000,
        den: 1001,
    };
    assert_eq!(frame_to_sample(0, fps, 48_000), 0);
    assert_eq!(frame_to_sample(30_000, fps, 48_000), 1001 * 48_000);
    assert_eq!(frame_to_sample(24 * 120, Fps::new(24, 1).unwrap(), 48_000), 120 * 48_000);
}

#[test]
fn longer_track_is_trimmed() {
    let pcm = stereo(&[(1.0, -1.0), (2.0, -2.0), (3.0, -3.0)]);
    let fitted = fit_to_length(&pcm, 2);
    assert_eq!(fitted.interleaved_f32, vec![1.0, -1.0, 2.0, -2.0]);
    assert_eq!(fitted.sample_rate, 8);
}

#[test]
fn shorter_track_is_looped_not_stretched() {
    let pcm = stereo(&[(1.0, -1.0), (2.0, -2.0)]);
    let fitted = fit_to_length(&pcm, 5);
    assert_eq!(
        fitted.interleaved_f32,
        vec![1.0, -1.0, 2.0, -2.0, 1.0, -1.0, 2.0, -2.0, 1.0, -1.0]
    );
}

#[test]
fn exact_length_is_unchanged() {
    let pcm = stereo(&[(0.5, 0.5), (0.25, 0.25)]);
    assert_eq!(fit_to_length(&pcm, 2), pcm);
}

#[test]
fn loop_audio_repeats_per_video_loop() {
    let one = fit_to_length(&stereo(&[(1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]), 4);
    let all = repeat_loops(&one, 3);
    assert_eq!(all.frames(), 12);
    assert_eq!(&all.interleaved_f32[..8], &all.interleaved_f32[8..16]);
    assert_eq!(&all.interleaved_f32[8..16], &all.interleaved_f32[16..24]);
}

#[test]
fn unreadable_track_degrades_to_no_audio() {
    let dir = tempfile::tempdir().unwrap();
    let bogus = dir.path().join("corrupt.mp3");
    std::fs::write(&bogus, b"definitely not audio").unwrap();
    assert!(prepare_loop_audio(&bogus, 48, Fps::new(24, 1).unwrap()).is_none());
}
