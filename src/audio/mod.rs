//! Background audio: decoding through `ffmpeg` and fitting the track to the loop length.

/// PCM decoding through `ffmpeg`.
pub mod decode;
/// Loop-length fitting of the background track.
pub mod track;
