//! Frame sinks and video assembly.

/// `ffmpeg`-backed sink and loop concatenation.
pub mod ffmpeg;
/// Frame sink trait and the in-memory sink.
pub mod sink;
/// Parallel frame streaming and whole-video encoding.
pub mod stream;
