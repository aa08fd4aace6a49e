use std::ffi::OsString;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::color::Rgba8;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::frame::FrameRGBA;

/// Options for [`FfmpegSink`] MP4 output.
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    /// Output MP4 file path.
    pub out_path: PathBuf,
    /// Colour used to flatten any remaining alpha.
    pub background: Rgba8,
}

impl FfmpegSinkOpts {
    /// Options writing an MP4 to `out_path` over black.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            background: Rgba8::rgb(0, 0, 0),
        }
    }
}

/// Sink that spawns the system `ffmpeg` and streams raw frames to its stdin.
///
/// Output is H.264/yuv420p with AAC audio when `SinkConfig.audio` is set, video-only otherwise.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,

    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stderr_drain: Option<StderrDrain>,

    scratch: Vec<u8>,
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
}

impl FfmpegSink {
    /// Sink streaming into a new `ffmpeg` process.
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            child: None,
            stdin: None,
            stderr_drain: None,
            scratch: Vec::new(),
            cfg: None,
            last_idx: None,
        }
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(ReelError::validation(
                "ffmpeg sink width/height must be non-zero",
            ));
        }
        if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
            return Err(ReelError::validation(
                "ffmpeg sink width/height must be even (required for yuv420p mp4 output)",
            ));
        }

        ensure_parent_dir(&self.opts.out_path)?;
        if !is_ffmpeg_on_path() {
            return Err(ReelError::encode(
                "ffmpeg is required for MP4 encoding, but was not found on PATH",
            ));
        }

        let args = encoder_args(&cfg, &self.opts.out_path)?;
        let (child, stdin, stderr_drain) = spawn_encoder(&args)?;

        tracing::debug!(
            out = %self.opts.out_path.display(),
            width = cfg.width,
            height = cfg.height,
            audio = cfg.audio.is_some(),
            "spawned ffmpeg encoder"
        );
        self.scratch = vec![0u8; cfg.canvas().rgba_len()];
        self.child = Some(child);
        self.stdin = Some(stdin);
        self.stderr_drain = Some(stderr_drain);
        self.cfg = Some(cfg);
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> ReelResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| ReelError::encode("ffmpeg sink not started"))?;
        if let Some(last) = self.last_idx
            && idx.0 <= last.0
        {
            return Err(ReelError::encode(
                "ffmpeg sink received out-of-order frame index",
            ));
        }
        self.last_idx = Some(idx);

        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(ReelError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        flatten_premul_over_bg(&mut self.scratch, &frame.data, self.opts.background)?;

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(ReelError::encode("ffmpeg sink is already finalized"));
        };
        use std::io::Write as _;
        stdin
            .write_all(&self.scratch)
            .map_err(|e| ReelError::encode(format!("failed to write frame to ffmpeg stdin: {e}")))
    }

    fn end(&mut self) -> ReelResult<()> {
        drop(self.stdin.take());
        let child = self
            .child
            .take()
            .ok_or_else(|| ReelError::encode("ffmpeg sink not started"))?;
        let stderr_drain = self.stderr_drain.take();
        self.cfg = None;
        wait_ffmpeg(child, stderr_drain)
    }
}

impl Drop for FfmpegSink {
    fn drop(&mut self) {
        // An abandoned encode must not leave a stray process behind.
        drop(self.stdin.take());
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

type StderrDrain = std::thread::JoinHandle<std::io::Result<Vec<u8>>>;

/// Encoder arguments: raw rgba on stdin, optional f32le PCM input, H.264/yuv420p out.
fn encoder_args(cfg: &SinkConfig, out_path: &Path) -> ReelResult<Vec<OsString>> {
    let mut args: Vec<OsString> = Vec::new();

    // Raw input needs `-r` before `-i`; rational rates are passed as `num/den`.
    push_args(&mut args, &["-y", "-loglevel", "error", "-f", "rawvideo", "-pix_fmt", "rgba"]);
    push_args(&mut args, &["-s", &format!("{}x{}", cfg.width, cfg.height)]);
    push_args(&mut args, &["-r", &format!("{}/{}", cfg.fps.num, cfg.fps.den), "-i", "pipe:0"]);

    match cfg.audio.as_ref() {
        Some(audio) if audio.sample_rate == 0 || audio.channels == 0 => {
            return Err(ReelError::validation(
                "audio sample_rate and channels must be non-zero when audio is enabled",
            ));
        }
        Some(audio) => {
            push_args(&mut args, &["-f", "f32le", "-ar", &audio.sample_rate.to_string()]);
            push_args(&mut args, &["-ac", &audio.channels.to_string(), "-i"]);
            args.push(audio.path.clone().into_os_string());
        }
        None => {}
    }

    push_args(&mut args, &["-c:v", "libx264", "-pix_fmt", "yuv420p"]);
    if cfg.audio.is_some() {
        push_args(&mut args, &["-c:a", "aac", "-shortest"]);
    } else {
        push_args(&mut args, &["-an"]);
    }
    push_args(&mut args, &["-movflags", "+faststart"]);
    args.push(out_path.as_os_str().to_owned());
    Ok(args)
}

fn push_args(args: &mut Vec<OsString>, items: &[&str]) {
    args.extend(items.iter().map(OsString::from));
}

fn spawn_encoder(args: &[OsString]) -> ReelResult<(Child, ChildStdin, StderrDrain)> {
    let mut child = Command::new("ffmpeg")
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| ReelError::encode(format!("failed to spawn ffmpeg: {e}")))?;
    let stdin = child
        .stdin
        .take()
        .ok_or_else(|| ReelError::encode("failed to open ffmpeg stdin"))?;
    let mut stderr = child
        .stderr
        .take()
        .ok_or_else(|| ReelError::encode("failed to open ffmpeg stderr"))?;
    let drain = std::thread::spawn(move || {
        let mut bytes = Vec::new();
        stderr.read_to_end(&mut bytes)?;
        Ok(bytes)
    });
    Ok((child, stdin, drain))
}

fn wait_ffmpeg(
    mut child: Child,
    stderr_drain: Option<StderrDrain>,
) -> ReelResult<()> {
    let status = child
        .wait()
        .map_err(|e| ReelError::encode(format!("failed to wait for ffmpeg to finish: {e}")))?;
    let stderr_bytes = match stderr_drain {
        Some(handle) => handle
            .join()
            .map_err(|_| ReelError::encode("ffmpeg stderr drain thread panicked"))?
            .map_err(|e| ReelError::encode(format!("ffmpeg stderr read failed: {e}")))?,
        None => Vec::new(),
    };

    if !status.success() {
        let stderr = String::from_utf8_lossy(&stderr_bytes);
        return Err(ReelError::encode(format!(
            "ffmpeg exited with status {}: {}",
            status,
            stderr.trim()
        )));
    }
    Ok(())
}

/// Stream-copy `single_loop` into `out_path` `loop_count` times without re-encoding.
pub fn concat_loops(single_loop: &Path, out_path: &Path, loop_count: u32) -> ReelResult<()> {
    if loop_count == 0 {
        return Err(ReelError::validation("loop count must be >= 1"));
    }
    ensure_parent_dir(out_path)?;

    let out = Command::new("ffmpeg")
        .args(["-y", "-loglevel", "error", "-stream_loop"])
        .arg((loop_count - 1).to_string())
        .arg("-i")
        .arg(single_loop)
        .args(["-c", "copy", "-movflags", "+faststart"])
        .arg(out_path)
        .output()
        .map_err(|e| ReelError::encode(format!("failed to run ffmpeg for loop concat: {e}")))?;

    if !out.status.success() {
        return Err(ReelError::encode(format!(
            "ffmpeg loop concat failed for '{}': {}",
            single_loop.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }
    Ok(())
}

/// Flatten premultiplied RGBA8 over `bg` into opaque RGBA8.
pub(crate) fn flatten_premul_over_bg(dst: &mut [u8], src_premul: &[u8], bg: Rgba8) -> ReelResult<()> {
    if dst.len() != src_premul.len() || !dst.len().is_multiple_of(4) {
        return Err(ReelError::validation(
            "flatten expects equal-length rgba8 buffers",
        ));
    }

    let bg = [u16::from(bg.r), u16::from(bg.g), u16::from(bg.b)];
    for (d, s) in dst.chunks_exact_mut(4).zip(src_premul.chunks_exact(4)) {
        let a = u16::from(s[3]);
        if a == 255 {
            d.copy_from_slice(s);
            continue;
        }
        let inv = 255 - a;
        for ((dc, &sc), &bc) in d[..3].iter_mut().zip(&s[..3]).zip(&bg) {
            *dc = (u16::from(sc) + mul_div255(bc, inv)).min(255) as u8;
        }
        d[3] = 255;
    }
    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u16 {
    let p = u32::from(x) * u32::from(y) + 128;
    ((p + (p >> 8)) >> 8) as u16
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> ReelResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
