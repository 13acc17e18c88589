use std::ffi::OsString;
use std::io::{Read as _, Write as _};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread::JoinHandle;

use crate::export::sink::{FrameSink, SinkConfig};
use crate::export::still::{ensure_parent_dir, flatten_into};
use crate::foundation::error::{SyntropyError, SyntropyResult};
use crate::render::backend::FrameRGBA;

/// Where and how [`FfmpegSink`] writes its MP4.
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    pub out_path: PathBuf,
    /// Replace an existing file at `out_path`.
    pub overwrite: bool,
}

impl FfmpegSinkOpts {
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
        }
    }
}

/// Records frames to H.264 MP4 by piping opaque RGBA into the system `ffmpeg`.
///
/// Frames are flattened over black before they are written, the same way stills are.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,
    recording: Option<Recording>,
}

/// One running `ffmpeg` process between `begin` and `end`.
struct Recording {
    cfg: SinkConfig,
    child: Child,
    stdin: Option<ChildStdin>,
    log: JoinHandle<std::io::Result<Vec<u8>>>,
    opaque: Vec<u8>,
    last_idx: Option<u64>,
}

impl FfmpegSink {
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            recording: None,
        }
    }

    fn recording_mut(&mut self) -> SyntropyResult<&mut Recording> {
        self.recording
            .as_mut()
            .ok_or_else(|| SyntropyError::encode("recording has not begun"))
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> SyntropyResult<()> {
        if self.recording.is_some() {
            return Err(SyntropyError::encode("recording already in progress"));
        }
        validate_sink_config(&cfg)?;
        ensure_parent_dir(&self.opts.out_path)?;
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(SyntropyError::validation(format!(
                "refusing to replace existing recording '{}'",
                self.opts.out_path.display()
            )));
        }
        if !is_ffmpeg_on_path() {
            return Err(SyntropyError::encode(
                "recording MP4 needs `ffmpeg` on PATH",
            ));
        }

        let mut child = Command::new("ffmpeg")
            .args(encoder_args(&self.opts, &cfg))
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| SyntropyError::encode(format!("could not start ffmpeg: {e}")))?;

        let stdin = child.stdin.take();
        let Some(mut stderr) = child.stderr.take() else {
            return Err(SyntropyError::encode("ffmpeg stderr was not captured"));
        };
        // ffmpeg blocks on a full stderr pipe, so it is read concurrently.
        let log = std::thread::spawn(move || {
            let mut bytes = Vec::new();
            stderr.read_to_end(&mut bytes)?;
            Ok(bytes)
        });

        tracing::debug!(
            out = %self.opts.out_path.display(),
            width = cfg.width,
            height = cfg.height,
            fps = cfg.fps.as_f64(),
            "recording started"
        );
        self.recording = Some(Recording {
            cfg,
            child,
            stdin,
            log,
            opaque: vec![0u8; (cfg.width as usize) * (cfg.height as usize) * 4],
            last_idx: None,
        });
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, frame: &FrameRGBA) -> SyntropyResult<()> {
        let rec = self.recording_mut()?;
        if rec.last_idx.is_some_and(|last| idx <= last) {
            return Err(SyntropyError::encode(format!(
                "frame {idx} arrived after frame {}",
                rec.last_idx.unwrap_or_default()
            )));
        }
        if (frame.width, frame.height) != (rec.cfg.width, rec.cfg.height) {
            return Err(SyntropyError::validation(format!(
                "frame is {}x{} but the recording is {}x{}",
                frame.width, frame.height, rec.cfg.width, rec.cfg.height
            )));
        }

        flatten_into(&mut rec.opaque, frame)?;
        let stdin = rec
            .stdin
            .as_mut()
            .ok_or_else(|| SyntropyError::encode("ffmpeg stdin is closed"))?;
        stdin
            .write_all(&rec.opaque)
            .map_err(|e| SyntropyError::encode(format!("ffmpeg rejected frame {idx}: {e}")))?;
        rec.last_idx = Some(idx);
        Ok(())
    }

    fn end(&mut self) -> SyntropyResult<()> {
        let mut rec = self
            .recording
            .take()
            .ok_or_else(|| SyntropyError::encode("recording has not begun"))?;
        // Closing stdin is what tells ffmpeg the stream is over.
        drop(rec.stdin.take());

        let status = rec
            .child
            .wait()
            .map_err(|e| SyntropyError::encode(format!("lost track of ffmpeg: {e}")))?;
        let log = rec
            .log
            .join()
            .map_err(|_| SyntropyError::encode("ffmpeg log reader panicked"))?
            .map_err(|e| SyntropyError::encode(format!("could not read ffmpeg log: {e}")))?;

        if !status.success() {
            return Err(SyntropyError::encode(format!(
                "ffmpeg failed ({status}): {}",
                String::from_utf8_lossy(&log).trim()
            )));
        }
        tracing::debug!(
            out = %self.opts.out_path.display(),
            frames = rec.last_idx.map_or(0, |i| i + 1),
            "recording finished"
        );
        Ok(())
    }
}

/// Full `ffmpeg` argument list: raw RGBA on stdin in, yuv420p H.264 out.
fn encoder_args(opts: &FfmpegSinkOpts, cfg: &SinkConfig) -> Vec<OsString> {
    let mut args: Vec<OsString> = Vec::new();
    args.push(if opts.overwrite { "-y" } else { "-n" }.into());
    for a in ["-loglevel", "error", "-f", "rawvideo", "-pix_fmt", "rgba"] {
        args.push(a.into());
    }
    args.push("-s".into());
    args.push(format!("{}x{}", cfg.width, cfg.height).into());
    // Input rate must precede `-i` for rawvideo.
    args.push("-r".into());
    args.push(format!("{}/{}", cfg.fps.num, cfg.fps.den).into());
    for a in [
        "-i",
        "pipe:0",
        "-an",
        "-c:v",
        "libx264",
        "-pix_fmt",
        "yuv420p",
        "-movflags",
        "+faststart",
    ] {
        args.push(a.into());
    }
    args.push(opts.out_path.clone().into_os_string());
    args
}

fn validate_sink_config(cfg: &SinkConfig) -> SyntropyResult<()> {
    if cfg.width == 0 || cfg.height == 0 {
        return Err(SyntropyError::validation("recording size must be non-zero"));
    }
    // yuv420p subsamples chroma by two in both directions.
    if cfg.width % 2 != 0 || cfg.height % 2 != 0 {
        return Err(SyntropyError::validation(format!(
            "recording size {}x{} must be even",
            cfg.width, cfg.height
        )));
    }
    Ok(())
}

/// `true` when `ffmpeg -version` runs successfully.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}

#[cfg(test)]
#[path = "../../tests/unit/export/ffmpeg.rs"]
mod tests;
