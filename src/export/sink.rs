use crate::foundation::core::Fps;
use crate::foundation::error::{SyntropyError, SyntropyResult};
use crate::render::backend::FrameRGBA;

/// Frame size and rate of a recording, fixed for its whole length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SinkConfig {
    /// Device pixels, density already applied.
    pub width: u32,
    pub height: u32,
    pub fps: Fps,
}

/// Destination for a recorded timeline.
///
/// Ordering contract: `push_frame` is called with strictly increasing frame indices, starting at
/// zero, between one `begin` and one `end`.
pub trait FrameSink: Send {
    fn begin(&mut self, cfg: SinkConfig) -> SyntropyResult<()>;
    /// `idx` is the frame number on the recording's timeline.
    fn push_frame(&mut self, idx: u64, frame: &FrameRGBA) -> SyntropyResult<()>;
    /// Finish the recording; for files this is when the output becomes complete.
    fn end(&mut self) -> SyntropyResult<()>;
}

/// Keeps every pushed frame, for tests and previews.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(u64, FrameRGBA)>,
    finished: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Frames in push order.
    pub fn frames(&self) -> &[(u64, FrameRGBA)] {
        &self.frames
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> SyntropyResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, frame: &FrameRGBA) -> SyntropyResult<()> {
        if self.cfg.is_none() {
            return Err(SyntropyError::encode("in-memory sink not started"));
        }
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> SyntropyResult<()> {
        self.finished = true;
        Ok(())
    }
}
