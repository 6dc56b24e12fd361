use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::ScanResult;
use crate::render::backend::FrameRGBA;

/// Configuration handed to a [`FrameSink`] before the first frame of a range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SinkConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Frame rate of the range.
    pub fps: Fps,
}

/// Consumer of rendered frames.
///
/// `push_frame` is called in strictly increasing `FrameIndex` order, between one `begin` and one
/// `end`.
pub trait FrameSink {
    /// Prepare for a range of frames.
    fn begin(&mut self, cfg: SinkConfig) -> ScanResult<()>;
    /// Consume one frame.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> ScanResult<()>;
    /// Flush after the last frame.
    fn end(&mut self) -> ScanResult<()>;
}

/// Keeps every frame in memory; for tests and previews.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    /// Frames in timeline order.
    pub frames: Vec<(FrameIndex, FrameRGBA)>,
}

impl InMemorySink {
    /// An empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration from the last `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> ScanResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> ScanResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> ScanResult<()> {
        Ok(())
    }
}
