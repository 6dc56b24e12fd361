use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    effects::composite::unpremultiply_in_place,
    encode::sink::{FrameSink, SinkConfig},
    foundation::core::FrameIndex,
    foundation::error::{ScanError, ScanResult},
    render::backend::FrameRGBA,
};

/// Write `frame` as a straight-alpha RGBA8 PNG.
pub fn write_png(path: &Path, frame: &FrameRGBA) -> ScanResult<()> {
    let mut data = frame.data.clone();
    if frame.premultiplied {
        unpremultiply_in_place(&mut data);
    }
    image::save_buffer_with_format(
        path,
        &data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

/// Writes each frame to `<dir>/frame_<index>.png`, index zero-padded to five digits.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    cfg: Option<SinkConfig>,
    written: u64,
}

impl PngSequenceSink {
    /// A sink writing into `dir`, created on `begin` if missing.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cfg: None,
            written: 0,
        }
    }

    /// Path the frame at `idx` is written to.
    pub fn frame_path(&self, idx: FrameIndex) -> PathBuf {
        self.dir.join(format!("frame_{:05}.png", idx.0))
    }

    /// Frames written since the last `begin`.
    pub fn written(&self) -> u64 {
        self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> ScanResult<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create output dir '{}'", self.dir.display()))?;
        self.cfg = Some(cfg);
        self.written = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> ScanResult<()> {
        let cfg = self
            .cfg
            .ok_or_else(|| ScanError::render("png sink: push_frame before begin"))?;
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(ScanError::render(format!(
                "png sink: frame {} is {}x{}, expected {}x{}",
                idx.0, frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        write_png(&self.frame_path(idx), frame)?;
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> ScanResult<()> {
        tracing::debug!(dir = %self.dir.display(), frames = self.written, "png sequence finished");
        self.cfg = None;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
