use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::{
    assets::store::SourceImages,
    effects::scan::{DistortionEffect, EffectParams},
    eval::pointer::PointerPath,
    foundation::core::{Canvas, Fps, FrameIndex, FrameRange},
    foundation::error::{ScanError, ScanResult},
    render::cpu::CpuRasterizer,
    render::layout::SurfaceLayout,
};

/// Scene description loaded from JSON.
///
/// Only the two image paths are required. The grid aspect of the effect always follows
/// `surface`, so `effect.aspect` is overridden by [`SceneConfig::effect_params`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneConfig {
    /// Base color image, relative to the config file or absolute.
    pub color_image: PathBuf,
    /// Depth map, relative to the config file or absolute.
    pub depth_image: PathBuf,
    /// Output frame size.
    #[serde(default = "default_viewport")]
    pub viewport: Canvas,
    /// Timeline frame rate.
    #[serde(default)]
    pub fps: Fps,
    /// Sequence length in frames.
    #[serde(default = "default_duration")]
    pub duration: u64,
    /// Straight-alpha RGBA8 behind the surface.
    #[serde(default = "default_background")]
    pub background: [u8; 4],
    /// Surface placement.
    #[serde(default)]
    pub surface: SurfaceLayout,
    /// Effect parameters.
    #[serde(default)]
    pub effect: EffectParams,
    /// Pointer used for offline renders.
    #[serde(default)]
    pub pointer: PointerPath,
}

fn default_viewport() -> Canvas {
    Canvas {
        width: 640,
        height: 360,
    }
}

fn default_duration() -> u64 {
    90
}

fn default_background() -> [u8; 4] {
    [0, 0, 0, 255]
}

impl SceneConfig {
    /// A config with every optional field at its default.
    pub fn with_images(color_image: impl Into<PathBuf>, depth_image: impl Into<PathBuf>) -> Self {
        Self {
            color_image: color_image.into(),
            depth_image: depth_image.into(),
            viewport: default_viewport(),
            fps: Fps::default(),
            duration: default_duration(),
            background: default_background(),
            surface: SurfaceLayout::default(),
            effect: EffectParams::default(),
            pointer: PointerPath::default(),
        }
    }

    /// Parse a scene from JSON.
    pub fn from_reader<R: std::io::Read>(r: R) -> ScanResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ScanError::serde(format!("parse scene JSON: {e}")))
    }

    /// Parse a scene from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ScanResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ScanError::validation(format!("open scene JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Report the first invalid field.
    pub fn validate(&self) -> ScanResult<()> {
        if self.color_image.as_os_str().is_empty() || self.depth_image.as_os_str().is_empty() {
            return Err(ScanError::validation(
                "color_image and depth_image must be set",
            ));
        }
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Err(ScanError::validation("viewport width/height must be > 0"));
        }
        Fps::new(self.fps.num, self.fps.den)?;
        if self.duration == 0 {
            return Err(ScanError::validation("duration must be > 0"));
        }
        self.surface.validate()?;
        self.effect_params().validate()?;
        self.pointer.validate()
    }

    /// `effect` with the grid aspect taken from `surface`.
    pub fn effect_params(&self) -> EffectParams {
        EffectParams {
            aspect: self.surface.aspect(),
            ..self.effect
        }
    }

    /// Every frame of the configured duration.
    pub fn frame_range(&self) -> ScanResult<FrameRange> {
        FrameRange::new(FrameIndex(0), FrameIndex(self.duration))
    }

    /// Validate and build the rasterizer.
    pub fn rasterizer(&self) -> ScanResult<CpuRasterizer> {
        self.validate()?;
        CpuRasterizer::new(
            DistortionEffect::new(self.effect_params())?,
            self.surface,
            self.viewport,
            self.background,
        )
    }

    /// Load both images, resolving relative paths against `root`.
    pub fn load_images(&self, root: &Path) -> ScanResult<SourceImages> {
        SourceImages::load(root, &self.color_image, &self.depth_image)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/config.rs"]
mod tests;
