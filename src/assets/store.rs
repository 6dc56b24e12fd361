use std::path::Path;

use crate::{
    assets::decode::{decode_color_image, decode_depth_image},
    assets::texture::{ColorImage, DepthImage},
    foundation::error::{ScanError, ScanResult},
};

/// The resolved image pair the effect samples.
///
/// Holding a `SourceImages` is the proof that both inputs finished loading; the frame driver
/// only renders once it has one.
#[derive(Clone, Debug)]
pub struct SourceImages {
    /// Base color image.
    pub color: ColorImage,
    /// Depth/height map driving distortion and the flow band.
    pub depth: DepthImage,
}

impl SourceImages {
    /// Pair already-decoded images.
    pub fn new(color: ColorImage, depth: DepthImage) -> Self {
        Self { color, depth }
    }

    /// Read and decode both images from disk.
    ///
    /// Relative paths are resolved against `root`.
    #[tracing::instrument(skip_all, fields(color = %color_path.as_ref().display(), depth = %depth_path.as_ref().display()))]
    pub fn load(
        root: &Path,
        color_path: impl AsRef<Path>,
        depth_path: impl AsRef<Path>,
    ) -> ScanResult<Self> {
        let color_bytes = read_asset(root, color_path.as_ref())?;
        let depth_bytes = read_asset(root, depth_path.as_ref())?;

        let color = decode_color_image(&color_bytes)
            .map_err(|e| ScanError::asset(format!("color image: {e}")))?;
        let depth = decode_depth_image(&depth_bytes)
            .map_err(|e| ScanError::asset(format!("depth image: {e}")))?;

        if !same_aspect(&color, &depth) {
            tracing::warn!(
                color_w = color.width(),
                color_h = color.height(),
                depth_w = depth.width(),
                depth_h = depth.height(),
                "color and depth images differ in aspect ratio; both are sampled with the same uv"
            );
        }

        tracing::debug!(
            color_w = color.width(),
            color_h = color.height(),
            depth_w = depth.width(),
            depth_h = depth.height(),
            "source images ready"
        );
        Ok(Self { color, depth })
    }
}

fn read_asset(root: &Path, rel: &Path) -> ScanResult<Vec<u8>> {
    let path = if rel.is_absolute() {
        rel.to_path_buf()
    } else {
        root.join(rel)
    };
    std::fs::read(&path)
        .map_err(|e| ScanError::asset(format!("read image '{}': {e}", path.display())))
}

fn same_aspect(color: &ColorImage, depth: &DepthImage) -> bool {
    u64::from(color.width()) * u64::from(depth.height())
        == u64::from(depth.width()) * u64::from(color.height())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
