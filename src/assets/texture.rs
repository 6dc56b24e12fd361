use std::sync::Arc;

use crate::foundation::core::Point;
use crate::foundation::error::{ScanError, ScanResult};

/// Linear float color, straight alpha: `[r, g, b, a]`.
///
/// Channels are nominally in `[0, 1]` but effect output may exceed 1 (additive blending).
pub type Rgba32 = [f32; 4];

/// Texture filter used when sampling by UV.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleFilter {
    /// Weighted average of the four nearest texels.
    #[default]
    Bilinear,
    /// Closest texel.
    Nearest,
}

/// Straight-alpha RGBA8 color image, immutable once built.
///
/// Sampling uses GL texture conventions: `v = 0` addresses the bottom row of the image and every
/// coordinate is clamped to the edge texels.
#[derive(Clone, Debug)]
pub struct ColorImage {
    width: u32,
    height: u32,
    rgba8: Arc<Vec<u8>>,
}

impl ColorImage {
    /// Wrap a tightly packed, row-major (top row first) RGBA8 buffer.
    pub fn from_rgba8(width: u32, height: u32, rgba8: Vec<u8>) -> ScanResult<Self> {
        let expected = texel_count(width, height)?
            .checked_mul(4)
            .ok_or_else(|| ScanError::asset("color image size overflow"))?;
        if rgba8.len() != expected {
            return Err(ScanError::asset(format!(
                "color image buffer length mismatch: expected {expected} bytes, got {}",
                rgba8.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8: Arc::new(rgba8),
        })
    }

    /// A `width x height` image filled with one color.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> ScanResult<Self> {
        let n = texel_count(width, height)?;
        Self::from_rgba8(width, height, rgba.repeat(n))
    }

    /// Width in texels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in texels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Texel at column `x`, row `y` (row 0 is the top of the image).
    pub fn texel(&self, x: u32, y: u32) -> Rgba32 {
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = &self.rgba8[idx..idx + 4];
        [
            f32::from(px[0]) / 255.0,
            f32::from(px[1]) / 255.0,
            f32::from(px[2]) / 255.0,
            f32::from(px[3]) / 255.0,
        ]
    }

    /// Sample at normalized `uv` with clamp-to-edge addressing.
    pub fn sample(&self, uv: Point, filter: SampleFilter) -> Rgba32 {
        match filter {
            SampleFilter::Nearest => {
                let (x, y) = nearest_texel(uv, self.width, self.height);
                self.texel(x, y)
            }
            SampleFilter::Bilinear => {
                let fp = bilinear_footprint(uv, self.width, self.height);
                let a = self.texel(fp.x0, fp.y0);
                let b = self.texel(fp.x1, fp.y0);
                let c = self.texel(fp.x0, fp.y1);
                let d = self.texel(fp.x1, fp.y1);
                let mut out = [0.0f32; 4];
                for i in 0..4 {
                    let top = lerp(a[i], b[i], fp.tx);
                    let bottom = lerp(c[i], d[i], fp.tx);
                    out[i] = lerp(top, bottom, fp.ty);
                }
                out
            }
        }
    }
}

/// Single-channel depth/height map with values in `[0, 1]`, immutable once built.
///
/// Same addressing as [`ColorImage`].
#[derive(Clone, Debug)]
pub struct DepthImage {
    width: u32,
    height: u32,
    values: Arc<Vec<f32>>,
}

impl DepthImage {
    /// Wrap row-major (top row first) depth values.
    pub fn from_values(width: u32, height: u32, values: Vec<f32>) -> ScanResult<Self> {
        let expected = texel_count(width, height)?;
        if values.len() != expected {
            return Err(ScanError::asset(format!(
                "depth image length mismatch: expected {expected} values, got {}",
                values.len()
            )));
        }
        Ok(Self {
            width,
            height,
            values: Arc::new(values),
        })
    }

    /// Build from an RGBA8 buffer, keeping the red channel.
    pub fn from_rgba8_red(width: u32, height: u32, rgba8: &[u8]) -> ScanResult<Self> {
        let expected = texel_count(width, height)?
            .checked_mul(4)
            .ok_or_else(|| ScanError::asset("depth image size overflow"))?;
        if rgba8.len() != expected {
            return Err(ScanError::asset(format!(
                "depth image buffer length mismatch: expected {expected} bytes, got {}",
                rgba8.len()
            )));
        }
        let values = rgba8
            .chunks_exact(4)
            .map(|px| f32::from(px[0]) / 255.0)
            .collect();
        Self::from_values(width, height, values)
    }

    /// A `width x height` map with one depth everywhere.
    pub fn uniform(width: u32, height: u32, depth: f32) -> ScanResult<Self> {
        let n = texel_count(width, height)?;
        Self::from_values(width, height, vec![depth; n])
    }

    /// Width in texels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in texels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Depth at column `x`, row `y` (row 0 is the top of the image).
    pub fn texel(&self, x: u32, y: u32) -> f32 {
        self.values[(y as usize) * (self.width as usize) + (x as usize)]
    }

    /// Sample at normalized `uv` with clamp-to-edge addressing.
    pub fn sample(&self, uv: Point, filter: SampleFilter) -> f32 {
        match filter {
            SampleFilter::Nearest => {
                let (x, y) = nearest_texel(uv, self.width, self.height);
                self.texel(x, y)
            }
            SampleFilter::Bilinear => {
                let fp = bilinear_footprint(uv, self.width, self.height);
                let top = lerp(self.texel(fp.x0, fp.y0), self.texel(fp.x1, fp.y0), fp.tx);
                let bottom = lerp(self.texel(fp.x0, fp.y1), self.texel(fp.x1, fp.y1), fp.tx);
                lerp(top, bottom, fp.ty)
            }
        }
    }
}

fn texel_count(width: u32, height: u32) -> ScanResult<usize> {
    if width == 0 || height == 0 {
        return Err(ScanError::asset(format!(
            "image dimensions must be non-zero (got {width}x{height})"
        )));
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| ScanError::asset("image size overflow"))
}

struct Footprint {
    x0: u32,
    x1: u32,
    y0: u32,
    y1: u32,
    tx: f32,
    ty: f32,
}

// Texel centers sit at half-integer positions; `v` grows upwards while rows grow downwards.
fn bilinear_footprint(uv: Point, width: u32, height: u32) -> Footprint {
    let x = uv.x * f64::from(width) - 0.5;
    let y = (1.0 - uv.y) * f64::from(height) - 0.5;
    let fx = x.floor();
    let fy = y.floor();
    let (x0, x1) = clamp_pair(fx, width);
    let (y0, y1) = clamp_pair(fy, height);
    Footprint {
        x0,
        x1,
        y0,
        y1,
        tx: (x - fx) as f32,
        ty: (y - fy) as f32,
    }
}

fn clamp_pair(floor: f64, len: u32) -> (u32, u32) {
    let max = i64::from(len) - 1;
    // Bounded before the cast so `i + 1` cannot overflow for huge coordinates.
    let i = floor.clamp(-1.0, f64::from(len)) as i64;
    (i.clamp(0, max) as u32, (i + 1).clamp(0, max) as u32)
}

fn nearest_texel(uv: Point, width: u32, height: u32) -> (u32, u32) {
    let x = (uv.x * f64::from(width)).floor() as i64;
    let y = ((1.0 - uv.y) * f64::from(height)).floor() as i64;
    (
        x.clamp(0, i64::from(width) - 1) as u32,
        y.clamp(0, i64::from(height) - 1) as u32,
    )
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
#[path = "../../tests/unit/assets/texture.rs"]
mod tests;
