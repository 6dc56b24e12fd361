//! Depth-driven scan effect.
//!
//! Every output pixel is a pure function of the two source images, the per-frame [`Uniforms`]
//! and the fixed [`EffectParams`]:
//!
//! 1. sample depth at `uv` and push the color lookup along the pointer by `depth * strength`
//! 2. tile `uv` into a grid of dots, each optionally dimmed by a per-cell hash
//! 3. light only the dots whose depth sits in a narrow band around `progress`
//! 4. blend the tinted dots onto the distorted color sample

use crate::assets::store::SourceImages;
use crate::assets::texture::{Rgba32, SampleFilter};
use crate::effects::blend::{BlendMode, ToneMap};
use crate::foundation::core::{Point, Vec2};
use crate::foundation::error::{ScanError, ScanResult};
use crate::foundation::math::{fract, glsl_mod, smoothstep};

/// Per-cell brightness policy for the dot grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrightnessVariation {
    /// Pseudo-random brightness per grid cell (sparkling grid).
    #[default]
    Hashed,
    /// Every dot at full brightness (uniform grid).
    Flat,
}

/// Fixed effect configuration, set once at construction.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EffectParams {
    /// Grid repetitions across the unit UV square.
    pub tiling_density: f64,
    /// Color lookup offset per unit of depth and pointer.
    pub distortion_strength: f64,
    /// Half-width of the highlighted depth band, in depth units.
    pub flow_band_half_width: f64,
    /// Mask tint; deliberately overdriven for additive blending.
    pub tint: [f32; 3],
    /// Dot radius in tile-local units (tiles span `[-1, 1]`).
    pub dot_radius: f64,
    /// Width of the antialiased ring inside `dot_radius`.
    pub dot_edge: f64,
    /// Horizontal stretch of the grid, `design_width / design_height`.
    pub aspect: f64,
    /// Multiplier applied to the pointer before distortion.
    pub pointer_scale: f64,
    /// Mask/color combination.
    pub blend: BlendMode,
    /// Dot brightness policy.
    pub brightness: BrightnessVariation,
    /// Texture filter for both images.
    pub filter: SampleFilter,
    /// Mapping of unclamped output to displayable channels.
    pub tone_map: ToneMap,
}

impl Default for EffectParams {
    fn default() -> Self {
        Self {
            tiling_density: 120.0,
            distortion_strength: 0.01,
            flow_band_half_width: 0.02,
            tint: [10.0, 0.0, 0.0],
            dot_radius: 0.5,
            dot_edge: 0.01,
            aspect: 300.0 / 300.0,
            pointer_scale: 1.0,
            blend: BlendMode::Additive,
            brightness: BrightnessVariation::Hashed,
            filter: SampleFilter::Bilinear,
            tone_map: ToneMap::Clamp,
        }
    }
}

impl EffectParams {
    /// Reject parameter sets that would make per-pixel evaluation ill-defined.
    pub fn validate(&self) -> ScanResult<()> {
        let finite = [
            ("tiling_density", self.tiling_density),
            ("distortion_strength", self.distortion_strength),
            ("flow_band_half_width", self.flow_band_half_width),
            ("dot_radius", self.dot_radius),
            ("dot_edge", self.dot_edge),
            ("aspect", self.aspect),
            ("pointer_scale", self.pointer_scale),
        ];
        for (name, v) in finite {
            if !v.is_finite() {
                return Err(ScanError::validation(format!("effect.{name} must be finite")));
            }
        }
        if self.tint.iter().any(|c| !c.is_finite()) {
            return Err(ScanError::validation("effect.tint must be finite"));
        }
        if self.tiling_density <= 0.0 {
            return Err(ScanError::validation("effect.tiling_density must be > 0"));
        }
        if self.aspect <= 0.0 {
            return Err(ScanError::validation("effect.aspect must be > 0"));
        }
        if self.flow_band_half_width <= 0.0 {
            return Err(ScanError::validation(
                "effect.flow_band_half_width must be > 0",
            ));
        }
        if self.dot_edge <= 0.0 || self.dot_edge > self.dot_radius {
            return Err(ScanError::validation(
                "effect.dot_edge must be > 0 and <= effect.dot_radius",
            ));
        }
        Ok(())
    }
}

/// Per-frame inputs written by the frame driver and read by every pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Uniforms {
    /// Normalized pointer, each component nominally in `[-1, 1]`, `+y` up.
    pub pointer: Vec2,
    /// Scan position in depth units, nominally in `[0, 1]`.
    pub progress: f64,
}

/// Every intermediate of one pixel evaluation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScanSample {
    /// Depth sampled at the undistorted coordinate.
    pub depth: f64,
    /// Coordinate used for the color lookup.
    pub distorted_uv: Point,
    /// Color sampled at `distorted_uv`.
    pub base: Rgba32,
    /// Brightness of the dot's grid cell.
    pub brightness: f64,
    /// Antialiased dot coverage times brightness.
    pub dot: f64,
    /// Closeness of `depth` to the scan position.
    pub flow: f64,
    /// Tinted mask added/screened onto `base`.
    pub mask: [f32; 3],
    /// Final, unclamped color; alpha comes from `base`.
    pub color: Rgba32,
}

/// Offset `uv` along `pointer`, proportionally to `depth`.
///
/// Zero depth or a zero pointer returns `uv` unchanged.
pub fn distort_uv(uv: Point, depth: f64, pointer: Vec2, strength: f64) -> Point {
    Point::new(
        uv.x + depth * pointer.x * strength,
        uv.y + depth * pointer.y * strength,
    )
}

/// Tile-local coordinate in `[-1, 1]²`; cell centers map to the origin.
pub fn tile_coord(tuv: Point, density: f64) -> Vec2 {
    Vec2::new(
        glsl_mod(tuv.x * density, 2.0) - 1.0,
        glsl_mod(tuv.y * density, 2.0) - 1.0,
    )
}

/// Deterministic hash of a grid cell into `[0, 1)`.
pub fn hash_cell(cell: Point) -> f64 {
    fract((cell.x * 12.9898 + cell.y * 78.233).sin() * 43758.5453123)
}

/// Brightness of the grid cell containing `tuv`.
pub fn cell_brightness(variation: BrightnessVariation, tuv: Point, density: f64) -> f64 {
    match variation {
        BrightnessVariation::Flat => 1.0,
        BrightnessVariation::Hashed => hash_cell(Point::new(
            (tuv.x * density / 2.0).floor(),
            (tuv.y * density / 2.0).floor(),
        )),
    }
}

/// Filled, antialiased circle of `radius` in tile-local space, scaled by `brightness`.
///
/// 1 inside `radius - edge`, 0 from `radius` outwards.
pub fn dot_mask(tiled: Vec2, radius: f64, edge: f64, brightness: f64) -> f64 {
    smoothstep(radius, radius - edge, tiled.hypot()) * brightness
}

/// 1 where `depth == progress`, falling to 0 at `half_width` away.
pub fn flow_mask(depth: f64, progress: f64, half_width: f64) -> f64 {
    1.0 - smoothstep(0.0, half_width, (depth - progress).abs())
}

/// The per-pixel scan effect.
#[derive(Clone, Debug)]
pub struct DistortionEffect {
    params: EffectParams,
}

impl DistortionEffect {
    /// Validate `params` and build the effect.
    pub fn new(params: EffectParams) -> ScanResult<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Configured parameters.
    pub fn params(&self) -> &EffectParams {
        &self.params
    }

    /// Evaluate one pixel and keep every intermediate.
    pub fn evaluate(&self, images: &SourceImages, uniforms: Uniforms, uv: Point) -> ScanSample {
        let p = &self.params;

        let depth = f64::from(images.depth.sample(uv, p.filter));
        let pointer = uniforms.pointer * p.pointer_scale;
        let distorted_uv = distort_uv(uv, depth, pointer, p.distortion_strength);
        let base = images.color.sample(distorted_uv, p.filter);

        let tuv = Point::new(uv.x * p.aspect, uv.y);
        let tiled = tile_coord(tuv, p.tiling_density);
        let brightness = cell_brightness(p.brightness, tuv, p.tiling_density);
        let dot = dot_mask(tiled, p.dot_radius, p.dot_edge, brightness);
        let flow = flow_mask(depth, uniforms.progress, p.flow_band_half_width);

        let strength = (dot * flow) as f32;
        let mask = [
            strength * p.tint[0],
            strength * p.tint[1],
            strength * p.tint[2],
        ];
        let rgb = p.blend.apply([base[0], base[1], base[2]], mask);

        ScanSample {
            depth,
            distorted_uv,
            base,
            brightness,
            dot,
            flow,
            mask,
            color: [rgb[0], rgb[1], rgb[2], base[3]],
        }
    }

    /// Final unclamped color at `uv`.
    pub fn shade(&self, images: &SourceImages, uniforms: Uniforms, uv: Point) -> Rgba32 {
        self.evaluate(images, uniforms, uv).color
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/scan.rs"]
mod tests;
