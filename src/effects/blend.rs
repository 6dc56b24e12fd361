use crate::assets::texture::Rgba32;
use crate::foundation::math::unit_to_u8;

/// How the tinted mask combines with the sampled color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// `color + mask`; may exceed 1.0 and relies on [`ToneMap`] downstream.
    #[default]
    Additive,
    /// `1 - (1 - color) * (1 - mask)`; bounded by 1.0 for inputs in `[0, 1]`.
    Screen,
}

impl BlendMode {
    /// Blend `mask` onto `base` per color channel.
    pub fn apply(self, base: [f32; 3], mask: [f32; 3]) -> [f32; 3] {
        let mut out = [0.0f32; 3];
        for i in 0..3 {
            out[i] = match self {
                Self::Additive => base[i] + mask[i],
                // Expanded form of the screen formula; a zero mask returns `base` bit-for-bit.
                Self::Screen => base[i] + mask[i] - base[i] * mask[i],
            };
        }
        out
    }
}

/// Mapping from unclamped effect output to displayable `[0, 1]` channels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToneMap {
    /// Per-channel clamp, what a fixed-point framebuffer does with an overdriven fragment.
    #[default]
    Clamp,
    /// `c / (1 + c)` on color channels; alpha is clamped.
    Reinhard,
}

impl ToneMap {
    /// Map one color channel into `[0, 1]`.
    pub fn map_channel(self, c: f32) -> f32 {
        match self {
            Self::Clamp => c.clamp(0.0, 1.0),
            Self::Reinhard => {
                let c = c.max(0.0);
                c / (1.0 + c)
            }
        }
    }

    /// Map a float color to straight-alpha RGBA8.
    pub fn to_rgba8(self, c: Rgba32) -> [u8; 4] {
        [
            unit_to_u8(self.map_channel(c[0])),
            unit_to_u8(self.map_channel(c[1])),
            unit_to_u8(self.map_channel(c[2])),
            unit_to_u8(c[3]),
        ]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blend.rs"]
mod tests;
