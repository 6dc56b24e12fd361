//! Scalar helpers.
//!
//! The `f64` helpers follow GLSL semantics exactly, including for reversed smoothstep edges and
//! negative operands, so per-pixel code reads like the shading-language formula it reproduces.

#[derive(Clone, Copy, Debug)]
pub(crate) struct Fnv1a64(u64);

impl Fnv1a64 {
    pub(crate) const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01B3;

    pub(crate) fn new_default() -> Self {
        Self(Self::OFFSET_BASIS)
    }

    pub(crate) fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    pub(crate) fn write_bytes(&mut self, bytes: &[u8]) {
        let mut h = self.0;
        for &b in bytes {
            h ^= u64::from(b);
            h = h.wrapping_mul(Self::PRIME);
        }
        self.0 = h;
    }

    pub(crate) fn finish(self) -> u64 {
        self.0
    }
}

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Hermite interpolation between `edge0` and `edge1`.
///
/// `edge0 > edge1` is allowed and inverts the ramp: `smoothstep(0.5, 0.49, x)` is 1 below 0.49
/// and 0 from 0.5 up.
pub fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Fractional part, `x - floor(x)`; always in `[0, 1)` for finite input.
pub fn fract(x: f64) -> f64 {
    x - x.floor()
}

/// Floored modulo, `x - y * floor(x / y)`; the result has the sign of `y`.
pub fn glsl_mod(x: f64, y: f64) -> f64 {
    x - y * (x / y).floor()
}

/// Map a unit float to a byte with round-to-nearest. Out-of-range input saturates.
pub(crate) fn unit_to_u8(v: f32) -> u8 {
    if !v.is_finite() {
        return if v > 0.0 { 255 } else { 0 };
    }
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
