use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{ScanError, ScanResult};
use crate::foundation::math::mul_div255_u8;

/// Premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Porter-Duff source-over of premultiplied pixels, with an extra opacity on `src`.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255(u16::from(src[i]), op);
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = add_sat_u8(sc, dc);
    }
    out
}

/// Composite a straight-alpha pixel over a premultiplied destination.
pub fn over_straight(dst: PremulRgba8, src: [u8; 4]) -> PremulRgba8 {
    let src = Rgba8Premul::from_straight_rgba(src[0], src[1], src[2], src[3]).to_array();
    over(dst, src, 1.0)
}

/// Fill a premultiplied RGBA8 buffer with one straight-alpha color.
pub fn fill(dst: &mut [u8], straight_rgba: [u8; 4]) -> ScanResult<()> {
    if !dst.len().is_multiple_of(4) {
        return Err(ScanError::render("fill expects an rgba8 buffer"));
    }
    let px = Rgba8Premul::from_straight_rgba(
        straight_rgba[0],
        straight_rgba[1],
        straight_rgba[2],
        straight_rgba[3],
    )
    .to_array();
    for d in dst.chunks_exact_mut(4) {
        d.copy_from_slice(&px);
    }
    Ok(())
}

/// Convert a premultiplied buffer to straight alpha in place.
pub fn unpremultiply_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        if a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

fn mul_div255(x: u16, y: u16) -> u8 {
    mul_div255_u8(x, y)
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
