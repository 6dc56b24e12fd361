use anyhow::Context;

use crate::{
    ScanResult,
    assets::texture::{ColorImage, DepthImage},
};

/// Decode encoded image bytes (PNG, JPEG, WebP, ...) into a straight-alpha [`ColorImage`].
pub fn decode_color_image(bytes: &[u8]) -> ScanResult<ColorImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode color image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    ColorImage::from_rgba8(width, height, rgba.into_raw())
}

/// Decode encoded image bytes into a [`DepthImage`], keeping the red channel.
///
/// Grayscale sources expand to equal RGB channels, so red carries the luminance.
pub fn decode_depth_image(bytes: &[u8]) -> ScanResult<DepthImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode depth image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    DepthImage::from_rgba8_red(width, height, rgba.as_raw())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
