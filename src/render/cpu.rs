use rayon::prelude::*;

use crate::{
    assets::store::SourceImages,
    effects::composite::{fill, over_straight},
    effects::scan::{DistortionEffect, Uniforms},
    foundation::core::Canvas,
    foundation::error::{ScanError, ScanResult},
    render::backend::FrameRGBA,
    render::layout::{Placement, SurfaceLayout},
};

/// Renders the scan effect into a viewport-sized RGBA8 frame.
///
/// The effect surface is placed by a [`SurfaceLayout`]; every covered pixel is shaded at its center,
/// tone mapped, then composited over `background`. Uncovered pixels keep the background.
#[derive(Clone, Debug)]
pub struct CpuRasterizer {
    effect: DistortionEffect,
    placement: Placement,
    background: [u8; 4],
}

impl CpuRasterizer {
    /// Validate the layout and canvas and resolve the surface placement.
    pub fn new(
        effect: DistortionEffect,
        layout: SurfaceLayout,
        canvas: Canvas,
        background: [u8; 4],
    ) -> ScanResult<Self> {
        if canvas.width == 0 || canvas.height == 0 {
            return Err(ScanError::validation("viewport width/height must be > 0"));
        }
        canvas.rgba8_len()?;
        layout.validate()?;
        Ok(Self {
            effect,
            placement: layout.place(canvas),
            background,
        })
    }

    /// Effect shaded into covered pixels.
    pub fn effect(&self) -> &DistortionEffect {
        &self.effect
    }

    /// Resolved surface rectangle.
    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Output frame size.
    pub fn canvas(&self) -> Canvas {
        self.placement.canvas
    }

    /// Render one frame. With a `pool`, rows are shaded in parallel inside it.
    ///
    /// Returns premultiplied RGBA8; the result does not depend on `pool`.
    #[tracing::instrument(skip_all, fields(progress = uniforms.progress))]
    pub fn render(
        &self,
        images: &SourceImages,
        uniforms: Uniforms,
        pool: Option<&rayon::ThreadPool>,
    ) -> ScanResult<FrameRGBA> {
        let canvas = self.canvas();
        let mut data = vec![0u8; canvas.rgba8_len()?];
        fill(&mut data, self.background)?;

        let stride = canvas.width as usize * 4;
        let rows = self.placement.row_span();
        let start = rows.start as usize * stride;
        let end = rows.end as usize * stride;
        let covered = &mut data[start..end];

        match pool {
            Some(pool) => pool.install(|| {
                covered
                    .par_chunks_mut(stride)
                    .enumerate()
                    .for_each(|(i, row)| {
                        self.shade_row(images, uniforms, rows.start + i as u32, row)
                    });
            }),
            None => {
                for (i, row) in covered.chunks_mut(stride).enumerate() {
                    self.shade_row(images, uniforms, rows.start + i as u32, row);
                }
            }
        }

        Ok(FrameRGBA {
            width: canvas.width,
            height: canvas.height,
            data,
            premultiplied: true,
        })
    }

    fn shade_row(&self, images: &SourceImages, uniforms: Uniforms, y: u32, row: &mut [u8]) {
        let tone_map = self.effect.params().tone_map;
        for x in self.placement.col_span() {
            let Some(uv) = self.placement.uv_at(x, y) else {
                continue;
            };
            let rgba = tone_map.to_rgba8(self.effect.shade(images, uniforms, uv));
            let i = x as usize * 4;
            let dst = [row[i], row[i + 1], row[i + 2], row[i + 3]];
            row[i..i + 4].copy_from_slice(&over_straight(dst, rgba));
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
