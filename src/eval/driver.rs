//! Per-frame driver for interactive use.
//!
//! Each `tick` runs the registered [`FrameUpdate`]s in order; the built-in pair writes the scan
//! progress and the pointer. `render` then evaluates the effect with the resulting [`Uniforms`],
//! or skips the frame while the source images are still unresolved.

use std::sync::Arc;

use crate::{
    assets::store::SourceImages,
    effects::scan::Uniforms,
    eval::clock::FrameClock,
    eval::pointer::PointerPath,
    foundation::core::Vec2,
    foundation::error::ScanResult,
    render::backend::FrameRGBA,
    render::cpu::CpuRasterizer,
};

/// Inputs available to every update during one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickContext {
    /// Seconds elapsed since the driver started, including this tick.
    pub elapsed_secs: f64,
    /// Latest live pointer sample, already normalized, if the host has one.
    pub pointer_sample: Option<Vec2>,
}

/// A callback run once per tick that writes part of the uniforms.
pub trait FrameUpdate: Send {
    /// Update `uniforms` for the tick described by `ctx`.
    fn update(&mut self, ctx: &TickContext, uniforms: &mut Uniforms);
}

/// Writes `progress` from elapsed time.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProgressUpdate;

impl FrameUpdate for ProgressUpdate {
    fn update(&mut self, ctx: &TickContext, uniforms: &mut Uniforms) {
        uniforms.progress = FrameClock::at_secs(ctx.elapsed_secs).progress();
    }
}

/// Writes `pointer` from the live sample, falling back to a scripted path.
///
/// Without either, the previous pointer is kept.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointerUpdate {
    /// Scripted pointer used when no live sample arrives.
    pub path: Option<PointerPath>,
}

impl FrameUpdate for PointerUpdate {
    fn update(&mut self, ctx: &TickContext, uniforms: &mut Uniforms) {
        if let Some(p) = ctx.pointer_sample {
            uniforms.pointer = p;
        } else if let Some(path) = &self.path {
            uniforms.pointer = path.sample(ctx.elapsed_secs);
        }
    }
}

/// Owns the clock, the uniforms and the image readiness gate.
pub struct FrameDriver {
    clock: FrameClock,
    uniforms: Uniforms,
    updates: Vec<Box<dyn FrameUpdate>>,
    images: Option<Arc<SourceImages>>,
    rasterizer: CpuRasterizer,
    frames_rendered: u64,
    frames_skipped: u64,
}

impl FrameDriver {
    /// A driver with the progress and pointer updates registered.
    pub fn new(rasterizer: CpuRasterizer, pointer_path: Option<PointerPath>) -> Self {
        let mut driver = Self {
            clock: FrameClock::new(),
            uniforms: Uniforms::default(),
            updates: Vec::new(),
            images: None,
            rasterizer,
            frames_rendered: 0,
            frames_skipped: 0,
        };
        driver.register(ProgressUpdate);
        driver.register(PointerUpdate { path: pointer_path });
        driver
    }

    /// Append an update; updates run in registration order.
    pub fn register(&mut self, update: impl FrameUpdate + 'static) {
        self.updates.push(Box::new(update));
    }

    /// Resolve the image precondition. Frames render from the next `render` on.
    pub fn attach_images(&mut self, images: Arc<SourceImages>) {
        self.images = Some(images);
    }

    /// Whether both source images are available.
    pub fn is_ready(&self) -> bool {
        self.images.is_some()
    }

    /// Advance time by `dt_secs` and run every registered update.
    pub fn tick(&mut self, dt_secs: f64, pointer_sample: Option<Vec2>) {
        self.clock.advance(dt_secs);
        let ctx = TickContext {
            elapsed_secs: self.clock.elapsed_secs(),
            pointer_sample,
        };
        for update in &mut self.updates {
            update.update(&ctx, &mut self.uniforms);
        }
    }

    /// Uniforms as of the last tick.
    pub fn uniforms(&self) -> Uniforms {
        self.uniforms
    }

    /// Seconds accumulated over all ticks.
    pub fn elapsed_secs(&self) -> f64 {
        self.clock.elapsed_secs()
    }

    /// Render with the current uniforms, or `Ok(None)` while images are unresolved.
    pub fn render(&mut self) -> ScanResult<Option<FrameRGBA>> {
        let Some(images) = self.images.as_deref() else {
            self.frames_skipped += 1;
            tracing::debug!(
                elapsed_secs = self.clock.elapsed_secs(),
                skipped = self.frames_skipped,
                "source images unresolved, frame skipped"
            );
            return Ok(None);
        };
        let frame = self.rasterizer.render(images, self.uniforms, None)?;
        self.frames_rendered += 1;
        Ok(Some(frame))
    }

    /// `tick` followed by `render`.
    pub fn step(
        &mut self,
        dt_secs: f64,
        pointer_sample: Option<Vec2>,
    ) -> ScanResult<Option<FrameRGBA>> {
        self.tick(dt_secs, pointer_sample);
        self.render()
    }

    /// `(rendered, skipped)` frame counts.
    pub fn frame_counts(&self) -> (u64, u64) {
        (self.frames_rendered, self.frames_skipped)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/driver.rs"]
mod tests;
