//! depthscan renders a depth-driven scan effect on the CPU.
//!
//! A color image is sampled through a depth map that shifts its lookup along the pointer. A grid
//! of dots lights up wherever the depth sits near a moving scan position. The crate is organized
//! around three entry points:
//!
//! - [`DistortionEffect`] evaluates one pixel from the images and the per-frame [`Uniforms`]
//! - [`FrameDriver`] advances time and the pointer each tick and renders once images resolve
//! - [`render_to_sink`] streams an offline range of frames into a [`FrameSink`]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Image inputs: decoding, sampling and loading.
pub mod assets;
/// Per-pixel effect, blending and compositing.
pub mod effects;
/// Output sinks.
pub mod encode;
/// Time, pointer and the per-frame driver.
pub mod eval;
/// Shared value types, errors and scalar math.
pub mod foundation;
/// Surface layout, rasterization and range rendering.
pub mod render;
/// JSON scene boundary.
pub mod scene;

pub use crate::foundation::core::{
    Canvas, Fps, FrameIndex, FrameRange, Point, Rect, Rgba8Premul, Vec2,
};
pub use crate::foundation::error::{ScanError, ScanResult};

pub use crate::assets::store::SourceImages;
pub use crate::assets::texture::{ColorImage, DepthImage, SampleFilter};
pub use crate::effects::blend::{BlendMode, ToneMap};
pub use crate::effects::scan::{
    BrightnessVariation, DistortionEffect, EffectParams, ScanSample, Uniforms,
};
pub use crate::encode::png::PngSequenceSink;
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::eval::clock::{FrameClock, progress_at};
pub use crate::eval::driver::{FrameDriver, FrameUpdate, TickContext};
pub use crate::eval::pointer::{PointerPath, pointer_from_pixel};
pub use crate::render::backend::FrameRGBA;
pub use crate::render::cpu::CpuRasterizer;
pub use crate::render::layout::{Fit, Placement, SurfaceLayout};
pub use crate::render::pipeline::{
    RenderJob, RenderStats, RenderThreading, render_frame, render_frames,
    render_frames_with_stats, render_to_sink,
};
pub use crate::scene::config::SceneConfig;
