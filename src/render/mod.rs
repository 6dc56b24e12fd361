/// Rendered frame type.
pub mod backend;
/// CPU rasterizer.
pub mod cpu;
/// Placement of the effect surface in the viewport.
pub mod layout;
/// Single-frame and range rendering.
pub mod pipeline;
