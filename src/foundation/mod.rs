/// Value types shared across the renderer (frames, rates, colors).
pub mod core;
/// Error taxonomy.
pub mod error;
/// Scalar helpers with GLSL semantics.
pub mod math;
