/// Blend modes and output tone mapping.
pub mod blend;
/// RGBA8 compositing helpers.
pub mod composite;
/// The depth-driven scan effect.
pub mod scan;
