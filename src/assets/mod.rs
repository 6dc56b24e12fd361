/// Encoded image decoding.
pub mod decode;
/// Loading the resolved image pair.
pub mod store;
/// Sampled color and depth images.
pub mod texture;
