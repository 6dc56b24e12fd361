/// Elapsed time and the scan progress curve.
pub mod clock;
/// Per-frame updates and the image readiness gate.
pub mod driver;
/// Pointer sources.
pub mod pointer;
