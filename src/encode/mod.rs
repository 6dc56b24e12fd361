/// PNG output.
pub mod png;
/// Frame sink contract.
pub mod sink;
