/// Convenience result type used across depthscan.
pub type ScanResult<T> = Result<T, ScanError>;

/// Top-level error taxonomy used by renderer APIs.
///
/// Per-pixel effect evaluation never fails; errors surface only at construction, loading and
/// output boundaries.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Invalid user-provided configuration or parameters.
    #[error("validation error: {0}")]
    Validation(String),

    /// Image inputs that could not be read, decoded or accepted.
    #[error("asset error: {0}")]
    Asset(String),

    /// Failures while rasterizing or writing frames.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScanError {
    /// Build a [`ScanError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ScanError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`ScanError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`ScanError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
