/// Convenience result type used across Syntropy.
pub type SyntropyResult<T> = Result<T, SyntropyError>;

/// Every failure a library call can report.
#[derive(thiserror::Error, Debug)]
pub enum SyntropyError {
    /// Invalid user-provided values, configuration or geometry.
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid timing curves or animation scripts.
    #[error("animation error: {0}")]
    Animation(String),

    /// Errors while rasterizing a scene.
    #[error("render error: {0}")]
    Render(String),

    /// Errors while writing images or video.
    #[error("encode error: {0}")]
    Encode(String),

    /// Malformed config or cue JSON.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, carried with its source chain.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SyntropyError {
    /// Build a [`SyntropyError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SyntropyError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`SyntropyError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`SyntropyError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`SyntropyError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
