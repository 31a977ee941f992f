//! Error types for reframing operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for reframing operations.
pub type ReframeResult<T> = Result<T, ReframeError>;

/// Errors that can occur while planning a reframe.
///
/// Algorithmic conditions (no face found, model load failure, degenerate
/// detector output) are absorbed into the fallback path and never surface
/// here; only resource-level failures from the decode collaborator do.
#[derive(Debug, Error)]
pub enum ReframeError {
    #[error("frame read failed at {time:.3}s: {message}")]
    FrameRead { time: f64, message: String },

    #[error("source reports invalid dimensions {width}x{height}")]
    InvalidSource { width: u32, height: u32 },

    #[error("source reports non-positive duration {0}")]
    InvalidDuration(f64),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("model not found: {0}")]
    ModelNotFound(PathBuf),

    #[error("failed to load cascade model {path}: {message}")]
    ModelLoad { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReframeError {
    /// Create a frame read failure error.
    pub fn frame_read(time: f64, message: impl Into<String>) -> Self {
        Self::FrameRead {
            time,
            message: message.into(),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}
