//! Error handling for capture sessions.

use thiserror::Error;

/// Result type for capture operations.
pub type Result<T> = std::result::Result<T, CaptureError>;

/// Errors that can occur when driving a capture session.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// Rejected before any device interaction.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The device could not be opened.
    #[error("failed to open device: {0}")]
    OpenFailed(String),

    /// Unrecoverable device failure while grabbing. Transient grab failures
    /// are not errors; see [`crate::device::DepthCamera::grab`].
    #[error("failed to grab frame: {0}")]
    GrabFailed(String),

    /// The configured retry budget ran out before a frame slot produced a
    /// valid center measurement.
    #[error("no valid measurement after {attempts} grabs for one frame slot")]
    RetriesExhausted { attempts: u32 },

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),
}
