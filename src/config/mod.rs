//! Capture configuration.
//!
//! # Design Decisions
//! - Config is immutable once constructed; the handler only reads it
//! - No validation at construction: an unusable destination surfaces as
//!   an I/O error when the first matching request arrives

use std::path::PathBuf;

use axum::http::StatusCode;

/// Immutable configuration for the capture handler.
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Destination file or archive path. An empty path disables
    /// persistence for single-part bodies (echo-only mode).
    pub destination: PathBuf,

    /// Mirror captured content to stdout.
    pub echo: bool,

    /// Status code returned for every request, success or failure.
    pub status: StatusCode,
}

impl CaptureConfig {
    /// Capture configuration from raw startup parameters.
    pub fn new(destination: impl Into<PathBuf>, echo: bool, status: StatusCode) -> Self {
        Self {
            destination: destination.into(),
            echo,
            status,
        }
    }
}
