//! Error taxonomy for the capture pipeline.

use std::io;
use std::path::PathBuf;

use axum::extract::multipart::{MultipartError, MultipartRejection};
use thiserror::Error;
use zip::result::ZipError;

/// Errors that can occur while capturing a request.
///
/// All of these surface through the completion signal and the process
/// exit code; the HTTP client only ever sees the configured status.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// A filesystem operation on the destination failed.
    #[error("{operation} {path:?}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The request body could not be read in full.
    #[error("failed to read request body: {0}")]
    Body(#[from] axum::Error),

    /// The request announced a multipart body the parser would not accept.
    #[error("malformed multipart request: {0}")]
    Malformed(#[from] MultipartRejection),

    /// A multipart part could not be read.
    #[error("failed to read multipart form: {0}")]
    Multipart(#[from] MultipartError),

    /// An archive entry could not be created or finalized.
    #[error("archive {context}: {source}")]
    Archive {
        context: String,
        #[source]
        source: ZipError,
    },
}

impl CaptureError {
    /// I/O failure tagged with the operation and path that produced it.
    pub fn io(operation: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    /// Archive failure tagged with the entry or stage that produced it.
    pub fn archive(context: impl Into<String>, source: ZipError) -> Self {
        Self::Archive {
            context: context.into(),
            source,
        }
    }
}
