//! Request capture handler.
//!
//! # Responsibilities
//! - Classify the inbound request (multipart vs. single-part)
//! - Dispatch to the matching persistence routine
//! - Answer with the configured status code, success or failure
//! - Resolve the completion signal once per request

use std::sync::Arc;

use axum::{
    body::{self, Body},
    extract::{FromRequest, Multipart, State},
    http::{header, HeaderMap, Request},
    response::{IntoResponse, Response},
};

use crate::capture::{self, MultipartSubmission, UploadedFile};
use crate::config::CaptureConfig;
use crate::error::CaptureError;
use crate::lifecycle::CompletionSignal;

/// Maximum amount of memory used to buffer a multipart submission.
pub const MULTIPART_MEMORY_LIMIT: usize = 32 * 1024 * 1024;

/// Shared state for the capture route.
pub struct CaptureState {
    /// Immutable capture configuration.
    pub config: CaptureConfig,
    /// Completion slot resolved by the first handled request.
    pub signal: CompletionSignal,
}

/// Handle one inbound request.
///
/// Persistence failures never reach the HTTP client: the configured
/// status is returned either way and the error travels through the
/// completion signal to the process shell.
pub async fn capture(
    State(state): State<Arc<CaptureState>>,
    request: Request<Body>,
) -> Response {
    let outcome = if is_multipart(request.headers()) {
        capture_multipart(&state.config, request).await
    } else {
        capture_single(&state.config, request).await
    };

    if let Err(error) = &outcome {
        tracing::error!(error = %error, "request capture failed");
    }

    // Status first, then the signal: the shell tears the listener down
    // only after the signal resolves, so the response drains to the
    // client before shutdown.
    let response = state.config.status.into_response();
    state.signal.complete(outcome);
    response
}

/// True when the request carries a structurally usable multipart body:
/// a `multipart/form-data` content type with a boundary parameter.
/// Anything else takes the single-part path.
fn is_multipart(headers: &HeaderMap) -> bool {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");

    let mut parts = content_type.split(';');
    let mime = parts.next().unwrap_or("").trim();
    mime.eq_ignore_ascii_case("multipart/form-data")
        && parts.any(|param| param.trim().to_ascii_lowercase().starts_with("boundary="))
}

/// Capture a multipart submission into a ZIP archive at the destination.
async fn capture_multipart(
    config: &CaptureConfig,
    request: Request<Body>,
) -> Result<(), CaptureError> {
    let multipart = Multipart::from_request(request, &()).await?;
    let submission = collect_submission(multipart).await?;

    let destination = config.destination.clone();
    let echo = config.echo;
    run_blocking(move || capture::write_archive(&destination, &submission, echo)).await
}

/// Capture a raw request body to the destination file.
async fn capture_single(
    config: &CaptureConfig,
    request: Request<Body>,
) -> Result<(), CaptureError> {
    let content = body::to_bytes(request.into_body(), usize::MAX).await?;

    let destination = config.destination.clone();
    let echo = config.echo;
    run_blocking(move || capture::persist_body(&destination, echo, content)).await
}

/// Drain the multipart stream into an in-memory submission.
async fn collect_submission(mut multipart: Multipart) -> Result<MultipartSubmission, CaptureError> {
    let mut submission = MultipartSubmission::default();
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match field.file_name().map(str::to_string) {
            Some(filename) => {
                let content = field.bytes().await?;
                submission.add_file(name, UploadedFile { filename, content });
            }
            None => submission.add_value(name, field.text().await?),
        }
    }
    Ok(submission)
}

/// Run a persistence routine on the blocking pool.
///
/// A panic inside the routine is a broken invariant, not a request
/// error; resurface it instead of downgrading it.
async fn run_blocking<F>(work: F) -> Result<(), CaptureError>
where
    F: FnOnce() -> Result<(), CaptureError> + Send + 'static,
{
    match tokio::task::spawn_blocking(work).await {
        Ok(outcome) => outcome,
        Err(join) => std::panic::resume_unwind(join.into_panic()),
    }
}
