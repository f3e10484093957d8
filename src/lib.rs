//! Single-shot HTTP request recorder.
//!
//! Binds a listener, records the first request it receives (the raw
//! body as a plain file, or each part of a multipart submission as a
//! ZIP archive), answers with a configured status code, and signals the
//! process to shut down.

pub mod capture;
pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;

pub use config::CaptureConfig;
pub use error::CaptureError;
pub use http::CaptureServer;
pub use lifecycle::CompletionSignal;
