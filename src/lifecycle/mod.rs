//! Lifecycle management.
//!
//! # Data Flow
//! ```text
//! handler finishes one request
//!     → shutdown.rs (one-shot completion slot)
//!     → process shell (report outcome, pick exit code, tear down listener)
//! ```

pub mod shutdown;

pub use shutdown::{CaptureOutcome, CompletionReceiver, CompletionSignal};
