//! Body persistence subsystem.
//!
//! # Data Flow
//! ```text
//! multipart submission
//!     → archive.rs (ZIP archive at the destination path)
//!
//! raw body
//!     → body.rs (echo to stdout, plain file at the destination path)
//! ```
//!
//! # Design Decisions
//! - Routines are synchronous; the handler bridges them onto the
//!   blocking pool
//! - Partial archives are finalized on error so entries completed
//!   before the failure stay readable

pub mod archive;
pub mod body;

pub use archive::{write_archive, MultipartSubmission, UploadedFile, FORM_DATA_ENTRY};
pub use body::persist_body;
