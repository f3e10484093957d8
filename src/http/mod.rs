//! HTTP subsystem: listener setup and the capture route.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, graceful shutdown)
//!     → handler.rs (classify body, persist, respond)
//!     → completion signal → process shell
//! ```

pub mod handler;
pub mod server;

pub use handler::{CaptureState, MULTIPART_MEMORY_LIMIT};
pub use server::CaptureServer;
