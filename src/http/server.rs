//! HTTP server setup for the capture listener.
//!
//! # Responsibilities
//! - Build the Axum router with the catch-all capture route
//! - Wire up middleware (trace, timeout, body limit)
//! - Serve the listener until the process shell releases it

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::DefaultBodyLimit, routing::any, Router};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::CaptureConfig;
use crate::http::handler::{self, CaptureState, MULTIPART_MEMORY_LIMIT};
use crate::lifecycle::{CompletionReceiver, CompletionSignal};

/// Read/write deadline for the one expected request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP server wrapping the capture route.
pub struct CaptureServer {
    router: Router,
}

impl CaptureServer {
    /// Create a capture server and the receiver its handler resolves.
    pub fn new(config: CaptureConfig) -> (Self, CompletionReceiver) {
        let (signal, done) = CompletionSignal::new();
        let state = Arc::new(CaptureState { config, signal });
        let router = Self::build_router(state);
        (Self { router }, done)
    }

    /// Build the Axum router with all middleware layers. Any method on
    /// any path reaches the capture handler.
    fn build_router(state: Arc<CaptureState>) -> Router {
        Router::new()
            .route("/{*path}", any(handler::capture))
            .route("/", any(handler::capture))
            .with_state(state)
            .layer(DefaultBodyLimit::max(MULTIPART_MEMORY_LIMIT))
            .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
            .layer(TraceLayer::new_for_http())
    }

    /// Serve the capture route until `release` resolves.
    ///
    /// In-flight connections are drained before this returns, so the
    /// response to the captured request reaches the client before the
    /// listener goes away.
    pub async fn run(
        self,
        listener: TcpListener,
        release: oneshot::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "capture server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = release.await;
            })
            .await?;

        tracing::info!("capture server stopped");
        Ok(())
    }
}
