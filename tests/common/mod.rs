//! Shared utilities for end-to-end capture tests.

use std::net::SocketAddr;

use reqsink::config::CaptureConfig;
use reqsink::http::CaptureServer;
use reqsink::lifecycle::CompletionReceiver;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// A capture server running on an ephemeral port.
pub struct TestServer {
    pub addr: SocketAddr,
    /// Resolves with the outcome of the first captured request.
    pub done: CompletionReceiver,
    // Keeps the listener alive; dropping it triggers graceful shutdown.
    _release: oneshot::Sender<()>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

/// Start a capture server with the given configuration.
pub async fn start_capture(config: CaptureConfig) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let (server, done) = CaptureServer::new(config);
    let (release, released) = oneshot::channel();
    tokio::spawn(async move {
        let _ = server.run(listener, released).await;
    });

    TestServer {
        addr,
        done,
        _release: release,
    }
}
