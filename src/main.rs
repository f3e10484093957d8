//! Single-shot HTTP request recorder.
//!
//! Process shell around the capture server: parses the CLI, binds the
//! listener, waits for the first request to complete, and maps the
//! outcome to an exit code.

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reqsink::cli::Cli;
use reqsink::config::CaptureConfig;
use reqsink::http::CaptureServer;

#[tokio::main]
async fn main() {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reqsink=info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    std::process::exit(run(cli).await);
}

/// Run the capture server to completion.
///
/// Exit codes: 0 clean shutdown after a successful request, 1 request
/// handling error, 2 listener or shutdown error.
async fn run(cli: Cli) -> i32 {
    let address = cli.bind_address();
    let config = CaptureConfig::new(cli.path, cli.verbose, cli.status);

    let listener = match TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(error) => {
            eprintln!("error: {error}");
            return 2;
        }
    };

    let (server, done) = CaptureServer::new(config);
    let (release, released) = oneshot::channel();
    let serve = tokio::spawn(server.run(listener, released));

    // One request: report its outcome before tearing the listener down.
    match done.await {
        Ok(Ok(())) => {}
        Ok(Err(error)) => {
            eprintln!("error: {error}");
            return 1;
        }
        Err(_) => {
            eprintln!("error: capture server exited before handling a request");
            return 2;
        }
    }

    let _ = release.send(());
    match serve.await {
        Ok(Ok(())) => 0,
        Ok(Err(error)) => {
            eprintln!("error: {error}");
            2
        }
        Err(error) => {
            eprintln!("error: {error}");
            2
        }
    }
}
