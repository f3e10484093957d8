//! Command-line interface definition.

use axum::http::StatusCode;
use clap::Parser;

/// Record a single HTTP request to disk.
#[derive(Debug, Parser)]
#[command(name = "reqsink", about = "Record a single HTTP request to disk", long_about = None)]
pub struct Cli {
    /// Echo captured content to stdout.
    #[arg(
        short,
        long,
        default_value_t = true,
        default_missing_value = "true",
        num_args = 0..=1,
        require_equals = true,
        action = clap::ArgAction::Set
    )]
    pub verbose: bool,

    /// Address the listener binds to. A leading-colon form such as
    /// ":8080" binds all interfaces.
    #[arg(short, long, default_value = ":8080")]
    pub address: String,

    /// HTTP status code returned for every request.
    #[arg(short, long, default_value = "200", value_parser = parse_status)]
    pub status: StatusCode,

    /// Destination file (raw bodies) or archive (multipart submissions).
    /// An empty path captures to stdout only.
    pub path: String,
}

impl Cli {
    /// Bind address with the leading-colon shorthand expanded.
    pub fn bind_address(&self) -> String {
        if self.address.starts_with(':') {
            format!("0.0.0.0{}", self.address)
        } else {
            self.address.clone()
        }
    }
}

fn parse_status(raw: &str) -> Result<StatusCode, String> {
    let code: u16 = raw
        .parse()
        .map_err(|_| format!("`{raw}` is not a status code"))?;
    StatusCode::from_u16(code).map_err(|_| format!("`{code}` is outside the valid status range"))
}
