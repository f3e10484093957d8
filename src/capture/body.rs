//! Raw body persistence for single-part requests.

use std::fs::{File, OpenOptions};
use std::io::{self, Cursor, Seek, Write};
use std::path::Path;

use axum::body::Bytes;

use crate::error::CaptureError;

/// Echo and persist a raw request body.
///
/// Echoes to stdout first when enabled, then writes the bytes to
/// `destination` unless the path is empty. The buffered body must
/// rewind cleanly between the two steps; if it cannot, the copy can no
/// longer be trusted and the process aborts.
pub fn persist_body(destination: &Path, echo: bool, content: Bytes) -> Result<(), CaptureError> {
    let mut reader = Cursor::new(content);

    if echo {
        let mut stdout = io::stdout().lock();
        io::copy(&mut reader, &mut stdout)
            .and_then(|_| stdout.flush())
            .map_err(|source| CaptureError::io("echo", destination, source))?;
    }

    if destination.as_os_str().is_empty() {
        return Ok(());
    }

    if let Err(error) = reader.rewind() {
        tracing::error!(error = %error, "request body buffer lost its position");
        std::process::abort();
    }

    let mut file = create_destination(destination)?;
    file.write_all(reader.get_ref())
        .map_err(|source| CaptureError::io("write", destination, source))?;
    Ok(())
}

/// Create or truncate the destination with owner read/write, group and
/// other read permissions.
#[cfg(unix)]
fn create_destination(path: &Path) -> Result<File, CaptureError> {
    use std::os::unix::fs::OpenOptionsExt;

    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o644)
        .open(path)
        .map_err(|source| CaptureError::io("create", path, source))
}

#[cfg(not(unix))]
fn create_destination(path: &Path) -> Result<File, CaptureError> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|source| CaptureError::io("create", path, source))
}
