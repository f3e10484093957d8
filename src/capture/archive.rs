//! ZIP archive output for multipart submissions.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use axum::body::Bytes;
use zip::write::FileOptions;
use zip::ZipWriter;

use crate::error::CaptureError;

/// Name of the archive entry holding serialized form fields.
pub const FORM_DATA_ENTRY: &str = "form-data.txt";

/// One uploaded file from a multipart submission.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Original filename as sent by the client.
    pub filename: String,
    /// Raw file content.
    pub content: Bytes,
}

/// An in-memory view of one multipart form submission.
///
/// Request-scoped: built while draining the multipart stream, consumed
/// by [`write_archive`], never persisted as such.
#[derive(Debug, Default)]
pub struct MultipartSubmission {
    /// Uploaded files by field name, in submission order within a field.
    pub files: BTreeMap<String, Vec<UploadedFile>>,
    /// Text values by field name, in submission order within a field.
    pub values: BTreeMap<String, Vec<String>>,
}

impl MultipartSubmission {
    /// Append an uploaded file under the given field name.
    pub fn add_file(&mut self, field: impl Into<String>, file: UploadedFile) {
        self.files.entry(field.into()).or_default().push(file);
    }

    /// Append a text value under the given field name.
    pub fn add_value(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.values.entry(field.into()).or_default().push(value.into());
    }
}

/// Write a multipart submission as a ZIP archive at `destination`.
///
/// Creates or truncates the destination file; creation at an empty path
/// fails, which is the de facto check for a missing destination. Two
/// uploads with the same filename both land in the archive and name
/// lookup resolves to the later one. Entries completed before an error
/// remain readable: the writer finalizes on every exit path.
pub fn write_archive(
    destination: &Path,
    submission: &MultipartSubmission,
    echo: bool,
) -> Result<(), CaptureError> {
    let file = File::create(destination)
        .map_err(|source| CaptureError::io("create", destination, source))?;
    let mut archive = ZipWriter::new(file);
    let options = FileOptions::default();

    for files in submission.files.values() {
        for upload in files {
            if echo {
                println!("received file: {}", upload.filename);
            }
            archive
                .start_file(upload.filename.as_str(), options)
                .map_err(|source| CaptureError::archive(upload.filename.clone(), source))?;
            archive
                .write_all(&upload.content)
                .map_err(|source| CaptureError::io("write", destination, source))?;
        }
    }

    // One entry per field, all under the same name: the last field's
    // write shadows the earlier ones when the archive is read back.
    for (field, values) in &submission.values {
        let line = form_data_line(field, values);
        if echo {
            print!("received form data: {line}");
        }
        archive
            .start_file(FORM_DATA_ENTRY, options)
            .map_err(|source| CaptureError::archive(FORM_DATA_ENTRY, source))?;
        archive
            .write_all(line.as_bytes())
            .map_err(|source| CaptureError::io("write", destination, source))?;
    }

    archive
        .finish()
        .map_err(|source| CaptureError::archive("finalize", source))?;
    Ok(())
}

/// Render one form field as a `name = [values]` line.
fn form_data_line(field: &str, values: &[String]) -> String {
    format!("{} = [{}]\n", field, values.join(" "))
}
