//! End-to-end capture of multipart submissions.

mod common;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use axum::http::StatusCode;
use reqsink::capture::FORM_DATA_ENTRY;
use reqsink::config::CaptureConfig;
use reqwest::multipart::{Form, Part};

fn open_archive(path: &Path) -> zip::ZipArchive<File> {
    zip::ZipArchive::new(File::open(path).unwrap()).unwrap()
}

fn read_entry(archive: &mut zip::ZipArchive<File>, name: &str) -> Vec<u8> {
    let mut content = Vec::new();
    archive
        .by_name(name)
        .unwrap()
        .read_to_end(&mut content)
        .unwrap();
    content
}

#[tokio::test]
async fn test_archives_each_uploaded_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.zip");

    let server = common::start_capture(CaptureConfig::new(&out, false, StatusCode::OK)).await;

    let form = Form::new()
        .part("one", Part::bytes(b"alpha".to_vec()).file_name("one.txt"))
        .part("two", Part::bytes(b"beta".to_vec()).file_name("two.txt"));
    let response = reqwest::Client::new()
        .post(server.url())
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    server.done.await.unwrap().unwrap();

    let mut archive = open_archive(&out);
    assert_eq!(archive.len(), 2);
    assert_eq!(read_entry(&mut archive, "one.txt"), b"alpha");
    assert_eq!(read_entry(&mut archive, "two.txt"), b"beta");
}

#[tokio::test]
async fn test_duplicate_filenames_last_write_wins() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.zip");

    let server = common::start_capture(CaptureConfig::new(&out, false, StatusCode::OK)).await;

    let form = Form::new()
        .part("file", Part::bytes(b"first".to_vec()).file_name("dup.txt"))
        .part("file", Part::bytes(b"second".to_vec()).file_name("dup.txt"));
    let response = reqwest::Client::new()
        .post(server.url())
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    server.done.await.unwrap().unwrap();

    // Both uploads land in the archive; name lookup resolves to the
    // later one.
    let mut archive = open_archive(&out);
    assert_eq!(archive.len(), 2);
    assert_eq!(read_entry(&mut archive, "dup.txt"), b"second");
}

#[tokio::test]
async fn test_form_fields_collapse_to_last_entry() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.zip");

    let server = common::start_capture(CaptureConfig::new(&out, false, StatusCode::OK)).await;

    let form = Form::new().text("a", "1").text("b", "2");
    let response = reqwest::Client::new()
        .post(server.url())
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    server.done.await.unwrap().unwrap();

    // One form-data entry is written per field, all under the same
    // name, so only the last-processed field survives name lookup.
    let mut archive = open_archive(&out);
    assert_eq!(archive.len(), 2);
    assert_eq!(read_entry(&mut archive, FORM_DATA_ENTRY), b"b = [2]\n");
}

#[tokio::test]
async fn test_repeated_field_values_render_in_one_line() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.zip");

    let server = common::start_capture(CaptureConfig::new(&out, false, StatusCode::OK)).await;

    let form = Form::new().text("tags", "a").text("tags", "b");
    let response = reqwest::Client::new()
        .post(server.url())
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    server.done.await.unwrap().unwrap();

    let mut archive = open_archive(&out);
    assert_eq!(read_entry(&mut archive, FORM_DATA_ENTRY), b"tags = [a b]\n");
}

#[tokio::test]
async fn test_files_and_fields_combined() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.zip");

    // Echo enabled, the default for the CLI.
    let server = common::start_capture(CaptureConfig::new(&out, true, StatusCode::OK)).await;

    let form = Form::new()
        .part("file", Part::bytes(b"data123".to_vec()).file_name("report.txt"))
        .text("name", "alice");
    let response = reqwest::Client::new()
        .post(server.url())
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    server.done.await.unwrap().unwrap();

    let mut archive = open_archive(&out);
    assert_eq!(archive.len(), 2);
    assert_eq!(read_entry(&mut archive, "report.txt"), b"data123");
    assert_eq!(read_entry(&mut archive, FORM_DATA_ENTRY), b"name = [alice]\n");
}

#[tokio::test]
async fn test_empty_form_still_writes_an_archive() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.zip");

    let server = common::start_capture(CaptureConfig::new(&out, false, StatusCode::OK)).await;

    let response = reqwest::Client::new()
        .post(server.url())
        .multipart(Form::new())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    server.done.await.unwrap().unwrap();

    let archive = open_archive(&out);
    assert_eq!(archive.len(), 0);
}

#[tokio::test]
async fn test_status_honored_when_archive_creation_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("missing").join("out.zip");

    let server =
        common::start_capture(CaptureConfig::new(&out, false, StatusCode::BAD_GATEWAY)).await;

    let form = Form::new().part("file", Part::bytes(b"x".to_vec()).file_name("a.txt"));
    let response = reqwest::Client::new()
        .post(server.url())
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 502);
    assert!(server.done.await.unwrap().is_err());
    assert!(!out.exists());
}
