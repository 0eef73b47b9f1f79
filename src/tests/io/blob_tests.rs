//! Tests for memory and file-backed blobs.

use std::fs;
use std::io::{ErrorKind, Read};

use crate::io::Blob;

fn read_all(blob: &Blob) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    blob.open()?.read_to_end(&mut buf)?;
    Ok(buf)
}

#[test]
fn memory_blob_reads_back() {
    let blob = Blob::from_string("hello", "text/plain");
    assert_eq!(blob.size(), 5);
    assert!(!blob.is_empty());
    assert!(blob.path().is_none());
    assert_eq!(read_all(&blob).unwrap(), b"hello");
}

#[test]
fn blob_can_be_opened_repeatedly() {
    let blob = Blob::new(vec![1u8, 2, 3], "application/octet-stream");
    assert_eq!(read_all(&blob).unwrap(), vec![1, 2, 3]);
    assert_eq!(read_all(&blob).unwrap(), vec![1, 2, 3]);
}

#[test]
fn media_type_is_lowercased() {
    let blob = Blob::from_string("x", "Text/HTML");
    assert_eq!(blob.media_type(), "text/html");
}

#[test]
fn media_type_with_control_bytes_is_unknown() {
    let blob = Blob::from_string("x", "text/\nplain");
    assert_eq!(blob.media_type(), "");
}

#[test]
fn charset_parameter_is_extracted() {
    let blob = Blob::from_string("x", "text/plain; charset=\"UTF-16LE\"");
    assert_eq!(blob.charset(), Some("utf-16le"));

    let blob = Blob::from_string("x", "text/plain");
    assert_eq!(blob.charset(), None);
}

#[test]
fn conversions_pick_default_types() {
    let blob = Blob::from("foo");
    assert_eq!(blob.media_type(), "text/plain;charset=utf-8");
    assert_eq!(blob.charset(), Some("utf-8"));

    let blob = Blob::from(vec![0u8; 4]);
    assert_eq!(blob.media_type(), "");
    assert_eq!(blob.size(), 4);
}

#[test]
fn empty_blob() {
    let blob = Blob::new(Vec::<u8>::new(), "");
    assert!(blob.is_empty());
    assert!(read_all(&blob).unwrap().is_empty());
}

#[test]
fn with_name_sets_name() {
    let blob = Blob::from("foo").with_name("foo.txt");
    assert_eq!(blob.name(), Some("foo.txt"));
}

#[tokio::test]
async fn file_blob_snapshots_length_and_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    fs::write(&path, b"hello world").unwrap();

    let blob = Blob::from_path(&path, "text/plain").await.unwrap();
    assert_eq!(blob.size(), 11);
    assert_eq!(blob.name(), Some("notes.txt"));
    assert_eq!(blob.path(), Some(path.as_path()));
    assert_eq!(read_all(&blob).unwrap(), b"hello world");
}

#[tokio::test]
async fn file_blob_fails_after_file_changes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    fs::write(&path, b"hello").unwrap();

    let blob = Blob::from_path(&path, "text/plain").await.unwrap();
    fs::write(&path, b"hello again").unwrap();

    let err = read_all(&blob).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidData);
}

#[tokio::test]
async fn file_blob_fails_after_file_removed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    fs::write(&path, b"hello").unwrap();

    let blob = Blob::from_path(&path, "text/plain").await.unwrap();
    fs::remove_file(&path).unwrap();

    let err = read_all(&blob).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn from_path_rejects_directories_and_missing_files() {
    let dir = tempfile::tempdir().unwrap();

    let err = Blob::from_path(dir.path(), "").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);

    let err = Blob::from_path(dir.path().join("missing"), "").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}
