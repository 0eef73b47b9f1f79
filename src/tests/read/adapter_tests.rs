//! Per-representation adapter behavior.

use std::sync::Arc;

use crate::config::{ReadAsTextOptions, ReadOptions};
use crate::error::{ReadError, ResultKind};
use crate::read::{read_as_array_buffer, read_as_binary_string, read_as_data_url, read_as_text};
use crate::reader::{ArrayBuffer, EventKind, ReadMethod, ReadResult};
use crate::tests::support::{
    CallLog, ScriptedReader, Step, foo_blob, init_logger, not_readable,
};

fn text(value: &str) -> ReadResult {
    ReadResult::Text(value.to_string())
}

fn buffer(value: &[u8]) -> ReadResult {
    ReadResult::ArrayBuffer(ArrayBuffer::from(value))
}

#[tokio::test]
async fn array_buffer_resolves_with_buffer() {
    init_logger();
    let reader = Arc::new(ScriptedReader::succeeding(buffer(b"foo")));
    let log = CallLog::default();

    let value = read_as_array_buffer(&foo_blob(), log.options().with_reader(reader.clone()))
        .await
        .unwrap();

    assert_eq!(value.byte_length(), 3);
    assert_eq!(log.count("load:"), 1);
    assert_eq!(reader.methods(), vec![ReadMethod::ArrayBuffer]);
}

#[tokio::test]
async fn array_buffer_rejects_string_result() {
    let reader = Arc::new(ScriptedReader::succeeding(text("foo")));
    let log = CallLog::default();

    let err = read_as_array_buffer(&foo_blob(), log.options().with_reader(reader.clone()))
        .await
        .unwrap_err();

    assert_eq!(err, ReadError::UnexpectedResult(ResultKind::ArrayBuffer));
    assert_eq!(err.to_string(), "Expected ArrayBuffer result from reader");
    assert_eq!(log.count("load:"), 0);
    assert_eq!(log.count("loadend:none"), 1);
}

#[tokio::test]
async fn binary_string_resolves_with_string() {
    let reader = Arc::new(ScriptedReader::succeeding(text("foo")));

    let value = read_as_binary_string(
        &foo_blob(),
        ReadOptions::default().with_reader(reader.clone()),
    )
    .await
    .unwrap();

    assert_eq!(value, "foo");
    assert_eq!(reader.methods(), vec![ReadMethod::BinaryString]);
}

#[tokio::test]
async fn binary_string_rejects_buffer_result() {
    let reader = Arc::new(ScriptedReader::succeeding(buffer(b"foo")));

    let err = read_as_binary_string(&foo_blob(), ReadOptions::default().with_reader(reader))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Expected string result from reader");
}

#[tokio::test]
async fn data_url_resolves_with_string() {
    let reader = Arc::new(ScriptedReader::succeeding(text(
        "data:text/plain;base64,Zm9v",
    )));
    let log = CallLog::default();

    let value = read_as_data_url(&foo_blob(), log.options().with_reader(reader.clone()))
        .await
        .unwrap();

    assert_eq!(value, "data:text/plain;base64,Zm9v");
    assert_eq!(
        log.entries(),
        vec![
            "loadstart",
            "progress",
            "load:\"data:text/plain;base64,Zm9v\"",
            "loadend:some",
        ]
    );
    assert_eq!(reader.methods(), vec![ReadMethod::DataUrl]);
}

#[tokio::test]
async fn data_url_rejects_empty_slot() {
    let reader = Arc::new(ScriptedReader::new(vec![
        Step::Emit(EventKind::Load),
        Step::Emit(EventKind::LoadEnd),
    ]));

    let err = read_as_data_url(&foo_blob(), ReadOptions::default().with_reader(reader))
        .await
        .unwrap_err();

    assert_eq!(err, ReadError::UnexpectedResult(ResultKind::Text));
}

#[tokio::test]
async fn text_resolves_with_string() {
    let reader = Arc::new(ScriptedReader::succeeding(text("foo")));

    let value = read_as_text(&foo_blob(), ReadOptions::default().with_reader(reader.clone()))
        .await
        .unwrap();

    assert_eq!(value, "foo");
    assert_eq!(reader.methods(), vec![ReadMethod::Text { encoding: None }]);
}

#[tokio::test]
async fn text_forwards_encoding_label() {
    let reader = Arc::new(ScriptedReader::succeeding(text("foo")));

    read_as_text(
        &foo_blob(),
        ReadOptions::<String>::default()
            .with_reader(reader.clone())
            .with_encoding("latin1"),
    )
    .await
    .unwrap();

    let options = ReadAsTextOptions::new().with_encoding("utf-16le");
    let options = ReadAsTextOptions {
        options: ReadOptions::default().with_reader(reader.clone()),
        ..options
    };
    read_as_text(&foo_blob(), options).await.unwrap();

    assert_eq!(
        reader.methods(),
        vec![
            ReadMethod::Text {
                encoding: Some("latin1".into())
            },
            ReadMethod::Text {
                encoding: Some("utf-16le".into())
            },
        ]
    );
}

#[tokio::test]
async fn text_rejects_buffer_result() {
    let reader = Arc::new(ScriptedReader::succeeding(buffer(b"foo")));
    let log = CallLog::default();

    let err = read_as_text(&foo_blob(), log.options().with_reader(reader))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Expected string result from reader");
    assert_eq!(log.count("load:"), 0);
}

#[tokio::test]
async fn empty_results_are_valid() {
    let reader = Arc::new(ScriptedReader::succeeding(text("")));
    let value = read_as_text(&foo_blob(), ReadOptions::default().with_reader(reader))
        .await
        .unwrap();
    assert_eq!(value, "");

    let reader = Arc::new(ScriptedReader::succeeding(buffer(b"")));
    let value = read_as_array_buffer(&foo_blob(), ReadOptions::default().with_reader(reader))
        .await
        .unwrap();
    assert_eq!(value.byte_length(), 0);
}

#[tokio::test]
async fn every_adapter_rejects_with_native_error() {
    let fault = not_readable();

    let reader = Arc::new(ScriptedReader::failing(Some(fault.clone())));
    let err = read_as_array_buffer(&foo_blob(), ReadOptions::default().with_reader(reader))
        .await
        .unwrap_err();
    assert_eq!(err.native(), Some(&fault));

    let reader = Arc::new(ScriptedReader::failing(Some(fault.clone())));
    let err = read_as_binary_string(&foo_blob(), ReadOptions::default().with_reader(reader))
        .await
        .unwrap_err();
    assert_eq!(err.native(), Some(&fault));

    let reader = Arc::new(ScriptedReader::failing(Some(fault.clone())));
    let err = read_as_data_url(&foo_blob(), ReadOptions::default().with_reader(reader))
        .await
        .unwrap_err();
    assert_eq!(err.native(), Some(&fault));

    let reader = Arc::new(ScriptedReader::failing(Some(fault.clone())));
    let err = read_as_text(&foo_blob(), ReadOptions::default().with_reader(reader))
        .await
        .unwrap_err();
    assert_eq!(err, ReadError::Reader(Some(fault)));
}
