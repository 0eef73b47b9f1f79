use crate::bridge::read_with;
use crate::config::ReadAsTextOptions;
use crate::error::ReadError;
use crate::io::Blob;
use crate::reader::ReadMethod;
use crate::safe::{SafeResult, settle_safely};

/// Read a blob as decoded text.
///
/// The encoding label in `options` is handed to the reader untouched. The
/// default reader honours a byte order mark first, then the label, then the
/// blob's `charset` parameter, then falls back to UTF-8.
///
/// Accepts either [`ReadAsTextOptions`] or plain
/// [`ReadOptions<String>`](crate::ReadOptions).
///
/// ```rust,ignore
/// let blob = Blob::new(vec![0x63u8, 0x61, 0x66, 0xE9], "text/plain");
/// let text = read_as_text(&blob, ReadOptions::default().with_encoding("latin1")).await?;
/// assert_eq!(text, "café");
/// ```
pub async fn read_as_text(
    source: &Blob,
    options: impl Into<ReadAsTextOptions>,
) -> Result<String, ReadError> {
    let ReadAsTextOptions { options, encoding } = options.into();
    read_with(source, ReadMethod::Text { encoding }, options).await
}

/// [`read_as_text`] that never fails.
pub async fn safe_read_as_text(
    source: &Blob,
    options: impl Into<ReadAsTextOptions>,
) -> SafeResult<String> {
    settle_safely(read_as_text(source, options)).await
}
