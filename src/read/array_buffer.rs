use crate::bridge::read_with;
use crate::config::ReadOptions;
use crate::error::ReadError;
use crate::io::Blob;
use crate::reader::{ArrayBuffer, ReadMethod};
use crate::safe::{SafeResult, settle_safely};

/// Read a blob into a binary buffer.
///
/// Fails with `Expected ArrayBuffer result from reader` if the reader reports
/// success with anything but a buffer, or with the reader's own error if it
/// reports failure.
///
/// ```rust,ignore
/// use read_files::{Blob, ReadOptions, read_as_array_buffer};
///
/// let blob = Blob::from_string("foo", "text/plain");
/// let buffer = read_as_array_buffer(&blob, ReadOptions::default()).await?;
/// assert_eq!(buffer.byte_length(), 3);
/// ```
pub async fn read_as_array_buffer(
    source: &Blob,
    options: ReadOptions<ArrayBuffer>,
) -> Result<ArrayBuffer, ReadError> {
    read_with(source, ReadMethod::ArrayBuffer, options).await
}

/// [`read_as_array_buffer`] that never fails.
pub async fn safe_read_as_array_buffer(
    source: &Blob,
    options: ReadOptions<ArrayBuffer>,
) -> SafeResult<ArrayBuffer> {
    settle_safely(read_as_array_buffer(source, options)).await
}
