use crate::bridge::read_with;
use crate::config::ReadOptions;
use crate::error::ReadError;
use crate::io::Blob;
use crate::reader::ReadMethod;
use crate::safe::{SafeResult, settle_safely};

/// Read a blob as a legacy binary string, one `char` per byte.
pub async fn read_as_binary_string(
    source: &Blob,
    options: ReadOptions<String>,
) -> Result<String, ReadError> {
    read_with(source, ReadMethod::BinaryString, options).await
}

/// [`read_as_binary_string`] that never fails.
///
/// ```rust,ignore
/// let (value, error) = safe_read_as_binary_string(&blob, ReadOptions::default())
///     .await
///     .into_parts();
/// match error {
///     Some(error) => eprintln!("failed to read: {}", error.message),
///     None => println!("{:?}", value),
/// }
/// ```
pub async fn safe_read_as_binary_string(
    source: &Blob,
    options: ReadOptions<String>,
) -> SafeResult<String> {
    settle_safely(read_as_binary_string(source, options)).await
}
