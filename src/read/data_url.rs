use crate::bridge::read_with;
use crate::config::ReadOptions;
use crate::error::ReadError;
use crate::io::Blob;
use crate::reader::ReadMethod;
use crate::safe::{SafeResult, settle_safely};

/// Read a blob as a base64 `data:` URL carrying its media type.
pub async fn read_as_data_url(
    source: &Blob,
    options: ReadOptions<String>,
) -> Result<String, ReadError> {
    read_with(source, ReadMethod::DataUrl, options).await
}

/// [`read_as_data_url`] that never fails.
pub async fn safe_read_as_data_url(
    source: &Blob,
    options: ReadOptions<String>,
) -> SafeResult<String> {
    settle_safely(read_as_data_url(source, options)).await
}
