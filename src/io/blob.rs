//! Blob sources backed by memory or by a file snapshot.

use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Immutable, cheaply clonable handle to binary data of known length.
///
/// A file-backed blob records the file length when it is created. Opening it
/// later fails if the file has since changed length or disappeared.
#[derive(Debug, Clone)]
pub struct Blob {
    data: BlobData,
    media_type: String,
    name: Option<String>,
}

#[derive(Debug, Clone)]
enum BlobData {
    Memory(Arc<[u8]>),
    File { path: PathBuf, size: u64 },
}

impl Blob {
    /// Create a new in-memory blob with the given data and media type.
    pub fn new(data: impl Into<Vec<u8>>, media_type: impl AsRef<str>) -> Self {
        Self {
            data: BlobData::Memory(Arc::from(data.into())),
            media_type: normalize_media_type(media_type.as_ref()),
            name: None,
        }
    }

    /// Create a new in-memory blob from a string.
    pub fn from_string(text: impl Into<String>, media_type: impl AsRef<str>) -> Self {
        Self::new(text.into().into_bytes(), media_type)
    }

    /// Snapshot a file on disk. Only its length is recorded; the content is
    /// read when the blob is opened.
    pub async fn from_path(
        path: impl AsRef<Path>,
        media_type: impl AsRef<str>,
    ) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let meta = tokio::fs::metadata(&path).await?;
        if !meta.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a regular file", path.display()),
            ));
        }
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        Ok(Self {
            data: BlobData::File {
                path,
                size: meta.len(),
            },
            media_type: normalize_media_type(media_type.as_ref()),
            name,
        })
    }

    /// Attach a file name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Length in bytes.
    pub fn size(&self) -> u64 {
        match &self.data {
            BlobData::Memory(bytes) => bytes.len() as u64,
            BlobData::File { size, .. } => *size,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Media type, lowercased. Empty when unknown.
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// The `charset` parameter of the media type, if present.
    pub fn charset(&self) -> Option<&str> {
        self.media_type.split(';').skip(1).find_map(|param| {
            let (key, value) = param.split_once('=')?;
            if key.trim() == "charset" {
                Some(value.trim().trim_matches('"'))
            } else {
                None
            }
        })
    }

    /// Path of a file-backed blob.
    pub fn path(&self) -> Option<&Path> {
        match &self.data {
            BlobData::Memory(_) => None,
            BlobData::File { path, .. } => Some(path),
        }
    }

    /// Open and return a new readable stream over the content.
    pub fn open(&self) -> io::Result<Box<dyn Read + Send>> {
        match &self.data {
            BlobData::Memory(bytes) => Ok(Box::new(Cursor::new(Arc::clone(bytes)))),
            BlobData::File { path, size } => {
                let file = std::fs::File::open(path)?;
                let current = file.metadata()?.len();
                if current != *size {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidData,
                        format!(
                            "{} changed since it was opened ({} bytes, now {})",
                            path.display(),
                            size,
                            current
                        ),
                    ));
                }
                Ok(Box::new(file.take(*size)))
            }
        }
    }
}

impl From<&str> for Blob {
    fn from(text: &str) -> Self {
        Self::from_string(text, "text/plain;charset=utf-8")
    }
}

impl From<Vec<u8>> for Blob {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data, "")
    }
}

/// Lowercase the type; anything outside printable ASCII makes it unknown.
fn normalize_media_type(media_type: &str) -> String {
    if media_type.bytes().all(|b| (0x20..=0x7e).contains(&b)) {
        media_type.to_ascii_lowercase()
    } else {
        String::new()
    }
}
