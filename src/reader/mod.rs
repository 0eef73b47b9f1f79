//! The event-emitting reader abstraction the adapters bridge over.
//!
//! This module provides:
//! - `ReaderHandle`: Trait for stateful readers that emit lifecycle events
//! - `EventKind` / `ProgressEvent`: The lifecycle notifications
//! - `ReadMethod`: Which representation a read should produce
//! - `ReadResult` / `ArrayBuffer`: The value slot a reader fills on success
//! - `ListenerRegistry`: Listener bookkeeping shared by reader implementations
//! - `FileReader`: The default reader

pub mod encoding;
mod file_reader;
mod listeners;

use std::fmt::{self, Debug};
use std::ops::Deref;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::ReaderFault;
use crate::io::Blob;

pub use file_reader::{DEFAULT_CHUNK_SIZE, FileReader, ReadyState};
pub use listeners::{Listener, ListenerId, ListenerRegistry};

/// Lifecycle notifications a reader emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    LoadStart,
    Progress,
    Load,
    Error,
    /// Fires once after either `Load` or `Error`.
    LoadEnd,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::LoadStart => write!(f, "loadstart"),
            EventKind::Progress => write!(f, "progress"),
            EventKind::Load => write!(f, "load"),
            EventKind::Error => write!(f, "error"),
            EventKind::LoadEnd => write!(f, "loadend"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub kind: EventKind,
    /// Bytes processed so far
    pub loaded: u64,
    /// Total bytes, meaningful when `length_computable`
    pub total: u64,
    pub length_computable: bool,
}

impl ProgressEvent {
    pub fn new(kind: EventKind, loaded: u64, total: u64) -> Self {
        Self {
            kind,
            loaded,
            total,
            length_computable: true,
        }
    }

    /// An event with no progress information.
    pub fn bare(kind: EventKind) -> Self {
        Self {
            kind,
            loaded: 0,
            total: 0,
            length_computable: false,
        }
    }
}

/// The representation a read should produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadMethod {
    ArrayBuffer,
    /// One character per byte, U+0000 through U+00FF.
    BinaryString,
    /// `data:<media type>;base64,<payload>`
    DataUrl,
    /// Decoded text, with an optional charset label.
    Text { encoding: Option<String> },
}

impl fmt::Display for ReadMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadMethod::ArrayBuffer => write!(f, "readAsArrayBuffer"),
            ReadMethod::BinaryString => write!(f, "readAsBinaryString"),
            ReadMethod::DataUrl => write!(f, "readAsDataURL"),
            ReadMethod::Text { .. } => write!(f, "readAsText"),
        }
    }
}

/// Immutable shared byte buffer produced by `ReadMethod::ArrayBuffer`.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct ArrayBuffer(Arc<[u8]>);

impl ArrayBuffer {
    pub fn byte_length(&self) -> usize {
        self.0.len()
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

impl Debug for ArrayBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayBuffer")
            .field("byte_length", &self.byte_length())
            .finish()
    }
}

impl Deref for ArrayBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for ArrayBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for ArrayBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self(Arc::from(bytes))
    }
}

impl From<&[u8]> for ArrayBuffer {
    fn from(bytes: &[u8]) -> Self {
        Self(Arc::from(bytes))
    }
}

/// The value a reader holds after a successful read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadResult {
    Text(String),
    ArrayBuffer(ArrayBuffer),
}

impl From<String> for ReadResult {
    fn from(text: String) -> Self {
        ReadResult::Text(text)
    }
}

impl From<ArrayBuffer> for ReadResult {
    fn from(buffer: ArrayBuffer) -> Self {
        ReadResult::ArrayBuffer(buffer)
    }
}

/// A stateful reader that performs one read at a time and reports its
/// progress through events.
///
/// Implementations use interior mutability: the same handle is shared between
/// the caller and every listener. A handle may be reused for any number of
/// reads, but only sequentially. Starting a read while another is in flight on
/// the same handle is a caller error; implementations may refuse it by
/// returning an error from [`ReaderHandle::read`].
///
/// Every started read emits `LoadStart`, any number of `Progress`, exactly one
/// of `Load` or `Error`, then exactly one `LoadEnd`. The adapters settle on
/// `Load` or `Error` and observe `LoadEnd` only to report it. `result` and
/// `error` must be updated before the `Load` or `Error`
/// event is dispatched. Listeners may call back into the reader, so no internal
/// lock may be held while dispatching.
pub trait ReaderHandle: Send + Sync + Debug {
    /// Register a listener and return an id for removing it later.
    fn add_event_listener(&self, kind: EventKind, listener: Listener) -> ListenerId;

    /// Remove a listener. Returns false if it was not registered.
    fn remove_event_listener(&self, kind: EventKind, id: ListenerId) -> bool;

    /// The value produced by the last successful read, if any.
    fn result(&self) -> Option<ReadResult>;

    /// The failure reported by the last read, if any.
    fn error(&self) -> Option<ReaderFault>;

    /// Begin reading `source`. Events are emitted after this returns or from
    /// within it; an `Err` means the read never started and no events follow.
    fn read(&self, source: &Blob, method: ReadMethod) -> Result<(), ReaderFault>;
}
