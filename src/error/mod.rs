//! Error types for read operations.
//!
//! This module provides:
//! - `ErrorInfo`: A structured failure carrying a classification name and a message
//! - `ReaderFault`: The native failure a reader reports, structured or not
//! - `ResultKind`: The shape of value a read is expected to produce
//! - `ReadError`: The failure of a single read operation

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Classification used when a failure is not already an [`ErrorInfo`].
pub const READ_FILE_ERROR: &str = "ReadFileError";

/// A structured error with a classification name and a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{name}: {message}")]
pub struct ErrorInfo {
    /// Classification label, e.g. `NotReadableError`
    pub name: String,
    /// Human-readable description
    pub message: String,
}

impl ErrorInfo {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Wrap a message into the generic `ReadFileError` classification.
    pub fn read_file_error(message: impl Into<String>) -> Self {
        Self::new(READ_FILE_ERROR, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("NotFoundError", message)
    }

    pub fn not_readable(message: impl Into<String>) -> Self {
        Self::new("NotReadableError", message)
    }

    pub fn security(message: impl Into<String>) -> Self {
        Self::new("SecurityError", message)
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::new("InvalidStateError", message)
    }
}

/// The failure a reader reports through its error slot.
#[derive(Debug, Clone, Error)]
pub enum ReaderFault {
    /// Already structured, passed through by the safe variants untouched.
    #[error(transparent)]
    Exception(ErrorInfo),
    /// Any other error shape.
    #[error(transparent)]
    Other(Arc<dyn std::error::Error + Send + Sync>),
}

impl ReaderFault {
    pub fn other<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Other(Arc::new(error))
    }

    /// The structured form of this fault, if it has one.
    pub fn as_exception(&self) -> Option<&ErrorInfo> {
        match self {
            Self::Exception(info) => Some(info),
            Self::Other(_) => None,
        }
    }

    /// Human-readable message without the classification prefix.
    pub fn message(&self) -> String {
        match self {
            Self::Exception(info) => info.message.clone(),
            Self::Other(err) => err.to_string(),
        }
    }
}

impl From<ErrorInfo> for ReaderFault {
    fn from(info: ErrorInfo) -> Self {
        Self::Exception(info)
    }
}

impl PartialEq for ReaderFault {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Exception(a), Self::Exception(b)) => a == b,
            (Self::Other(a), Self::Other(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// The shape of value a read is expected to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultKind {
    Text,
    ArrayBuffer,
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultKind::Text => write!(f, "string"),
            ResultKind::ArrayBuffer => write!(f, "ArrayBuffer"),
        }
    }
}

/// Failure of a single read operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReadError {
    /// The reader reported success but produced a value of the wrong shape.
    #[error("Expected {0} result from reader")]
    UnexpectedResult(ResultKind),

    /// The reader reported failure. The payload is whatever the reader's
    /// error slot held, which may be empty.
    #[error("{}", describe_fault(.0.as_ref()))]
    Reader(Option<ReaderFault>),

    /// The reader finished, or released the operation's listeners, without
    /// reporting either a result or an error.
    #[error("reader finished without reporting load or error")]
    Incomplete,
}

fn describe_fault(fault: Option<&ReaderFault>) -> String {
    match fault {
        Some(fault) => fault.to_string(),
        None => "reader failed without reporting an error".to_string(),
    }
}

impl ReadError {
    /// The native payload of a reader failure, `None` for other failures or an
    /// empty payload.
    pub fn native(&self) -> Option<&ReaderFault> {
        match self {
            ReadError::Reader(fault) => fault.as_ref(),
            _ => None,
        }
    }

    /// True when the reader failed with an empty error slot.
    pub fn is_empty_native(&self) -> bool {
        matches!(self, ReadError::Reader(None))
    }
}

impl From<ReaderFault> for ReadError {
    fn from(fault: ReaderFault) -> Self {
        ReadError::Reader(Some(fault))
    }
}

impl From<ReadError> for ErrorInfo {
    fn from(err: ReadError) -> Self {
        match err {
            ReadError::Reader(Some(ReaderFault::Exception(info))) => info,
            ReadError::Reader(Some(ReaderFault::Other(source))) => {
                ErrorInfo::read_file_error(source.to_string())
            }
            other => ErrorInfo::read_file_error(other.to_string()),
        }
    }
}

#[cfg(feature = "miette")]
mod miette_impl;

#[cfg(feature = "miette")]
pub use miette_impl::*;
