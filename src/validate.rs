//! Runtime narrowing of a reader's result slot.
//!
//! A reader's result is only known at runtime to be a string or a buffer, so
//! every adapter checks it before resolving.

use crate::error::ResultKind;
use crate::reader::{ArrayBuffer, ReadResult};

/// True if the slot holds a string. An empty string counts; an empty slot
/// does not.
pub fn is_text_result(result: Option<&ReadResult>) -> bool {
    matches!(result, Some(ReadResult::Text(_)))
}

/// True if the slot holds a binary buffer, including a zero-length one.
pub fn is_buffer_result(result: Option<&ReadResult>) -> bool {
    matches!(result, Some(ReadResult::ArrayBuffer(_)))
}

/// A value type an adapter can resolve with.
pub trait ReadValue: Sized + Send + Sync + 'static {
    /// Shape named in the mismatch error.
    const KIND: ResultKind;

    /// Validator for this shape.
    fn accepts(result: Option<&ReadResult>) -> bool;

    /// Take the value out of an accepted result.
    fn narrow(result: ReadResult) -> Option<Self>;

    /// Validate and narrow in one step.
    fn from_slot(result: Option<ReadResult>) -> Option<Self> {
        if Self::accepts(result.as_ref()) {
            result.and_then(Self::narrow)
        } else {
            None
        }
    }
}

impl ReadValue for String {
    const KIND: ResultKind = ResultKind::Text;

    fn accepts(result: Option<&ReadResult>) -> bool {
        is_text_result(result)
    }

    fn narrow(result: ReadResult) -> Option<Self> {
        match result {
            ReadResult::Text(text) => Some(text),
            ReadResult::ArrayBuffer(_) => None,
        }
    }
}

impl ReadValue for ArrayBuffer {
    const KIND: ResultKind = ResultKind::ArrayBuffer;

    fn accepts(result: Option<&ReadResult>) -> bool {
        is_buffer_result(result)
    }

    fn narrow(result: ReadResult) -> Option<Self> {
        match result {
            ReadResult::ArrayBuffer(buffer) => Some(buffer),
            ReadResult::Text(_) => None,
        }
    }
}
