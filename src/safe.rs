//! Non-failing wrappers around the read adapters.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use log::error;
use serde::{Deserialize, Serialize};

use crate::error::{ErrorInfo, ReadError};

/// Outcome of a safe read: exactly one of `value` and `error` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafeResult<T> {
    value: Option<T>,
    error: Option<ErrorInfo>,
}

impl<T> SafeResult<T> {
    pub fn ok(value: T) -> Self {
        Self {
            value: Some(value),
            error: None,
        }
    }

    pub fn err(error: ErrorInfo) -> Self {
        Self {
            value: None,
            error: Some(error),
        }
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn error(&self) -> Option<&ErrorInfo> {
        self.error.as_ref()
    }

    pub fn is_ok(&self) -> bool {
        self.value.is_some()
    }

    pub fn is_err(&self) -> bool {
        self.error.is_some()
    }

    /// Split into `(value, error)`.
    pub fn into_parts(self) -> (Option<T>, Option<ErrorInfo>) {
        (self.value, self.error)
    }

    pub fn into_result(self) -> Result<T, ErrorInfo> {
        match (self.value, self.error) {
            (Some(value), _) => Ok(value),
            (None, Some(error)) => Err(error),
            (None, None) => Err(ErrorInfo::read_file_error("no value and no error")),
        }
    }
}

impl<T> From<Result<T, ReadError>> for SafeResult<T> {
    fn from(result: Result<T, ReadError>) -> Self {
        match result {
            Ok(value) => SafeResult::ok(value),
            Err(err) => SafeResult::err(err.into()),
        }
    }
}

/// Await a read and fold every failure, panics included, into a `SafeResult`.
pub(crate) async fn settle_safely<T, F>(read: F) -> SafeResult<T>
where
    F: Future<Output = Result<T, ReadError>>,
{
    match AssertUnwindSafe(read).catch_unwind().await {
        Ok(result) => result.into(),
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            error!("read panicked: {message}");
            SafeResult::err(ErrorInfo::read_file_error(message))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "read panicked".to_string()
    }
}
