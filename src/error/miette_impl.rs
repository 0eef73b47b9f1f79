//! Miette integration for pretty error reporting.

use miette::{Diagnostic, Severity};
use thiserror::Error;

use super::{ErrorInfo, ReadError};

/// A diagnostic wrapper for read errors compatible with miette.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
pub struct ReadDiagnostic {
    /// The error message
    pub message: String,

    #[source]
    /// The underlying error source
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,

    #[help]
    /// Help text for the user
    pub help: Option<String>,

    #[diagnostic(severity)]
    /// Severity level
    pub severity: Severity,
}

impl From<ReadError> for ReadDiagnostic {
    fn from(e: ReadError) -> Self {
        let help = match &e {
            ReadError::UnexpectedResult(_) => {
                Some("The reader produced a different representation than requested".into())
            }
            ReadError::Reader(None) => {
                Some("The reader signalled failure without an error object".into())
            }
            ReadError::Reader(Some(_)) => Some("Check that the source is still readable".into()),
            ReadError::Incomplete => None,
        };
        ReadDiagnostic {
            message: e.to_string(),
            source: Some(Box::new(e)),
            help,
            severity: Severity::Error,
        }
    }
}

impl From<ErrorInfo> for ReadDiagnostic {
    fn from(info: ErrorInfo) -> Self {
        ReadDiagnostic {
            message: format!("[{}] {}", info.name, info.message),
            source: None,
            help: None,
            severity: Severity::Error,
        }
    }
}

impl From<ReadError> for miette::Report {
    fn from(e: ReadError) -> Self {
        miette::Report::new(ReadDiagnostic::from(e))
    }
}
