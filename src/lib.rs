//! # read-files
//!
//! Future-returning adapters over event-driven blob readers.
//!
//! ## Overview
//!
//! A reader ([`ReaderHandle`]) reads a [`Blob`] in the background and reports
//! through events: `loadstart`, `progress`, then `load` or `error`, then
//! `loadend`. This crate turns one such read into one future:
//!
//! - **Four representations**: binary buffer, legacy binary string, base64
//!   data URL and decoded text
//! - **Lifecycle callbacks**: optional observers for every event, configured
//!   through [`ReadOptions`]
//! - **Validated results**: the reader's result is checked against the
//!   requested shape before the future resolves
//! - **Two error tiers**: `read_as_*` fails with a [`ReadError`], while
//!   `safe_read_as_*` always resolves to a [`SafeResult`]
//! - **Reader reuse**: pass your own reader to reuse it across sequential reads;
//!   every listener a call attaches is removed once the reader has reported
//!   the end of the read
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use read_files::{Blob, ReadOptions, read_as_data_url, read_as_text};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), read_files::ReadError> {
//!     let blob = Blob::from_string("foo", "text/plain");
//!
//!     let text = read_as_text(&blob, ReadOptions::default()).await?;
//!     assert_eq!(text, "foo");
//!
//!     let url = read_as_data_url(
//!         &blob,
//!         ReadOptions::default().on_progress(|e| println!("{}/{}", e.loaded, e.total)),
//!     )
//!     .await?;
//!     assert_eq!(url, "data:text/plain;base64,Zm9v");
//!     Ok(())
//! }
//! ```
//!
//! ## Concurrency
//!
//! Reads through independent readers (the default) can run concurrently. A
//! single reader supports one read at a time: reuse it only after the previous
//! future has completed. The default [`FileReader`] refuses overlapping reads
//! with an `InvalidStateError`, and a read started right after the previous
//! future resolved waits until the previous `loadend` has been dispatched.
//!
//! ## Features
//!
//! - `miette` - Pretty error reporting with miette

// Core modules
mod bridge;
pub mod config;
pub mod error;
pub mod io;
pub mod read;
pub mod reader;
pub mod safe;
pub mod validate;

// Re-exports for convenience
pub use config::{ReadAsTextOptions, ReadOptions};
pub use error::{ErrorInfo, READ_FILE_ERROR, ReadError, ReaderFault, ResultKind};
pub use io::Blob;
pub use read::{
    read_as_array_buffer, read_as_binary_string, read_as_data_url, read_as_text,
    safe_read_as_array_buffer, safe_read_as_binary_string, safe_read_as_data_url,
    safe_read_as_text,
};
pub use reader::{
    ArrayBuffer, EventKind, FileReader, ProgressEvent, ReadMethod, ReadResult, ReaderHandle,
    ReadyState,
};
pub use safe::SafeResult;
pub use validate::{is_buffer_result, is_text_result};

// Miette re-exports
#[cfg(feature = "miette")]
pub use error::ReadDiagnostic;
