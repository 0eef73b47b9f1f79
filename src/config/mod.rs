//! Per-call options for the read adapters.
//!
//! Every slot is optional. Callbacks are observers: they never change how a
//! read settles.

use std::fmt;
use std::sync::Arc;

use crate::error::ReaderFault;
use crate::reader::{ProgressEvent, ReaderHandle};

/// Observer for `loadstart` and `progress`.
pub type EventCallback = Arc<dyn Fn(&ProgressEvent) + Send + Sync>;
/// Observer for a validated successful read.
pub type LoadCallback<T> = Arc<dyn Fn(&ProgressEvent, &T) + Send + Sync>;
/// Observer for `loadend`. Receives the reader's result if it has the
/// requested shape.
pub type LoadEndCallback<T> = Arc<dyn Fn(&ProgressEvent, Option<&T>) + Send + Sync>;
/// Observer for a reader failure with a non-empty error.
pub type ErrorCallback = Arc<dyn Fn(&ProgressEvent, &ReaderFault) + Send + Sync>;

/// Options shared by all read adapters.
pub struct ReadOptions<T> {
    /// Reader to use instead of a fresh `FileReader`
    pub reader: Option<Arc<dyn ReaderHandle>>,
    pub on_load: Option<LoadCallback<T>>,
    pub on_load_start: Option<EventCallback>,
    pub on_load_end: Option<LoadEndCallback<T>>,
    pub on_progress: Option<EventCallback>,
    pub on_error: Option<ErrorCallback>,
}

impl<T> ReadOptions<T> {
    pub fn new() -> Self {
        Self {
            reader: None,
            on_load: None,
            on_load_start: None,
            on_load_end: None,
            on_progress: None,
            on_error: None,
        }
    }

    /// Read through an existing reader. The reader is left intact afterwards.
    pub fn with_reader(mut self, reader: Arc<dyn ReaderHandle>) -> Self {
        self.reader = Some(reader);
        self
    }

    pub fn on_load(
        mut self,
        callback: impl Fn(&ProgressEvent, &T) + Send + Sync + 'static,
    ) -> Self {
        self.on_load = Some(Arc::new(callback));
        self
    }

    pub fn on_load_start(
        mut self,
        callback: impl Fn(&ProgressEvent) + Send + Sync + 'static,
    ) -> Self {
        self.on_load_start = Some(Arc::new(callback));
        self
    }

    pub fn on_load_end(
        mut self,
        callback: impl Fn(&ProgressEvent, Option<&T>) + Send + Sync + 'static,
    ) -> Self {
        self.on_load_end = Some(Arc::new(callback));
        self
    }

    pub fn on_progress(
        mut self,
        callback: impl Fn(&ProgressEvent) + Send + Sync + 'static,
    ) -> Self {
        self.on_progress = Some(Arc::new(callback));
        self
    }

    pub fn on_error(
        mut self,
        callback: impl Fn(&ProgressEvent, &ReaderFault) + Send + Sync + 'static,
    ) -> Self {
        self.on_error = Some(Arc::new(callback));
        self
    }
}

impl ReadOptions<String> {
    /// Turn these into text options with a charset label.
    pub fn with_encoding(self, encoding: impl Into<String>) -> ReadAsTextOptions {
        ReadAsTextOptions {
            options: self,
            encoding: Some(encoding.into()),
        }
    }
}

impl<T> Default for ReadOptions<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for ReadOptions<T> {
    fn clone(&self) -> Self {
        Self {
            reader: self.reader.clone(),
            on_load: self.on_load.clone(),
            on_load_start: self.on_load_start.clone(),
            on_load_end: self.on_load_end.clone(),
            on_progress: self.on_progress.clone(),
            on_error: self.on_error.clone(),
        }
    }
}

impl<T> fmt::Debug for ReadOptions<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadOptions")
            .field("reader", &self.reader)
            .field("on_load", &self.on_load.is_some())
            .field("on_load_start", &self.on_load_start.is_some())
            .field("on_load_end", &self.on_load_end.is_some())
            .field("on_progress", &self.on_progress.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}

/// Options for `read_as_text`: the shared options plus a charset label.
#[derive(Debug, Clone, Default)]
pub struct ReadAsTextOptions {
    pub options: ReadOptions<String>,
    /// Passed through to the reader. Unknown labels fall back to UTF-8.
    pub encoding: Option<String>,
}

impl ReadAsTextOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }
}

impl From<ReadOptions<String>> for ReadAsTextOptions {
    fn from(options: ReadOptions<String>) -> Self {
        Self {
            options,
            encoding: None,
        }
    }
}
