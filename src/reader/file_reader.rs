//! Default reader over [`Blob`] sources.

use std::io::{self, Read};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;

use log::debug;
use tokio::runtime::Handle;

use super::encoding::{binary_string, data_url, decode_text};
use super::{
    EventKind, Listener, ListenerId, ListenerRegistry, ProgressEvent, ReadMethod, ReadResult,
    ReaderHandle,
};
use crate::error::{ErrorInfo, ReaderFault};
use crate::io::Blob;

/// Bytes read between two progress events.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadyState {
    /// No read has been started yet.
    #[default]
    Empty,
    Loading,
    /// The last read has finished, successfully or not.
    Done,
}

/// Reads blobs in the background and reports through events.
///
/// Clones share the same reader: listeners, state and result. The read runs on
/// the current tokio runtime's blocking pool, or on a dedicated thread when
/// called outside a runtime. Events are emitted from that background context in
/// the order `loadstart`, `progress` (once per chunk), `load` or `error`,
/// `loadend`.
///
/// Only one read may be in flight; a second `read` while loading is refused
/// with an `InvalidStateError`. A read accepted while the previous one is
/// still dispatching `loadend` starts once that dispatch is over.
#[derive(Debug, Clone, Default)]
pub struct FileReader {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    listeners: ListenerRegistry,
    state: Mutex<State>,
    /// Held for a whole read, `loadend` included, so a read started from a
    /// terminal listener runs only after the previous one has finished.
    run_lock: Mutex<()>,
    chunk_size: usize,
}

#[derive(Debug, Default)]
struct State {
    ready: ReadyState,
    result: Option<ReadResult>,
    error: Option<ReaderFault>,
}

impl Default for Inner {
    fn default() -> Self {
        Self {
            listeners: ListenerRegistry::new(),
            state: Mutex::new(State::default()),
            run_lock: Mutex::new(()),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl FileReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a reader that emits a progress event every `chunk_size` bytes.
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Self {
            inner: Arc::new(Inner {
                chunk_size: chunk_size.max(1),
                ..Inner::default()
            }),
        }
    }

    pub fn ready_state(&self) -> ReadyState {
        self.inner.state().ready
    }

    pub fn chunk_size(&self) -> usize {
        self.inner.chunk_size
    }

    /// Number of listeners currently registered for `kind`.
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.inner.listeners.count(kind)
    }
}

impl ReaderHandle for FileReader {
    fn add_event_listener(&self, kind: EventKind, listener: Listener) -> ListenerId {
        self.inner.listeners.add(kind, listener)
    }

    fn remove_event_listener(&self, kind: EventKind, id: ListenerId) -> bool {
        self.inner.listeners.remove(kind, id)
    }

    fn result(&self) -> Option<ReadResult> {
        self.inner.state().result.clone()
    }

    fn error(&self) -> Option<ReaderFault> {
        self.inner.state().error.clone()
    }

    fn read(&self, source: &Blob, method: ReadMethod) -> Result<(), ReaderFault> {
        {
            let mut state = self.inner.state();
            if state.ready == ReadyState::Loading {
                return Err(ErrorInfo::invalid_state(
                    "a read is already in progress on this reader",
                )
                .into());
            }
            state.ready = ReadyState::Loading;
        }
        debug!("starting {} of {} byte(s)", method, source.size());

        let inner = Arc::clone(&self.inner);
        let source = source.clone();
        let job = move || inner.run(&source, &method);

        match Handle::try_current() {
            Ok(handle) => {
                handle.spawn_blocking(job);
            }
            Err(_) => {
                if let Err(err) = thread::Builder::new()
                    .name("read-files-reader".into())
                    .spawn(job)
                {
                    self.inner.state().ready = ReadyState::Empty;
                    return Err(ErrorInfo::not_readable(err.to_string()).into());
                }
            }
        }
        Ok(())
    }
}

impl Inner {
    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn run(&self, source: &Blob, method: &ReadMethod) {
        let _running = self
            .run_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        {
            let mut state = self.state();
            state.result = None;
            state.error = None;
        }

        let total = source.size();
        self.listeners
            .dispatch(&ProgressEvent::new(EventKind::LoadStart, 0, total));

        let outcome = self.load(source, method, total);
        // Listeners attached by a read started from a terminal listener
        // belong to that read, not to this one's `loadend`.
        let load_end = self.listeners.snapshot(EventKind::LoadEnd);

        let loaded = match outcome {
            Ok(result) => {
                {
                    let mut state = self.state();
                    state.ready = ReadyState::Done;
                    state.result = Some(result);
                }
                self.listeners
                    .dispatch(&ProgressEvent::new(EventKind::Load, total, total));
                total
            }
            Err((loaded, fault)) => {
                debug!("{} failed after {} byte(s): {}", method, loaded, fault);
                {
                    let mut state = self.state();
                    state.ready = ReadyState::Done;
                    state.error = Some(fault);
                }
                self.listeners
                    .dispatch(&ProgressEvent::new(EventKind::Error, loaded, total));
                loaded
            }
        };

        self.listeners.dispatch_to(
            &load_end,
            &ProgressEvent::new(EventKind::LoadEnd, loaded, total),
        );
    }

    fn load(
        &self,
        source: &Blob,
        method: &ReadMethod,
        total: u64,
    ) -> Result<ReadResult, (u64, ReaderFault)> {
        let mut stream = source.open().map_err(|e| (0, io_fault(&e)))?;
        let mut bytes = Vec::with_capacity(usize::try_from(total).unwrap_or(0));
        let mut chunk = vec![0u8; self.chunk_size];

        loop {
            let n = match stream.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err((bytes.len() as u64, io_fault(&e))),
            };
            bytes.extend_from_slice(&chunk[..n]);
            self.listeners.dispatch(&ProgressEvent::new(
                EventKind::Progress,
                bytes.len() as u64,
                total,
            ));
        }

        Ok(match method {
            ReadMethod::ArrayBuffer => ReadResult::ArrayBuffer(bytes.into()),
            ReadMethod::BinaryString => ReadResult::Text(binary_string(&bytes)),
            ReadMethod::DataUrl => ReadResult::Text(data_url(source.media_type(), &bytes)),
            ReadMethod::Text { encoding } => ReadResult::Text(decode_text(
                &bytes,
                encoding.as_deref(),
                source.charset(),
            )),
        })
    }
}

fn io_fault(err: &io::Error) -> ReaderFault {
    let info = match err.kind() {
        io::ErrorKind::NotFound => ErrorInfo::not_found(err.to_string()),
        io::ErrorKind::PermissionDenied => ErrorInfo::security(err.to_string()),
        _ => ErrorInfo::not_readable(err.to_string()),
    };
    ReaderFault::Exception(info)
}
