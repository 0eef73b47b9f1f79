//! Bridges a reader's event stream into a single-settlement future.
//!
//! One `Bridge` exists per read. It owns the caller's callbacks and the sending
//! half of a oneshot channel, and is shared by the listeners it attaches:
//!
//! - `load` / `error` settle the future (first one wins) and detach every
//!   listener except `loadend`.
//! - `loadend` reports to `on_load_end` once and detaches itself. A `loadend`
//!   that arrives before any terminal event settles the read as incomplete.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use futures::channel::oneshot;
use log::{debug, warn};

use crate::config::{ErrorCallback, ReadOptions};
use crate::config::{LoadCallback, LoadEndCallback};
use crate::error::ReadError;
use crate::io::Blob;
use crate::reader::{EventKind, FileReader, ListenerId, ProgressEvent, ReadMethod, ReaderHandle};
use crate::validate::ReadValue;

type Outcome<T> = Result<T, ReadError>;

/// Read `source` with `method` and resolve with a validated `T`.
pub(crate) async fn read_with<T: ReadValue>(
    source: &Blob,
    method: ReadMethod,
    options: ReadOptions<T>,
) -> Result<T, ReadError> {
    let ReadOptions {
        reader,
        on_load,
        on_load_start,
        on_load_end,
        on_progress,
        on_error,
    } = options;
    // A reader created here has no other owner, so the bridge keeps it alive
    // until its `loadend`. `FileReader` always emits one.
    let (reader, owned) = match reader {
        Some(reader) => (reader, None),
        None => {
            let reader: Arc<dyn ReaderHandle> = Arc::new(FileReader::new());
            (Arc::clone(&reader), Some(reader))
        }
    };

    let (tx, rx) = oneshot::channel();
    let bridge = Arc::new(Bridge {
        reader: Arc::downgrade(&reader),
        claimed: AtomicBool::new(false),
        load_end_fired: AtomicBool::new(false),
        on_load,
        on_load_end,
        on_error,
        state: Mutex::new(BridgeState {
            sender: Some(tx),
            attached: Vec::with_capacity(4),
            load_end: None,
            owned,
        }),
    });

    let mut attached = Vec::with_capacity(4);
    if let Some(callback) = on_load_start {
        attached.push((
            EventKind::LoadStart,
            reader.add_event_listener(EventKind::LoadStart, callback),
        ));
    }
    if let Some(callback) = on_progress {
        attached.push((
            EventKind::Progress,
            reader.add_event_listener(EventKind::Progress, callback),
        ));
    }
    let on_load_bridge = Arc::clone(&bridge);
    attached.push((
        EventKind::Load,
        reader.add_event_listener(
            EventKind::Load,
            Arc::new(move |event: &ProgressEvent| on_load_bridge.handle_load(event)),
        ),
    ));
    let on_error_bridge = Arc::clone(&bridge);
    attached.push((
        EventKind::Error,
        reader.add_event_listener(
            EventKind::Error,
            Arc::new(move |event: &ProgressEvent| on_error_bridge.handle_error(event)),
        ),
    ));
    let on_load_end_bridge = Arc::clone(&bridge);
    let load_end = reader.add_event_listener(
        EventKind::LoadEnd,
        Arc::new(move |event: &ProgressEvent| on_load_end_bridge.handle_load_end(event)),
    );
    {
        let mut state = bridge.state();
        state.attached = attached;
        state.load_end = Some(load_end);
    }

    debug!("{} of {} byte(s)", method, source.size());
    if let Err(fault) = reader.read(source, method) {
        bridge.claim();
        bridge.settle(Err(ReadError::Reader(Some(fault))));
        bridge.release_load_end();
    }
    drop(bridge);

    let outcome = rx.await.unwrap_or(Err(ReadError::Incomplete));
    // Keeps a reader handed over without another owner alive until settled.
    drop(reader);
    outcome
}

struct Bridge<T> {
    reader: Weak<dyn ReaderHandle>,
    /// Set by the first terminal event.
    claimed: AtomicBool,
    load_end_fired: AtomicBool,
    on_load: Option<LoadCallback<T>>,
    on_load_end: Option<LoadEndCallback<T>>,
    on_error: Option<ErrorCallback>,
    state: Mutex<BridgeState<T>>,
}

struct BridgeState<T> {
    /// Taken by whichever path settles the read.
    sender: Option<oneshot::Sender<Outcome<T>>>,
    attached: Vec<(EventKind, ListenerId)>,
    load_end: Option<ListenerId>,
    owned: Option<Arc<dyn ReaderHandle>>,
}

impl<T: ReadValue> Bridge<T> {
    fn state(&self) -> MutexGuard<'_, BridgeState<T>> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// True for the first caller only.
    fn claim(&self) -> bool {
        !self.claimed.swap(true, Ordering::SeqCst)
    }

    fn handle_load(&self, event: &ProgressEvent) {
        if !self.claim() {
            warn!("ignoring load event after the read already settled");
            return;
        }
        let Some(reader) = self.reader.upgrade() else {
            self.settle(Err(ReadError::Incomplete));
            return;
        };
        let Some(value) = T::from_slot(reader.result()) else {
            self.settle(Err(ReadError::UnexpectedResult(T::KIND)));
            return;
        };
        if let Some(on_load) = &self.on_load {
            on_load(event, &value);
        }
        self.settle(Ok(value));
    }

    fn handle_error(&self, event: &ProgressEvent) {
        if !self.claim() {
            warn!("ignoring error event after the read already settled");
            return;
        }
        let fault = self.reader.upgrade().and_then(|reader| reader.error());
        if let (Some(fault), Some(on_error)) = (&fault, &self.on_error) {
            on_error(event, fault);
        }
        self.settle(Err(ReadError::Reader(fault)));
    }

    fn handle_load_end(&self, event: &ProgressEvent) {
        if self.load_end_fired.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Some(on_load_end) = &self.on_load_end {
            let current = self
                .reader
                .upgrade()
                .and_then(|reader| T::from_slot(reader.result()));
            on_load_end(event, current.as_ref());
        }
        if self.claim() {
            warn!("loadend fired before load or error");
        }
        // No-op once settled; otherwise a terminal handler never finished.
        self.settle(Err(ReadError::Incomplete));
        self.release_load_end();
    }

    /// Hand the outcome to the waiting future and detach every listener but
    /// `loadend`. Only the first call has an effect.
    fn settle(&self, outcome: Outcome<T>) {
        let (attached, sender) = {
            let mut state = self.state();
            (std::mem::take(&mut state.attached), state.sender.take())
        };
        self.detach(attached);

        let Some(sender) = sender else {
            return;
        };
        match &outcome {
            Ok(_) => debug!("read settled"),
            Err(err) => debug!("read failed: {err}"),
        }
        if sender.send(outcome).is_err() {
            warn!("read settled after its future was dropped");
        }
    }

    fn release_load_end(&self) {
        let (load_end, owned) = {
            let mut state = self.state();
            (state.load_end.take(), state.owned.take())
        };
        if let Some(id) = load_end {
            self.detach(vec![(EventKind::LoadEnd, id)]);
        }
        drop(owned);
    }

    fn detach(&self, listeners: Vec<(EventKind, ListenerId)>) {
        let Some(reader) = self.reader.upgrade() else {
            return;
        };
        for (kind, id) in listeners {
            reader.remove_event_listener(kind, id);
        }
    }
}

impl<T> Drop for Bridge<T> {
    fn drop(&mut self) {
        let state = self
            .state
            .get_mut()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(sender) = state.sender.take() {
            warn!("reader released its listeners before load or error");
            let _ = sender.send(Err(ReadError::Incomplete));
        }
    }
}
