//! Listener bookkeeping for reader implementations.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use log::{error, trace};

use super::{EventKind, ProgressEvent};

/// An event listener. Shared so that registries can dispatch without holding
/// their lock.
pub type Listener = Arc<dyn Fn(&ProgressEvent) + Send + Sync>;

/// Identifies a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

struct Entry {
    id: ListenerId,
    kind: EventKind,
    listener: Listener,
}

/// Thread-safe listener table.
///
/// Dispatch snapshots the listeners of one kind and then calls them with the
/// lock released, so listeners may add or remove listeners (including
/// themselves). A listener removed during a dispatch is not called by it.
#[derive(Default)]
pub struct ListenerRegistry {
    next_id: AtomicU64,
    entries: Mutex<Vec<Entry>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, kind: EventKind, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.lock().push(Entry { id, kind, listener });
        id
    }

    pub fn remove(&self, kind: EventKind, id: ListenerId) -> bool {
        let mut entries = self.lock();
        match entries.iter().position(|e| e.id == id && e.kind == kind) {
            Some(index) => {
                entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Call every listener registered for `event.kind`, in registration order.
    pub fn dispatch(&self, event: &ProgressEvent) {
        let snapshot = self.snapshot(event.kind);
        self.dispatch_to(&snapshot, event);
    }

    /// The listeners currently registered for `kind`.
    pub fn snapshot(&self, kind: EventKind) -> Vec<(ListenerId, Listener)> {
        self.lock()
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| (e.id, Arc::clone(&e.listener)))
            .collect()
    }

    /// Call the listeners of an earlier snapshot that are still registered.
    ///
    /// A panicking listener is logged and does not stop the others.
    pub fn dispatch_to(&self, snapshot: &[(ListenerId, Listener)], event: &ProgressEvent) {
        trace!("dispatching {} to {} listener(s)", event.kind, snapshot.len());
        for (id, listener) in snapshot {
            if !self.contains(*id) {
                continue;
            }
            if panic::catch_unwind(AssertUnwindSafe(|| listener(event))).is_err() {
                error!("{} listener panicked", event.kind);
            }
        }
    }

    /// Drop every listener.
    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn contains(&self, id: ListenerId) -> bool {
        self.lock().iter().any(|e| e.id == id)
    }

    /// Number of listeners registered for `kind`.
    pub fn count(&self, kind: EventKind) -> usize {
        self.lock().iter().filter(|e| e.kind == kind).count()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Entry>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.len())
            .finish()
    }
}
