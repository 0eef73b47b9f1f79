//! Tests for the listener registry.

use std::sync::{Arc, Mutex};

use crate::reader::{EventKind, Listener, ListenerRegistry, ProgressEvent};
use crate::tests::support::{CallLog, init_logger};

fn recording(log: &CallLog, label: &'static str) -> Listener {
    let log = log.clone();
    Arc::new(move |event: &ProgressEvent| log.push(format!("{label}:{}", event.kind)))
}

#[test]
fn dispatch_calls_matching_listeners_in_order() {
    let registry = ListenerRegistry::new();
    let log = CallLog::default();
    registry.add(EventKind::Load, recording(&log, "a"));
    registry.add(EventKind::Error, recording(&log, "x"));
    registry.add(EventKind::Load, recording(&log, "b"));

    registry.dispatch(&ProgressEvent::bare(EventKind::Load));

    assert_eq!(log.entries(), vec!["a:load", "b:load"]);
}

#[test]
fn remove_requires_matching_kind() {
    let registry = ListenerRegistry::new();
    let log = CallLog::default();
    let id = registry.add(EventKind::Progress, recording(&log, "p"));

    assert!(!registry.remove(EventKind::Load, id));
    assert_eq!(registry.count(EventKind::Progress), 1);
    assert!(registry.remove(EventKind::Progress, id));
    assert!(!registry.remove(EventKind::Progress, id));
    assert!(registry.is_empty());
}

#[test]
fn listener_removed_during_dispatch_is_skipped() {
    let registry = Arc::new(ListenerRegistry::new());
    let log = CallLog::default();
    let victim = Arc::new(Mutex::new(None));

    let remover = {
        let registry = Arc::clone(&registry);
        let victim = Arc::clone(&victim);
        let log = log.clone();
        Arc::new(move |_: &ProgressEvent| {
            log.push("remover");
            if let Some(id) = victim.lock().unwrap().take() {
                registry.remove(EventKind::Load, id);
            }
        })
    };
    registry.add(EventKind::Load, remover);
    let id = registry.add(EventKind::Load, recording(&log, "victim"));
    *victim.lock().unwrap() = Some(id);

    registry.dispatch(&ProgressEvent::bare(EventKind::Load));

    assert_eq!(log.entries(), vec!["remover"]);
    assert_eq!(registry.len(), 1);
}

#[test]
fn listener_added_during_dispatch_waits_for_next_event() {
    let registry = Arc::new(ListenerRegistry::new());
    let log = CallLog::default();

    let adder = {
        let registry = Arc::clone(&registry);
        let log = log.clone();
        Arc::new(move |_: &ProgressEvent| {
            log.push("adder");
            registry.add(EventKind::Progress, recording(&log, "late"));
        })
    };
    registry.add(EventKind::Progress, adder);

    registry.dispatch(&ProgressEvent::new(EventKind::Progress, 1, 2));
    assert_eq!(log.entries(), vec!["adder"]);
    assert_eq!(registry.count(EventKind::Progress), 2);
}

fn explode(_: &ProgressEvent) {
    panic!("listener exploded");
}

#[test]
fn panicking_listener_does_not_stop_others() {
    init_logger();
    let registry = ListenerRegistry::new();
    let log = CallLog::default();
    registry.add(EventKind::Error, Arc::new(explode));
    registry.add(EventKind::Error, recording(&log, "after"));

    registry.dispatch(&ProgressEvent::bare(EventKind::Error));

    assert_eq!(log.entries(), vec!["after:error"]);
}

#[test]
fn dispatch_to_uses_earlier_snapshot() {
    let registry = ListenerRegistry::new();
    let log = CallLog::default();
    let first = registry.add(EventKind::LoadEnd, recording(&log, "first"));
    registry.add(EventKind::LoadEnd, recording(&log, "second"));

    let snapshot = registry.snapshot(EventKind::LoadEnd);
    registry.add(EventKind::LoadEnd, recording(&log, "third"));
    registry.remove(EventKind::LoadEnd, first);

    registry.dispatch_to(&snapshot, &ProgressEvent::bare(EventKind::LoadEnd));

    assert_eq!(log.entries(), vec!["second:loadend"]);
}

#[test]
fn clear_drops_everything() {
    let registry = ListenerRegistry::new();
    let log = CallLog::default();
    let id = registry.add(EventKind::Load, recording(&log, "a"));
    registry.add(EventKind::LoadEnd, recording(&log, "b"));

    registry.clear();

    assert!(registry.is_empty());
    assert!(!registry.contains(id));
}
