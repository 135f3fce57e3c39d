use std::cell::RefCell;
use std::rc::Rc;
use taskpad_core::{MemoryTaskStore, Snapshot, StoreError, TaskStore};
use uuid::Uuid;

fn recording_handler(log: Rc<RefCell<Vec<Snapshot>>>) -> Box<dyn FnMut(Snapshot)> {
    Box::new(move |snapshot| log.borrow_mut().push(snapshot))
}

#[test]
fn create_assigns_strictly_increasing_created_at() {
    let store = MemoryTaskStore::new();

    let first = store.create("first").unwrap();
    let second = store.create("second").unwrap();
    let third = store.create("third").unwrap();

    assert!(first.created_at < second.created_at);
    assert!(second.created_at < third.created_at);
}

#[test]
fn subscribe_delivers_initial_snapshot_and_every_change() {
    let store = MemoryTaskStore::new();
    store.create("pre-existing").unwrap();

    let log = Rc::new(RefCell::new(Vec::new()));
    let _sub = store.subscribe(recording_handler(Rc::clone(&log))).unwrap();
    assert_eq!(log.borrow().len(), 1);
    assert_eq!(log.borrow()[0].len(), 1);

    let created = store.create("new task").unwrap();
    assert_eq!(log.borrow().len(), 2);
    assert_eq!(log.borrow()[1].len(), 2);

    store.remove(created.id).unwrap();
    assert_eq!(log.borrow().len(), 3);
    assert_eq!(log.borrow()[2].len(), 1);
}

#[test]
fn removing_absent_id_is_silent_and_emits_no_snapshot() {
    let store = MemoryTaskStore::new();
    store.create("keep me").unwrap();

    let log = Rc::new(RefCell::new(Vec::new()));
    let _sub = store.subscribe(recording_handler(Rc::clone(&log))).unwrap();

    store.remove(Uuid::new_v4()).unwrap();

    // Only the initial snapshot: nothing changed, nothing was announced.
    assert_eq!(log.borrow().len(), 1);
    assert_eq!(store.len(), 1);
}

#[test]
fn unsubscribe_stops_delivery() {
    let store = MemoryTaskStore::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    let sub = store.subscribe(recording_handler(Rc::clone(&log))).unwrap();

    sub.unsubscribe();
    store.create("after teardown").unwrap();

    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn unavailable_store_rejects_every_operation() {
    let store = MemoryTaskStore::new();
    store.set_available(false);

    assert_eq!(store.create("nope").unwrap_err(), StoreError::Unavailable);
    assert_eq!(
        store.remove(Uuid::new_v4()).unwrap_err(),
        StoreError::Unavailable
    );
    assert!(matches!(
        store.subscribe(Box::new(|_| {})).unwrap_err(),
        StoreError::Unavailable
    ));

    store.set_available(true);
    assert!(store.create("recovered").is_ok());
}

#[test]
fn blank_text_is_rejected_as_operation_failure() {
    let store = MemoryTaskStore::new();

    let err = store.create("   ").unwrap_err();
    assert!(matches!(err, StoreError::OperationFailed(_)));
    assert!(store.is_empty());
}
