//! Task store adapter contract and implementations.
//!
//! # Responsibility
//! - Define the narrow interface the list controller talks to.
//! - Keep connection/auth state inside adapter implementations.
//!
//! # Invariants
//! - Adapters own identity/transport details; callers never inspect them.
//! - Change notifications always carry a complete snapshot, delivered one at
//!   a time in order.
//! - An unsubscribed handler is never invoked again.

use crate::model::task::{Task, TaskId, TaskValidationError};
use std::cell::Cell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

pub mod memory;
pub mod sqlite;

pub use memory::MemoryTaskStore;
pub use sqlite::SqliteTaskStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Complete point-in-time listing of one user's tasks.
///
/// Ordering within a snapshot is unspecified; consumers that need ordering
/// sort on `created_at` themselves.
pub type Snapshot = Vec<Task>;

/// Change-feed callback registered through [`TaskStore::subscribe`].
pub type SnapshotHandler = Box<dyn FnMut(Snapshot)>;

/// Store-level operation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store is not connected/authenticated yet. Retry once it is.
    Unavailable,
    /// The store rejected the create/remove request.
    OperationFailed(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable => write!(f, "task store is not available yet"),
            Self::OperationFailed(reason) => write!(f, "store operation failed: {reason}"),
        }
    }
}

impl Error for StoreError {}

impl From<TaskValidationError> for StoreError {
    fn from(value: TaskValidationError) -> Self {
        Self::OperationFailed(value.to_string())
    }
}

/// Narrow interface over an external persistent task collection.
///
/// The adapter owns no business logic: validation beyond the model invariant
/// and all ordering concerns live in the controller. Remove is idempotent
/// from the caller's perspective; adapters report `OperationFailed` only when
/// the backing store itself rejects the request.
pub trait TaskStore {
    /// Persists a new task with the given text and returns it.
    fn create(&self, text: &str) -> StoreResult<Task>;

    /// Deletes the task with the given id, succeeding when it is absent.
    fn remove(&self, id: TaskId) -> StoreResult<()>;

    /// Registers a change handler and delivers the current snapshot to it.
    ///
    /// Every subsequent successful mutation delivers a fresh full snapshot.
    /// Dropping the returned [`Subscription`] without calling
    /// [`Subscription::unsubscribe`] keeps the handler registered.
    fn subscribe(&self, handler: SnapshotHandler) -> StoreResult<Subscription>;
}

/// Teardown handle for one change-feed registration.
#[derive(Debug)]
pub struct Subscription {
    active: Rc<Cell<bool>>,
}

impl Subscription {
    pub(crate) fn new(active: Rc<Cell<bool>>) -> Self {
        Self { active }
    }

    /// Returns whether the handler is still registered.
    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    /// Cancels delivery; the handler is never invoked after this returns.
    pub fn unsubscribe(self) {
        self.active.set(false);
    }
}

/// Subscriber bookkeeping for in-process store adapters.
///
/// Adapter implementations register handlers here and call `dispatch` after
/// every successful mutation. Dead entries (unsubscribed handlers) are pruned
/// on every dispatch.
#[derive(Default)]
pub struct SubscriberList {
    entries: Vec<(Rc<Cell<bool>>, SnapshotHandler)>,
}

impl SubscriberList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one handler and returns its teardown handle.
    pub fn register(&mut self, handler: SnapshotHandler) -> Subscription {
        let active = Rc::new(Cell::new(true));
        self.entries.push((Rc::clone(&active), handler));
        Subscription::new(active)
    }

    /// Delivers `snapshot` to every live handler, cloning per handler.
    pub fn dispatch(&mut self, snapshot: &Snapshot) {
        self.entries.retain(|(active, _)| active.get());
        for (_, handler) in &mut self.entries {
            handler(snapshot.clone());
        }
    }

    /// Number of currently registered handlers, pruned or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Returns a timestamp strictly greater than `last`, preferring wall time.
///
/// Adapters use this to keep `created_at` assignment monotonic even when the
/// clock stalls or steps backwards between calls.
pub(crate) fn next_monotonic_ms(last: i64) -> i64 {
    let now_ms = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0);
    now_ms.max(last + 1)
}

#[cfg(test)]
mod tests {
    use super::{SnapshotHandler, SubscriberList};
    use crate::model::task::Task;
    use std::cell::RefCell;
    use std::rc::Rc;
    use uuid::Uuid;

    fn counting_handler(counter: Rc<RefCell<usize>>) -> SnapshotHandler {
        Box::new(move |_| *counter.borrow_mut() += 1)
    }

    #[test]
    fn dispatch_reaches_every_live_handler() {
        let mut list = SubscriberList::new();
        let first = Rc::new(RefCell::new(0));
        let second = Rc::new(RefCell::new(0));
        let _sub_a = list.register(counting_handler(Rc::clone(&first)));
        let _sub_b = list.register(counting_handler(Rc::clone(&second)));

        let snapshot = vec![Task::with_id(Uuid::new_v4(), "t", 1).unwrap()];
        list.dispatch(&snapshot);

        assert_eq!(*first.borrow(), 1);
        assert_eq!(*second.borrow(), 1);
    }

    #[test]
    fn unsubscribed_handler_is_pruned_and_silent() {
        let mut list = SubscriberList::new();
        let calls = Rc::new(RefCell::new(0));
        let sub = list.register(counting_handler(Rc::clone(&calls)));

        sub.unsubscribe();
        list.dispatch(&Vec::new());

        assert_eq!(*calls.borrow(), 0);
        assert_eq!(list.len(), 0);
    }
}
