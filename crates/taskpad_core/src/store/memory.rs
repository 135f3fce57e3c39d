//! In-process task store adapter.
//!
//! # Responsibility
//! - Provide a fully functional `TaskStore` without any persistence, for
//!   embedding, demos and controller tests.
//! - Model the availability gate of a remote backend so callers can exercise
//!   `StoreError::Unavailable` and recovery paths.
//!
//! # Invariants
//! - `created_at` values are strictly increasing within one store instance.
//! - Every successful mutation dispatches exactly one fresh snapshot.

use crate::model::task::{Task, TaskId};
use crate::store::{
    next_monotonic_ms, Snapshot, SnapshotHandler, StoreError, StoreResult, SubscriberList,
    Subscription, TaskStore,
};
use log::info;
use std::cell::RefCell;

struct MemoryInner {
    tasks: Vec<Task>,
    last_created_at: i64,
    available: bool,
    subscribers: SubscriberList,
}

/// Volatile single-user task store.
pub struct MemoryTaskStore {
    inner: RefCell<MemoryInner>,
}

impl MemoryTaskStore {
    /// Creates an available, empty store.
    pub fn new() -> Self {
        Self {
            inner: RefCell::new(MemoryInner {
                tasks: Vec::new(),
                last_created_at: 0,
                available: true,
                subscribers: SubscriberList::new(),
            }),
        }
    }

    /// Toggles the availability gate.
    ///
    /// While unavailable, every operation fails with `StoreError::Unavailable`,
    /// mirroring a backend that has not finished connecting/authenticating.
    pub fn set_available(&self, available: bool) {
        self.inner.borrow_mut().available = available;
    }

    /// Returns the current task count.
    pub fn len(&self) -> usize {
        self.inner.borrow().tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().tasks.is_empty()
    }

    fn notify(&self) {
        // Handlers must not re-enter the store: dispatch holds the interior
        // borrow for its full duration.
        let snapshot: Snapshot = self.inner.borrow().tasks.clone();
        let mut inner = self.inner.borrow_mut();
        inner.subscribers.dispatch(&snapshot);
    }
}

impl Default for MemoryTaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore for MemoryTaskStore {
    fn create(&self, text: &str) -> StoreResult<Task> {
        let task = {
            let mut inner = self.inner.borrow_mut();
            if !inner.available {
                return Err(StoreError::Unavailable);
            }

            let created_at = next_monotonic_ms(inner.last_created_at);
            let task = Task::new(text, created_at)?;
            inner.last_created_at = created_at;
            inner.tasks.push(task.clone());
            task
        };

        info!(
            "event=task_create module=store status=ok adapter=memory task_id={}",
            task.id
        );
        self.notify();
        Ok(task)
    }

    fn remove(&self, id: TaskId) -> StoreResult<()> {
        let removed = {
            let mut inner = self.inner.borrow_mut();
            if !inner.available {
                return Err(StoreError::Unavailable);
            }

            let before = inner.tasks.len();
            inner.tasks.retain(|task| task.id != id);
            inner.tasks.len() != before
        };

        info!(
            "event=task_remove module=store status=ok adapter=memory task_id={id} removed={removed}"
        );
        if removed {
            self.notify();
        }
        Ok(())
    }

    fn subscribe(&self, mut handler: SnapshotHandler) -> StoreResult<Subscription> {
        let initial: Snapshot = {
            let inner = self.inner.borrow();
            if !inner.available {
                return Err(StoreError::Unavailable);
            }
            inner.tasks.clone()
        };

        handler(initial);
        Ok(self.inner.borrow_mut().subscribers.register(handler))
    }
}

#[cfg(test)]
mod tests {
    use crate::store::next_monotonic_ms;

    #[test]
    fn next_monotonic_ms_always_advances() {
        let far_future = i64::MAX - 10;
        assert_eq!(next_monotonic_ms(far_future), far_future + 1);
        assert!(next_monotonic_ms(0) > 0);
    }
}
