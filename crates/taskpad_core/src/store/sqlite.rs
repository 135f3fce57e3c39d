//! SQLite-backed task store adapter.
//!
//! # Responsibility
//! - Persist one user's tasks across sessions behind the `TaskStore` trait.
//! - Keep SQL details inside this persistence boundary.
//!
//! # Invariants
//! - Rows are namespaced by opaque `user_id`; no query crosses namespaces.
//! - `created_at` values are strictly increasing per store instance.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::identity::UserId;
use crate::model::task::{Task, TaskId};
use crate::store::{
    next_monotonic_ms, Snapshot, SnapshotHandler, StoreError, StoreResult, SubscriberList,
    Subscription, TaskStore,
};
use log::info;
use rusqlite::{params, Connection, Row};
use std::cell::{Cell, RefCell};
use uuid::Uuid;

const TASK_SELECT_SQL: &str = "SELECT id, text, created_at FROM tasks";

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::OperationFailed(value.to_string())
    }
}

/// Persistent task store over a bootstrapped SQLite connection.
///
/// Open the connection through [`crate::db::open_db`] (or the in-memory
/// variant) so migrations and pragmas are applied first.
pub struct SqliteTaskStore<'conn> {
    conn: &'conn Connection,
    user_id: UserId,
    last_created_at: Cell<i64>,
    subscribers: RefCell<SubscriberList>,
}

impl<'conn> SqliteTaskStore<'conn> {
    /// Creates a store bound to one user namespace.
    ///
    /// Seeds the timestamp cursor from persisted rows so `created_at` stays
    /// monotonic across sessions.
    pub fn try_new(conn: &'conn Connection, user_id: UserId) -> StoreResult<Self> {
        let last_created_at: i64 = conn.query_row(
            "SELECT COALESCE(MAX(created_at), 0) FROM tasks WHERE user_id = ?1;",
            [user_id.as_str()],
            |row| row.get(0),
        )?;

        Ok(Self {
            conn,
            user_id,
            last_created_at: Cell::new(last_created_at),
            subscribers: RefCell::new(SubscriberList::new()),
        })
    }

    fn snapshot(&self) -> StoreResult<Snapshot> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE user_id = ?1;"))?;
        let mut rows = stmt.query([self.user_id.as_str()])?;

        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }
        Ok(tasks)
    }

    fn notify(&self) -> StoreResult<()> {
        // Handlers must not re-enter the store: dispatch holds the interior
        // borrow for its full duration.
        let snapshot = self.snapshot()?;
        self.subscribers.borrow_mut().dispatch(&snapshot);
        Ok(())
    }
}

impl TaskStore for SqliteTaskStore<'_> {
    fn create(&self, text: &str) -> StoreResult<Task> {
        let created_at = next_monotonic_ms(self.last_created_at.get());
        let task = Task::new(text, created_at)?;

        self.conn.execute(
            "INSERT INTO tasks (id, user_id, text, created_at)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                task.id.to_string(),
                self.user_id.as_str(),
                task.text.as_str(),
                task.created_at,
            ],
        )?;
        self.last_created_at.set(created_at);

        info!(
            "event=task_create module=store status=ok adapter=sqlite task_id={}",
            task.id
        );
        self.notify()?;
        Ok(task)
    }

    fn remove(&self, id: TaskId) -> StoreResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM tasks WHERE id = ?1 AND user_id = ?2;",
            params![id.to_string(), self.user_id.as_str()],
        )?;

        info!(
            "event=task_remove module=store status=ok adapter=sqlite task_id={id} removed={}",
            changed > 0
        );
        // Deleting an absent id is a no-op, not a failure.
        if changed > 0 {
            self.notify()?;
        }
        Ok(())
    }

    fn subscribe(&self, mut handler: SnapshotHandler) -> StoreResult<Subscription> {
        let initial = self.snapshot()?;
        handler(initial);
        Ok(self.subscribers.borrow_mut().register(handler))
    }
}

fn parse_task_row(row: &Row<'_>) -> StoreResult<Task> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        StoreError::OperationFailed(format!("invalid uuid value `{id_text}` in tasks.id"))
    })?;
    let text: String = row.get("text")?;
    let created_at: i64 = row.get("created_at")?;

    Ok(Task::with_id(id, text, created_at)?)
}
