//! Task list controller state machine.
//!
//! # Responsibility
//! - Drive the `Uninitialized -> Connecting -> Ready -> (Error)` lifecycle
//!   around one store subscription.
//! - Surface store/validation errors as transient status messages without
//!   touching the local view.
//!
//! # Invariants
//! - The view is only replaced wholesale from store snapshots, stable-sorted
//!   ascending by `created_at`.
//! - `Error` is always recoverable: the next successful snapshot returns the
//!   controller to `Ready`.
//! - No automatic retries; callers re-issue failed actions.

use crate::identity::UserId;
use crate::model::task::{Task, TaskId, TaskValidationError};
use crate::store::{Snapshot, StoreError, Subscription, TaskStore};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::mpsc;
use std::time::{Duration, Instant};

/// How long a transient status message stays visible.
pub const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(4);

pub type ControllerResult<T> = Result<T, ControllerError>;

/// Errors surfaced to the embedding layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerError {
    /// Input rejected before any store call.
    Validation(TaskValidationError),
    /// The store refused or failed the request.
    Store(StoreError),
}

impl Display for ControllerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ControllerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<TaskValidationError> for ControllerError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for ControllerError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Controller lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// No subscription requested yet.
    Uninitialized,
    /// Subscription requested, waiting for the first snapshot.
    Connecting,
    /// At least one snapshot applied; view is authoritative.
    Ready,
    /// Last store interaction failed; cleared by the next snapshot.
    Error,
}

impl Display for ControllerState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Uninitialized => "uninitialized",
            Self::Connecting => "connecting",
            Self::Ready => "ready",
            Self::Error => "error",
        };
        write!(f, "{label}")
    }
}

/// Severity of a transient status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Error,
}

/// User-facing transient message, auto-expiring after [`STATUS_MESSAGE_TTL`].
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
    pub posted_at: Instant,
}

impl StatusMessage {
    /// Returns whether this message is still within its display window.
    pub fn is_live(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.posted_at) < STATUS_MESSAGE_TTL
    }
}

/// Explicit construction context: store handle plus resolved user identity.
///
/// Passing the context in keeps the engine free of process-wide singletons.
pub struct ControllerContext<S: TaskStore> {
    pub store: S,
    pub user_id: UserId,
}

/// Holds the ordered task view and mediates all store interaction.
pub struct TaskListController<S: TaskStore> {
    store: S,
    user_id: UserId,
    state: ControllerState,
    view: Vec<Task>,
    events: Option<mpsc::Receiver<Snapshot>>,
    subscription: Option<Subscription>,
    messages: Vec<StatusMessage>,
}

impl<S: TaskStore> TaskListController<S> {
    /// Creates an `Uninitialized` controller from an explicit context.
    pub fn new(context: ControllerContext<S>) -> Self {
        Self {
            store: context.store,
            user_id: context.user_id,
            state: ControllerState::Uninitialized,
            view: Vec::new(),
            events: None,
            subscription: None,
            messages: Vec::new(),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// The identity this controller operates on behalf of.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Current ordered view, ascending by `created_at`.
    pub fn tasks(&self) -> &[Task] {
        &self.view
    }

    /// Requests the store subscription and starts consuming its feed.
    ///
    /// Moves to `Connecting` immediately; any snapshot the store delivers
    /// during registration is applied before this returns, so connected
    /// stores land in `Ready`.
    ///
    /// # Errors
    /// - `ControllerError::Store` when the store rejects the subscription;
    ///   the controller is left in `Error` and `connect` may be retried.
    pub fn connect(&mut self) -> ControllerResult<()> {
        if let Some(previous) = self.subscription.take() {
            previous.unsubscribe();
        }
        self.events = None;
        self.transition(ControllerState::Connecting);

        let (tx, rx) = mpsc::channel::<Snapshot>();
        let handler = Box::new(move |snapshot: Snapshot| {
            // Receiver drop just means the controller disconnected.
            let _ = tx.send(snapshot);
        });

        match self.store.subscribe(handler) {
            Ok(subscription) => {
                self.events = Some(rx);
                self.subscription = Some(subscription);
                self.pump();
                Ok(())
            }
            Err(err) => {
                self.fail(&format!("could not connect to task store: {err}"));
                Err(err.into())
            }
        }
    }

    /// Tears down the subscription and returns to `Uninitialized`.
    ///
    /// The view is kept as a stale read-only copy until the next `connect`.
    pub fn disconnect(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
        self.events = None;
        self.transition(ControllerState::Uninitialized);
    }

    /// Drains pending snapshot events in delivery order.
    ///
    /// Returns the number of snapshots applied. Call this from the embedding
    /// event loop after any action that may have produced store changes.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        loop {
            let snapshot = match &self.events {
                Some(rx) => match rx.try_recv() {
                    Ok(snapshot) => snapshot,
                    Err(_) => break,
                },
                None => break,
            };
            self.apply_snapshot(snapshot);
            applied += 1;
        }
        applied
    }

    /// Replaces the view wholesale with a store snapshot.
    ///
    /// Tasks are stable-sorted ascending by `created_at`; `created_at` is
    /// expected unique so any tie-break is acceptable. A successful snapshot
    /// always lands in `Ready`, clearing a prior `Error`.
    pub fn apply_snapshot(&mut self, mut snapshot: Snapshot) {
        snapshot.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        self.view = snapshot;
        self.transition(ControllerState::Ready);
    }

    /// Requests creation of a task with the given text.
    ///
    /// The text is trimmed first; empty input is rejected before any store
    /// call. On success the store's own change notification updates the view;
    /// the returned id is only a receipt.
    ///
    /// # Errors
    /// - `ControllerError::Validation` for empty/whitespace-only text.
    /// - `ControllerError::Store` when the store refuses; the view is left
    ///   untouched and the controller enters `Error`.
    pub fn add_task(&mut self, text: &str) -> ControllerResult<TaskId> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            self.post(StatusLevel::Error, "task text cannot be empty");
            return Err(TaskValidationError::EmptyText.into());
        }

        match self.store.create(trimmed) {
            Ok(task) => {
                info!(
                    "event=task_add module=controller status=ok user={} task_id={}",
                    self.user_id, task.id
                );
                self.post(StatusLevel::Info, "task added");
                self.pump();
                Ok(task.id)
            }
            Err(err) => {
                warn!(
                    "event=task_add module=controller status=error user={} error={err}",
                    self.user_id
                );
                self.fail(&format!("could not add task: {err}"));
                Err(err.into())
            }
        }
    }

    /// Requests removal of the task with the given id.
    ///
    /// Removal of an absent id still issues the delete request; only a store
    /// rejection is an error.
    ///
    /// # Errors
    /// - `ControllerError::Store` when the store refuses; the view is left
    ///   untouched and the controller enters `Error`.
    pub fn remove_task(&mut self, id: TaskId) -> ControllerResult<()> {
        match self.store.remove(id) {
            Ok(()) => {
                info!(
                    "event=task_remove module=controller status=ok user={} task_id={id}",
                    self.user_id
                );
                self.post(StatusLevel::Info, "task removed");
                self.pump();
                Ok(())
            }
            Err(err) => {
                warn!(
                    "event=task_remove module=controller status=error user={} task_id={id} error={err}",
                    self.user_id
                );
                self.fail(&format!("could not remove task: {err}"));
                Err(err.into())
            }
        }
    }

    /// Returns status messages still within their display window.
    ///
    /// Expired messages are pruned as a side effect.
    pub fn status_messages(&mut self, now: Instant) -> &[StatusMessage] {
        self.messages.retain(|message| message.is_live(now));
        &self.messages
    }

    fn post(&mut self, level: StatusLevel, text: &str) {
        self.messages.push(StatusMessage {
            level,
            text: text.to_string(),
            posted_at: Instant::now(),
        });
    }

    fn fail(&mut self, text: &str) {
        self.post(StatusLevel::Error, text);
        self.transition(ControllerState::Error);
    }

    fn transition(&mut self, next: ControllerState) {
        if self.state == next {
            return;
        }
        info!(
            "event=controller_state module=controller from={} to={next}",
            self.state
        );
        self.state = next;
    }
}
