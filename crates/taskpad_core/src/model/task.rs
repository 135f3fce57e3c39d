//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record persisted by store adapters.
//! - Enforce creation-time text validation.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `text` is never empty after trimming at creation.
//! - `created_at` is assigned monotonically by the owning store and never
//!   rewritten afterwards.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a task within one user's collection.
///
/// Kept as a type alias to make semantic intent explicit in signatures. The
/// controller treats it as fully opaque.
pub type TaskId = Uuid;

/// Validation failures raised before a task ever reaches a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Text was empty or whitespace-only after trimming.
    EmptyText,
    /// A nil UUID can never identify a task.
    NilId,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "task text cannot be empty"),
            Self::NilId => write!(f, "task id cannot be the nil uuid"),
        }
    }
}

impl Error for TaskValidationError {}

/// Canonical task record.
///
/// Tasks are never mutated in place: a store creates them, hands them out in
/// snapshots, and destroys them on an explicit remove request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable store-assigned ID, opaque to the controller.
    pub id: TaskId,
    /// User-entered task text. Non-empty after trimming.
    pub text: String,
    /// Unix epoch milliseconds, monotonically assigned by the store.
    pub created_at: i64,
}

impl Task {
    /// Creates a task with a freshly generated stable ID.
    ///
    /// # Errors
    /// - `TaskValidationError::EmptyText` when `text` trims to nothing.
    pub fn new(text: impl Into<String>, created_at: i64) -> Result<Self, TaskValidationError> {
        Self::with_id(Uuid::new_v4(), text, created_at)
    }

    /// Creates a task with a caller-provided stable ID.
    ///
    /// Used by store adapters that load identity from persisted rows.
    ///
    /// # Errors
    /// - `TaskValidationError::NilId` when `id` is the nil UUID.
    /// - `TaskValidationError::EmptyText` when `text` trims to nothing.
    pub fn with_id(
        id: TaskId,
        text: impl Into<String>,
        created_at: i64,
    ) -> Result<Self, TaskValidationError> {
        if id.is_nil() {
            return Err(TaskValidationError::NilId);
        }
        let text = text.into();
        if text.trim().is_empty() {
            return Err(TaskValidationError::EmptyText);
        }
        Ok(Self {
            id,
            text,
            created_at,
        })
    }
}
