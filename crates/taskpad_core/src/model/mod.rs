//! Domain model for the task-list engine.
//!
//! # Responsibility
//! - Define the canonical task record shared by store adapters and the
//!   list controller.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId` assigned by its store.
//! - Tasks are immutable after creation; removal is the only lifecycle event.

pub mod task;
