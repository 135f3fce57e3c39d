//! Core engine for a minimal personal task list.
//!
//! The controller holds the ordered in-memory view and mediates all
//! interaction with a pluggable task store; the store's snapshot feed is the
//! single source of truth for view updates.

pub mod controller;
pub mod db;
pub mod identity;
pub mod logging;
pub mod model;
pub mod store;

pub use controller::list_controller::{
    ControllerContext, ControllerError, ControllerResult, ControllerState, StatusLevel,
    StatusMessage, TaskListController, STATUS_MESSAGE_TTL,
};
pub use identity::{IdentityError, UserId};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{Task, TaskId, TaskValidationError};
pub use store::{
    MemoryTaskStore, Snapshot, SnapshotHandler, SqliteTaskStore, StoreError, StoreResult,
    SubscriberList, Subscription, TaskStore,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
