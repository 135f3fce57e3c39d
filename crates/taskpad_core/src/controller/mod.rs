//! Task list orchestration.
//!
//! # Responsibility
//! - Hold the ordered in-memory view of one user's tasks.
//! - Mediate add/remove requests and store-driven snapshot updates.
//!
//! # Invariants
//! - The store snapshot feed is the single source of truth for the view;
//!   add/remove never mutate it directly.
//! - The controller stays usable after any error.

pub mod list_controller;
