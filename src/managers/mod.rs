// Session-state managers: in-memory stores and the SQLite repositories
// backing them.

pub mod annotation_repo;
pub mod annotation_store;
pub mod drawer_controller;
pub mod progress_repo;
pub mod progress_tracker;
pub mod reading_session;
