// Stateful engines: settings persistence, book loading, remote progress
// sync, and the audit trail.

pub mod audit_log;
pub mod book_service;
pub mod progress_sync;
pub mod settings_engine;
