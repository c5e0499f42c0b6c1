//! Unit tests for the error types.
//!
//! Verifies Display formatting and that every error type works as a
//! `std::error::Error` trait object.

use std::error::Error;

use readnwin_reader::types::errors::{
    AnnotationError, AuditError, BookError, ProgressError, SessionError, SettingsError,
};

#[test]
fn test_settings_error_display() {
    let io = SettingsError::IoError("disk full".to_string());
    assert_eq!(io.to_string(), "Settings I/O error: disk full");

    let ser = SettingsError::SerializationError("bad json".to_string());
    assert!(ser.to_string().contains("bad json"));
}

#[test]
fn test_annotation_error_display_includes_id() {
    let err = AnnotationError::HighlightNotFound("hl-42".to_string());
    assert!(err.to_string().contains("hl-42"));

    let err = AnnotationError::NoteNotFound("note-7".to_string());
    assert_eq!(err.to_string(), "Note not found: note-7");
}

#[test]
fn test_book_error_display() {
    let err = BookError::NotFound("b-1".to_string());
    assert_eq!(err.to_string(), "Book not found: b-1");

    let err = BookError::NetworkError("timed out".to_string());
    assert!(err.to_string().contains("timed out"));

    let err = BookError::ApiError("upstream 500".to_string());
    assert!(err.to_string().contains("upstream 500"));
}

#[test]
fn test_session_error_no_active_session_message() {
    assert_eq!(
        SessionError::NoActiveSession.to_string(),
        "No book is currently open"
    );
}

#[test]
fn test_session_error_no_selection_message() {
    // A missing selection is a user state, not an init failure.
    assert_eq!(SessionError::NoSelection.to_string(), "No text is selected");
}

#[test]
fn test_progress_and_audit_error_display() {
    let err = ProgressError::SyncError("queue closed".to_string());
    assert!(err.to_string().contains("queue closed"));

    let err = AuditError::DatabaseError("locked".to_string());
    assert!(err.to_string().contains("locked"));
}

/// All error types must be usable as boxed trait objects.
#[test]
fn test_errors_as_trait_objects() {
    let errors: Vec<Box<dyn Error>> = vec![
        Box::new(SettingsError::IoError("x".to_string())),
        Box::new(AnnotationError::NoteNotFound("x".to_string())),
        Box::new(ProgressError::DatabaseError("x".to_string())),
        Box::new(BookError::ParseError("x".to_string())),
        Box::new(SessionError::NoActiveSession),
        Box::new(AuditError::SerializationError("x".to_string())),
    ];
    for err in &errors {
        assert!(!err.to_string().is_empty());
    }
}
