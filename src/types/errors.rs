use std::fmt;

// === SettingsError ===

/// Errors related to reader settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing the settings file.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}

// === AnnotationError ===

/// Errors related to highlight and note operations.
#[derive(Debug)]
pub enum AnnotationError {
    /// Highlight with the given ID was not found.
    HighlightNotFound(String),
    /// Note with the given ID was not found.
    NoteNotFound(String),
    /// Database operation failed.
    DatabaseError(String),
}

impl fmt::Display for AnnotationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotationError::HighlightNotFound(id) => {
                write!(f, "Highlight not found: {}", id)
            }
            AnnotationError::NoteNotFound(id) => write!(f, "Note not found: {}", id),
            AnnotationError::DatabaseError(msg) => {
                write!(f, "Annotation database error: {}", msg)
            }
        }
    }
}

impl std::error::Error for AnnotationError {}

// === ProgressError ===

/// Errors related to reading-progress persistence.
#[derive(Debug)]
pub enum ProgressError {
    /// Database operation failed.
    DatabaseError(String),
    /// The remote progress endpoint rejected or dropped the save.
    SyncError(String),
}

impl fmt::Display for ProgressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgressError::DatabaseError(msg) => {
                write!(f, "Progress database error: {}", msg)
            }
            ProgressError::SyncError(msg) => write!(f, "Progress sync error: {}", msg),
        }
    }
}

impl std::error::Error for ProgressError {}

// === BookError ===

/// Errors related to loading book content.
#[derive(Debug)]
pub enum BookError {
    /// The store API does not know this book.
    NotFound(String),
    /// A network error occurred while fetching content.
    NetworkError(String),
    /// The API response could not be parsed.
    ParseError(String),
    /// The API returned an error envelope.
    ApiError(String),
}

impl fmt::Display for BookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookError::NotFound(id) => write!(f, "Book not found: {}", id),
            BookError::NetworkError(msg) => write!(f, "Book network error: {}", msg),
            BookError::ParseError(msg) => write!(f, "Book parse error: {}", msg),
            BookError::ApiError(msg) => write!(f, "Book API error: {}", msg),
        }
    }
}

impl std::error::Error for BookError {}

// === SessionError ===

/// Errors related to the reading-session lifecycle.
#[derive(Debug)]
pub enum SessionError {
    /// An operation required an open session but none is active.
    NoActiveSession,
    /// An annotation operation required a confirmed text selection.
    NoSelection,
    /// The session could not be initialized.
    InitFailed(String),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::NoActiveSession => write!(f, "No book is currently open"),
            SessionError::NoSelection => write!(f, "No text is selected"),
            SessionError::InitFailed(msg) => {
                write!(f, "Reading session init failed: {}", msg)
            }
        }
    }
}

impl std::error::Error for SessionError {}

// === AuditError ===

/// Errors related to the audit log.
#[derive(Debug)]
pub enum AuditError {
    /// Database operation failed.
    DatabaseError(String),
    /// A stored detail payload could not be deserialized.
    SerializationError(String),
}

impl fmt::Display for AuditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditError::DatabaseError(msg) => write!(f, "Audit database error: {}", msg),
            AuditError::SerializationError(msg) => {
                write!(f, "Audit serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for AuditError {}
