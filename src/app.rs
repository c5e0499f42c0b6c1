//! App core for the reader engine.
//!
//! Central struct holding the database, the settings engine, the book
//! service, the progress sync worker, the audit log, and the active
//! reading session (at most one book open at a time).

use std::sync::Arc;
use std::time::Instant;

use log::warn;
use serde_json::json;

use crate::database::connection::Database;
use crate::managers::annotation_repo::{AnnotationRepo, AnnotationRepoTrait};
use crate::managers::progress_repo::{ProgressRepo, ProgressRepoTrait};
use crate::managers::reading_session::ReadingSession;
use crate::services::audit_log::{AuditLog, AuditLogTrait};
use crate::services::book_service::{BookFetcher, HttpBookService};
use crate::services::progress_sync::{HttpProgressSink, ProgressSync};
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::types::errors::SessionError;
use crate::types::progress::{ReadingProgress, ScrollMetrics};

/// Central application struct.
///
/// `AnnotationRepo` and `ProgressRepo` are created on demand via
/// `db.connection()` because they borrow the connection with a lifetime
/// parameter.
pub struct App {
    pub db: Arc<Database>,
    pub settings_engine: SettingsEngine,
    pub book_service: Box<dyn BookFetcher + Send>,
    pub progress_sync: Option<ProgressSync>,
    pub audit_log: AuditLog,
    pub session: Option<ReadingSession>,
}

impl App {
    /// Creates a new App against the store at `base_url`, with the real
    /// HTTP book service and progress sink.
    pub fn new(db_path: &str, base_url: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let db = Arc::new(Database::open(db_path)?);
        let book_service = Box::new(HttpBookService::new(base_url));
        let progress_sync = ProgressSync::new(Box::new(HttpProgressSink::new(base_url)));
        Ok(Self::assemble(db, book_service, Some(progress_sync), None))
    }

    /// Test constructor: injected fetcher, no background sync worker,
    /// settings at an explicit path.
    pub fn with_parts(
        db: Arc<Database>,
        book_service: Box<dyn BookFetcher + Send>,
        progress_sync: Option<ProgressSync>,
        settings_path: Option<String>,
    ) -> Self {
        Self::assemble(db, book_service, progress_sync, settings_path)
    }

    fn assemble(
        db: Arc<Database>,
        book_service: Box<dyn BookFetcher + Send>,
        progress_sync: Option<ProgressSync>,
        settings_path: Option<String>,
    ) -> Self {
        let audit_log = AuditLog::new(db.clone());
        let mut settings_engine = SettingsEngine::new(settings_path);
        if let Err(e) = settings_engine.load() {
            warn!("failed to load reader settings, using defaults: {}", e);
        }
        Self {
            db,
            settings_engine,
            book_service,
            progress_sync,
            audit_log,
            session: None,
        }
    }

    /// Loads a book and starts a reading session for it.
    ///
    /// Remote user data wins when present; otherwise the local backing
    /// store seeds the session. An already-open session is closed first.
    pub fn open_book(&mut self, book_id: &str) -> Result<&ReadingSession, SessionError> {
        if self.session.is_some() {
            self.close_session()?;
        }

        let book = self
            .book_service
            .fetch_book(book_id)
            .map_err(|e| SessionError::InitFailed(e.to_string()))?;
        let user_data = self.book_service.fetch_user_data(book_id);

        let conn = self.db.connection();
        let progress = match user_data.progress {
            Some(p) => Some(p),
            None => ProgressRepo::new(conn).load(book_id).unwrap_or_else(|e| {
                warn!("failed to load local progress for {}: {}", book_id, e);
                None
            }),
        };
        // Highlights and notes fall back to the local store independently;
        // a remote response carrying only one kind must not hide locally
        // stored annotations of the other.
        let repo = AnnotationRepo::new(conn);
        let highlights = if user_data.highlights.is_empty() {
            repo.load_highlights(book_id).unwrap_or_else(|e| {
                warn!("failed to load local highlights for {}: {}", book_id, e);
                Vec::new()
            })
        } else {
            user_data.highlights
        };
        let notes = if user_data.notes.is_empty() {
            repo.load_notes(book_id).unwrap_or_else(|e| {
                warn!("failed to load local notes for {}: {}", book_id, e);
                Vec::new()
            })
        } else {
            user_data.notes
        };

        let settings = self.settings_engine.get_settings().clone();
        let session = ReadingSession::open(book, settings, progress, highlights, notes);

        if let Err(e) = self.audit_log.record(
            "book.opened",
            Some(book_id),
            &json!({"book_title": session.book().title}),
        ) {
            warn!("failed to record audit entry: {}", e);
        }

        Ok(self.session.insert(session))
    }

    /// Returns the active session or the no-session error.
    pub fn session_mut(&mut self) -> Result<&mut ReadingSession, SessionError> {
        self.session.as_mut().ok_or(SessionError::NoActiveSession)
    }

    pub fn session_ref(&self) -> Result<&ReadingSession, SessionError> {
        self.session.as_ref().ok_or(SessionError::NoActiveSession)
    }

    /// Handles a scroll event: updates the tracker, saves locally, and
    /// queues the remote fire-and-forget save.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) -> Result<ReadingProgress, SessionError> {
        let session = self.session.as_mut().ok_or(SessionError::NoActiveSession)?;
        let snapshot = session.on_scroll(metrics, Instant::now());
        self.persist_progress(&snapshot);
        Ok(snapshot)
    }

    fn persist_progress(&self, snapshot: &ReadingProgress) {
        if let Err(e) = ProgressRepo::new(self.db.connection()).save(snapshot) {
            warn!("failed to save progress locally: {}", e);
        }
        if let Some(ref sync) = self.progress_sync {
            sync.queue(snapshot.clone());
        }
    }

    /// Tears the session down, flushing the final progress snapshot.
    pub fn close_session(&mut self) -> Result<ReadingProgress, SessionError> {
        let session = self.session.take().ok_or(SessionError::NoActiveSession)?;
        let book_id = session.book().id.clone();
        let last = session.close();
        self.persist_progress(&last);
        if let Err(e) = self.audit_log.record(
            "book.closed",
            Some(&book_id),
            &json!({"percentage": last.percentage}),
        ) {
            warn!("failed to record audit entry: {}", e);
        }
        Ok(last)
    }
}
