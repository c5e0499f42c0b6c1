//! The reading session: client-side state for one open book.
//!
//! An explicit object created on book load and torn down on close — there
//! is no ambient global store. The session owns the settings snapshot, the
//! progress tracker, the annotation store and both drawers; the RPC layer
//! routes reader-surface events into it.

use std::collections::BTreeSet;
use std::time::Instant;

use crate::managers::annotation_store::{AnnotationStore, AnnotationStoreTrait};
use crate::managers::drawer_controller::DrawerController;
use crate::managers::progress_tracker::ProgressTracker;
use crate::types::annotation::{Highlight, HighlightColor, Note, NoteUpdate};
use crate::types::book::Book;
use crate::types::errors::{AnnotationError, SessionError};
use crate::types::progress::{ReadingProgress, ScrollMetrics};
use crate::types::session::{InputOutcome, ReaderKey};
use crate::types::settings::ReaderSettings;

/// State for one open book.
pub struct ReadingSession {
    book: Book,
    settings: ReaderSettings,
    tracker: ProgressTracker,
    store: AnnotationStore,
    drawers: DrawerController,
    selected_text: Option<String>,
}

impl ReadingSession {
    /// Builds a session from the loaded book and whatever user data could
    /// be restored. Missing user data starts the session empty.
    pub fn open(
        book: Book,
        settings: ReaderSettings,
        restored_progress: Option<ReadingProgress>,
        highlights: Vec<Highlight>,
        notes: Vec<Note>,
    ) -> Self {
        let tracker = ProgressTracker::new(&book.id, restored_progress);
        let mut store = AnnotationStore::new();
        store.load(highlights, notes);
        Self {
            book,
            settings,
            tracker,
            store,
            drawers: DrawerController::new(),
            selected_text: None,
        }
    }

    pub fn book(&self) -> &Book {
        &self.book
    }

    pub fn settings(&self) -> &ReaderSettings {
        &self.settings
    }

    /// Replaces the settings snapshot the reader surface styles itself from.
    pub fn set_settings(&mut self, settings: ReaderSettings) {
        self.settings = settings;
    }

    // --- Reader surface events ---

    /// Scroll event: updates progress and returns the snapshot to persist.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics, at: Instant) -> ReadingProgress {
        self.tracker.on_scroll(metrics, at).clone()
    }

    /// Advances the settle timer; true when the scrolling flag just cleared.
    pub fn tick(&mut self, at: Instant) -> bool {
        self.tracker.tick(at)
    }

    pub fn is_scrolling(&self) -> bool {
        self.tracker.is_scrolling()
    }

    pub fn progress(&self) -> &ReadingProgress {
        self.tracker.progress()
    }

    /// Records the current text selection as the annotation candidate.
    pub fn select_text(&mut self, text: &str) {
        let trimmed = text.trim();
        self.selected_text = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
    }

    pub fn clear_selection(&mut self) {
        self.selected_text = None;
    }

    pub fn selection(&self) -> Option<&str> {
        self.selected_text.as_deref()
    }

    /// Keyboard shortcut; Escape surfaces a close request to the caller.
    pub fn handle_key(&mut self, key: ReaderKey) -> InputOutcome {
        self.drawers.handle_key(key)
    }

    /// Touch swipe from the reader surface.
    pub fn handle_swipe(&mut self, delta_x: f64, delta_y: f64) -> InputOutcome {
        self.drawers.handle_swipe(delta_x, delta_y)
    }

    pub fn drawers(&mut self) -> &mut DrawerController {
        &mut self.drawers
    }

    pub fn drawer_state(&self) -> &crate::types::session::DrawerState {
        self.drawers.state()
    }

    // --- Annotations ---

    /// Turns the confirmed selection into a highlight and clears it.
    pub fn highlight_selection(
        &mut self,
        color: HighlightColor,
        note: Option<&str>,
    ) -> Result<Highlight, SessionError> {
        let text = self.selected_text.take().ok_or(SessionError::NoSelection)?;
        Ok(self
            .store
            .add_highlight(&self.book.id, &text, color, note))
    }

    /// Creates a note whose content is the confirmed selection.
    pub fn note_from_selection(
        &mut self,
        title: &str,
        tags: BTreeSet<String>,
    ) -> Result<Note, SessionError> {
        let text = self.selected_text.take().ok_or(SessionError::NoSelection)?;
        Ok(self.store.add_note(&self.book.id, title, &text, tags))
    }

    pub fn add_note(&mut self, title: &str, content: &str, tags: BTreeSet<String>) -> Note {
        self.store.add_note(&self.book.id, title, content, tags)
    }

    pub fn update_note(&mut self, id: &str, patch: &NoteUpdate) -> Result<Note, AnnotationError> {
        self.store.update_note(id, patch)
    }

    pub fn remove_note(&mut self, id: &str) -> Result<Note, AnnotationError> {
        self.store.remove_note(id)
    }

    pub fn remove_highlight(&mut self, id: &str) -> Result<Highlight, AnnotationError> {
        self.store.remove_highlight(id)
    }

    pub fn annotations(&self) -> &AnnotationStore {
        &self.store
    }

    /// Tears the session down, returning the final progress snapshot for a
    /// last flush.
    pub fn close(mut self) -> ReadingProgress {
        self.tracker.cancel_settle();
        self.tracker.progress().clone()
    }
}
