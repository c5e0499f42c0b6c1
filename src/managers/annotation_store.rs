//! In-memory annotation store for the active reading session.
//!
//! Holds the highlights and notes of the open book, applies the drawer's
//! combined filter (book scope, case-insensitive search, time window) and
//! produces the client-side export bundle. Persistence is the caller's
//! concern (see `AnnotationRepo`); this store is pure session state.

use std::collections::BTreeSet;
use std::time::{SystemTime, UNIX_EPOCH};

use uuid::Uuid;

use crate::types::annotation::{
    AnnotationFilter, Highlight, HighlightColor, Note, NoteUpdate, TimeWindow,
    RECENT_WINDOW_SECS,
};
use crate::types::errors::AnnotationError;
use crate::types::export::ExportBundle;

/// Trait defining the annotation store interface.
pub trait AnnotationStoreTrait {
    fn add_highlight(
        &mut self,
        book_id: &str,
        text: &str,
        color: HighlightColor,
        note: Option<&str>,
    ) -> Highlight;
    fn remove_highlight(&mut self, id: &str) -> Result<Highlight, AnnotationError>;
    fn add_note(
        &mut self,
        book_id: &str,
        title: &str,
        content: &str,
        tags: BTreeSet<String>,
    ) -> Note;
    fn update_note(&mut self, id: &str, patch: &NoteUpdate) -> Result<Note, AnnotationError>;
    fn remove_note(&mut self, id: &str) -> Result<Note, AnnotationError>;
    fn highlights(&self) -> &[Highlight];
    fn notes(&self) -> &[Note];
    fn filtered_highlights(&self, filter: &AnnotationFilter, now: i64) -> Vec<Highlight>;
    fn filtered_notes(&self, filter: &AnnotationFilter, now: i64) -> Vec<Note>;
    fn export(&self, filter: &AnnotationFilter, now: i64) -> ExportBundle;
}

/// In-memory store, one instance per reading session.
#[derive(Default)]
pub struct AnnotationStore {
    highlights: Vec<Highlight>,
    notes: Vec<Note>,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store from previously persisted annotations.
    pub fn load(&mut self, highlights: Vec<Highlight>, notes: Vec<Note>) {
        self.highlights = highlights;
        self.notes = notes;
    }

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }

    /// True when `created_at` falls inside the filter's time window.
    fn in_window(window: TimeWindow, created_at: i64, now: i64) -> bool {
        match window {
            TimeWindow::All => true,
            TimeWindow::Recent => created_at >= now - RECENT_WINDOW_SECS,
        }
    }

    fn matches_query(query: &str, fields: &[&str]) -> bool {
        let needle = query.to_lowercase();
        fields
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

impl AnnotationStoreTrait for AnnotationStore {
    /// Creates a highlight from confirmed selected text.
    fn add_highlight(
        &mut self,
        book_id: &str,
        text: &str,
        color: HighlightColor,
        note: Option<&str>,
    ) -> Highlight {
        let highlight = Highlight {
            id: Uuid::new_v4().to_string(),
            book_id: book_id.to_string(),
            text: text.to_string(),
            color,
            note: note.map(str::to_string),
            created_at: Self::now(),
        };
        self.highlights.push(highlight.clone());
        highlight
    }

    /// Removes a highlight by id, returning the removed value.
    fn remove_highlight(&mut self, id: &str) -> Result<Highlight, AnnotationError> {
        let index = self
            .highlights
            .iter()
            .position(|h| h.id == id)
            .ok_or_else(|| AnnotationError::HighlightNotFound(id.to_string()))?;
        Ok(self.highlights.remove(index))
    }

    fn add_note(
        &mut self,
        book_id: &str,
        title: &str,
        content: &str,
        tags: BTreeSet<String>,
    ) -> Note {
        let now = Self::now();
        let note = Note {
            id: Uuid::new_v4().to_string(),
            book_id: book_id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            tags,
            created_at: now,
            updated_at: now,
        };
        self.notes.push(note.clone());
        note
    }

    /// Patches an existing note. Untouched fields keep their values.
    fn update_note(&mut self, id: &str, patch: &NoteUpdate) -> Result<Note, AnnotationError> {
        let now = Self::now();
        let note = self
            .notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| AnnotationError::NoteNotFound(id.to_string()))?;
        note.apply(patch, now);
        Ok(note.clone())
    }

    fn remove_note(&mut self, id: &str) -> Result<Note, AnnotationError> {
        let index = self
            .notes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| AnnotationError::NoteNotFound(id.to_string()))?;
        Ok(self.notes.remove(index))
    }

    fn highlights(&self) -> &[Highlight] {
        &self.highlights
    }

    fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Applies the combined drawer filter to highlights.
    ///
    /// Book scope is exact, search matches the highlighted text or the
    /// attached note case-insensitively, and the result is sorted
    /// newest-first by creation time.
    fn filtered_highlights(&self, filter: &AnnotationFilter, now: i64) -> Vec<Highlight> {
        let mut result: Vec<Highlight> = self
            .highlights
            .iter()
            .filter(|h| match filter.book_id {
                Some(ref book_id) => &h.book_id == book_id,
                None => true,
            })
            .filter(|h| match filter.query {
                Some(ref query) => {
                    Self::matches_query(query, &[&h.text, h.note.as_deref().unwrap_or("")])
                }
                None => true,
            })
            .filter(|h| Self::in_window(filter.window, h.created_at, now))
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        result
    }

    /// Applies the combined drawer filter to notes (search matches title
    /// and content).
    fn filtered_notes(&self, filter: &AnnotationFilter, now: i64) -> Vec<Note> {
        let mut result: Vec<Note> = self
            .notes
            .iter()
            .filter(|n| match filter.book_id {
                Some(ref book_id) => &n.book_id == book_id,
                None => true,
            })
            .filter(|n| match filter.query {
                Some(ref query) => Self::matches_query(query, &[&n.title, &n.content]),
                None => true,
            })
            .filter(|n| Self::in_window(filter.window, n.created_at, now))
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        result
    }

    /// Snapshot of the current filtered view for download.
    fn export(&self, filter: &AnnotationFilter, now: i64) -> ExportBundle {
        ExportBundle {
            notes: self.filtered_notes(filter, now),
            highlights: self.filtered_highlights(filter, now),
            export_date: now,
        }
    }
}
