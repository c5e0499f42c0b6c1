//! SQLite repository for highlights and notes.
//!
//! The in-memory `AnnotationStore` is the session's working set; this
//! repository is the durable copy it is seeded from and written through to.

use rusqlite::{params, Connection};

use crate::types::annotation::{Highlight, HighlightColor, Note, NoteUpdate};
use crate::types::errors::AnnotationError;

/// Trait defining annotation persistence operations.
pub trait AnnotationRepoTrait {
    fn load_highlights(&self, book_id: &str) -> Result<Vec<Highlight>, AnnotationError>;
    fn load_notes(&self, book_id: &str) -> Result<Vec<Note>, AnnotationError>;
    fn insert_highlight(&mut self, highlight: &Highlight) -> Result<(), AnnotationError>;
    fn delete_highlight(&mut self, id: &str) -> Result<(), AnnotationError>;
    fn insert_note(&mut self, note: &Note) -> Result<(), AnnotationError>;
    fn update_note(
        &mut self,
        id: &str,
        patch: &NoteUpdate,
        updated_at: i64,
    ) -> Result<(), AnnotationError>;
    fn delete_note(&mut self, id: &str) -> Result<(), AnnotationError>;
}

/// Annotation repository backed by a SQLite connection.
pub struct AnnotationRepo<'a> {
    conn: &'a Connection,
}

impl<'a> AnnotationRepo<'a> {
    /// Creates a new `AnnotationRepo` using the provided database connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn color_to_str(color: HighlightColor) -> &'static str {
        match color {
            HighlightColor::Yellow => "yellow",
            HighlightColor::Green => "green",
            HighlightColor::Blue => "blue",
            HighlightColor::Pink => "pink",
            HighlightColor::Purple => "purple",
            HighlightColor::Orange => "orange",
        }
    }

    fn color_from_str(s: &str) -> HighlightColor {
        match s {
            "green" => HighlightColor::Green,
            "blue" => HighlightColor::Blue,
            "pink" => HighlightColor::Pink,
            "purple" => HighlightColor::Purple,
            "orange" => HighlightColor::Orange,
            // Unknown colors fall back to the default marker.
            _ => HighlightColor::Yellow,
        }
    }

    fn row_to_highlight(row: &rusqlite::Row) -> rusqlite::Result<Highlight> {
        let color: String = row.get(3)?;
        Ok(Highlight {
            id: row.get(0)?,
            book_id: row.get(1)?,
            text: row.get(2)?,
            color: Self::color_from_str(&color),
            note: row.get(4)?,
            created_at: row.get(5)?,
        })
    }

    fn row_to_note(row: &rusqlite::Row) -> rusqlite::Result<Note> {
        let tags_json: String = row.get(4)?;
        Ok(Note {
            id: row.get(0)?,
            book_id: row.get(1)?,
            title: row.get(2)?,
            content: row.get(3)?,
            tags: serde_json::from_str(&tags_json).unwrap_or_default(),
            created_at: row.get(5)?,
            updated_at: row.get(6)?,
        })
    }
}

impl<'a> AnnotationRepoTrait for AnnotationRepo<'a> {
    /// Loads all highlights for one book, newest first.
    fn load_highlights(&self, book_id: &str) -> Result<Vec<Highlight>, AnnotationError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, book_id, text, color, note, created_at \
                 FROM highlights WHERE book_id = ?1 ORDER BY created_at DESC",
            )
            .map_err(|e| AnnotationError::DatabaseError(e.to_string()))?;
        let rows = stmt
            .query_map(params![book_id], Self::row_to_highlight)
            .map_err(|e| AnnotationError::DatabaseError(e.to_string()))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| AnnotationError::DatabaseError(e.to_string()))
    }

    /// Loads all notes for one book, newest first.
    fn load_notes(&self, book_id: &str) -> Result<Vec<Note>, AnnotationError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, book_id, title, content, tags, created_at, updated_at \
                 FROM notes WHERE book_id = ?1 ORDER BY created_at DESC",
            )
            .map_err(|e| AnnotationError::DatabaseError(e.to_string()))?;
        let rows = stmt
            .query_map(params![book_id], Self::row_to_note)
            .map_err(|e| AnnotationError::DatabaseError(e.to_string()))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| AnnotationError::DatabaseError(e.to_string()))
    }

    fn insert_highlight(&mut self, highlight: &Highlight) -> Result<(), AnnotationError> {
        self.conn
            .execute(
                "INSERT INTO highlights (id, book_id, text, color, note, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    highlight.id,
                    highlight.book_id,
                    highlight.text,
                    Self::color_to_str(highlight.color),
                    highlight.note,
                    highlight.created_at,
                ],
            )
            .map_err(|e| AnnotationError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    fn delete_highlight(&mut self, id: &str) -> Result<(), AnnotationError> {
        let affected = self
            .conn
            .execute("DELETE FROM highlights WHERE id = ?1", params![id])
            .map_err(|e| AnnotationError::DatabaseError(e.to_string()))?;
        if affected == 0 {
            return Err(AnnotationError::HighlightNotFound(id.to_string()));
        }
        Ok(())
    }

    fn insert_note(&mut self, note: &Note) -> Result<(), AnnotationError> {
        let tags_json = serde_json::to_string(&note.tags)
            .map_err(|e| AnnotationError::DatabaseError(e.to_string()))?;
        self.conn
            .execute(
                "INSERT INTO notes (id, book_id, title, content, tags, created_at, updated_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    note.id,
                    note.book_id,
                    note.title,
                    note.content,
                    tags_json,
                    note.created_at,
                    note.updated_at,
                ],
            )
            .map_err(|e| AnnotationError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    /// Applies a partial patch; untouched columns keep their values.
    fn update_note(
        &mut self,
        id: &str,
        patch: &NoteUpdate,
        updated_at: i64,
    ) -> Result<(), AnnotationError> {
        if let Some(ref title) = patch.title {
            self.conn
                .execute("UPDATE notes SET title = ?1 WHERE id = ?2", params![title, id])
                .map_err(|e| AnnotationError::DatabaseError(e.to_string()))?;
        }
        if let Some(ref content) = patch.content {
            self.conn
                .execute(
                    "UPDATE notes SET content = ?1 WHERE id = ?2",
                    params![content, id],
                )
                .map_err(|e| AnnotationError::DatabaseError(e.to_string()))?;
        }
        if let Some(ref tags) = patch.tags {
            let tags_json = serde_json::to_string(tags)
                .map_err(|e| AnnotationError::DatabaseError(e.to_string()))?;
            self.conn
                .execute("UPDATE notes SET tags = ?1 WHERE id = ?2", params![tags_json, id])
                .map_err(|e| AnnotationError::DatabaseError(e.to_string()))?;
        }
        let affected = self
            .conn
            .execute(
                "UPDATE notes SET updated_at = ?1 WHERE id = ?2",
                params![updated_at, id],
            )
            .map_err(|e| AnnotationError::DatabaseError(e.to_string()))?;
        if affected == 0 {
            return Err(AnnotationError::NoteNotFound(id.to_string()));
        }
        Ok(())
    }

    fn delete_note(&mut self, id: &str) -> Result<(), AnnotationError> {
        let affected = self
            .conn
            .execute("DELETE FROM notes WHERE id = ?1", params![id])
            .map_err(|e| AnnotationError::DatabaseError(e.to_string()))?;
        if affected == 0 {
            return Err(AnnotationError::NoteNotFound(id.to_string()));
        }
        Ok(())
    }
}
