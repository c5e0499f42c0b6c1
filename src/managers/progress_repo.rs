//! SQLite persistence for reading progress, one row per book.

use rusqlite::{params, Connection, OptionalExtension};

use crate::types::errors::ProgressError;
use crate::types::progress::ReadingProgress;

/// Trait defining local progress persistence.
pub trait ProgressRepoTrait {
    fn load(&self, book_id: &str) -> Result<Option<ReadingProgress>, ProgressError>;
    fn save(&mut self, progress: &ReadingProgress) -> Result<(), ProgressError>;
}

/// Progress repository backed by a SQLite connection.
pub struct ProgressRepo<'a> {
    conn: &'a Connection,
}

impl<'a> ProgressRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl<'a> ProgressRepoTrait for ProgressRepo<'a> {
    fn load(&self, book_id: &str) -> Result<Option<ReadingProgress>, ProgressError> {
        self.conn
            .query_row(
                "SELECT book_id, current_position, percentage, time_spent_secs, last_read_at \
                 FROM reading_progress WHERE book_id = ?1",
                params![book_id],
                |row| {
                    Ok(ReadingProgress {
                        book_id: row.get(0)?,
                        current_position: row.get(1)?,
                        percentage: row.get(2)?,
                        time_spent_secs: row.get(3)?,
                        last_read_at: row.get(4)?,
                    })
                },
            )
            .optional()
            .map_err(|e| ProgressError::DatabaseError(e.to_string()))
    }

    /// Upserts the row for this book. Last write wins.
    fn save(&mut self, progress: &ReadingProgress) -> Result<(), ProgressError> {
        self.conn
            .execute(
                "INSERT INTO reading_progress \
                 (book_id, current_position, percentage, time_spent_secs, last_read_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5) \
                 ON CONFLICT(book_id) DO UPDATE SET \
                 current_position = excluded.current_position, \
                 percentage = excluded.percentage, \
                 time_spent_secs = excluded.time_spent_secs, \
                 last_read_at = excluded.last_read_at",
                params![
                    progress.book_id,
                    progress.current_position,
                    progress.percentage,
                    progress.time_spent_secs,
                    progress.last_read_at,
                ],
            )
            .map_err(|e| ProgressError::DatabaseError(e.to_string()))?;
        Ok(())
    }
}
