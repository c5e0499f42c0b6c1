use serde::{Deserialize, Serialize};

/// Raw scroll geometry reported by the reader surface.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

impl ScrollMetrics {
    /// Completion percentage for this scroll position, always in [0, 100].
    ///
    /// When the content fits the viewport (`scroll_height <= client_height`)
    /// there is nothing left to scroll and the book counts as fully read —
    /// the division-by-zero case never produces NaN.
    pub fn percentage(&self) -> f64 {
        let scrollable = self.scroll_height - self.client_height;
        if scrollable <= 0.0 {
            return 100.0;
        }
        (self.scroll_top / scrollable * 100.0).clamp(0.0, 100.0)
    }
}

/// Reading completion state for one (user, book) pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReadingProgress {
    pub book_id: String,
    /// Scroll offset in pixels within the book content.
    pub current_position: f64,
    /// Completion percentage in [0, 100].
    pub percentage: f64,
    /// Accumulated reading time in seconds.
    pub time_spent_secs: i64,
    /// UNIX timestamp of the last progress update.
    pub last_read_at: i64,
}

impl ReadingProgress {
    /// Fresh zero progress for a newly opened book.
    pub fn new(book_id: &str, now: i64) -> Self {
        Self {
            book_id: book_id.to_string(),
            current_position: 0.0,
            percentage: 0.0,
            time_spent_secs: 0,
            last_read_at: now,
        }
    }
}
