use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A user-marked span of book text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Highlight {
    pub id: String,
    pub book_id: String,
    pub text: String,
    pub color: HighlightColor,
    pub note: Option<String>,
    pub created_at: i64,
}

/// Marker palette for highlights.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HighlightColor {
    Yellow,
    Green,
    Blue,
    Pink,
    Purple,
    Orange,
}

/// A free-standing note attached to a book.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Note {
    pub id: String,
    pub book_id: String,
    pub title: String,
    pub content: String,
    pub tags: BTreeSet<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// A partial patch for an existing note. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoteUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<BTreeSet<String>>,
}

impl Note {
    /// Applies a patch, refreshing `updated_at`.
    pub fn apply(&mut self, patch: &NoteUpdate, now: i64) {
        if let Some(ref title) = patch.title {
            self.title = title.clone();
        }
        if let Some(ref content) = patch.content {
            self.content = content.clone();
        }
        if let Some(ref tags) = patch.tags {
            self.tags = tags.clone();
        }
        self.updated_at = now;
    }
}

/// Time window for annotation filtering.
///
/// `Recent` keeps items created within the last seven days.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    #[default]
    All,
    Recent,
}

/// Seconds in the "recent" window.
pub const RECENT_WINDOW_SECS: i64 = 7 * 24 * 60 * 60;

/// Combined filter for the annotation drawer: book scope, case-insensitive
/// substring search, and a time window.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnnotationFilter {
    pub book_id: Option<String>,
    pub query: Option<String>,
    pub window: TimeWindow,
}
