use serde::{Deserialize, Serialize};

/// Book content and metadata as served by the store API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    /// Sanitized HTML body rendered by the reader surface.
    pub content: String,
    pub content_type: ContentType,
    pub word_count: u32,
    pub cover_image: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Source format of the book content.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Html,
    Epub,
    Markdown,
}
