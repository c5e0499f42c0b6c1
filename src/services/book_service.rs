//! Book loading against the ReadnWin store API.
//!
//! The store serves book content and per-book user data as JSON envelopes
//! (`{"success": true, "data": …}` / `{"success": false, "error": …}`).
//! Book content is required; user data (progress, highlights, notes) is
//! best-effort — a failure there is logged and the session starts empty.

use log::warn;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::types::annotation::{Highlight, Note};
use crate::types::book::{Book, ContentType};
use crate::types::errors::BookError;
use crate::types::progress::ReadingProgress;

/// Standard ReadnWin API response envelope.
#[derive(Debug, Deserialize, Serialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Book content payload as served by `/api/books/{id}/content`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookContentPayload {
    pub title: String,
    pub author: String,
    pub content: String,
    pub content_type: ContentType,
    pub word_count: u32,
    #[serde(default)]
    pub cover_image: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl BookContentPayload {
    pub fn into_book(self, book_id: &str) -> Book {
        Book {
            id: book_id.to_string(),
            title: self.title,
            author: self.author,
            content: self.content,
            content_type: self.content_type,
            word_count: self.word_count,
            cover_image: self.cover_image,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Previously persisted user data for a book.
#[derive(Debug, Default, Clone)]
pub struct BookUserData {
    pub progress: Option<ReadingProgress>,
    pub highlights: Vec<Highlight>,
    pub notes: Vec<Note>,
}

/// Trait defining the book loading interface. The RPC layer depends on this
/// so tests can substitute a fixture fetcher for the HTTP client.
pub trait BookFetcher {
    fn fetch_book(&self, book_id: &str) -> Result<Book, BookError>;
    fn fetch_user_data(&self, book_id: &str) -> BookUserData;
}

/// Unwraps an API envelope into its payload.
pub fn unwrap_envelope<T>(envelope: ApiEnvelope<T>) -> Result<T, BookError> {
    if !envelope.success {
        return Err(BookError::ApiError(
            envelope.error.unwrap_or_else(|| "unknown API error".to_string()),
        ));
    }
    envelope
        .data
        .ok_or_else(|| BookError::ParseError("success envelope with no data".to_string()))
}

/// Book service backed by the store's HTTP API.
pub struct HttpBookService {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpBookService {
    /// `base_url` is the store origin, e.g. `https://readnwin.com`.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, BookError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| BookError::NetworkError(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(BookError::NotFound(url));
        }
        if !response.status().is_success() {
            return Err(BookError::ApiError(format!(
                "{} returned {}",
                url,
                response.status()
            )));
        }

        let envelope: ApiEnvelope<T> = response
            .json()
            .map_err(|e| BookError::ParseError(e.to_string()))?;
        unwrap_envelope(envelope)
    }
}

impl BookFetcher for HttpBookService {
    /// `GET /api/books/{id}/content`
    fn fetch_book(&self, book_id: &str) -> Result<Book, BookError> {
        let payload: BookContentPayload =
            self.get_json(&format!("/api/books/{}/content", book_id))?;
        Ok(payload.into_book(book_id))
    }

    /// Loads progress, highlights and notes for a book.
    ///
    /// Each endpoint failure is non-fatal: the session continues with
    /// whatever loaded, matching the storefront reader's behavior.
    fn fetch_user_data(&self, book_id: &str) -> BookUserData {
        let progress = match self.get_json(&format!("/api/books/{}/progress", book_id)) {
            Ok(p) => Some(p),
            Err(e) => {
                warn!("failed to load progress for {}: {}", book_id, e);
                None
            }
        };
        let highlights = match self.get_json(&format!("/api/books/{}/highlights", book_id)) {
            Ok(h) => h,
            Err(e) => {
                warn!("failed to load highlights for {}: {}", book_id, e);
                Vec::new()
            }
        };
        let notes = match self.get_json(&format!("/api/books/{}/notes", book_id)) {
            Ok(n) => n,
            Err(e) => {
                warn!("failed to load notes for {}: {}", book_id, e);
                Vec::new()
            }
        };
        BookUserData {
            progress,
            highlights,
            notes,
        }
    }
}
