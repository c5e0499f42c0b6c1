//! Unit tests for the reading session: lifecycle, selection handling,
//! annotation shortcuts and the close snapshot.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use readnwin_reader::managers::annotation_store::AnnotationStoreTrait;
use readnwin_reader::managers::reading_session::ReadingSession;
use readnwin_reader::types::annotation::{Highlight, HighlightColor, Note, NoteUpdate};
use readnwin_reader::types::book::{Book, ContentType};
use readnwin_reader::types::errors::SessionError;
use readnwin_reader::types::progress::{ReadingProgress, ScrollMetrics};
use readnwin_reader::types::session::{InputOutcome, ReaderKey};
use readnwin_reader::types::settings::ReaderSettings;

fn sample_book() -> Book {
    Book {
        id: "b-1".to_string(),
        title: "The Test of Time".to_string(),
        author: "A. Uthor".to_string(),
        content: "<p>Once upon a time...</p>".to_string(),
        content_type: ContentType::Html,
        word_count: 52_000,
        cover_image: None,
        created_at: 1_700_000_000,
        updated_at: 1_700_000_000,
    }
}

fn open_empty() -> ReadingSession {
    ReadingSession::open(
        sample_book(),
        ReaderSettings::default(),
        None,
        Vec::new(),
        Vec::new(),
    )
}

fn metrics(scroll_top: f64) -> ScrollMetrics {
    ScrollMetrics {
        scroll_top,
        scroll_height: 2800.0,
        client_height: 800.0,
    }
}

#[test]
fn test_fresh_session_starts_at_zero() {
    let session = open_empty();
    assert_eq!(session.book().id, "b-1");
    assert!((session.progress().percentage - 0.0).abs() < 1e-9);
    assert!(!session.is_scrolling());
    assert!(session.selection().is_none());
    assert!(!session.drawer_state().left.is_open);
    assert!(session.annotations().highlights().is_empty());
}

#[test]
fn test_session_restores_user_data() {
    let restored = ReadingProgress {
        book_id: "b-1".to_string(),
        current_position: 880.0,
        percentage: 44.0,
        time_spent_secs: 600,
        last_read_at: 1_700_000_500,
    };
    let highlight = Highlight {
        id: "h-1".to_string(),
        book_id: "b-1".to_string(),
        text: "once upon".to_string(),
        color: HighlightColor::Blue,
        note: None,
        created_at: 1_700_000_100,
    };
    let note = Note {
        id: "n-1".to_string(),
        book_id: "b-1".to_string(),
        title: "Opening".to_string(),
        content: "strong start".to_string(),
        tags: BTreeSet::new(),
        created_at: 1_700_000_200,
        updated_at: 1_700_000_200,
    };

    let session = ReadingSession::open(
        sample_book(),
        ReaderSettings::default(),
        Some(restored),
        vec![highlight],
        vec![note],
    );

    assert!((session.progress().percentage - 44.0).abs() < 1e-9);
    assert_eq!(session.annotations().highlights().len(), 1);
    assert_eq!(session.annotations().notes().len(), 1);
}

#[test]
fn test_scroll_then_tick_settles() {
    let mut session = open_empty();
    let t0 = Instant::now();

    session.on_scroll(metrics(400.0), t0);
    assert!(session.is_scrolling());

    assert!(!session.tick(t0 + Duration::from_millis(500)));
    assert!(session.tick(t0 + Duration::from_millis(1000)));
    assert!(!session.is_scrolling());
}

#[test]
fn test_selection_is_trimmed_and_clearable() {
    let mut session = open_empty();

    session.select_text("  the quick brown fox  ");
    assert_eq!(session.selection(), Some("the quick brown fox"));

    session.clear_selection();
    assert!(session.selection().is_none());

    // Whitespace-only selections collapse to none
    session.select_text("   \n\t ");
    assert!(session.selection().is_none());
}

#[test]
fn test_highlight_selection_consumes_selection() {
    let mut session = open_empty();
    session.select_text("a memorable phrase");

    let highlight = session
        .highlight_selection(HighlightColor::Pink, Some("remember"))
        .expect("highlight failed");

    assert_eq!(highlight.text, "a memorable phrase");
    assert_eq!(highlight.book_id, "b-1");
    assert_eq!(highlight.color, HighlightColor::Pink);
    assert!(session.selection().is_none(), "selection must be consumed");
    assert_eq!(session.annotations().highlights().len(), 1);
}

#[test]
fn test_highlight_without_selection_errors() {
    let mut session = open_empty();
    let err = session
        .highlight_selection(HighlightColor::Yellow, None)
        .unwrap_err();
    assert!(matches!(err, SessionError::NoSelection));
}

#[test]
fn test_note_from_selection_uses_selection_as_content() {
    let mut session = open_empty();
    session.select_text("quoted passage");

    let note = session
        .note_from_selection("On this passage", BTreeSet::new())
        .expect("note failed");

    assert_eq!(note.title, "On this passage");
    assert_eq!(note.content, "quoted passage");
    assert!(session.selection().is_none());
}

#[test]
fn test_note_update_and_remove() {
    let mut session = open_empty();
    let note = session.add_note("Draft", "first thoughts", BTreeSet::new());

    let patched = session
        .update_note(
            &note.id,
            &NoteUpdate {
                title: Some("Final".to_string()),
                ..Default::default()
            },
        )
        .expect("update failed");
    assert_eq!(patched.title, "Final");
    assert_eq!(patched.content, "first thoughts");

    session.remove_note(&note.id).expect("remove failed");
    assert!(session.annotations().notes().is_empty());
}

#[test]
fn test_key_events_reach_drawers() {
    let mut session = open_empty();
    assert_eq!(
        session.handle_key(ReaderKey::ArrowLeft),
        InputOutcome::OpenedLeftDrawer
    );
    assert!(session.drawer_state().left.is_open);

    assert_eq!(
        session.handle_key(ReaderKey::Escape),
        InputOutcome::CloseRequested
    );
    assert!(!session.drawer_state().left.is_open);
}

#[test]
fn test_swipe_events_reach_drawers() {
    let mut session = open_empty();
    assert_eq!(session.handle_swipe(150.0, 0.0), InputOutcome::OpenedLeftDrawer);
    assert_eq!(session.handle_swipe(20.0, 0.0), InputOutcome::Ignored);
}

/// Closing returns the final snapshot with the settle timer cancelled.
#[test]
fn test_close_returns_final_snapshot() {
    let mut session = open_empty();
    let t0 = Instant::now();
    session.on_scroll(metrics(1000.0), t0);
    assert!(session.is_scrolling());

    let last = session.close();
    assert!((last.current_position - 1000.0).abs() < 1e-9);
    assert!((last.percentage - 50.0).abs() < 1e-9);
}
