//! RPC method handler for the reader engine.
//!
//! Extracted from `main.rs` so it can be unit-tested independently. The
//! `handle_method` function dispatches method calls to the session, the
//! settings engine and the repositories via the `App` struct. The server
//! loop wraps results in the ReadnWin `{success, data|error}` envelope.

use std::sync::Mutex;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use serde_json::{json, Map, Value};

use crate::app::App;
use crate::managers::annotation_repo::{AnnotationRepo, AnnotationRepoTrait};
use crate::managers::annotation_store::AnnotationStoreTrait;
use crate::services::audit_log::AuditLogTrait;
use crate::services::settings_engine::SettingsEngineTrait;
use crate::types::annotation::{AnnotationFilter, HighlightColor, NoteUpdate, TimeWindow};
use crate::types::session::{
    DrawerSide, LeftDrawerTab, ReaderKey, RightDrawerSection,
};
use crate::types::settings::ReaderSettingsUpdate;

fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

fn str_param<'a>(params: &'a Value, key: &str) -> Result<&'a str, String> {
    params
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| format!("missing {}", key))
}

fn f64_param(params: &Value, key: &str) -> Result<f64, String> {
    params
        .get(key)
        .and_then(Value::as_f64)
        .ok_or_else(|| format!("missing {}", key))
}

fn enum_param<T: serde::de::DeserializeOwned>(params: &Value, key: &str) -> Result<T, String> {
    let value = params
        .get(key)
        .cloned()
        .ok_or_else(|| format!("missing {}", key))?;
    serde_json::from_value(value).map_err(|e| format!("invalid {}: {}", key, e))
}

/// Drawer filter from optional `query` / `window` params, scoped to the
/// open book.
fn filter_from_params(book_id: &str, params: &Value) -> Result<AnnotationFilter, String> {
    let window = match params.get("window") {
        Some(v) => serde_json::from_value::<TimeWindow>(v.clone())
            .map_err(|e| format!("invalid window: {}", e))?,
        None => TimeWindow::All,
    };
    Ok(AnnotationFilter {
        book_id: Some(book_id.to_string()),
        query: params
            .get("query")
            .and_then(Value::as_str)
            .map(str::to_string),
        window,
    })
}

/// Top-level fields that changed between two settings snapshots, as
/// `field -> [before, after]` for the audit trail.
fn settings_changes(before: &Value, after: &Value) -> Value {
    let mut changes = Map::new();
    if let (Value::Object(old), Value::Object(new)) = (before, after) {
        for (key, old_value) in old {
            if let Some(new_value) = new.get(key) {
                if new_value != old_value {
                    changes.insert(key.clone(), json!([old_value, new_value]));
                }
            }
        }
    }
    json!({ "changes": Value::Object(changes) })
}

/// Dispatch a method call to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    let mut a = app.lock().map_err(|e| e.to_string())?;

    match method {
        // ─── Session lifecycle ───
        "book.load" => {
            let book_id = str_param(params, "book_id")?;
            let session = a.open_book(book_id).map_err(|e| e.to_string())?;
            let book = session.book();
            Ok(json!({
                "id": book.id,
                "title": book.title,
                "author": book.author,
                "word_count": book.word_count,
                "progress": session.progress(),
                "drawers": session.drawer_state(),
            }))
        }
        "session.status" => match a.session_ref() {
            Ok(session) => Ok(json!({
                "open": true,
                "book_id": session.book().id,
                "is_scrolling": session.is_scrolling(),
                "progress": session.progress(),
                "drawers": session.drawer_state(),
                "selection": session.selection(),
            })),
            Err(_) => Ok(json!({ "open": false })),
        },
        "session.close" => {
            let last = a.close_session().map_err(|e| e.to_string())?;
            Ok(json!({ "progress": last }))
        }

        // ─── Progress ───
        "progress.scroll" => {
            let metrics = crate::types::progress::ScrollMetrics {
                scroll_top: f64_param(params, "scroll_top")?,
                scroll_height: f64_param(params, "scroll_height")?,
                client_height: f64_param(params, "client_height")?,
            };
            let snapshot = a.on_scroll(metrics).map_err(|e| e.to_string())?;
            let is_scrolling = a.session_ref().map(|s| s.is_scrolling()).unwrap_or(false);
            Ok(json!({ "progress": snapshot, "is_scrolling": is_scrolling }))
        }
        "progress.tick" => {
            let session = a.session_mut().map_err(|e| e.to_string())?;
            let settled = session.tick(Instant::now());
            Ok(json!({ "settled": settled, "is_scrolling": session.is_scrolling() }))
        }
        "progress.get" => {
            let session = a.session_ref().map_err(|e| e.to_string())?;
            Ok(json!({ "progress": session.progress() }))
        }

        // ─── Settings ───
        "settings.get" => Ok(json!(a.settings_engine.get_settings())),
        "settings.update" => {
            let update: ReaderSettingsUpdate = serde_json::from_value(params.clone())
                .map_err(|e| format!("invalid settings update: {}", e))?;
            let before = serde_json::to_value(a.settings_engine.get_settings())
                .map_err(|e| e.to_string())?;
            let settings = a
                .settings_engine
                .update(&update)
                .map_err(|e| e.to_string())?;
            let after = serde_json::to_value(&settings).map_err(|e| e.to_string())?;
            if let Err(e) =
                a.audit_log
                    .record("settings.updated", None, &settings_changes(&before, &after))
            {
                log::warn!("failed to record audit entry: {}", e);
            }
            if let Ok(session) = a.session_mut() {
                session.set_settings(settings.clone());
            }
            Ok(json!(settings))
        }
        "settings.reset" => {
            let settings = a.settings_engine.reset().map_err(|e| e.to_string())?;
            if let Err(e) = a.audit_log.record(
                "settings.reset",
                None,
                &json!({"message": "Settings restored to defaults"}),
            ) {
                log::warn!("failed to record audit entry: {}", e);
            }
            if let Ok(session) = a.session_mut() {
                session.set_settings(settings.clone());
            }
            Ok(json!(settings))
        }

        // ─── Text selection ───
        "selection.set" => {
            let text = str_param(params, "text")?;
            let session = a.session_mut().map_err(|e| e.to_string())?;
            session.select_text(text);
            Ok(json!({ "selection": session.selection() }))
        }
        "selection.clear" => {
            let session = a.session_mut().map_err(|e| e.to_string())?;
            session.clear_selection();
            Ok(json!({ "selection": Value::Null }))
        }

        // ─── Highlights ───
        "highlight.add" => {
            let color: HighlightColor = enum_param(params, "color")?;
            let note = params.get("note").and_then(Value::as_str);
            let session = a.session_mut().map_err(|e| e.to_string())?;
            let highlight = session
                .highlight_selection(color, note)
                .map_err(|e| e.to_string())?;
            AnnotationRepo::new(a.db.connection())
                .insert_highlight(&highlight)
                .map_err(|e| e.to_string())?;
            if let Err(e) = a.audit_log.record(
                "highlight.added",
                Some(&highlight.id),
                &json!({"book_id": highlight.book_id}),
            ) {
                log::warn!("failed to record audit entry: {}", e);
            }
            Ok(json!(highlight))
        }
        "highlight.remove" => {
            let id = str_param(params, "id")?;
            let session = a.session_mut().map_err(|e| e.to_string())?;
            let removed = session.remove_highlight(id).map_err(|e| e.to_string())?;
            AnnotationRepo::new(a.db.connection())
                .delete_highlight(&removed.id)
                .map_err(|e| e.to_string())?;
            Ok(json!({ "removed": removed.id }))
        }
        "highlight.list" => {
            let session = a.session_ref().map_err(|e| e.to_string())?;
            let filter = filter_from_params(&session.book().id, params)?;
            let highlights = session.annotations().filtered_highlights(&filter, now_secs());
            Ok(json!(highlights))
        }

        // ─── Notes ───
        "note.add" => {
            let title = str_param(params, "title")?;
            let tags = match params.get("tags") {
                Some(v) => serde_json::from_value(v.clone())
                    .map_err(|e| format!("invalid tags: {}", e))?,
                None => Default::default(),
            };
            let session = a.session_mut().map_err(|e| e.to_string())?;
            let note = match params.get("content").and_then(Value::as_str) {
                Some(content) => session.add_note(title, content, tags),
                // No explicit content: the confirmed selection becomes the note body.
                None => session
                    .note_from_selection(title, tags)
                    .map_err(|e| e.to_string())?,
            };
            AnnotationRepo::new(a.db.connection())
                .insert_note(&note)
                .map_err(|e| e.to_string())?;
            if let Err(e) = a.audit_log.record(
                "note.added",
                Some(&note.id),
                &json!({"book_id": note.book_id}),
            ) {
                log::warn!("failed to record audit entry: {}", e);
            }
            Ok(json!(note))
        }
        "note.update" => {
            let id = str_param(params, "id")?;
            let patch = NoteUpdate {
                title: params
                    .get("title")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                content: params
                    .get("content")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                tags: match params.get("tags") {
                    Some(v) => Some(
                        serde_json::from_value(v.clone())
                            .map_err(|e| format!("invalid tags: {}", e))?,
                    ),
                    None => None,
                },
            };
            let session = a.session_mut().map_err(|e| e.to_string())?;
            let note = session.update_note(id, &patch).map_err(|e| e.to_string())?;
            AnnotationRepo::new(a.db.connection())
                .update_note(id, &patch, note.updated_at)
                .map_err(|e| e.to_string())?;
            Ok(json!(note))
        }
        "note.remove" => {
            let id = str_param(params, "id")?;
            let session = a.session_mut().map_err(|e| e.to_string())?;
            let removed = session.remove_note(id).map_err(|e| e.to_string())?;
            AnnotationRepo::new(a.db.connection())
                .delete_note(&removed.id)
                .map_err(|e| e.to_string())?;
            Ok(json!({ "removed": removed.id }))
        }
        "note.list" => {
            let session = a.session_ref().map_err(|e| e.to_string())?;
            let filter = filter_from_params(&session.book().id, params)?;
            let notes = session.annotations().filtered_notes(&filter, now_secs());
            Ok(json!(notes))
        }

        // ─── Export ───
        "annotations.export" => {
            let session = a.session_ref().map_err(|e| e.to_string())?;
            let filter = filter_from_params(&session.book().id, params)?;
            let bundle = session.annotations().export(&filter, now_secs());
            let book_id = session.book().id.clone();
            if let Err(e) = a.audit_log.record(
                "annotations.exported",
                Some(&book_id),
                &json!({
                    "notes": bundle.notes.len(),
                    "highlights": bundle.highlights.len(),
                }),
            ) {
                log::warn!("failed to record audit entry: {}", e);
            }
            Ok(json!(bundle))
        }

        // ─── Drawers ───
        "drawer.toggle" => {
            let side: DrawerSide = enum_param(params, "side")?;
            let force = params.get("open").and_then(Value::as_bool);
            let session = a.session_mut().map_err(|e| e.to_string())?;
            Ok(json!(session.drawers().toggle(side, force)))
        }
        "drawer.tab" => {
            let tab: LeftDrawerTab = enum_param(params, "tab")?;
            let session = a.session_mut().map_err(|e| e.to_string())?;
            Ok(json!(session.drawers().set_left_tab(tab)))
        }
        "drawer.section" => {
            let section: RightDrawerSection = enum_param(params, "section")?;
            let session = a.session_mut().map_err(|e| e.to_string())?;
            Ok(json!(session.drawers().set_right_section(section)))
        }
        "drawer.key" => {
            let key: ReaderKey = enum_param(params, "key")?;
            let session = a.session_mut().map_err(|e| e.to_string())?;
            let outcome = session.handle_key(key);
            Ok(json!({ "outcome": outcome, "drawers": session.drawer_state() }))
        }
        "drawer.swipe" => {
            let delta_x = f64_param(params, "delta_x")?;
            let delta_y = f64_param(params, "delta_y")?;
            let session = a.session_mut().map_err(|e| e.to_string())?;
            let outcome = session.handle_swipe(delta_x, delta_y);
            Ok(json!({ "outcome": outcome, "drawers": session.drawer_state() }))
        }
        "drawer.state" => {
            let session = a.session_ref().map_err(|e| e.to_string())?;
            Ok(json!(session.drawer_state()))
        }

        // ─── Audit ───
        "audit.list" => {
            let limit = params
                .get("limit")
                .and_then(Value::as_u64)
                .unwrap_or(50) as usize;
            let entries = a.audit_log.formatted(limit).map_err(|e| e.to_string())?;
            let arr: Vec<Value> = entries
                .iter()
                .map(|(entry, summary)| {
                    json!({
                        "id": entry.id,
                        "action": entry.action,
                        "resource_id": entry.resource_id,
                        "summary": summary,
                        "created_at": entry.created_at,
                    })
                })
                .collect();
            Ok(json!(arr))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
