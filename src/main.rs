//! ReadnWin reader engine — JSON-RPC over stdin/stdout for the bookstore shell.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"progress.scroll", "params":{"scroll_top":400.0, ...}}
//! Response: {"id":1, "success":true, "data":{...}} or {"id":1, "success":false, "error":"..."}

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use readnwin_reader::app::App;
use readnwin_reader::logging;
use readnwin_reader::platform;
use readnwin_reader::rpc_handler::handle_method;

use serde_json::{json, Value};

const DEFAULT_BASE_URL: &str = "https://readnwin.com";

fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("READNWIN_DATA_DIR") {
        return PathBuf::from(dir);
    }
    platform::get_data_dir()
}

fn main() {
    let dir = data_dir();
    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("failed to create data directory {}: {}", dir.display(), e);
        std::process::exit(1);
    }

    let log_level = std::env::var("READNWIN_LOG").unwrap_or_else(|_| "info".to_string());
    if let Err(e) = logging::init(&log_level, &dir.join("logs")) {
        eprintln!("failed to initialize logging: {}", e);
    }

    let base_url =
        std::env::var("READNWIN_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let db_path = dir.join("reader.db");

    let app = match App::new(db_path.to_str().unwrap_or("reader.db"), &base_url) {
        Ok(app) => Mutex::new(app),
        Err(e) => {
            log::error!("failed to initialize reader engine: {}", e);
            eprintln!("failed to initialize reader engine: {}", e);
            std::process::exit(1);
        }
    };

    log::info!("reader engine started, data dir {}", dir.display());

    // Signal ready to the shell
    let ready = json!({"event":"ready","version":env!("CARGO_PKG_VERSION")});
    println!("{}", ready);
    let _ = io::stdout().flush();

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                let err = json!({"id": null, "success": false, "error": format!("parse error: {}", e)});
                println!("{}", err);
                let _ = io::stdout().flush();
                continue;
            }
        };

        let id = req.get("id").cloned().unwrap_or(Value::Null);
        let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
        let params = req.get("params").cloned().unwrap_or(json!({}));

        let response = match handle_method(&app, method, &params) {
            Ok(data) => json!({"id": id, "success": true, "data": data}),
            Err(error) => {
                log::warn!("{} failed: {}", method, error);
                json!({"id": id, "success": false, "error": error})
            }
        };
        println!("{}", response);
        let _ = io::stdout().flush();
    }

    // Flush any in-flight progress before the process exits.
    if let Ok(mut a) = app.lock() {
        if let Err(e) = a.close_session() {
            log::debug!("no session to close on shutdown: {}", e);
        }
    }
    log::info!("reader engine shutting down");
}
