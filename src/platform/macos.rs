// ReadnWin reader platform paths for macOS
// Config: ~/Library/Application Support/ReadnWin
// Data:   ~/Library/Application Support/ReadnWin

use std::env;
use std::path::PathBuf;

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// `~/Library/Application Support/ReadnWin`
pub fn get_config_dir() -> PathBuf {
    home_dir()
        .join("Library")
        .join("Application Support")
        .join("ReadnWin")
}

/// `~/Library/Application Support/ReadnWin`
pub fn get_data_dir() -> PathBuf {
    home_dir()
        .join("Library")
        .join("Application Support")
        .join("ReadnWin")
}
