// ReadnWin reader platform paths for Linux
// Config: ~/.config/readnwin
// Data:   ~/.local/share/readnwin

use std::env;
use std::path::PathBuf;

/// Returns the configuration directory on Linux.
/// Uses `$XDG_CONFIG_HOME/readnwin` if set, otherwise `~/.config/readnwin`.
pub fn get_config_dir() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("readnwin")
    } else {
        let home = env::var("HOME").unwrap_or_else(|_| String::from("/tmp"));
        PathBuf::from(home).join(".config").join("readnwin")
    }
}

/// Returns the data directory on Linux.
/// Uses `$XDG_DATA_HOME/readnwin` if set, otherwise `~/.local/share/readnwin`.
pub fn get_data_dir() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg).join("readnwin")
    } else {
        let home = env::var("HOME").unwrap_or_else(|_| String::from("/tmp"));
        PathBuf::from(home)
            .join(".local")
            .join("share")
            .join("readnwin")
    }
}
