// ReadnWin reader platform abstraction
// Provides platform-specific paths for Windows, macOS, and Linux.
//
// Uses `cfg(target_os)` for conditional compilation to select the correct
// platform-specific implementation at compile time.

use std::path::PathBuf;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

/// Returns the platform-specific configuration directory for the reader.
///
/// - **Linux**: `~/.config/readnwin` (or `$XDG_CONFIG_HOME/readnwin`)
/// - **macOS**: `~/Library/Application Support/ReadnWin`
/// - **Windows**: `%APPDATA%/ReadnWin`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_config_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_config_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_config_dir()
    }
}

/// Returns the platform-specific data directory for the reader.
///
/// - **Linux**: `~/.local/share/readnwin` (or `$XDG_DATA_HOME/readnwin`)
/// - **macOS**: `~/Library/Application Support/ReadnWin`
/// - **Windows**: `%APPDATA%/ReadnWin`
pub fn get_data_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_data_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_data_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_data_dir()
    }
}
