// ReadnWin reader platform paths for Windows
// Config: %APPDATA%/ReadnWin
// Data:   %APPDATA%/ReadnWin

use std::env;
use std::path::PathBuf;

/// `%APPDATA%/ReadnWin`
pub fn get_config_dir() -> PathBuf {
    let appdata =
        env::var("APPDATA").unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming"));
    PathBuf::from(appdata).join("ReadnWin")
}

/// `%APPDATA%/ReadnWin`
pub fn get_data_dir() -> PathBuf {
    let appdata =
        env::var("APPDATA").unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming"));
    PathBuf::from(appdata).join("ReadnWin")
}
