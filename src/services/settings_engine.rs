// ReadnWin reader Settings Engine
// Manages reader display settings: loading, saving, partial updates with
// clamping, and resetting to defaults. Settings are stored as a JSON file
// at the platform-specific config path.

use std::fs;
use std::path::Path;

use crate::platform;
use crate::types::errors::SettingsError;
use crate::types::settings::{ReaderSettings, ReaderSettingsUpdate};

/// Trait defining the settings engine interface.
pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<ReaderSettings, SettingsError>;
    fn save(&self) -> Result<(), SettingsError>;
    fn get_settings(&self) -> &ReaderSettings;
    fn update(&mut self, update: &ReaderSettingsUpdate) -> Result<ReaderSettings, SettingsError>;
    fn reset(&mut self) -> Result<ReaderSettings, SettingsError>;
    fn get_config_path(&self) -> &str;
}

/// Settings engine implementation that persists settings as JSON on disk.
pub struct SettingsEngine {
    config_path: String,
    settings: ReaderSettings,
}

impl SettingsEngine {
    /// Creates a new SettingsEngine.
    ///
    /// If `path_override` is `Some`, uses that path for the settings file.
    /// Otherwise, uses the platform-specific config directory with
    /// `reader-settings.json`.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = match path_override {
            Some(p) => p,
            None => {
                let config_dir = platform::get_config_dir();
                config_dir
                    .join("reader-settings.json")
                    .to_string_lossy()
                    .to_string()
            }
        };

        Self {
            config_path,
            settings: ReaderSettings::default(),
        }
    }
}

impl SettingsEngineTrait for SettingsEngine {
    /// Loads settings from the JSON file.
    ///
    /// If the file does not exist, returns defaults. If the file exists but
    /// is malformed, returns a serialization error. Loaded values are
    /// clamped, so a hand-edited file cannot smuggle out-of-range numbers.
    fn load(&mut self) -> Result<ReaderSettings, SettingsError> {
        let path = Path::new(&self.config_path);

        if !path.exists() {
            self.settings = ReaderSettings::default();
            return Ok(self.settings.clone());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| SettingsError::IoError(format!("Failed to read settings file: {}", e)))?;

        let mut settings: ReaderSettings = serde_json::from_str(&content).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to parse settings file: {}", e))
        })?;
        settings.clamp();

        self.settings = settings;
        Ok(self.settings.clone())
    }

    /// Saves the current settings to the JSON file.
    ///
    /// Creates parent directories if they don't exist.
    fn save(&self) -> Result<(), SettingsError> {
        let path = Path::new(&self.config_path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SettingsError::IoError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        fs::write(path, json)
            .map_err(|e| SettingsError::IoError(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Returns a reference to the current in-memory settings.
    fn get_settings(&self) -> &ReaderSettings {
        &self.settings
    }

    /// Merges a partial update, clamps numeric fields, and persists.
    ///
    /// Inputs are pre-validated by the UI controls, so there is no error
    /// path beyond persistence itself.
    fn update(&mut self, update: &ReaderSettingsUpdate) -> Result<ReaderSettings, SettingsError> {
        self.settings.apply(update);
        self.save()?;
        Ok(self.settings.clone())
    }

    /// Resets all settings to the documented defaults and persists.
    fn reset(&mut self) -> Result<ReaderSettings, SettingsError> {
        self.settings = ReaderSettings::default();
        self.save()?;
        Ok(self.settings.clone())
    }

    /// Returns the path to the settings file.
    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}
