use serde::{Deserialize, Serialize};

/// Bounds for numeric reader settings. Values outside these ranges are
/// clamped on every mutation, never rejected.
pub const FONT_SIZE_RANGE: (u32, u32) = (12, 24);
pub const LINE_HEIGHT_RANGE: (f32, f32) = (1.2, 2.0);
pub const MARGINS_RANGE: (u32, u32) = (0, 100);
pub const PADDING_RANGE: (u32, u32) = (0, 50);
pub const TTS_SPEED_RANGE: (f32, f32) = (0.5, 2.0);

/// Display settings for the reader surface.
///
/// Owned exclusively by the active reading session; created with defaults
/// on session start and mutated only through [`ReaderSettingsUpdate`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReaderSettings {
    // Typography
    pub font_size: u32,
    pub font_family: FontFamily,
    pub line_height: f32,
    pub font_weight: FontWeight,

    // Display
    pub theme: Theme,
    pub reading_width: ReadingWidth,
    pub margins: u32,
    pub padding: u32,

    // Layout
    pub justify_text: bool,
    pub show_progress_bar: bool,
    pub show_chapter_numbers: bool,

    // Audio
    pub text_to_speech: TextToSpeechSettings,

    // Accessibility
    pub high_contrast: bool,
    pub reduce_motion: bool,
    pub screen_reader_mode: bool,
}

impl Default for ReaderSettings {
    fn default() -> Self {
        Self {
            font_size: 18,
            font_family: FontFamily::Serif,
            line_height: 1.6,
            font_weight: FontWeight::Regular,
            theme: Theme::Light,
            reading_width: ReadingWidth::Medium,
            margins: 20,
            padding: 16,
            justify_text: true,
            show_progress_bar: true,
            show_chapter_numbers: true,
            text_to_speech: TextToSpeechSettings::default(),
            high_contrast: false,
            reduce_motion: false,
            screen_reader_mode: false,
        }
    }
}

impl ReaderSettings {
    /// Merges a partial update into the settings, then clamps every numeric
    /// field back into its documented range.
    pub fn apply(&mut self, update: &ReaderSettingsUpdate) {
        if let Some(v) = update.font_size {
            self.font_size = v;
        }
        if let Some(v) = update.font_family {
            self.font_family = v;
        }
        if let Some(v) = update.line_height {
            self.line_height = v;
        }
        if let Some(v) = update.font_weight {
            self.font_weight = v;
        }
        if let Some(v) = update.theme {
            self.theme = v;
        }
        if let Some(v) = update.reading_width {
            self.reading_width = v;
        }
        if let Some(v) = update.margins {
            self.margins = v;
        }
        if let Some(v) = update.padding {
            self.padding = v;
        }
        if let Some(v) = update.justify_text {
            self.justify_text = v;
        }
        if let Some(v) = update.show_progress_bar {
            self.show_progress_bar = v;
        }
        if let Some(v) = update.show_chapter_numbers {
            self.show_chapter_numbers = v;
        }
        if let Some(v) = update.tts_enabled {
            self.text_to_speech.enabled = v;
        }
        if let Some(ref v) = update.tts_voice {
            self.text_to_speech.voice = v.clone();
        }
        if let Some(v) = update.tts_speed {
            self.text_to_speech.speed = v;
        }
        if let Some(v) = update.tts_auto_play {
            self.text_to_speech.auto_play = v;
        }
        if let Some(v) = update.high_contrast {
            self.high_contrast = v;
        }
        if let Some(v) = update.reduce_motion {
            self.reduce_motion = v;
        }
        if let Some(v) = update.screen_reader_mode {
            self.screen_reader_mode = v;
        }
        self.clamp();
    }

    /// Forces every numeric field into its documented range.
    ///
    /// Also applied after deserializing a settings file, so a hand-edited
    /// out-of-range value never reaches the reader surface.
    pub fn clamp(&mut self) {
        self.font_size = self.font_size.clamp(FONT_SIZE_RANGE.0, FONT_SIZE_RANGE.1);
        self.line_height = self
            .line_height
            .clamp(LINE_HEIGHT_RANGE.0, LINE_HEIGHT_RANGE.1);
        self.margins = self.margins.clamp(MARGINS_RANGE.0, MARGINS_RANGE.1);
        self.padding = self.padding.clamp(PADDING_RANGE.0, PADDING_RANGE.1);
        self.text_to_speech.speed = self
            .text_to_speech
            .speed
            .clamp(TTS_SPEED_RANGE.0, TTS_SPEED_RANGE.1);
    }
}

/// A partial settings update. `None` fields leave the current value alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReaderSettingsUpdate {
    pub font_size: Option<u32>,
    pub font_family: Option<FontFamily>,
    pub line_height: Option<f32>,
    pub font_weight: Option<FontWeight>,
    pub theme: Option<Theme>,
    pub reading_width: Option<ReadingWidth>,
    pub margins: Option<u32>,
    pub padding: Option<u32>,
    pub justify_text: Option<bool>,
    pub show_progress_bar: Option<bool>,
    pub show_chapter_numbers: Option<bool>,
    pub tts_enabled: Option<bool>,
    pub tts_voice: Option<String>,
    pub tts_speed: Option<f32>,
    pub tts_auto_play: Option<bool>,
    pub high_contrast: Option<bool>,
    pub reduce_motion: Option<bool>,
    pub screen_reader_mode: Option<bool>,
}

/// Text-to-speech configuration. Settings only — audio output lives in the
/// client, not in this engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextToSpeechSettings {
    pub enabled: bool,
    pub voice: String,
    pub speed: f32,
    pub auto_play: bool,
}

impl Default for TextToSpeechSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            voice: String::new(),
            speed: 1.0,
            auto_play: false,
        }
    }
}

/// Font family options for the reader surface.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum FontFamily {
    Serif,
    SansSerif,
    Monospace,
}

/// Font weight steps exposed by the typography controls.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FontWeight {
    Light,
    Regular,
    Medium,
    SemiBold,
    Bold,
}

impl FontWeight {
    /// CSS numeric weight for this step.
    pub fn css_value(self) -> u32 {
        match self {
            FontWeight::Light => 300,
            FontWeight::Regular => 400,
            FontWeight::Medium => 500,
            FontWeight::SemiBold => 600,
            FontWeight::Bold => 700,
        }
    }
}

/// Reader color theme.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    Sepia,
}

/// Maximum text column width presets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReadingWidth {
    Narrow,
    Medium,
    Wide,
}
