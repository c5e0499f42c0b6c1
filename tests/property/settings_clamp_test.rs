//! Property-based tests for settings updates: every reachable settings
//! value stays inside the documented bounds, and reset always lands on
//! the defaults.

use proptest::prelude::*;

use readnwin_reader::types::settings::{
    FontFamily, FontWeight, ReaderSettings, ReaderSettingsUpdate, ReadingWidth, Theme,
    FONT_SIZE_RANGE, LINE_HEIGHT_RANGE, MARGINS_RANGE, PADDING_RANGE, TTS_SPEED_RANGE,
};

fn arb_font_family() -> impl Strategy<Value = FontFamily> {
    prop_oneof![
        Just(FontFamily::Serif),
        Just(FontFamily::SansSerif),
        Just(FontFamily::Monospace),
    ]
}

fn arb_font_weight() -> impl Strategy<Value = FontWeight> {
    prop_oneof![
        Just(FontWeight::Light),
        Just(FontWeight::Regular),
        Just(FontWeight::Medium),
        Just(FontWeight::SemiBold),
        Just(FontWeight::Bold),
    ]
}

fn arb_theme() -> impl Strategy<Value = Theme> {
    prop_oneof![Just(Theme::Light), Just(Theme::Dark), Just(Theme::Sepia)]
}

fn arb_reading_width() -> impl Strategy<Value = ReadingWidth> {
    prop_oneof![
        Just(ReadingWidth::Narrow),
        Just(ReadingWidth::Medium),
        Just(ReadingWidth::Wide),
    ]
}

/// Updates with deliberately wild numeric values.
fn arb_update() -> impl Strategy<Value = ReaderSettingsUpdate> {
    (
        (
            proptest::option::of(0u32..1000),
            proptest::option::of(arb_font_family()),
            proptest::option::of(0.0f32..100.0),
            proptest::option::of(arb_font_weight()),
            proptest::option::of(arb_theme()),
            proptest::option::of(arb_reading_width()),
            proptest::option::of(0u32..10_000),
            proptest::option::of(0u32..10_000),
        ),
        (
            proptest::option::of(any::<bool>()),
            proptest::option::of(any::<bool>()),
            proptest::option::of(any::<bool>()),
            proptest::option::of(any::<bool>()),
            proptest::option::of("[a-zA-Z-]{0,20}"),
            proptest::option::of(0.0f32..50.0),
            proptest::option::of(any::<bool>()),
        ),
        (
            proptest::option::of(any::<bool>()),
            proptest::option::of(any::<bool>()),
            proptest::option::of(any::<bool>()),
        ),
    )
        .prop_map(
            |(
                (font_size, font_family, line_height, font_weight, theme, reading_width, margins, padding),
                (justify_text, show_progress_bar, show_chapter_numbers, tts_enabled, tts_voice, tts_speed, tts_auto_play),
                (high_contrast, reduce_motion, screen_reader_mode),
            )| ReaderSettingsUpdate {
                font_size,
                font_family,
                line_height,
                font_weight,
                theme,
                reading_width,
                margins,
                padding,
                justify_text,
                show_progress_bar,
                show_chapter_numbers,
                tts_enabled,
                tts_voice,
                tts_speed,
                tts_auto_play,
                high_contrast,
                reduce_motion,
                screen_reader_mode,
            },
        )
}

fn assert_in_bounds(settings: &ReaderSettings) {
    assert!(settings.font_size >= FONT_SIZE_RANGE.0 && settings.font_size <= FONT_SIZE_RANGE.1);
    assert!(
        settings.line_height >= LINE_HEIGHT_RANGE.0 && settings.line_height <= LINE_HEIGHT_RANGE.1
    );
    assert!(settings.margins >= MARGINS_RANGE.0 && settings.margins <= MARGINS_RANGE.1);
    assert!(settings.padding >= PADDING_RANGE.0 && settings.padding <= PADDING_RANGE.1);
    assert!(
        settings.text_to_speech.speed >= TTS_SPEED_RANGE.0
            && settings.text_to_speech.speed <= TTS_SPEED_RANGE.1
    );
}

proptest! {
    /// Any single update leaves every numeric field in range.
    #[test]
    fn prop_update_never_escapes_bounds(update in arb_update()) {
        let mut settings = ReaderSettings::default();
        settings.apply(&update);
        assert_in_bounds(&settings);
    }

    /// Bounds hold under arbitrary update sequences, not just one step.
    #[test]
    fn prop_update_sequences_never_escape_bounds(updates in proptest::collection::vec(arb_update(), 1..8)) {
        let mut settings = ReaderSettings::default();
        for update in &updates {
            settings.apply(update);
            assert_in_bounds(&settings);
        }
    }

    /// The empty update is a no-op on already-clamped settings.
    #[test]
    fn prop_empty_update_is_noop(update in arb_update()) {
        let mut settings = ReaderSettings::default();
        settings.apply(&update);
        let before = settings.clone();
        settings.apply(&ReaderSettingsUpdate::default());
        prop_assert_eq!(settings, before);
    }

    /// Defaults followed by an empty update are exactly the defaults.
    #[test]
    fn prop_reset_then_empty_update_is_default(updates in proptest::collection::vec(arb_update(), 0..5)) {
        let mut settings = ReaderSettings::default();
        for update in &updates {
            settings.apply(update);
        }
        settings = ReaderSettings::default();
        settings.apply(&ReaderSettingsUpdate::default());
        prop_assert_eq!(settings, ReaderSettings::default());
    }

    /// Serialization round-trips without loss.
    #[test]
    fn prop_settings_json_roundtrip(update in arb_update()) {
        let mut settings = ReaderSettings::default();
        settings.apply(&update);
        let json = serde_json::to_string(&settings).unwrap();
        let back: ReaderSettings = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, settings);
    }
}
