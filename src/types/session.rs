use serde::{Deserialize, Serialize};

/// Which slide-in panel an operation targets.
///
/// Left holds notes/highlights, right holds display settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DrawerSide {
    Left,
    Right,
}

/// Tabs of the left (annotations) drawer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LeftDrawerTab {
    Notes,
    Highlights,
}

/// Sections of the right (settings) drawer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RightDrawerSection {
    Typography,
    Display,
    Layout,
    Audio,
    Accessibility,
}

/// State of both drawers. Not persisted — reset each session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DrawerState {
    pub left: LeftDrawerState,
    pub right: RightDrawerState,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeftDrawerState {
    pub is_open: bool,
    pub active_tab: LeftDrawerTab,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RightDrawerState {
    pub is_open: bool,
    pub active_section: RightDrawerSection,
}

impl Default for DrawerState {
    fn default() -> Self {
        Self {
            left: LeftDrawerState {
                is_open: false,
                active_tab: LeftDrawerTab::Notes,
            },
            right: RightDrawerState {
                is_open: false,
                active_section: RightDrawerSection::Typography,
            },
        }
    }
}

/// Keys the reader surface forwards to the session. Serialized as the
/// DOM `KeyboardEvent.key` values.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ReaderKey {
    ArrowLeft,
    ArrowRight,
    Escape,
}

/// Outcome of a keyboard or gesture event, surfaced to the caller.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InputOutcome {
    OpenedLeftDrawer,
    OpenedRightDrawer,
    CloseRequested,
    Ignored,
}
