//! State machines for the two slide-in drawers.
//!
//! Left drawer holds notes/highlights, right drawer holds settings. Each is
//! `{closed, open(tab)}` with no terminal state; keyboard and swipe events
//! are alternate transition triggers. Drawer state is never persisted.

use crate::types::session::{
    DrawerSide, DrawerState, InputOutcome, LeftDrawerTab, ReaderKey, RightDrawerSection,
};

/// Minimum horizontal travel, in pixels, for a touch gesture to count as a
/// drawer swipe.
pub const SWIPE_THRESHOLD: f64 = 50.0;

/// Controller for both drawers of one reading session.
#[derive(Default)]
pub struct DrawerController {
    state: DrawerState,
}

impl DrawerController {
    /// Both drawers start closed.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DrawerState {
        &self.state
    }

    /// Flips or forces a drawer's visibility.
    ///
    /// `force: Some(open)` sets the state directly and is idempotent;
    /// `None` toggles. The active tab/section is untouched either way.
    pub fn toggle(&mut self, side: DrawerSide, force: Option<bool>) -> &DrawerState {
        let is_open = match side {
            DrawerSide::Left => &mut self.state.left.is_open,
            DrawerSide::Right => &mut self.state.right.is_open,
        };
        *is_open = force.unwrap_or(!*is_open);
        &self.state
    }

    /// Switches the left drawer's active tab without changing visibility.
    pub fn set_left_tab(&mut self, tab: LeftDrawerTab) -> &DrawerState {
        self.state.left.active_tab = tab;
        &self.state
    }

    /// Switches the right drawer's active section without changing visibility.
    pub fn set_right_section(&mut self, section: RightDrawerSection) -> &DrawerState {
        self.state.right.active_section = section;
        &self.state
    }

    /// Keyboard shortcuts from the reader surface.
    ///
    /// Arrow keys open the matching drawer; Escape closes both and is
    /// surfaced to the caller as a close request.
    pub fn handle_key(&mut self, key: ReaderKey) -> InputOutcome {
        match key {
            ReaderKey::ArrowLeft => {
                self.toggle(DrawerSide::Left, Some(true));
                InputOutcome::OpenedLeftDrawer
            }
            ReaderKey::ArrowRight => {
                self.toggle(DrawerSide::Right, Some(true));
                InputOutcome::OpenedRightDrawer
            }
            ReaderKey::Escape => {
                self.toggle(DrawerSide::Left, Some(false));
                self.toggle(DrawerSide::Right, Some(false));
                InputOutcome::CloseRequested
            }
        }
    }

    /// Touch swipe from the reader surface.
    ///
    /// Only horizontal gestures past the 50px threshold transition: a swipe
    /// right (positive delta) opens the left drawer, a swipe left opens the
    /// right drawer. Everything else is ignored.
    pub fn handle_swipe(&mut self, delta_x: f64, delta_y: f64) -> InputOutcome {
        if delta_x.abs() <= delta_y.abs() || delta_x.abs() <= SWIPE_THRESHOLD {
            return InputOutcome::Ignored;
        }
        if delta_x > 0.0 {
            self.toggle(DrawerSide::Left, Some(true));
            InputOutcome::OpenedLeftDrawer
        } else {
            self.toggle(DrawerSide::Right, Some(true));
            InputOutcome::OpenedRightDrawer
        }
    }
}
