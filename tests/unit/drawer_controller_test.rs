//! Unit tests for the drawer state machines: toggle/force semantics, tab
//! and section switching, keyboard shortcuts and swipe gestures.

use readnwin_reader::managers::drawer_controller::{DrawerController, SWIPE_THRESHOLD};
use readnwin_reader::types::session::{
    DrawerSide, InputOutcome, LeftDrawerTab, ReaderKey, RightDrawerSection,
};

#[test]
fn test_both_drawers_start_closed_with_default_tabs() {
    let ctl = DrawerController::new();
    let state = ctl.state();
    assert!(!state.left.is_open);
    assert!(!state.right.is_open);
    assert_eq!(state.left.active_tab, LeftDrawerTab::Notes);
    assert_eq!(state.right.active_section, RightDrawerSection::Typography);
}

#[test]
fn test_toggle_flips_visibility() {
    let mut ctl = DrawerController::new();
    ctl.toggle(DrawerSide::Left, None);
    assert!(ctl.state().left.is_open);
    ctl.toggle(DrawerSide::Left, None);
    assert!(!ctl.state().left.is_open);
}

#[test]
fn test_forced_open_is_idempotent() {
    let mut ctl = DrawerController::new();
    ctl.toggle(DrawerSide::Right, Some(true));
    ctl.toggle(DrawerSide::Right, Some(true));
    assert!(ctl.state().right.is_open);

    ctl.toggle(DrawerSide::Right, Some(false));
    ctl.toggle(DrawerSide::Right, Some(false));
    assert!(!ctl.state().right.is_open);
}

#[test]
fn test_drawers_are_independent() {
    let mut ctl = DrawerController::new();
    ctl.toggle(DrawerSide::Left, Some(true));
    assert!(ctl.state().left.is_open);
    assert!(!ctl.state().right.is_open);

    ctl.toggle(DrawerSide::Right, Some(true));
    assert!(ctl.state().left.is_open);
    assert!(ctl.state().right.is_open);
}

/// Switching tab or section never changes visibility.
#[test]
fn test_tab_and_section_switch_keep_visibility() {
    let mut ctl = DrawerController::new();
    ctl.set_left_tab(LeftDrawerTab::Highlights);
    assert_eq!(ctl.state().left.active_tab, LeftDrawerTab::Highlights);
    assert!(!ctl.state().left.is_open);

    ctl.toggle(DrawerSide::Right, Some(true));
    ctl.set_right_section(RightDrawerSection::Audio);
    assert_eq!(ctl.state().right.active_section, RightDrawerSection::Audio);
    assert!(ctl.state().right.is_open);
}

/// Toggling preserves the previously selected tab.
#[test]
fn test_tab_survives_close_and_reopen() {
    let mut ctl = DrawerController::new();
    ctl.set_left_tab(LeftDrawerTab::Highlights);
    ctl.toggle(DrawerSide::Left, Some(true));
    ctl.toggle(DrawerSide::Left, Some(false));
    ctl.toggle(DrawerSide::Left, Some(true));
    assert_eq!(ctl.state().left.active_tab, LeftDrawerTab::Highlights);
}

#[test]
fn test_arrow_keys_open_matching_drawer() {
    let mut ctl = DrawerController::new();

    let outcome = ctl.handle_key(ReaderKey::ArrowLeft);
    assert_eq!(outcome, InputOutcome::OpenedLeftDrawer);
    assert!(ctl.state().left.is_open);

    let outcome = ctl.handle_key(ReaderKey::ArrowRight);
    assert_eq!(outcome, InputOutcome::OpenedRightDrawer);
    assert!(ctl.state().right.is_open);
}

#[test]
fn test_escape_closes_both_drawers() {
    let mut ctl = DrawerController::new();
    ctl.toggle(DrawerSide::Left, Some(true));
    ctl.toggle(DrawerSide::Right, Some(true));

    let outcome = ctl.handle_key(ReaderKey::Escape);
    assert_eq!(outcome, InputOutcome::CloseRequested);
    assert!(!ctl.state().left.is_open);
    assert!(!ctl.state().right.is_open);
}

#[test]
fn test_swipe_right_opens_left_drawer() {
    let mut ctl = DrawerController::new();
    let outcome = ctl.handle_swipe(120.0, 10.0);
    assert_eq!(outcome, InputOutcome::OpenedLeftDrawer);
    assert!(ctl.state().left.is_open);
    assert!(!ctl.state().right.is_open);
}

#[test]
fn test_swipe_left_opens_right_drawer() {
    let mut ctl = DrawerController::new();
    let outcome = ctl.handle_swipe(-90.0, -5.0);
    assert_eq!(outcome, InputOutcome::OpenedRightDrawer);
    assert!(ctl.state().right.is_open);
}

/// Short gestures stay below the 50 px threshold.
#[test]
fn test_swipe_below_threshold_ignored() {
    let mut ctl = DrawerController::new();
    let outcome = ctl.handle_swipe(SWIPE_THRESHOLD, 0.0);
    assert_eq!(outcome, InputOutcome::Ignored);
    assert!(!ctl.state().left.is_open);
}

/// Mostly-vertical gestures are scrolling, not drawer swipes.
#[test]
fn test_vertical_swipe_ignored() {
    let mut ctl = DrawerController::new();
    let outcome = ctl.handle_swipe(80.0, 200.0);
    assert_eq!(outcome, InputOutcome::Ignored);
    assert!(!ctl.state().left.is_open);
    assert!(!ctl.state().right.is_open);
}
