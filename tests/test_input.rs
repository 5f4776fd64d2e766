use corporate_runner::input::*;

use crossterm::event::KeyCode;

#[test]
fn held_actions_snapshot() {
    let held = HeldActions::of(&[Action::Duck]);
    assert!(held.is_held(Action::Duck));
    assert!(!held.is_held(Action::Jump));
    assert!(!HeldActions::none().is_held(Action::Duck));
}

#[test]
fn key_bindings() {
    assert_eq!(action_for(&KeyCode::Up), Some(Action::Jump));
    assert_eq!(action_for(&KeyCode::Char('w')), Some(Action::Jump));
    assert_eq!(action_for(&KeyCode::Down), Some(Action::Duck));
    assert_eq!(action_for(&KeyCode::Char('s')), Some(Action::Duck));
    assert_eq!(action_for(&KeyCode::Char('K')), Some(Action::Jump));
    assert_eq!(action_for(&KeyCode::Char('J')), Some(Action::Duck));
    assert_eq!(action_for(&KeyCode::Char(' ')), None);
}

// ── Keys ──────────────────────────────────────────────────────────────────────

#[test]
fn key_held_within_window() {
    let mut tracker = InputTracker::new(false);
    tracker.key_pressed(KeyCode::Up, 10);
    assert!(tracker.held(10).is_held(Action::Jump));
    assert!(tracker.held(10 + HOLD_WINDOW).is_held(Action::Jump));
    assert!(!tracker.held(11 + HOLD_WINDOW).is_held(Action::Jump));
}

#[test]
fn repeat_refreshes_hold() {
    let mut tracker = InputTracker::new(false);
    tracker.key_pressed(KeyCode::Down, 10);
    tracker.key_pressed(KeyCode::Down, 14);
    assert!(tracker.held(18).is_held(Action::Duck));
}

#[test]
fn release_drops_key_immediately() {
    let mut tracker = InputTracker::new(false);
    tracker.key_pressed(KeyCode::Char('s'), 10);
    assert!(tracker.held(11).is_held(Action::Duck));
    tracker.key_released(&KeyCode::Char('s'));
    assert!(!tracker.held(11).is_held(Action::Duck));
}

#[test]
fn release_reporting_keeps_key_held_until_release() {
    let mut tracker = InputTracker::new(true);
    tracker.key_pressed(KeyCode::Down, 0);
    // No repeats arrive during the OS autorepeat delay
    assert!(tracker.held(5).is_held(Action::Duck));
    assert!(tracker.held(20).is_held(Action::Duck));
    tracker.key_released(&KeyCode::Down);
    assert!(!tracker.held(21).is_held(Action::Duck));
}

#[test]
fn both_actions_can_be_held() {
    let mut tracker = InputTracker::new(false);
    tracker.key_pressed(KeyCode::Up, 3);
    tracker.key_pressed(KeyCode::Down, 3);
    assert_eq!(tracker.held(4), HeldActions::of(&[Action::Jump, Action::Duck]));
}

// ── Swipes ────────────────────────────────────────────────────────────────────

#[test]
fn swipe_up_holds_jump_briefly() {
    let mut tracker = InputTracker::new(false);
    tracker.pointer_down(10, 20);
    assert_eq!(tracker.pointer_up(10, 15, 100), Some(Action::Jump));
    assert!(tracker.held(100 + SWIPE_JUMP_FRAMES - 1).is_held(Action::Jump));
    assert!(!tracker.held(100 + SWIPE_JUMP_FRAMES).is_held(Action::Jump));
}

#[test]
fn swipe_down_holds_duck_longer() {
    let mut tracker = InputTracker::new(false);
    tracker.pointer_down(10, 10);
    assert_eq!(tracker.pointer_up(11, 14, 100), Some(Action::Duck));
    assert!(tracker.held(100 + SWIPE_DUCK_FRAMES - 1).is_held(Action::Duck));
    assert!(!tracker.held(100 + SWIPE_DUCK_FRAMES).is_held(Action::Duck));
}

#[test]
fn non_swipes_are_ignored() {
    let mut tracker = InputTracker::new(false);

    // Mostly horizontal
    tracker.pointer_down(10, 10);
    assert_eq!(tracker.pointer_up(20, 13, 1), None);

    // Too short
    tracker.pointer_down(10, 10);
    assert_eq!(tracker.pointer_up(10, 11, 1), None);

    // No matching press
    assert_eq!(tracker.pointer_up(10, 2, 1), None);
    assert_eq!(tracker.held(1), HeldActions::none());
}

#[test]
fn clear_forgets_everything() {
    let mut tracker = InputTracker::new(false);
    tracker.key_pressed(KeyCode::Up, 5);
    tracker.pointer_down(1, 10);
    tracker.pointer_up(1, 20, 5);
    tracker.clear();
    assert_eq!(tracker.held(5), HeldActions::none());
}
