/// Input boundary.  The engine only ever asks `HeldActions` whether an
/// action is held; the front-end refreshes it between frames from key and
/// pointer events through an `InputTracker`.

use std::collections::{HashMap, HashSet};

use crossterm::event::KeyCode;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Jump,
    Duck,
}

/// Read-only snapshot of the actions held for one frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeldActions {
    held: HashSet<Action>,
}

impl HeldActions {
    pub fn none() -> HeldActions {
        HeldActions::default()
    }

    pub fn of(actions: &[Action]) -> HeldActions {
        HeldActions { held: actions.iter().copied().collect() }
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.held.contains(&action)
    }
}

// ── Terminal tracking ─────────────────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events.
pub const HOLD_WINDOW: u64 = 4;

/// Frames a swipe keeps its action held (≈120 ms and ≈400 ms at 60 FPS).
pub const SWIPE_JUMP_FRAMES: u64 = 7;
pub const SWIPE_DUCK_FRAMES: u64 = 24;

/// Minimum vertical drag, in rows, that counts as a swipe.
pub const SWIPE_MIN_ROWS: i32 = 2;

pub fn action_for(code: &KeyCode) -> Option<Action> {
    match code {
        KeyCode::Up
        | KeyCode::Char('w')
        | KeyCode::Char('W')
        | KeyCode::Char('k')
        | KeyCode::Char('K') => Some(Action::Jump),
        KeyCode::Down
        | KeyCode::Char('s')
        | KeyCode::Char('S')
        | KeyCode::Char('j')
        | KeyCode::Char('J') => Some(Action::Duck),
        _ => None,
    }
}

/// Turns raw key and pointer events into per-frame `HeldActions`.
///
/// Keyboard-enhancement terminals report releases, so a key stays held
/// until its release arrives; classic terminals only repeat presses, so
/// keys expire after `HOLD_WINDOW` frames of silence.  Vertical mouse drags stand in for touch
/// swipes and hold their action for a fixed number of frames.
#[derive(Clone, Debug, Default)]
pub struct InputTracker {
    reports_releases: bool,
    key_frame: HashMap<KeyCode, u64>,
    swipe_until: HashMap<Action, u64>,
    drag_start: Option<(u16, u16)>,
}

impl InputTracker {
    /// `reports_releases` is true when the terminal sends key-release events.
    pub fn new(reports_releases: bool) -> InputTracker {
        InputTracker { reports_releases, ..InputTracker::default() }
    }

    /// Press or repeat; refreshes the hold timestamp.
    pub fn key_pressed(&mut self, code: KeyCode, frame: u64) {
        self.key_frame.insert(code, frame);
    }

    pub fn key_released(&mut self, code: &KeyCode) {
        self.key_frame.remove(code);
    }

    pub fn pointer_down(&mut self, column: u16, row: u16) {
        self.drag_start = Some((column, row));
    }

    /// Ends a drag; returns the action when it qualifies as a swipe.
    pub fn pointer_up(&mut self, column: u16, row: u16, frame: u64) -> Option<Action> {
        let (start_col, start_row) = self.drag_start.take()?;
        let dx = column as i32 - start_col as i32;
        let dy = row as i32 - start_row as i32;
        if dy.abs() <= dx.abs() || dy.abs() < SWIPE_MIN_ROWS {
            return None;
        }
        let (action, frames) = if dy < 0 {
            (Action::Jump, SWIPE_JUMP_FRAMES)
        } else {
            (Action::Duck, SWIPE_DUCK_FRAMES)
        };
        self.swipe_until.insert(action, frame + frames);
        Some(action)
    }

    fn key_held(&self, action: Action, frame: u64) -> bool {
        self.key_frame.iter().any(|(code, &last)| {
            action_for(code) == Some(action)
                && (self.reports_releases || frame.saturating_sub(last) <= HOLD_WINDOW)
        })
    }

    fn swipe_held(&self, action: Action, frame: u64) -> bool {
        self.swipe_until.get(&action).map_or(false, |&until| frame < until)
    }

    pub fn held(&self, frame: u64) -> HeldActions {
        let held = [Action::Jump, Action::Duck]
            .into_iter()
            .filter(|&a| self.key_held(a, frame) || self.swipe_held(a, frame))
            .collect();
        HeldActions { held }
    }

    pub fn clear(&mut self) {
        self.key_frame.clear();
        self.swipe_until.clear();
        self.drag_start = None;
    }
}
