/// Axis-aligned collision tests between the runner and lane entities.
///
/// Both boxes are shrunk by `COLLISION_MARGIN` before testing so grazes are
/// forgiven.  Standard obstacles are lethal on contact; a boss body is
/// defeated by contact, while its bullets are lethal unless the runner ducks.

use crate::config::COLLISION_MARGIN;
use crate::entities::{Obstacle, ObstacleKind, Runner};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Contact {
    Clear,
    Fatal,
    /// The runner touched a boss body; the boss is destroyed, the run goes on.
    BossDefeated,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Rect {
        Rect { x, y, width, height }
    }
}

pub fn runner_box(runner: &Runner) -> Rect {
    let (width, height) = runner.size();
    Rect::new(runner.x, runner.y, width, height)
}

/// Overlap of the runner box against `other` with the margin applied.
pub fn overlaps(runner: Rect, other: Rect) -> bool {
    runner.x + runner.width - COLLISION_MARGIN > other.x
        && runner.x + COLLISION_MARGIN < other.x + other.width
        && runner.y + runner.height - COLLISION_MARGIN > other.y
        && runner.y + COLLISION_MARGIN < other.y + other.height
}

pub fn collides(runner: &Runner, obstacle: &Obstacle) -> Contact {
    let hitbox = runner_box(runner);
    let body = Rect::new(obstacle.x, obstacle.y, obstacle.width, obstacle.height);

    match &obstacle.kind {
        ObstacleKind::Standard(_) => {
            if overlaps(hitbox, body) {
                Contact::Fatal
            } else {
                Contact::Clear
            }
        }
        ObstacleKind::Boss(boss) => {
            if boss.is_destroyed() {
                return Contact::Clear;
            }
            if overlaps(hitbox, body) {
                return Contact::BossDefeated;
            }
            let hit = !runner.is_ducking()
                && boss
                    .bullets
                    .iter()
                    .any(|b| overlaps(hitbox, Rect::new(b.x, b.y, b.width, b.height)));
            if hit {
                Contact::Fatal
            } else {
                Contact::Clear
            }
        }
    }
}
