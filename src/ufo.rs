/// UFO side-encounter: `Inactive → Flying → Dropping (once) → Flying →
/// Inactive`.  It reads the lane for safety checks but never writes to it;
/// a landed drop is handed back to the engine to merge.

use tracing::debug;

use crate::config::{
    GROUND_LEVEL, JUMP_ARCHETYPES, UFO_BASE_Y, UFO_CLEAR_LEFT, UFO_CLEAR_RIGHT, UFO_COOLDOWN,
    UFO_DROP_CHANCE, UFO_DROP_MARGIN, UFO_DROP_OFFSET_X, UFO_DROP_OFFSET_Y,
    UFO_DROP_TARGET_OFFSET, UFO_DROP_WIDTH, UFO_EXIT_MARGIN, UFO_FALL_SPEED, UFO_PARKED_X,
    UFO_SAFE_GAP, UFO_SPEED, UFO_START_X, UFO_Y_JITTER, UFO_ACTIVATION_CHANCE, VIEW_WIDTH,
};
use crate::entities::{Obstacle, ObstacleKind, Ufo, UfoPhase};
use crate::random::RandomSource;

#[derive(Clone, Debug, PartialEq)]
pub struct UfoUpdate {
    pub ufo: Ufo,
    /// Drop that reached the ground this frame.  Its `id` is a placeholder;
    /// the engine assigns the real one when merging it into the lane.
    pub landed: Option<Obstacle>,
}

/// Lane is clear enough to start a flyby.
pub fn lane_clear(obstacles: &[Obstacle]) -> bool {
    obstacles
        .iter()
        .all(|o| o.x > UFO_CLEAR_RIGHT || o.x < UFO_CLEAR_LEFT)
}

/// No obstacle within the safe gap around a drop starting at `drop_x`.
pub fn drop_zone_clear(obstacles: &[Obstacle], drop_x: f64) -> bool {
    let left = drop_x - UFO_SAFE_GAP;
    let right = drop_x + UFO_DROP_WIDTH + UFO_SAFE_GAP;
    let clear = !obstacles.iter().any(|o| o.right() > left && o.x < right);
    let newest_clear = obstacles
        .last()
        .map_or(true, |o| o.right() < left || o.x > right);
    clear && newest_clear
}

fn in_drop_band(x: f64) -> bool {
    x > UFO_DROP_MARGIN && x < VIEW_WIDTH - UFO_DROP_MARGIN
}

fn new_drop(ufo: &Ufo, rng: &mut impl RandomSource) -> Obstacle {
    let archetype = &JUMP_ARCHETYPES[rng.pick(JUMP_ARCHETYPES.len())];
    Obstacle {
        id: 0,
        x: ufo.x + UFO_DROP_OFFSET_X,
        y: ufo.y + UFO_DROP_OFFSET_Y,
        width: archetype.width,
        height: archetype.height,
        passed: false,
        ufo_drop: true,
        kind: ObstacleKind::Standard(archetype),
    }
}

/// Advance the UFO by one frame against the lane as it stands this frame.
pub fn update_ufo(
    ufo: &Ufo,
    obstacles: &[Obstacle],
    boss_active: bool,
    rng: &mut impl RandomSource,
) -> UfoUpdate {
    let mut next = ufo.clone();

    if let UfoPhase::Inactive { cooldown } = next.phase {
        let cooldown = cooldown.saturating_sub(1);
        next.phase = UfoPhase::Inactive { cooldown };

        let ready = cooldown == 0 && next.x <= UFO_START_X && !boss_active;
        if ready && lane_clear(obstacles) && rng.chance(UFO_ACTIVATION_CHANCE) {
            next.x = UFO_START_X;
            next.y = UFO_BASE_Y + rng.range(0.0, UFO_Y_JITTER);
            next.phase = UfoPhase::Flying { has_dropped: false };
            debug!(y = next.y, "ufo flyby started");
        } else {
            return UfoUpdate { ufo: next, landed: None };
        }
    }

    next.x += UFO_SPEED;

    if next.phase == (UfoPhase::Flying { has_dropped: false }) && in_drop_band(next.x) {
        let drop_x = next.x + UFO_DROP_OFFSET_X;
        if drop_zone_clear(obstacles, drop_x) && rng.chance(UFO_DROP_CHANCE) {
            let drop = new_drop(&next, rng);
            debug!(x = drop.x, archetype = ?drop.archetype().map(|a| a.key), "ufo drop released");
            next.phase = UfoPhase::Dropping {
                drop,
                target_y: GROUND_LEVEL - UFO_DROP_TARGET_OFFSET,
            };
        }
    }

    let mut landed = None;
    if let UfoPhase::Dropping { drop, target_y } = next.phase.clone() {
        let y = drop.y + UFO_FALL_SPEED;
        if y >= target_y {
            debug!(x = drop.x, "ufo drop landed");
            landed = Some(Obstacle { y: target_y, ..drop });
            next.phase = UfoPhase::Flying { has_dropped: true };
        } else {
            next.phase = UfoPhase::Dropping { drop: Obstacle { y, ..drop }, target_y };
        }
    }

    if next.x > VIEW_WIDTH + UFO_EXIT_MARGIN {
        debug!("ufo flyby ended");
        next = Ufo {
            x: UFO_PARKED_X,
            y: next.y,
            phase: UfoPhase::Inactive { cooldown: UFO_COOLDOWN },
        };
    }

    UfoUpdate { ufo: next, landed }
}
