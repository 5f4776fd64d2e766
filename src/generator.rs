/// Obstacle generator: turns the current score and spawn history into a new
/// lane entity, either a boss at a fresh score milestone or a standard
/// obstacle drawn from the archetype tables.

use tracing::debug;

use crate::config::{archetypes, Category, BOSS, GROUND_LEVEL, JUMP_CATEGORY_CHANCE};
use crate::entities::{Boss, Obstacle, ObstacleKind};
use crate::random::RandomSource;

/// Milestone reached at `score`, e.g. 1234 → 1000.
pub fn milestone(score: f64) -> u32 {
    let interval = BOSS.milestone_interval;
    (score.max(0.0) as u32 / interval) * interval
}

/// The milestone a boss may be spawned for, if one is due.
pub fn pending_boss_milestone(score: f64, last_boss_score: u32) -> Option<u32> {
    let current = milestone(score);
    (current > last_boss_score && current >= BOSS.min_score_to_spawn).then_some(current)
}

pub fn new_boss(id: u64, x: f64, spawn_score: u32) -> Obstacle {
    Obstacle {
        id,
        x,
        y: GROUND_LEVEL - BOSS.height,
        width: BOSS.width,
        height: BOSS.height,
        passed: false,
        ufo_drop: false,
        kind: ObstacleKind::Boss(Boss::new(spawn_score)),
    }
}

/// Standard obstacle of a random archetype from `category`, placed in the lane.
pub fn new_obstacle(id: u64, x: f64, category: Category, rng: &mut impl RandomSource) -> Obstacle {
    let table = archetypes(category);
    let archetype = &table[rng.pick(table.len())];
    Obstacle {
        id,
        x,
        y: archetype.resting_y(),
        width: archetype.width,
        height: archetype.height,
        passed: false,
        ufo_drop: false,
        kind: ObstacleKind::Standard(archetype),
    }
}

/// Generate the next lane entity at `spawn_x`.
///
/// A boss replaces the normal obstacle with a 30% chance whenever `score`
/// has crossed a milestone above `last_boss_score`.  Otherwise the jump
/// category is picked 70% of the time and an archetype is drawn uniformly.
pub fn generate(
    id: u64,
    spawn_x: f64,
    score: f64,
    last_boss_score: u32,
    rng: &mut impl RandomSource,
) -> Obstacle {
    if let Some(spawn_score) = pending_boss_milestone(score, last_boss_score) {
        if rng.chance(BOSS.milestone_chance) {
            debug!(id, spawn_score, "boss spawned");
            return new_boss(id, spawn_x, spawn_score);
        }
    }

    let category = if rng.chance(JUMP_CATEGORY_CHANCE) {
        Category::Jump
    } else {
        Category::Duck
    };
    new_obstacle(id, spawn_x, category, rng)
}
