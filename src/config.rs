/// Static configuration tables: world geometry, physics, difficulty presets,
/// obstacle archetypes and the boss.  Pure data, no behaviour beyond lookups
/// that fall back to a default instead of failing.

use crate::entities::{Difficulty, Theme};

// ── World geometry ───────────────────────────────────────────────────────────

/// Logical viewport width; obstacles spawn just past it.
pub const VIEW_WIDTH: f64 = 800.0;
pub const VIEW_HEIGHT: f64 = 600.0;
/// Ground sits at 75% of the viewport height.
pub const GROUND_LEVEL: f64 = VIEW_HEIGHT * 0.75;

// ── Runner physics ───────────────────────────────────────────────────────────

pub const GRAVITY: f64 = 0.8;
pub const JUMP_FORCE: f64 = -18.0;
/// Horizontal scroll per frame at speed multiplier 1.0.
pub const RUNNER_SPEED: f64 = 4.0;
pub const RUNNER_X: f64 = 100.0;
pub const RUNNER_WIDTH: f64 = 40.0;
pub const RUNNER_HEIGHT: f64 = 60.0;
pub const DUCK_WIDTH: f64 = 50.0;
pub const DUCK_HEIGHT: f64 = 30.0;

/// Resting `y` of a standing runner.
pub const STAND_Y: f64 = GROUND_LEVEL - RUNNER_HEIGHT;
/// Resting `y` of a ducking runner.
pub const DUCK_Y: f64 = GROUND_LEVEL - DUCK_HEIGHT;

// ── Spawning & scrolling ─────────────────────────────────────────────────────

pub const MIN_OBSTACLE_DISTANCE: f64 = 300.0;
pub const SPAWN_X: f64 = 800.0;
pub const SPAWN_X_JITTER: f64 = 100.0;
pub const BASE_SPAWN_RATE: f64 = 0.025;
pub const JUMP_CATEGORY_CHANCE: f64 = 0.7;
/// Obstacles at or left of this x are dropped.
pub const OBSTACLE_DESPAWN_X: f64 = -200.0;
pub const BACKGROUND_WRAP: f64 = 2000.0;
/// Shrink applied to both boxes before the overlap test.
pub const COLLISION_MARGIN: f64 = 8.0;

// ── Scoring ──────────────────────────────────────────────────────────────────

pub const SCORE_PER_FRAME: f64 = 1.0;
pub const JUMP_BONUS: f64 = 10.0;
pub const DUCK_BONUS: f64 = 15.0;
pub const BOSS_BONUS: f64 = 100.0;

// ── Difficulty presets ───────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DifficultyConfig {
    pub base_speed: f64,
    pub speed_increment: f64,
    pub max_speed: f64,
    pub score_multiplier: f64,
    pub obstacle_spawn_rate: f64,
    /// Score points between two speed bumps.
    pub speed_increase_interval: f64,
    pub jump_force_multiplier: f64,
    pub gravity_multiplier: f64,
}

const EASY: DifficultyConfig = DifficultyConfig {
    base_speed: 0.8,
    speed_increment: 0.05,
    max_speed: 2.0,
    score_multiplier: 1.0,
    obstacle_spawn_rate: 0.8,
    speed_increase_interval: 300.0,
    jump_force_multiplier: 1.15,
    gravity_multiplier: 0.9,
};

const NORMAL: DifficultyConfig = DifficultyConfig {
    base_speed: 1.0,
    speed_increment: 0.1,
    max_speed: 2.5,
    score_multiplier: 1.0,
    obstacle_spawn_rate: 1.0,
    speed_increase_interval: 200.0,
    jump_force_multiplier: 1.0,
    gravity_multiplier: 1.0,
};

const EXPERT: DifficultyConfig = DifficultyConfig {
    base_speed: 1.2,
    speed_increment: 0.15,
    max_speed: 3.5,
    score_multiplier: 1.5,
    obstacle_spawn_rate: 1.3,
    speed_increase_interval: 150.0,
    jump_force_multiplier: 0.9,
    gravity_multiplier: 1.15,
};

pub fn difficulty_config(difficulty: Difficulty) -> &'static DifficultyConfig {
    match difficulty {
        Difficulty::Easy => &EASY,
        Difficulty::Normal => &NORMAL,
        Difficulty::Expert => &EXPERT,
    }
}

impl Difficulty {
    /// Unknown keys resolve to `Normal`.
    pub fn from_key(key: &str) -> Difficulty {
        match key.trim().to_ascii_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "expert" => Difficulty::Expert,
            _ => Difficulty::Normal,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Expert => "expert",
        }
    }

    pub fn config(self) -> &'static DifficultyConfig {
        difficulty_config(self)
    }
}

impl Theme {
    /// Unknown keys resolve to `Day`.
    pub fn from_key(key: &str) -> Theme {
        match key.trim().to_ascii_lowercase().as_str() {
            "night" => Theme::Night,
            _ => Theme::Day,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Theme::Day => "day",
            Theme::Night => "night",
        }
    }
}

pub fn jump_force(difficulty: Difficulty) -> f64 {
    JUMP_FORCE * difficulty.config().jump_force_multiplier
}

pub fn gravity(difficulty: Difficulty) -> f64 {
    GRAVITY * difficulty.config().gravity_multiplier
}

/// Step function of score: one increment per interval, capped at the max.
pub fn calculate_speed(score: f64, config: &DifficultyConfig) -> f64 {
    let level = (score.max(0.0) / config.speed_increase_interval).floor();
    (config.base_speed + level * config.speed_increment).min(config.max_speed)
}

/// Per-frame probability of spawning an obstacle at the given speed.
pub fn obstacle_spawn_rate(speed: f64, config: &DifficultyConfig) -> f64 {
    let base = BASE_SPAWN_RATE * config.obstacle_spawn_rate;
    base * (1.0 + (speed - 1.0) * 0.3)
}

/// Gap required between the spawn line and the newest obstacle.
pub fn min_spawn_distance(speed: f64) -> f64 {
    MIN_OBSTACLE_DISTANCE + (speed - 1.0) * 20.0
}

// ── Obstacle archetypes ──────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    Jump,
    Duck,
}

/// Cosmetic only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    Rect,
    Person,
    Circle,
    Banner,
}

/// Cosmetic only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Archetype {
    pub key: &'static str,
    pub title: &'static str,
    pub width: f64,
    pub height: f64,
    pub category: Category,
    /// Height of the bottom edge above ground; `None` sits on the ground.
    pub y_offset: Option<f64>,
    pub shape: Shape,
    pub priority: Priority,
}

impl Archetype {
    /// `y` of the top edge when placed in the lane.
    pub fn resting_y(&self) -> f64 {
        match self.y_offset {
            Some(offset) => GROUND_LEVEL - offset,
            None => GROUND_LEVEL - self.height,
        }
    }
}

const fn jump(
    key: &'static str,
    title: &'static str,
    width: f64,
    height: f64,
    shape: Shape,
    priority: Priority,
) -> Archetype {
    Archetype { key, title, width, height, category: Category::Jump, y_offset: None, shape, priority }
}

const fn duck(
    key: &'static str,
    title: &'static str,
    width: f64,
    height: f64,
    y_offset: f64,
    shape: Shape,
    priority: Priority,
) -> Archetype {
    Archetype {
        key,
        title,
        width,
        height,
        category: Category::Duck,
        y_offset: Some(y_offset),
        shape,
        priority,
    }
}

pub static JUMP_ARCHETYPES: [Archetype; 8] = [
    jump("meeting", "MEETING", 80.0, 90.0, Shape::Rect, Priority::High),
    jump("deadline", "DEADLINE", 75.0, 80.0, Shape::Rect, Priority::Critical),
    jump("timesheet", "TIMESHEET", 70.0, 75.0, Shape::Rect, Priority::Medium),
    jump("production", "PRODUCTION", 90.0, 85.0, Shape::Rect, Priority::High),
    jump("manager", "MANAGER", 80.0, 95.0, Shape::Person, Priority::Critical),
    jump("teamlead", "TEAM LEAD", 70.0, 90.0, Shape::Person, Priority::High),
    jump("standup", "STANDUP", 60.0, 70.0, Shape::Circle, Priority::Medium),
    jump("codereview", "CODE REVIEW", 65.0, 75.0, Shape::Rect, Priority::Medium),
];

pub static DUCK_ARCHETYPES: [Archetype; 4] = [
    duck("hremail", "HR EMAIL", 100.0, 40.0, 70.0, Shape::Banner, Priority::Medium),
    duck("allhands", "ALL-HANDS", 110.0, 45.0, 80.0, Shape::Banner, Priority::High),
    duck("announcement", "ANNOUNCEMENT", 90.0, 35.0, 65.0, Shape::Banner, Priority::Medium),
    duck("feedback", "FEEDBACK", 85.0, 35.0, 60.0, Shape::Circle, Priority::Low),
];

pub fn archetypes(category: Category) -> &'static [Archetype] {
    match category {
        Category::Jump => &JUMP_ARCHETYPES,
        Category::Duck => &DUCK_ARCHETYPES,
    }
}

/// Lookup by key; unknown keys resolve to the first jump archetype.
pub fn archetype(key: &str) -> &'static Archetype {
    JUMP_ARCHETYPES
        .iter()
        .chain(DUCK_ARCHETYPES.iter())
        .find(|a| a.key == key)
        .unwrap_or(&JUMP_ARCHETYPES[0])
}

// ── Boss ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BossConfig {
    pub width: f64,
    pub height: f64,
    /// Reference only; spawning goes through the milestone roll.
    pub spawn_chance: f64,
    pub min_score_to_spawn: u32,
    pub milestone_interval: u32,
    pub milestone_chance: f64,
    /// Frames a shooting phase lasts.
    pub shoot_duration: u32,
    pub trigger_distance: f64,
    /// Frames between two bullets.
    pub shoot_cadence: u32,
}

pub const BOSS: BossConfig = BossConfig {
    width: 120.0,
    height: 100.0,
    spawn_chance: 0.015,
    min_score_to_spawn: 500,
    milestone_interval: 500,
    milestone_chance: 0.3,
    shoot_duration: 180,
    trigger_distance: 400.0,
    shoot_cadence: 20,
};

pub const BULLET_WIDTH: f64 = 8.0;
pub const BULLET_HEIGHT: f64 = 4.0;
pub const BULLET_VELOCITY_X: f64 = -8.0;
/// Bullets at or left of this x are dropped.
pub const BULLET_DESPAWN_X: f64 = -50.0;

// ── UFO ──────────────────────────────────────────────────────────────────────

pub const UFO_START_X: f64 = -100.0;
pub const UFO_PARKED_X: f64 = -200.0;
pub const UFO_BASE_Y: f64 = 60.0;
pub const UFO_Y_JITTER: f64 = 40.0;
pub const UFO_SPEED: f64 = 1.5;
pub const UFO_ACTIVATION_CHANCE: f64 = 0.001;
pub const UFO_DROP_CHANCE: f64 = 0.015;
/// Drops only happen while `UFO_DROP_MARGIN < x < VIEW_WIDTH - UFO_DROP_MARGIN`.
pub const UFO_DROP_MARGIN: f64 = 300.0;
pub const UFO_DROP_OFFSET_X: f64 = 24.0;
pub const UFO_DROP_OFFSET_Y: f64 = 48.0;
pub const UFO_DROP_WIDTH: f64 = 60.0;
pub const UFO_SAFE_GAP: f64 = 200.0;
pub const UFO_FALL_SPEED: f64 = 6.0;
/// Landing height of a dropped obstacle, above ground.
pub const UFO_DROP_TARGET_OFFSET: f64 = 80.0;
pub const UFO_EXIT_MARGIN: f64 = 120.0;
/// 30 seconds at 60 FPS.
pub const UFO_COOLDOWN: u32 = 1800;
/// The lane counts as clear for activation when every obstacle is outside
/// `[UFO_CLEAR_LEFT, UFO_CLEAR_RIGHT]`.
pub const UFO_CLEAR_LEFT: f64 = -100.0;
pub const UFO_CLEAR_RIGHT: f64 = 600.0;

// ── Particles ────────────────────────────────────────────────────────────────

pub const DEATH_PARTICLES: usize = 15;
pub const PARTICLE_GRAVITY: f64 = 0.5;
pub const PARTICLE_DECAY: f64 = 0.025;
pub const PARTICLE_SHRINK: f64 = 0.97;
