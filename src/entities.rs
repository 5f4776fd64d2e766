/// All game entity types: pure data, no logic beyond small accessors.

use crate::config::{
    Archetype, Category, DUCK_HEIGHT, DUCK_WIDTH, RUNNER_HEIGHT, RUNNER_WIDTH, RUNNER_X, STAND_Y,
    UFO_PARKED_X, UFO_BASE_Y,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Expert,
}

/// Visual theme; the engine carries it but never reads it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Day,
    Night,
}

// ── Runner ────────────────────────────────────────────────────────────────────

/// Jumping and ducking are separate variants, so a runner can never be both.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Stance {
    Standing,
    Jumping { velocity_y: f64 },
    Ducking,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Runner {
    pub x: f64,
    /// Top edge; grows downwards like screen coordinates.
    pub y: f64,
    pub stance: Stance,
}

impl Runner {
    pub fn new() -> Runner {
        Runner { x: RUNNER_X, y: STAND_Y, stance: Stance::Standing }
    }

    pub fn is_jumping(&self) -> bool {
        matches!(self.stance, Stance::Jumping { .. })
    }

    pub fn is_ducking(&self) -> bool {
        self.stance == Stance::Ducking
    }

    pub fn velocity_y(&self) -> f64 {
        match self.stance {
            Stance::Jumping { velocity_y } => velocity_y,
            Stance::Standing | Stance::Ducking => 0.0,
        }
    }

    /// Stance-dependent hitbox size.
    pub fn size(&self) -> (f64, f64) {
        match self.stance {
            Stance::Ducking => (DUCK_WIDTH, DUCK_HEIGHT),
            Stance::Standing | Stance::Jumping { .. } => (RUNNER_WIDTH, RUNNER_HEIGHT),
        }
    }
}

impl Default for Runner {
    fn default() -> Self {
        Runner::new()
    }
}

// ── Boss & bullets ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub velocity_x: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BossPhase {
    Idle,
    /// `timer` counts down the frames left in this shooting phase.
    Shooting { timer: u32 },
    Destroyed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Boss {
    pub phase: BossPhase,
    pub bullets: Vec<Bullet>,
    /// Score milestone this boss was spawned for.
    pub spawn_score: u32,
}

impl Boss {
    pub fn new(spawn_score: u32) -> Boss {
        Boss { phase: BossPhase::Idle, bullets: Vec::new(), spawn_score }
    }

    pub fn is_destroyed(&self) -> bool {
        self.phase == BossPhase::Destroyed
    }

    pub fn is_shooting(&self) -> bool {
        matches!(self.phase, BossPhase::Shooting { .. })
    }
}

// ── Obstacles ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObstacleType {
    Jump,
    Duck,
    Boss,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ObstacleKind {
    Standard(&'static Archetype),
    Boss(Boss),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    pub id: u64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Set once the bonus for this obstacle has been paid.
    pub passed: bool,
    /// Landed from a UFO flyby rather than spawned in the lane.
    pub ufo_drop: bool,
    pub kind: ObstacleKind,
}

impl Obstacle {
    pub fn obstacle_type(&self) -> ObstacleType {
        match &self.kind {
            ObstacleKind::Standard(archetype) => match archetype.category {
                Category::Jump => ObstacleType::Jump,
                Category::Duck => ObstacleType::Duck,
            },
            ObstacleKind::Boss(_) => ObstacleType::Boss,
        }
    }

    pub fn is_boss(&self) -> bool {
        matches!(self.kind, ObstacleKind::Boss(_))
    }

    pub fn boss(&self) -> Option<&Boss> {
        match &self.kind {
            ObstacleKind::Boss(boss) => Some(boss),
            ObstacleKind::Standard(_) => None,
        }
    }

    pub fn archetype(&self) -> Option<&'static Archetype> {
        match &self.kind {
            ObstacleKind::Standard(archetype) => Some(archetype),
            ObstacleKind::Boss(_) => None,
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.boss().map_or(false, Boss::is_destroyed)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}

// ── Particles ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleColor {
    Coral,
    Teal,
    Sky,
    Salmon,
    Sun,
}

pub const PARTICLE_COLORS: [ParticleColor; 5] = [
    ParticleColor::Coral,
    ParticleColor::Teal,
    ParticleColor::Sky,
    ParticleColor::Salmon,
    ParticleColor::Sun,
];

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub velocity_x: f64,
    pub velocity_y: f64,
    /// 1.0 when spawned, removed once it reaches zero.
    pub life: f64,
    pub size: f64,
    pub color: ParticleColor,
}

// ── UFO ───────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum UfoPhase {
    Inactive { cooldown: u32 },
    Flying { has_dropped: bool },
    /// A drop is in flight; it lands at `target_y`.
    Dropping { drop: Obstacle, target_y: f64 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Ufo {
    pub x: f64,
    pub y: f64,
    pub phase: UfoPhase,
}

impl Ufo {
    pub fn parked() -> Ufo {
        Ufo { x: UFO_PARKED_X, y: UFO_BASE_Y, phase: UfoPhase::Inactive { cooldown: 0 } }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.phase, UfoPhase::Inactive { .. })
    }

    pub fn falling_drop(&self) -> Option<&Obstacle> {
        match &self.phase {
            UfoPhase::Dropping { drop, .. } => Some(drop),
            UfoPhase::Inactive { .. } | UfoPhase::Flying { .. } => None,
        }
    }
}

impl Default for Ufo {
    fn default() -> Self {
        Ufo::parked()
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub running: bool,
    pub game_over: bool,
    /// Fractional so the expert multiplier accumulates exactly; see `points`.
    pub score: f64,
    pub high_score: u32,
    /// Current speed multiplier.
    pub speed: f64,
    pub difficulty: Difficulty,
    pub theme: Theme,
    pub runner: Runner,
    /// Ordered by spawn time; bosses included.
    pub obstacles: Vec<Obstacle>,
    pub particles: Vec<Particle>,
    pub background_offset: f64,
    pub frame: u64,
    pub boss_active: bool,
    /// Milestone of the most recent boss.
    pub last_boss_score: u32,
    pub ufo: Ufo,
    /// Id handed to the next spawned obstacle.
    pub next_id: u64,
}

impl GameState {
    /// Whole points, as shown and persisted.
    pub fn points(&self) -> u32 {
        self.score.max(0.0).floor() as u32
    }

    pub fn seconds(&self) -> u64 {
        self.frame / 60
    }

    /// Paused mid-run (as opposed to the start screen or game over).
    pub fn is_paused(&self) -> bool {
        !self.running && !self.game_over && (self.frame > 0 || self.score > 0.0)
    }
}
