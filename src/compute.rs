/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` and returns a brand-new `GameState`.  Side effects are limited
/// to the injected random source and, on game over, the high-score store.

use tracing::{debug, info, warn};

use crate::boss::{destroy, update_boss};
use crate::collision::{collides, Contact};
use crate::config::{
    calculate_speed, gravity, jump_force, min_spawn_distance, obstacle_spawn_rate,
    DifficultyConfig, BACKGROUND_WRAP, BOSS_BONUS, DEATH_PARTICLES, DUCK_BONUS, DUCK_Y,
    JUMP_BONUS, OBSTACLE_DESPAWN_X, RUNNER_SPEED, SCORE_PER_FRAME, SPAWN_X, SPAWN_X_JITTER,
    STAND_Y,
};
use crate::entities::{
    Difficulty, GameState, Obstacle, ObstacleKind, ObstacleType, Runner, Stance, Theme, Ufo,
};
use crate::generator::generate;
use crate::input::{Action, HeldActions};
use crate::particles::{create_particles, update_particles};
use crate::persistence::HighScoreStore;
use crate::random::RandomSource;
use crate::ufo::update_ufo;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Idle state shown behind the start menu.
pub fn init_state(high_score: u32) -> GameState {
    let difficulty = Difficulty::default();
    GameState {
        running: false,
        game_over: false,
        score: 0.0,
        high_score,
        speed: difficulty.config().base_speed,
        difficulty,
        theme: Theme::default(),
        runner: Runner::new(),
        obstacles: Vec::new(),
        particles: Vec::new(),
        background_offset: 0.0,
        frame: 0,
        boss_active: false,
        last_boss_score: 0,
        ufo: Ufo::parked(),
        next_id: 1,
    }
}

/// Fresh running state; the high score is re-read from the store.
pub fn start_game(difficulty: Difficulty, theme: Theme, store: &impl HighScoreStore) -> GameState {
    let high_score = store.read_high_score();
    info!(difficulty = difficulty.key(), theme = theme.key(), high_score, "game started");
    GameState {
        running: true,
        speed: difficulty.config().base_speed,
        difficulty,
        theme,
        ..init_state(high_score)
    }
}

// ── Lifecycle transitions (pure) ─────────────────────────────────────────────

/// Flip between running and paused; a finished game stays finished.
pub fn toggle_pause(state: &GameState) -> GameState {
    if state.game_over {
        return state.clone();
    }
    debug!(running = !state.running, frame = state.frame, "pause toggled");
    GameState { running: !state.running, ..state.clone() }
}

/// Keep the death burst fading while the engine is stopped.
pub fn fade_particles(state: &GameState) -> GameState {
    GameState { particles: update_particles(&state.particles), ..state.clone() }
}

/// One front-end frame: run the simulation while the game is live, keep the
/// death burst fading once it is over.  The burst is shown at full life on
/// the frame that ends the run.
pub fn advance(
    state: &GameState,
    input: &HeldActions,
    rng: &mut impl RandomSource,
    store: &mut impl HighScoreStore,
) -> GameState {
    if state.game_over {
        return fade_particles(state);
    }
    tick(state, input, rng, store)
}

// ── Frame stages ─────────────────────────────────────────────────────────────

/// Resolve stance from held input, then integrate the jump arc.
pub fn update_runner(runner: &Runner, input: &HeldActions, difficulty: Difficulty) -> Runner {
    let jump = input.is_held(Action::Jump);
    let duck = input.is_held(Action::Duck);

    let mut next = runner.clone();
    match runner.stance {
        Stance::Standing if jump => {
            next.stance = Stance::Jumping { velocity_y: jump_force(difficulty) };
        }
        Stance::Standing | Stance::Ducking if duck => {
            next.stance = Stance::Ducking;
            next.y = DUCK_Y;
        }
        Stance::Standing | Stance::Ducking => {
            next.stance = Stance::Standing;
            next.y = STAND_Y;
        }
        Stance::Jumping { .. } => {}
    }

    if let Stance::Jumping { velocity_y } = next.stance {
        let velocity_y = velocity_y + gravity(difficulty);
        let y = next.y + velocity_y;
        if y >= STAND_Y {
            next.y = STAND_Y;
            next.stance = Stance::Standing;
        } else {
            next.y = y;
            next.stance = Stance::Jumping { velocity_y };
        }
    }
    next
}

/// Advance bosses, scroll everything left, drop what is gone.
pub fn advance_obstacles(obstacles: &[Obstacle], runner_x: f64, scroll: f64) -> Vec<Obstacle> {
    obstacles
        .iter()
        .map(|o| update_boss(o, runner_x))
        .map(|o| Obstacle { x: o.x - scroll, ..o })
        .filter(|o| o.x > OBSTACLE_DESPAWN_X && !o.is_destroyed())
        .collect()
}

/// Roll for a new lane entity when the newest one has moved far enough.
pub fn maybe_spawn(
    obstacles: &[Obstacle],
    speed: f64,
    score: f64,
    last_boss_score: u32,
    id: u64,
    config: &DifficultyConfig,
    rng: &mut impl RandomSource,
) -> Option<Obstacle> {
    let room = obstacles
        .last()
        .map_or(true, |last| SPAWN_X - last.x > min_spawn_distance(speed));
    if !room || !rng.chance(obstacle_spawn_rate(speed, config)) {
        return None;
    }
    let x = SPAWN_X + rng.range(0.0, SPAWN_X_JITTER);
    Some(generate(id, x, score, last_boss_score, rng))
}

/// Unscaled bonus for getting past (or defeating) an obstacle.
pub fn bonus_for(obstacle_type: ObstacleType) -> f64 {
    match obstacle_type {
        ObstacleType::Boss => BOSS_BONUS,
        ObstacleType::Duck => DUCK_BONUS,
        ObstacleType::Jump => JUMP_BONUS,
    }
}

fn game_over(
    state: &GameState,
    runner: Runner,
    obstacles: Vec<Obstacle>,
    rng: &mut impl RandomSource,
    store: &mut impl HighScoreStore,
) -> GameState {
    let points = state.points();
    let previous = store.read_high_score().max(state.high_score);
    let high_score = if points > previous {
        if let Err(err) = store.write_high_score(points) {
            warn!(%err, "failed to persist high score");
        }
        points
    } else {
        previous
    };
    info!(score = points, high_score, frame = state.frame, "game over");

    let mut particles = state.particles.clone();
    particles.extend(create_particles(runner.x + 20.0, runner.y + 30.0, DEATH_PARTICLES, rng));

    GameState {
        running: false,
        game_over: true,
        high_score,
        runner,
        obstacles,
        particles,
        ..state.clone()
    }
}

// ── Per-frame tick (randomness and storage are injected) ──────────────────

/// Advance the simulation by one frame.
///
/// Order: runner, boss/scroll/filter, spawn, collisions (possibly ending
/// the run), score and bonuses, particles/background/frame counter, UFO.
pub fn tick(
    state: &GameState,
    input: &HeldActions,
    rng: &mut impl RandomSource,
    store: &mut impl HighScoreStore,
) -> GameState {
    if !state.running {
        return state.clone();
    }
    let config = state.difficulty.config();

    // ── 1. Runner ────────────────────────────────────────────────────────────
    let runner = update_runner(&state.runner, input, state.difficulty);

    // ── 2. Bosses, scroll, filter ────────────────────────────────────────────
    let speed = calculate_speed(state.score, config);
    let scroll = RUNNER_SPEED * speed;
    let mut obstacles = advance_obstacles(&state.obstacles, runner.x, scroll);

    // ── 3. Spawn (suspended while a boss is on screen) ───────────────────────
    let mut next_id = state.next_id;
    let mut last_boss_score = state.last_boss_score;
    if !obstacles.iter().any(Obstacle::is_boss) {
        let spawned = maybe_spawn(
            &obstacles,
            speed,
            state.score,
            last_boss_score,
            next_id,
            config,
            rng,
        );
        if let Some(obstacle) = spawned {
            if let ObstacleKind::Boss(boss) = &obstacle.kind {
                last_boss_score = boss.spawn_score;
            }
            next_id += 1;
            obstacles.push(obstacle);
        }
    }
    let boss_active = obstacles.iter().any(Obstacle::is_boss);

    // ── 4. Collisions ────────────────────────────────────────────────────────
    let mut fatal = false;
    for obstacle in obstacles.iter_mut() {
        match collides(&runner, obstacle) {
            Contact::Clear => {}
            Contact::BossDefeated => {
                debug!(id = obstacle.id, "boss defeated");
                *obstacle = destroy(obstacle);
            }
            Contact::Fatal => {
                fatal = true;
                break;
            }
        }
    }
    if fatal {
        return game_over(state, runner, obstacles, rng, store);
    }

    // ── 5. Score ─────────────────────────────────────────────────────────────
    let mut score = state.score + SCORE_PER_FRAME * config.score_multiplier;
    for obstacle in obstacles.iter_mut().filter(|o| !o.passed) {
        if obstacle.is_destroyed() || obstacle.right() < runner.x {
            obstacle.passed = true;
            score += bonus_for(obstacle.obstacle_type()) * config.score_multiplier;
        }
    }

    // ── 6. Particles, background, clock ──────────────────────────────────────
    let particles = update_particles(&state.particles);
    let background_offset = (state.background_offset + scroll) % BACKGROUND_WRAP;
    let frame = state.frame + 1;

    // ── 7. UFO ───────────────────────────────────────────────────────────────
    let ufo_update = update_ufo(&state.ufo, &obstacles, boss_active, rng);
    if let Some(drop) = ufo_update.landed {
        obstacles.push(Obstacle { id: next_id, ..drop });
        next_id += 1;
    }

    GameState {
        score,
        speed,
        runner,
        obstacles,
        particles,
        background_offset,
        frame,
        boss_active,
        last_boss_score,
        ufo: ufo_update.ufo,
        next_id,
        ..state.clone()
    }
}
