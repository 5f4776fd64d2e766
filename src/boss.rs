/// Boss sub-state machine: `Idle → Shooting → Idle`, with `Destroyed` as
/// the terminal state.  Bullets keep flying whatever the phase.

use crate::config::{
    BOSS, BULLET_DESPAWN_X, BULLET_HEIGHT, BULLET_VELOCITY_X, BULLET_WIDTH,
};
use crate::entities::{Boss, BossPhase, Bullet, Obstacle, ObstacleKind};

/// Bullet spawned at the lower-front corner of the boss body.
fn muzzle_bullet(body: &Obstacle) -> Bullet {
    Bullet {
        x: body.x - 10.0,
        y: body.y + body.height - 24.0,
        width: BULLET_WIDTH,
        height: BULLET_HEIGHT,
        velocity_x: BULLET_VELOCITY_X,
    }
}

/// Advance one boss by one frame, before the lane scroll is applied.
///
/// Non-boss obstacles and destroyed bosses come back unchanged.
pub fn update_boss(obstacle: &Obstacle, runner_x: f64) -> Obstacle {
    let boss = match &obstacle.kind {
        ObstacleKind::Boss(boss) if !boss.is_destroyed() => boss,
        _ => return obstacle.clone(),
    };

    let distance = obstacle.x - runner_x;
    let mut phase = boss.phase;
    if phase == BossPhase::Idle && distance > 0.0 && distance < BOSS.trigger_distance {
        phase = BossPhase::Shooting { timer: BOSS.shoot_duration };
    }

    let mut bullets = boss.bullets.clone();
    if let BossPhase::Shooting { timer } = phase {
        let timer = timer.saturating_sub(1);
        if timer % BOSS.shoot_cadence == 0 {
            bullets.push(muzzle_bullet(obstacle));
        }
        phase = if timer == 0 {
            BossPhase::Idle
        } else {
            BossPhase::Shooting { timer }
        };
    }

    let bullets = bullets
        .into_iter()
        .map(|b| Bullet { x: b.x + b.velocity_x, ..b })
        .filter(|b| b.x > BULLET_DESPAWN_X)
        .collect();

    Obstacle {
        kind: ObstacleKind::Boss(Boss { phase, bullets, spawn_score: boss.spawn_score }),
        ..obstacle.clone()
    }
}

/// Mark a boss destroyed; anything else comes back unchanged.
pub fn destroy(obstacle: &Obstacle) -> Obstacle {
    match &obstacle.kind {
        ObstacleKind::Boss(boss) => Obstacle {
            kind: ObstacleKind::Boss(Boss { phase: BossPhase::Destroyed, ..boss.clone() }),
            ..obstacle.clone()
        },
        ObstacleKind::Standard(_) => obstacle.clone(),
    }
}
