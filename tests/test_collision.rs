use corporate_runner::collision::*;
use corporate_runner::config::{archetype, BOSS, DUCK_Y, GROUND_LEVEL, STAND_Y};
use corporate_runner::entities::*;
use corporate_runner::generator::new_boss;

fn standing() -> Runner {
    Runner::new() // x=100, y=STAND_Y, 40x60
}

fn ducking() -> Runner {
    Runner { y: DUCK_Y, stance: Stance::Ducking, ..Runner::new() }
}

fn obstacle(key: &str, x: f64) -> Obstacle {
    let a = archetype(key);
    Obstacle {
        id: 1,
        x,
        y: a.resting_y(),
        width: a.width,
        height: a.height,
        passed: false,
        ufo_drop: false,
        kind: ObstacleKind::Standard(a),
    }
}

fn boss_with_bullet(boss_x: f64, bullet_x: f64) -> Obstacle {
    let mut o = new_boss(9, boss_x, 500);
    if let ObstacleKind::Boss(boss) = &mut o.kind {
        boss.bullets.push(Bullet {
            x: bullet_x,
            y: GROUND_LEVEL - 24.0,
            width: 8.0,
            height: 4.0,
            velocity_x: -8.0,
        });
    }
    o
}

// ── Standard obstacles ────────────────────────────────────────────────────────

#[test]
fn overlapping_jump_obstacle_is_fatal() {
    assert_eq!(collides(&standing(), &obstacle("meeting", 110.0)), Contact::Fatal);
}

#[test]
fn distant_obstacle_is_clear() {
    assert_eq!(collides(&standing(), &obstacle("meeting", 400.0)), Contact::Clear);
}

#[test]
fn margin_forgives_grazes() {
    // Runner right edge 140, shrunk by 8 → 132
    assert_eq!(collides(&standing(), &obstacle("meeting", 132.0)), Contact::Clear);
    assert_eq!(collides(&standing(), &obstacle("meeting", 131.0)), Contact::Fatal);
}

#[test]
fn trailing_edge_margin() {
    // Obstacle right edge must clear runner.x + 8 = 108
    assert_eq!(collides(&standing(), &obstacle("meeting", 28.0)), Contact::Clear); // right = 108
    assert_eq!(collides(&standing(), &obstacle("meeting", 29.0)), Contact::Fatal);
}

#[test]
fn jumping_clears_obstacle_top() {
    // Meeting spans y 360..450; runner bottom at 360+8 clears it
    let runner = Runner {
        y: 360.0 - 60.0 + 8.0,
        stance: Stance::Jumping { velocity_y: -2.0 },
        ..Runner::new()
    };
    assert_eq!(collides(&runner, &obstacle("meeting", 110.0)), Contact::Clear);

    let lower = Runner { y: runner.y + 1.0, ..runner };
    assert_eq!(collides(&lower, &obstacle("meeting", 110.0)), Contact::Fatal);
}

#[test]
fn ducking_passes_under_duck_obstacle() {
    let banner = obstacle("hremail", 110.0);
    assert_eq!(collides(&standing(), &banner), Contact::Fatal);
    assert_eq!(collides(&ducking(), &banner), Contact::Clear);
}

#[test]
fn ducking_does_not_dodge_jump_obstacle() {
    assert_eq!(collides(&ducking(), &obstacle("meeting", 110.0)), Contact::Fatal);
}

#[test]
fn runner_box_follows_stance() {
    let r = runner_box(&standing());
    assert_eq!(r, Rect::new(100.0, STAND_Y, 40.0, 60.0));
    let d = runner_box(&ducking());
    assert_eq!(d, Rect::new(100.0, DUCK_Y, 50.0, 30.0));
}

// ── Boss ──────────────────────────────────────────────────────────────────────

#[test]
fn touching_boss_body_defeats_it() {
    let boss = new_boss(1, 110.0, 500);
    assert_eq!(boss.y, GROUND_LEVEL - BOSS.height);
    assert_eq!(collides(&standing(), &boss), Contact::BossDefeated);
}

#[test]
fn destroyed_boss_is_inert() {
    let mut boss = boss_with_bullet(110.0, 110.0);
    if let ObstacleKind::Boss(b) = &mut boss.kind {
        b.phase = BossPhase::Destroyed;
    }
    assert_eq!(collides(&standing(), &boss), Contact::Clear);
}

#[test]
fn bullet_hits_standing_runner() {
    let boss = boss_with_bullet(600.0, 110.0);
    assert_eq!(collides(&standing(), &boss), Contact::Fatal);
}

#[test]
fn ducking_grants_bullet_immunity() {
    let boss = boss_with_bullet(600.0, 110.0);
    assert_eq!(collides(&ducking(), &boss), Contact::Clear);
}

#[test]
fn body_contact_wins_over_bullets() {
    let boss = boss_with_bullet(110.0, 110.0);
    assert_eq!(collides(&standing(), &boss), Contact::BossDefeated);
}

#[test]
fn missed_bullet_is_clear() {
    let boss = boss_with_bullet(600.0, 300.0);
    assert_eq!(collides(&standing(), &boss), Contact::Clear);
}
