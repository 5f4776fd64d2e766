use approx::assert_relative_eq;

use corporate_runner::config::{archetype, GROUND_LEVEL, UFO_COOLDOWN, UFO_PARKED_X};
use corporate_runner::entities::*;
use corporate_runner::generator::new_boss;
use corporate_runner::random::ScriptedRolls;
use corporate_runner::ufo::*;

fn meeting(x: f64) -> Obstacle {
    let a = archetype("meeting");
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

fn flying(x: f64, has_dropped: bool) -> Ufo {
    Ufo { x, y: 80.0, phase: UfoPhase::Flying { has_dropped } }
}

// ── Activation ────────────────────────────────────────────────────────────────

#[test]
fn cooldown_counts_down_without_rolling() {
    let ufo = Ufo { phase: UfoPhase::Inactive { cooldown: 5 }, ..Ufo::parked() };
    let mut rolls = ScriptedRolls::new([0.0]);
    let update = update_ufo(&ufo, &[], false, &mut rolls);
    assert_eq!(update.ufo.phase, UfoPhase::Inactive { cooldown: 4 });
    assert_eq!(update.ufo.x, UFO_PARKED_X);
    assert_eq!(rolls.remaining(), 1);
    assert!(update.landed.is_none());
}

#[test]
fn activates_on_lucky_roll() {
    let mut rolls = ScriptedRolls::new([0.0, 0.5]);
    let update = update_ufo(&Ufo::parked(), &[], false, &mut rolls);
    assert_eq!(update.ufo.phase, UfoPhase::Flying { has_dropped: false });
    // Enters at -100 and moves on the same frame
    assert_relative_eq!(update.ufo.x, -98.5);
    assert_relative_eq!(update.ufo.y, 80.0);
}

#[test]
fn stays_parked_on_unlucky_roll() {
    let mut rolls = ScriptedRolls::never();
    let update = update_ufo(&Ufo::parked(), &[], false, &mut rolls);
    assert_eq!(update.ufo, Ufo::parked());
}

#[test]
fn boss_blocks_activation() {
    let mut rolls = ScriptedRolls::new([0.0, 0.5]);
    let update = update_ufo(&Ufo::parked(), &[], true, &mut rolls);
    assert!(!update.ufo.is_active());
    assert_eq!(rolls.remaining(), 2);
}

#[test]
fn busy_lane_blocks_activation() {
    let mut rolls = ScriptedRolls::new([0.0, 0.5]);
    let update = update_ufo(&Ufo::parked(), &[meeting(300.0)], false, &mut rolls);
    assert!(!update.ufo.is_active());

    // Far-off obstacles do not count
    assert!(lane_clear(&[meeting(700.0), meeting(-150.0)]));
    assert!(!lane_clear(&[meeting(600.0)]));
    assert!(!lane_clear(&[new_boss(2, 0.0, 500)]));
}

// ── Drops ─────────────────────────────────────────────────────────────────────

#[test]
fn drops_inside_band() {
    let mut rolls = ScriptedRolls::new([0.0, 0.0]);
    let update = update_ufo(&flying(400.0, false), &[], false, &mut rolls);
    match &update.ufo.phase {
        UfoPhase::Dropping { drop, target_y } => {
            assert_relative_eq!(drop.x, 425.5);
            // Released at y + 48, then falls once
            assert_relative_eq!(drop.y, 80.0 + 48.0 + 6.0);
            assert_relative_eq!(*target_y, GROUND_LEVEL - 80.0);
            assert!(drop.ufo_drop);
            assert_eq!(drop.obstacle_type(), ObstacleType::Jump);
        }
        other => panic!("expected a drop, got {:?}", other),
    }
    assert!(update.landed.is_none());
}

#[test]
fn no_drop_outside_band() {
    let mut rolls = ScriptedRolls::new([0.0, 0.0]);
    let update = update_ufo(&flying(200.0, false), &[], false, &mut rolls);
    assert_eq!(update.ufo.phase, UfoPhase::Flying { has_dropped: false });
    assert_eq!(rolls.remaining(), 2);
}

#[test]
fn no_drop_near_obstacle() {
    let mut rolls = ScriptedRolls::new([0.0, 0.0]);
    let update = update_ufo(&flying(400.0, false), &[meeting(500.0)], false, &mut rolls);
    assert_eq!(update.ufo.phase, UfoPhase::Flying { has_dropped: false });
    assert!(!drop_zone_clear(&[meeting(500.0)], 425.5));
    assert!(drop_zone_clear(&[meeting(750.0)], 425.5));
}

#[test]
fn drops_only_once_per_flyby() {
    let mut rolls = ScriptedRolls::new([0.0, 0.0]);
    let update = update_ufo(&flying(400.0, true), &[], false, &mut rolls);
    assert_eq!(update.ufo.phase, UfoPhase::Flying { has_dropped: true });
    assert_eq!(rolls.remaining(), 2);
}

#[test]
fn drop_lands_at_target() {
    let a = archetype("deadline");
    let drop = Obstacle {
        id: 0,
        x: 470.0,
        y: 368.0,
        width: a.width,
        height: a.height,
        passed: false,
        ufo_drop: true,
        kind: ObstacleKind::Standard(a),
    };
    let ufo = Ufo { x: 446.0, y: 80.0, phase: UfoPhase::Dropping { drop, target_y: 370.0 } };
    let update = update_ufo(&ufo, &[], false, &mut ScriptedRolls::never());

    let landed = update.landed.expect("landed drop");
    assert_eq!(landed.y, 370.0);
    assert!(landed.ufo_drop);
    assert_eq!(update.ufo.phase, UfoPhase::Flying { has_dropped: true });
    assert!(update.ufo.falling_drop().is_none());
}

// ── Exit ──────────────────────────────────────────────────────────────────────

#[test]
fn exits_past_right_edge() {
    let update = update_ufo(&flying(919.0, true), &[], false, &mut ScriptedRolls::never());
    assert_eq!(update.ufo.phase, UfoPhase::Inactive { cooldown: UFO_COOLDOWN });
    assert_eq!(update.ufo.x, UFO_PARKED_X);
}

#[test]
fn keeps_flying_before_exit() {
    let update = update_ufo(&flying(918.0, true), &[], false, &mut ScriptedRolls::never());
    assert!(update.ufo.is_active());
    assert_relative_eq!(update.ufo.x, 919.5);
}
