use std::collections::HashSet;

use corporate_runner::config::{Category, BOSS, GROUND_LEVEL, JUMP_ARCHETYPES};
use corporate_runner::entities::{BossPhase, ObstacleType};
use corporate_runner::generator::*;
use corporate_runner::random::{RngSource, ScriptedRolls};

use rand::rngs::StdRng;
use rand::SeedableRng;

// ── Milestones ────────────────────────────────────────────────────────────────

#[test]
fn milestone_floors_to_interval() {
    assert_eq!(milestone(0.0), 0);
    assert_eq!(milestone(499.9), 0);
    assert_eq!(milestone(500.0), 500);
    assert_eq!(milestone(1234.0), 1000);
}

#[test]
fn boss_pending_only_for_new_milestone() {
    assert_eq!(pending_boss_milestone(499.0, 0), None);
    assert_eq!(pending_boss_milestone(500.0, 0), Some(500));
    assert_eq!(pending_boss_milestone(999.0, 500), None);
    assert_eq!(pending_boss_milestone(1000.0, 500), Some(1000));
}

// ── Boss generation ───────────────────────────────────────────────────────────

#[test]
fn boss_generated_on_favourable_roll() {
    let mut rolls = ScriptedRolls::new([0.0]);
    let o = generate(11, 850.0, 500.0, 0, &mut rolls);
    assert_eq!(o.obstacle_type(), ObstacleType::Boss);
    assert_eq!(o.id, 11);
    assert_eq!(o.x, 850.0);
    assert_eq!(o.y, GROUND_LEVEL - BOSS.height);
    let boss = o.boss().expect("boss");
    assert_eq!(boss.spawn_score, 500);
    assert_eq!(boss.phase, BossPhase::Idle);
    assert!(boss.bullets.is_empty());
}

#[test]
fn boss_roll_is_thirty_percent() {
    // 0.29 passes, 0.3 does not
    let mut pass = ScriptedRolls::new([0.29]);
    assert!(generate(1, 800.0, 1000.0, 500, &mut pass).is_boss());

    let mut fail = ScriptedRolls::new([0.3, 0.0, 0.0]);
    let o = generate(1, 800.0, 1000.0, 500, &mut fail);
    assert_eq!(o.obstacle_type(), ObstacleType::Jump);
}

#[test]
fn no_boss_for_claimed_milestone() {
    // Only the category and archetype rolls are consumed
    let mut rolls = ScriptedRolls::new([0.0, 0.0]);
    let o = generate(1, 800.0, 1200.0, 1000, &mut rolls);
    assert!(!o.is_boss());
    assert_eq!(rolls.remaining(), 0);
}

#[test]
fn no_boss_below_first_milestone() {
    let mut rolls = ScriptedRolls::new([0.0, 0.0]);
    let o = generate(1, 800.0, 499.0, 0, &mut rolls);
    assert!(!o.is_boss());
}

// ── Standard obstacles ────────────────────────────────────────────────────────

#[test]
fn jump_category_sits_on_ground() {
    let mut rolls = ScriptedRolls::new([0.0, 0.0]);
    let o = generate(5, 820.0, 0.0, 0, &mut rolls);
    let a = o.archetype().expect("archetype");
    assert_eq!(a.key, "meeting");
    assert_eq!(o.obstacle_type(), ObstacleType::Jump);
    assert_eq!(o.y + o.height, GROUND_LEVEL);
    assert_eq!(o.width, a.width);
    assert!(!o.passed);
    assert!(!o.ufo_drop);
}

#[test]
fn duck_category_floats_at_offset() {
    // 0.8 ≥ 0.7 → duck category; 0.0 → first duck archetype
    let mut rolls = ScriptedRolls::new([0.8, 0.0]);
    let o = generate(5, 820.0, 0.0, 0, &mut rolls);
    assert_eq!(o.obstacle_type(), ObstacleType::Duck);
    assert_eq!(o.archetype().map(|a| a.key), Some("hremail"));
    assert_eq!(o.y, GROUND_LEVEL - 70.0);
}

#[test]
fn archetype_pick_covers_whole_table() {
    let mut last = ScriptedRolls::new([0.999]);
    let o = new_obstacle(1, 800.0, Category::Jump, &mut last);
    assert_eq!(o.archetype().map(|a| a.key), Some(JUMP_ARCHETYPES[7].key));
}

#[test]
fn seeded_generation_yields_every_category() {
    let mut rng = RngSource(StdRng::seed_from_u64(42));
    let mut seen = HashSet::new();
    let mut ids = HashSet::new();
    for id in 0..500 {
        let o = generate(id, 800.0, 0.0, 0, &mut rng);
        seen.insert(o.obstacle_type());
        ids.insert(o.id);
    }
    assert!(seen.contains(&ObstacleType::Jump));
    assert!(seen.contains(&ObstacleType::Duck));
    assert!(!seen.contains(&ObstacleType::Boss));
    assert_eq!(ids.len(), 500);
}
