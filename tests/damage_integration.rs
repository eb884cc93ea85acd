//! Damage system integration tests
//!
//! Whole attack sequences: hit location, damage through the transfer chain,
//! critical rolls, the end-of-phase commit and the stand check afterwards.

use hex_combat::core::CombatConfig;
use hex_combat::damage::{
    apply_critical_roll, apply_damage, commit_doomed, doom_critical, resolve_hit, roll_2d6,
    stand_check, transfer_location, AttackDirection, BipedHitTable, CombatUnit, CriticalSlot,
    HitData, Location, Report, RoundReports, SlotKind, SlotState, SystemComponent, UnitConfig,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Unit missing both arm actuators tries to stand
#[test]
fn test_armless_stand_is_base_plus_four() {
    let config = CombatConfig::default();
    let unit = CombatUnit::biped(1, "Armless", UnitConfig::armless());
    let roll = stand_check(&unit, &config);
    assert_eq!(roll.target() - roll.base, 4);
    assert_eq!(roll.base, config.piloting_base_target);
}

#[test]
fn test_armless_arm_never_feeds_the_torso() {
    let config = UnitConfig::armless();
    for arm in [Location::LeftArm, Location::RightArm] {
        assert_eq!(transfer_location(arm, &config), None);
    }

    let mut unit = CombatUnit::biped(2, "Armless", config);
    let outcome = apply_damage(&mut unit, &HitData::new(Location::LeftArm), 100);
    assert_eq!(outcome.voided, 76);
    assert_eq!(unit.location(Location::LeftTorso).armor(), 18);
    assert!(!unit.is_destroyed());
}

#[test]
fn test_damage_cascades_leg_to_center_torso() {
    let mut unit = CombatUnit::biped(3, "Crab", UnitConfig::standard());
    // leg 32, right torso 30, right arm goes with the torso, 10 into the CT
    let outcome = apply_damage(&mut unit, &HitData::new(Location::RightLeg), 72);
    assert_eq!(
        outcome.destroyed_locations,
        vec![Location::RightLeg, Location::RightTorso, Location::RightArm]
    );
    let visited: Vec<Location> = outcome.steps.iter().map(|s| s.location).collect();
    assert_eq!(
        visited,
        vec![Location::RightLeg, Location::RightTorso, Location::CenterTorso]
    );
    assert_eq!(unit.location(Location::CenterTorso).armor(), 14);
    assert!(!outcome.unit_destroyed);
}

#[test]
fn test_head_loss_destroys_unit() {
    let mut unit = CombatUnit::biped(4, "Locust", UnitConfig::standard());
    let outcome = apply_damage(&mut unit, &HitData::new(Location::Head), 12);
    assert!(outcome.unit_destroyed);
    assert!(unit.is_destroyed());
    assert!(unit.as_target().is_immobile());
    assert_eq!(unit.destroyed_systems(SystemComponent::Cockpit), 1);
}

#[test]
fn test_doomed_slots_wait_for_commit() {
    let mut unit = CombatUnit::biped(5, "Enforcer", UnitConfig::standard());
    let gyro = doom_critical(&mut unit, Location::CenterTorso, 3).unwrap();
    assert!(gyro.is_system(SystemComponent::Gyro));
    assert_eq!(unit.destroyed_systems(SystemComponent::Gyro), 0);

    let report = commit_doomed(&mut unit);
    assert_eq!(report.destroyed.len(), 1);
    assert_eq!(unit.destroyed_systems(SystemComponent::Gyro), 1);
    let slot = unit.location(Location::CenterTorso).slots()[3].unwrap();
    assert_eq!(slot.state(), SlotState::Destroyed);
}

#[test]
fn test_seeded_volley_is_deterministic() {
    let run = |seed: u64| {
        let config = CombatConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut unit = CombatUnit::biped(6, "Trebuchet", UnitConfig::standard());
        let mut log = RoundReports::new();
        for round in 1..=20 {
            if unit.is_destroyed() {
                break;
            }
            let roll = roll_2d6(&mut rng);
            let hit = resolve_hit(&BipedHitTable, roll, AttackDirection::Left);
            let outcome = apply_damage(&mut unit, &hit, 10);
            log.add(round, Report::from_outcome(unit.id, &outcome));
            for location in &outcome.critical_checks {
                let crit = roll_2d6(&mut rng);
                apply_critical_roll(&mut unit, *location, crit, &config, &mut rng);
            }
            log.add(round, Report::from_commit(unit.id, &commit_doomed(&mut unit)));
        }
        (log, unit.is_destroyed())
    };

    assert_eq!(run(11), run(11));
}

#[test]
fn test_destroyed_location_slots_are_all_destroyed() {
    let mut unit = CombatUnit::biped(7, "Vindicator", UnitConfig::standard());
    doom_critical(&mut unit, Location::LeftArm, 0);
    apply_damage(&mut unit, &HitData::new(Location::LeftArm), 24);
    assert!(unit
        .location(Location::LeftArm)
        .slots()
        .iter()
        .flatten()
        .all(|s| s.is_destroyed() && !s.is_doomed()));
    // Nothing left for the commit pass to do there
    assert!(commit_doomed(&mut unit).destroyed.is_empty());
}

#[derive(Debug, Clone)]
enum SlotOp {
    Doom,
    Destroy,
    Commit,
}

fn slot_op() -> impl Strategy<Value = SlotOp> {
    prop_oneof![Just(SlotOp::Doom), Just(SlotOp::Destroy), Just(SlotOp::Commit)]
}

fn slot_kind() -> impl Strategy<Value = SlotKind> {
    prop_oneof![
        Just(SlotKind::Weapon),
        Just(SlotKind::System),
        Just(SlotKind::Ammo),
        Just(SlotKind::Equipment),
    ]
}

proptest! {
    #[test]
    fn prop_destroyed_never_reverts(ops in prop::collection::vec(slot_op(), 0..20)) {
        let mut slot = CriticalSlot::new(SlotKind::Weapon, 0);
        let mut seen_destroyed = false;
        for op in ops {
            match op {
                SlotOp::Doom => { slot.doom(); }
                SlotOp::Destroy => slot.destroy(),
                SlotOp::Commit => { slot.commit(); }
            }
            if seen_destroyed {
                prop_assert!(slot.is_destroyed());
            }
            seen_destroyed |= slot.is_destroyed();
        }
    }

    #[test]
    fn prop_slot_equality_ignores_damage(
        kind in slot_kind(),
        index in 0u32..20,
        ops in prop::collection::vec(slot_op(), 0..6),
    ) {
        let mut damaged = CriticalSlot::new(kind, index);
        for op in ops {
            match op {
                SlotOp::Doom => { damaged.doom(); }
                SlotOp::Destroy => damaged.destroy(),
                SlotOp::Commit => { damaged.commit(); }
            }
        }
        prop_assert_eq!(damaged, CriticalSlot::new(kind, index));
    }

    #[test]
    fn prop_damage_is_conserved(location_idx in 0usize..8, damage in 0i32..200) {
        let location = Location::all()[location_idx];
        let mut unit = CombatUnit::biped(8, "Target", UnitConfig::standard());
        let outcome = apply_damage(&mut unit, &HitData::new(location), damage);
        let applied: i32 = outcome.steps.iter().map(|s| s.armor + s.internal).sum();
        prop_assert_eq!(applied + outcome.voided, damage);
    }
}
