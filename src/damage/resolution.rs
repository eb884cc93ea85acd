//! Hit resolution against a unit's internal structure
//!
//! Rolls come in as plain numbers so every function here is deterministic;
//! [`roll_2d6`] is the only place dice are thrown. Slot state is owned by
//! the unit and every function takes `&mut CombatUnit`, so attacks against
//! one unit are applied one after another.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::CombatConfig;
use crate::damage::critical_slot::{CriticalSlot, SystemComponent};
use crate::damage::hit_data::{HitData, HitEffect};
use crate::damage::location::{transfer_location, Location};
use crate::damage::unit::CombatUnit;

/// Side of the target the attack comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AttackDirection {
    #[default]
    Front,
    Rear,
    Left,
    Right,
}

/// Per-unit-type hit location table
pub trait HitTable {
    /// Location struck on a 2d6 roll from the given side
    fn hit_for(&self, roll: u8, direction: AttackDirection) -> HitData;
}

/// Standard biped hit location table
#[derive(Debug, Clone, Copy, Default)]
pub struct BipedHitTable;

impl HitTable for BipedHitTable {
    fn hit_for(&self, roll: u8, direction: AttackDirection) -> HitData {
        use Location::*;

        let roll = roll.clamp(2, 12);
        let location = match direction {
            AttackDirection::Front | AttackDirection::Rear => match roll {
                2 | 7 => CenterTorso,
                3 | 4 => RightArm,
                5 => RightLeg,
                6 => RightTorso,
                8 => LeftTorso,
                9 => LeftLeg,
                10 | 11 => LeftArm,
                _ => Head,
            },
            AttackDirection::Left => match roll {
                2 | 7 => LeftTorso,
                3 | 6 => LeftLeg,
                4 | 5 => LeftArm,
                8 => CenterTorso,
                9 => RightTorso,
                10 => RightArm,
                11 => RightLeg,
                _ => Head,
            },
            AttackDirection::Right => match roll {
                2 | 7 => RightTorso,
                3 | 6 => RightLeg,
                4 | 5 => RightArm,
                8 => CenterTorso,
                9 => LeftTorso,
                10 => LeftArm,
                11 => LeftLeg,
                _ => Head,
            },
        };

        let hit = HitData::new(location).rear(direction == AttackDirection::Rear);
        // Snake eyes always threatens a critical
        if roll == 2 {
            hit.with_effect(HitEffect::Critical)
        } else {
            hit
        }
    }
}

/// Throw two six-sided dice
pub fn roll_2d6<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    rng.gen_range(1..=6) + rng.gen_range(1..=6)
}

/// Look up where a hit lands
pub fn resolve_hit(table: &impl HitTable, roll: u8, direction: AttackDirection) -> HitData {
    let hit = table.hit_for(roll, direction);
    tracing::debug!(roll, ?direction, location = %hit.location, rear = hit.rear, "hit location");
    hit
}

/// Aimed shot: lands on the chosen location inside the aimed window,
/// otherwise falls back to the table
pub fn resolve_aimed_hit(
    table: &impl HitTable,
    aimed: Location,
    roll: u8,
    direction: AttackDirection,
    config: &CombatConfig,
) -> HitData {
    if (config.aimed_shot_min_roll..=config.aimed_shot_max_roll).contains(&roll) {
        tracing::debug!(roll, location = %aimed, "aimed shot on target");
        return HitData::new(aimed)
            .rear(direction == AttackDirection::Rear)
            .aimed();
    }
    resolve_hit(table, roll, direction)
}

/// Damage taken by one location during a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationDamage {
    pub location: Location,
    pub armor: i32,
    pub internal: i32,
}

/// Everything one application of damage did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageOutcome {
    /// In the order the damage travelled
    pub steps: Vec<LocationDamage>,
    pub destroyed_locations: Vec<Location>,
    /// Damage with nowhere left to go
    pub voided: i32,
    /// Surviving locations that must roll for critical slots
    pub critical_checks: Vec<Location>,
    pub unit_destroyed: bool,
}

/// Wreck a location, its dependent arm, and the unit if the location is vital
///
/// Returns the locations destroyed, in order.
fn destroy_location(unit: &mut CombatUnit, location: Location) -> Vec<Location> {
    let mut destroyed = Vec::new();
    if unit.is_location_destroyed(location) {
        return destroyed;
    }

    unit.location_mut(location).wreck();
    destroyed.push(location);
    tracing::info!(unit = unit.id, %location, "location destroyed");

    if let Some(arm) = location.dependent_arm() {
        if !unit.is_location_destroyed(arm) {
            unit.location_mut(arm).wreck();
            destroyed.push(arm);
            tracing::info!(unit = unit.id, location = %arm, "location lost with torso");
        }
    }

    if location.is_vital() && !unit.is_destroyed() {
        unit.mark_destroyed();
        tracing::info!(unit = unit.id, %location, "unit destroyed");
    }
    destroyed
}

/// Apply damage from one hit, armor first, then structure, then onward
/// through the transfer chain
pub fn apply_damage(unit: &mut CombatUnit, hit: &HitData, damage: i32) -> DamageOutcome {
    let mut outcome = DamageOutcome::default();
    let mut remaining = damage.max(0);

    if unit.is_destroyed() {
        tracing::warn!(unit = unit.id, damage, "hit against destroyed unit");
        outcome.voided = remaining;
        outcome.unit_destroyed = true;
        return outcome;
    }

    if hit.effect == HitEffect::Critical {
        outcome.critical_checks.push(hit.location);
    }

    let config = *unit.config();
    let mut current = Some(hit.location);

    while remaining > 0 {
        let Some(location) = current else {
            tracing::debug!(unit = unit.id, remaining, "damage voided");
            outcome.voided += remaining;
            break;
        };

        // Exhaustion changes as locations fall, so the chain is re-read every step
        if unit.is_location_destroyed(location) {
            current = transfer_location(location, &config);
            continue;
        }

        let state = unit.location_mut(location);
        let armor = if hit.rear && location.has_rear_armor() {
            &mut state.rear_armor
        } else {
            &mut state.armor
        };
        let to_armor = remaining.min(*armor);
        *armor -= to_armor;
        remaining -= to_armor;

        let to_internal = remaining.min(state.internal);
        state.internal -= to_internal;
        remaining -= to_internal;
        let exhausted = state.internal == 0;

        tracing::debug!(
            unit = unit.id,
            %location,
            armor = to_armor,
            internal = to_internal,
            "damage applied"
        );
        outcome.steps.push(LocationDamage {
            location,
            armor: to_armor,
            internal: to_internal,
        });

        if to_internal > 0 && !outcome.critical_checks.contains(&location) {
            outcome.critical_checks.push(location);
        }

        if exhausted {
            outcome
                .destroyed_locations
                .extend(destroy_location(unit, location));
            if unit.is_destroyed() {
                outcome.voided += remaining;
                break;
            }
            current = transfer_location(location, &config);
        }
    }

    outcome
        .critical_checks
        .retain(|l| !unit.is_location_destroyed(*l));
    outcome.unit_destroyed = unit.is_destroyed();
    outcome
}

/// Result of the critical-hit determination roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CriticalRoll {
    None,
    Slots(u8),
    /// Head or limb torn off outright
    LimbBlownOff,
}

/// How many slots a critical roll hits
pub fn critical_roll(roll: u8, location: Location, config: &CombatConfig) -> CriticalRoll {
    if roll >= config.critical_roll_triple {
        if location.is_arm() || location.is_leg() || location == Location::Head {
            CriticalRoll::LimbBlownOff
        } else {
            CriticalRoll::Slots(3)
        }
    } else if roll >= config.critical_roll_double {
        CriticalRoll::Slots(2)
    } else if roll >= config.critical_roll_single {
        CriticalRoll::Slots(1)
    } else {
        CriticalRoll::None
    }
}

/// Doom the `pick`-th hittable slot of a location, counting from the top
///
/// Out-of-range picks land on the last hittable slot. Returns the slot hit,
/// or `None` when nothing in the location can still be hit.
pub fn doom_critical(unit: &mut CombatUnit, location: Location, pick: usize) -> Option<CriticalSlot> {
    let id = unit.id;
    let state = unit.location_mut(location);
    if state.is_destroyed() {
        return None;
    }
    let hittable = state.hittable_slots();
    let index = *hittable.get(pick).or(hittable.last())?;
    let slot = state.slots[index].as_mut()?;
    slot.doom();
    tracing::debug!(unit = id, %location, slot = index, "critical slot doomed");
    Some(*slot)
}

/// What a critical roll did to a location
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriticalOutcome {
    pub doomed: Vec<CriticalSlot>,
    pub destroyed_locations: Vec<Location>,
    pub unit_destroyed: bool,
}

/// Roll for criticals and doom the slots it calls for
pub fn apply_critical_roll<R: Rng + ?Sized>(
    unit: &mut CombatUnit,
    location: Location,
    roll: u8,
    config: &CombatConfig,
    rng: &mut R,
) -> CriticalOutcome {
    let mut outcome = CriticalOutcome::default();
    match critical_roll(roll, location, config) {
        CriticalRoll::None => {}
        CriticalRoll::Slots(count) => {
            for _ in 0..count {
                let available = unit.location(location).hittable_slots().len();
                if available == 0 {
                    break;
                }
                let pick = rng.gen_range(0..available);
                if let Some(slot) = doom_critical(unit, location, pick) {
                    outcome.doomed.push(slot);
                }
            }
        }
        CriticalRoll::LimbBlownOff => {
            outcome.destroyed_locations = destroy_location(unit, location);
        }
    }
    outcome.unit_destroyed = unit.is_destroyed();
    outcome
}

/// Slots committed at end of phase
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitReport {
    pub destroyed: Vec<(Location, CriticalSlot)>,
    pub unit_destroyed: bool,
}

/// Turn every doomed slot into a destroyed one, location order then slot
/// order, and check for fatal system loss
pub fn commit_doomed(unit: &mut CombatUnit) -> CommitReport {
    let mut report = CommitReport::default();
    for location in Location::all() {
        for slot in unit.location_mut(location).slots.iter_mut().flatten() {
            if slot.commit() {
                report.destroyed.push((location, *slot));
            }
        }
    }

    let fatal = unit.destroyed_systems(SystemComponent::Cockpit) > 0
        || unit.destroyed_systems(SystemComponent::Engine) >= 3;
    if fatal && !unit.is_destroyed() {
        unit.mark_destroyed();
        tracing::info!(unit = unit.id, "unit destroyed by critical damage");
    }
    report.unit_destroyed = unit.is_destroyed();
    report
}
