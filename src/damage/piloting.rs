//! Piloting skill rolls and their modifiers

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::config::CombatConfig;
use crate::damage::critical_slot::SystemComponent;
use crate::damage::location::Location;
use crate::damage::unit::CombatUnit;

/// One adjustment to a roll's target number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PilotingModifier {
    pub value: i32,
    pub reason: String,
}

/// Target number for a 2d6 piloting roll, built from a base and modifiers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PilotingRoll {
    pub base: i32,
    pub modifiers: Vec<PilotingModifier>,
}

impl PilotingRoll {
    pub fn new(base: i32) -> Self {
        Self {
            base,
            modifiers: Vec::new(),
        }
    }

    pub fn add_modifier(&mut self, value: i32, reason: impl Into<String>) {
        self.modifiers.push(PilotingModifier {
            value,
            reason: reason.into(),
        });
    }

    /// Number to meet or beat
    pub fn target(&self) -> i32 {
        self.base + self.modifiers.iter().map(|m| m.value).sum::<i32>()
    }

    pub fn succeeds(&self, roll: u8) -> bool {
        i32::from(roll) >= self.target()
    }
}

impl fmt::Display for PilotingRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (base {}", self.target(), self.base)?;
        for modifier in &self.modifiers {
            write!(f, ", {:+} {}", modifier.value, modifier.reason)?;
        }
        f.write_str(")")
    }
}

/// Roll needed to stand up
///
/// A unit missing both arms takes a single flat penalty instead of the
/// per-arm one.
pub fn stand_check(unit: &CombatUnit, config: &CombatConfig) -> PilotingRoll {
    let mut roll = PilotingRoll::new(config.piloting_base_target);

    let arms_missing = unit.arms_missing();
    if arms_missing >= 2 {
        roll.add_modifier(config.no_arms_stand_penalty, "no arms");
    } else {
        for arm in [Location::RightArm, Location::LeftArm] {
            if unit.is_location_destroyed(arm) {
                roll.add_modifier(
                    config.arm_destroyed_stand_penalty,
                    format!("{} destroyed", arm),
                );
            }
        }
    }

    for leg in [Location::RightLeg, Location::LeftLeg] {
        if unit.is_location_destroyed(leg) {
            roll.add_modifier(
                config.leg_destroyed_stand_penalty,
                format!("{} destroyed", leg),
            );
        }
    }

    let gyro_hits = unit.destroyed_systems(SystemComponent::Gyro);
    if gyro_hits > 0 {
        roll.add_modifier(config.gyro_hit_penalty * gyro_hits as i32, "gyro damaged");
    }

    tracing::debug!(unit = unit.id, target = roll.target(), "stand check");
    roll
}
