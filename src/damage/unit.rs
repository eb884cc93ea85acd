//! Combat unit record: configuration flags plus per-location damage state
//!
//! Variants such as armless units are expressed through [`UnitConfig`], and
//! the resolution functions branch on it.

use serde::{Deserialize, Serialize};

use crate::board::Coords;
use crate::core::error::{CombatError, Result};
use crate::damage::critical_slot::{CriticalSlot, SystemComponent};
use crate::damage::location::Location;
use crate::targeting::{Target, TargetId, UnitTarget};

/// Levels a standing biped rises above its own level, so it occupies two
const UNIT_HEIGHT: i32 = 1;

/// Capability flags that change how damage is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitConfig {
    pub has_arm_actuators: bool,
}

impl UnitConfig {
    pub fn standard() -> Self {
        Self {
            has_arm_actuators: true,
        }
    }

    /// No arm actuators: arm slots are stripped and arm damage goes nowhere
    pub fn armless() -> Self {
        Self {
            has_arm_actuators: false,
        }
    }
}

impl Default for UnitConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Starting armor and internal structure of one location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LocationStats {
    pub armor: i32,
    pub rear_armor: i32,
    pub internal: i32,
}

impl LocationStats {
    pub fn new(armor: i32, rear_armor: i32, internal: i32) -> Self {
        Self {
            armor,
            rear_armor,
            internal,
        }
    }
}

/// Current state of one location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationState {
    pub(crate) armor: i32,
    pub(crate) rear_armor: i32,
    pub(crate) internal: i32,
    pub(crate) slots: Vec<Option<CriticalSlot>>,
    pub(crate) destroyed: bool,
}

impl LocationState {
    fn new(stats: LocationStats, slots: Vec<Option<CriticalSlot>>) -> Self {
        Self {
            armor: stats.armor,
            rear_armor: stats.rear_armor,
            internal: stats.internal,
            slots,
            destroyed: false,
        }
    }

    pub fn armor(&self) -> i32 {
        self.armor
    }

    pub fn rear_armor(&self) -> i32 {
        self.rear_armor
    }

    pub fn internal(&self) -> i32 {
        self.internal
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Slots in order; `None` is an empty position
    pub fn slots(&self) -> &[Option<CriticalSlot>] {
        &self.slots
    }

    /// Indexes of occupied slots not yet hit, lowest first
    pub fn hittable_slots(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.filter(|slot| !slot.is_hit()).map(|_| i))
            .collect()
    }

    /// Destroy the location and everything in it
    pub(crate) fn wreck(&mut self) {
        self.armor = 0;
        self.rear_armor = 0;
        self.internal = 0;
        self.destroyed = true;
        for slot in self.slots.iter_mut().flatten() {
            slot.destroy();
        }
    }
}

/// Slot layout for one location as supplied by a unit builder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationLayout {
    pub location: Location,
    pub stats: LocationStats,
    pub slots: Vec<Option<CriticalSlot>>,
}

/// A unit that can take damage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatUnit {
    pub id: TargetId,
    pub name: String,
    pub position: Coords,
    pub elevation: i32,
    config: UnitConfig,
    locations: Vec<LocationState>,
    destroyed: bool,
    shutdown: bool,
}

impl CombatUnit {
    /// Build from an arbitrary layout
    ///
    /// Every location must appear exactly once with positive internal
    /// structure, non-negative armor and no more slots than the location
    /// holds.
    pub fn from_layout(
        id: TargetId,
        name: impl Into<String>,
        config: UnitConfig,
        layout: Vec<LocationLayout>,
    ) -> Result<Self> {
        let mut ordered: Vec<Option<LocationLayout>> = vec![None; Location::all().len()];

        for entry in layout {
            let location = entry.location;
            if entry.stats.internal <= 0 {
                return Err(CombatError::InvalidLocation(format!(
                    "{} has no internal structure",
                    location
                )));
            }
            if entry.stats.armor < 0 || entry.stats.rear_armor < 0 {
                return Err(CombatError::InvalidLocation(format!(
                    "{} has negative armor",
                    location
                )));
            }
            if entry.slots.len() > location.slot_count() {
                return Err(CombatError::SlotOutOfRange {
                    location: location.to_string(),
                    slot: entry.slots.len() - 1,
                });
            }
            let place = &mut ordered[location.index()];
            if place.is_some() {
                return Err(CombatError::InvalidLocation(format!(
                    "{} given more than once",
                    location
                )));
            }
            *place = Some(entry);
        }

        let mut complete = Vec::with_capacity(ordered.len());
        for (location, entry) in Location::all().into_iter().zip(ordered) {
            let entry = entry.ok_or_else(|| {
                CombatError::InvalidLocation(format!("{} missing from layout", location))
            })?;
            complete.push(entry);
        }

        Ok(Self::assemble(id, name.into(), config, complete))
    }

    /// Standard 50-ton biped with the usual system and actuator slots
    pub fn biped(id: TargetId, name: impl Into<String>, config: UnitConfig) -> Self {
        Self::assemble(id, name.into(), config, standard_layout())
    }

    /// Layout must be complete and in location order
    fn assemble(
        id: TargetId,
        name: String,
        config: UnitConfig,
        layout: Vec<LocationLayout>,
    ) -> Self {
        let locations = layout
            .into_iter()
            .map(|entry| {
                let mut slots = entry.slots;
                slots.resize(entry.location.slot_count(), None);
                LocationState::new(entry.stats, slots)
            })
            .collect();

        let mut unit = Self {
            id,
            name,
            position: Coords::default(),
            elevation: 0,
            config,
            locations,
            destroyed: false,
            shutdown: false,
        };
        if !config.has_arm_actuators {
            unit.strip_arm_actuators();
        }
        unit
    }

    /// Clear every arm actuator slot
    fn strip_arm_actuators(&mut self) {
        for location in [Location::RightArm, Location::LeftArm] {
            for slot in self.locations[location.index()].slots.iter_mut() {
                let is_actuator = slot
                    .and_then(|s| s.system_component())
                    .is_some_and(|c| c.is_arm_actuator());
                if is_actuator {
                    *slot = None;
                }
            }
        }
    }

    pub fn at(mut self, position: Coords) -> Self {
        self.position = position;
        self
    }

    pub fn config(&self) -> &UnitConfig {
        &self.config
    }

    pub fn location(&self, location: Location) -> &LocationState {
        &self.locations[location.index()]
    }

    pub(crate) fn location_mut(&mut self, location: Location) -> &mut LocationState {
        &mut self.locations[location.index()]
    }

    /// Put a component into an empty slot
    pub fn mount(&mut self, location: Location, slot: usize, component: CriticalSlot) -> Result<()> {
        let slots = &mut self.location_mut(location).slots;
        let place = slots.get_mut(slot).ok_or_else(|| CombatError::SlotOutOfRange {
            location: location.to_string(),
            slot,
        })?;
        if place.is_some() {
            return Err(CombatError::SlotOccupied {
                location: location.to_string(),
                slot,
            });
        }
        *place = Some(component);
        Ok(())
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub(crate) fn mark_destroyed(&mut self) {
        self.destroyed = true;
    }

    pub fn is_location_destroyed(&self, location: Location) -> bool {
        self.location(location).is_destroyed()
    }

    pub fn set_shutdown(&mut self, shutdown: bool) {
        self.shutdown = shutdown;
    }

    /// Arms without working actuators: both for armless units
    pub fn arms_missing(&self) -> usize {
        if !self.config.has_arm_actuators {
            return 2;
        }
        [Location::RightArm, Location::LeftArm]
            .iter()
            .filter(|l| self.is_location_destroyed(**l))
            .count()
    }

    pub fn legs_destroyed(&self) -> usize {
        [Location::RightLeg, Location::LeftLeg]
            .iter()
            .filter(|l| self.is_location_destroyed(**l))
            .count()
    }

    /// Destroyed slots holding the given system, across all locations
    pub fn destroyed_systems(&self, component: SystemComponent) -> usize {
        self.locations
            .iter()
            .flat_map(|l| l.slots.iter().flatten())
            .filter(|s| s.is_system(component) && s.is_destroyed())
            .count()
    }

    pub fn is_immobile(&self) -> bool {
        self.destroyed
            || self.shutdown
            || self.legs_destroyed() == 2
            || self.destroyed_systems(SystemComponent::Gyro) >= 2
    }

    /// Snapshot for targeting
    pub fn as_target(&self) -> Target {
        Target::Unit(UnitTarget {
            id: self.id,
            name: self.name.clone(),
            position: self.position,
            elevation: self.elevation,
            height: UNIT_HEIGHT,
            immobile: self.is_immobile(),
        })
    }
}

fn systems(components: &[SystemComponent]) -> Vec<Option<CriticalSlot>> {
    components
        .iter()
        .map(|c| Some(CriticalSlot::system(*c)))
        .collect()
}

fn standard_layout() -> Vec<LocationLayout> {
    use SystemComponent::*;

    let arm = || systems(&[Shoulder, UpperArm, LowerArm, Hand]);
    let leg = || systems(&[Hip, UpperLeg, LowerLeg, Foot]);

    let mut head = systems(&[LifeSupport, Sensors, Cockpit]);
    head.push(None);
    head.extend(systems(&[Sensors, LifeSupport]));

    let center = systems(&[
        Engine, Engine, Engine, Gyro, Gyro, Gyro, Gyro, Engine, Engine, Engine,
    ]);

    Location::all()
        .into_iter()
        .map(|location| {
            let (stats, slots) = match location {
                Location::Head => (LocationStats::new(9, 0, 3), head.clone()),
                Location::CenterTorso => (LocationStats::new(24, 8, 16), center.clone()),
                Location::RightTorso | Location::LeftTorso => {
                    (LocationStats::new(18, 6, 12), Vec::new())
                }
                Location::RightArm | Location::LeftArm => (LocationStats::new(16, 0, 8), arm()),
                Location::RightLeg | Location::LeftLeg => (LocationStats::new(20, 0, 12), leg()),
            };
            LocationLayout {
                location,
                stats,
                slots,
            }
        })
        .collect()
}
