//! Critical slots: one component position inside a body location
//!
//! A slot moves intact -> doomed -> destroyed, or straight from intact to
//! destroyed. Nothing moves it back.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// What occupies a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotKind {
    Weapon,
    System,
    Ammo,
    Equipment,
}

/// Built-in systems referenced by [`SlotKind::System`] slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SystemComponent {
    LifeSupport,
    Sensors,
    Cockpit,
    Engine,
    Gyro,
    Shoulder,
    UpperArm,
    LowerArm,
    Hand,
    Hip,
    UpperLeg,
    LowerLeg,
    Foot,
}

impl SystemComponent {
    /// Slot index used for this system
    pub fn index(&self) -> u32 {
        match self {
            SystemComponent::LifeSupport => 0,
            SystemComponent::Sensors => 1,
            SystemComponent::Cockpit => 2,
            SystemComponent::Engine => 3,
            SystemComponent::Gyro => 4,
            SystemComponent::Shoulder => 7,
            SystemComponent::UpperArm => 8,
            SystemComponent::LowerArm => 9,
            SystemComponent::Hand => 10,
            SystemComponent::Hip => 11,
            SystemComponent::UpperLeg => 12,
            SystemComponent::LowerLeg => 13,
            SystemComponent::Foot => 14,
        }
    }

    pub fn from_index(index: u32) -> Option<Self> {
        use SystemComponent::*;
        [
            LifeSupport, Sensors, Cockpit, Engine, Gyro, Shoulder, UpperArm, LowerArm, Hand, Hip,
            UpperLeg, LowerLeg, Foot,
        ]
        .into_iter()
        .find(|c| c.index() == index)
    }

    pub fn is_arm_actuator(&self) -> bool {
        matches!(
            self,
            SystemComponent::Shoulder
                | SystemComponent::UpperArm
                | SystemComponent::LowerArm
                | SystemComponent::Hand
        )
    }
}

/// Damage state of a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SlotState {
    Intact,
    /// Will be destroyed when the phase commits
    Doomed,
    Destroyed,
}

/// One component position
///
/// Equality and hashing look only at (kind, index): a damaged slot still
/// equals an undamaged one holding the same component.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CriticalSlot {
    kind: SlotKind,
    index: u32,
    doomed: bool,
    destroyed: bool,
}

impl CriticalSlot {
    pub fn new(kind: SlotKind, index: u32) -> Self {
        Self {
            kind,
            index,
            doomed: false,
            destroyed: false,
        }
    }

    pub fn system(component: SystemComponent) -> Self {
        Self::new(SlotKind::System, component.index())
    }

    pub fn kind(&self) -> SlotKind {
        self.kind
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn is_system(&self, component: SystemComponent) -> bool {
        self.kind == SlotKind::System && self.index == component.index()
    }

    /// The built-in system this slot holds, if it is a system slot
    pub fn system_component(&self) -> Option<SystemComponent> {
        match self.kind {
            SlotKind::System => SystemComponent::from_index(self.index),
            _ => None,
        }
    }

    pub fn is_doomed(&self) -> bool {
        self.doomed
    }

    /// Permanently non-functional
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Doomed or destroyed. Use [`is_destroyed`](Self::is_destroyed) for
    /// confirmed losses only.
    pub fn is_hit(&self) -> bool {
        self.doomed || self.destroyed
    }

    pub fn state(&self) -> SlotState {
        if self.destroyed {
            SlotState::Destroyed
        } else if self.doomed {
            SlotState::Doomed
        } else {
            SlotState::Intact
        }
    }

    /// Mark for destruction at end of phase. Returns false if already hit.
    pub fn doom(&mut self) -> bool {
        if self.is_hit() {
            return false;
        }
        self.doomed = true;
        true
    }

    /// Destroy immediately, from any state
    pub fn destroy(&mut self) {
        self.doomed = false;
        self.destroyed = true;
    }

    /// Turn a doomed slot into a destroyed one. Returns true if it changed.
    pub fn commit(&mut self) -> bool {
        if self.doomed {
            self.destroy();
            return true;
        }
        false
    }
}

impl PartialEq for CriticalSlot {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.index == other.index
    }
}

impl Eq for CriticalSlot {}

impl Hash for CriticalSlot {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.index.hash(state);
    }
}
