//! Outcome of a single hit-location step

use serde::{Deserialize, Serialize};

use crate::damage::location::Location;

/// Extra effect attached to a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HitEffect {
    #[default]
    None,
    /// Roll for critical slots regardless of armor
    Critical,
    VehicleMoveDestroyed,
    VehicleMoveDamaged,
    TurretLocked,
}

/// Where a hit landed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitData {
    pub location: Location,
    pub rear: bool,
    pub effect: HitEffect,
    /// An aimed shot landed on the location it was aimed at
    pub hit_aimed_location: bool,
}

impl HitData {
    pub fn new(location: Location) -> Self {
        Self {
            location,
            rear: false,
            effect: HitEffect::None,
            hit_aimed_location: false,
        }
    }

    /// Rear flag only sticks to locations with rear armor
    pub fn rear(mut self, rear: bool) -> Self {
        self.rear = rear && self.location.has_rear_armor();
        self
    }

    pub fn with_effect(mut self, effect: HitEffect) -> Self {
        self.effect = effect;
        self
    }

    pub fn aimed(mut self) -> Self {
        self.hit_aimed_location = true;
        self
    }
}
