//! Body locations of a biped unit and the damage transfer chain

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::damage::unit::UnitConfig;

/// Body locations for hit resolution (8 total)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Location {
    Head,
    CenterTorso,
    RightTorso,
    LeftTorso,
    RightArm,
    LeftArm,
    RightLeg,
    LeftLeg,
}

impl Location {
    /// Returns all locations in slot-table order
    pub fn all() -> [Location; 8] {
        [
            Location::Head,
            Location::CenterTorso,
            Location::RightTorso,
            Location::LeftTorso,
            Location::RightArm,
            Location::LeftArm,
            Location::RightLeg,
            Location::LeftLeg,
        ]
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            Location::Head => "HD",
            Location::CenterTorso => "CT",
            Location::RightTorso => "RT",
            Location::LeftTorso => "LT",
            Location::RightArm => "RA",
            Location::LeftArm => "LA",
            Location::RightLeg => "RL",
            Location::LeftLeg => "LL",
        }
    }

    /// Number of critical slots the location holds
    pub fn slot_count(&self) -> usize {
        match self {
            Location::Head | Location::RightLeg | Location::LeftLeg => 6,
            _ => 12,
        }
    }

    pub fn is_arm(&self) -> bool {
        matches!(self, Location::RightArm | Location::LeftArm)
    }

    pub fn is_leg(&self) -> bool {
        matches!(self, Location::RightLeg | Location::LeftLeg)
    }

    pub fn is_side_torso(&self) -> bool {
        matches!(self, Location::RightTorso | Location::LeftTorso)
    }

    /// Torsos carry a separate rear armor value
    pub fn has_rear_armor(&self) -> bool {
        matches!(
            self,
            Location::CenterTorso | Location::RightTorso | Location::LeftTorso
        )
    }

    /// Losing this location kills the unit
    pub fn is_vital(&self) -> bool {
        matches!(self, Location::Head | Location::CenterTorso)
    }

    /// Limb lost along with this location
    pub fn dependent_arm(&self) -> Option<Location> {
        match self {
            Location::RightTorso => Some(Location::RightArm),
            Location::LeftTorso => Some(Location::LeftArm),
            _ => None,
        }
    }

    /// Standard anatomical transfer, ignoring unit configuration
    fn default_transfer(&self) -> Option<Location> {
        match self {
            Location::Head | Location::CenterTorso => None,
            Location::RightTorso | Location::LeftTorso => Some(Location::CenterTorso),
            Location::RightArm | Location::RightLeg => Some(Location::RightTorso),
            Location::LeftArm | Location::LeftLeg => Some(Location::LeftTorso),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Location::Head => "Head",
            Location::CenterTorso => "Center Torso",
            Location::RightTorso => "Right Torso",
            Location::LeftTorso => "Left Torso",
            Location::RightArm => "Right Arm",
            Location::LeftArm => "Left Arm",
            Location::RightLeg => "Right Leg",
            Location::LeftLeg => "Left Leg",
        };
        f.write_str(name)
    }
}

/// Where damage beyond a destroyed location's structure goes next
///
/// `None` means the damage is void: either the location is vital (the unit
/// is dead) or the unit has no arms for the damage to flow out of.
pub fn transfer_location(location: Location, config: &UnitConfig) -> Option<Location> {
    if location.is_arm() && !config.has_arm_actuators {
        return None;
    }
    location.default_transfer()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_count_and_index() {
        for (i, loc) in Location::all().iter().enumerate() {
            assert_eq!(loc.index(), i);
        }
    }

    #[test]
    fn test_standard_transfer_chain() {
        let config = UnitConfig::standard();
        assert_eq!(
            transfer_location(Location::LeftArm, &config),
            Some(Location::LeftTorso)
        );
        assert_eq!(
            transfer_location(Location::RightLeg, &config),
            Some(Location::RightTorso)
        );
        assert_eq!(
            transfer_location(Location::LeftTorso, &config),
            Some(Location::CenterTorso)
        );
        assert_eq!(transfer_location(Location::CenterTorso, &config), None);
        assert_eq!(transfer_location(Location::Head, &config), None);
    }

    #[test]
    fn test_armless_arms_transfer_nowhere() {
        let config = UnitConfig::armless();
        assert_eq!(transfer_location(Location::LeftArm, &config), None);
        assert_eq!(transfer_location(Location::RightArm, &config), None);
        // Legs still follow the normal chain
        assert_eq!(
            transfer_location(Location::LeftLeg, &config),
            Some(Location::LeftTorso)
        );
    }

    #[test]
    fn test_slot_counts() {
        assert_eq!(Location::Head.slot_count(), 6);
        assert_eq!(Location::CenterTorso.slot_count(), 12);
        assert_eq!(Location::LeftLeg.slot_count(), 6);
    }
}
