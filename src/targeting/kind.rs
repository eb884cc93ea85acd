//! Target kind tags and the hex id encoding
//!
//! Hex-derived targets have no identity of their own, so their id is the
//! position folded into one integer: `row * 100000 + column`. Logs and
//! network messages depend on this exact format.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::Coords;

/// Identifier shared by every target kind
pub type TargetId = i64;

/// Multiplier applied to the row when encoding a coordinate
pub const ID_ROW_FACTOR: i64 = 100_000;

/// Fold a coordinate into a single id
pub fn coords_to_id(coords: Coords) -> TargetId {
    coords.y as i64 * ID_ROW_FACTOR + coords.x as i64
}

/// Inverse of [`coords_to_id`] for columns and rows in `0..99999`
pub fn id_to_coords(id: TargetId) -> Coords {
    let y = id / ID_ROW_FACTOR;
    let x = id - y * ID_ROW_FACTOR;
    Coords::new(x as i32, y as i32)
}

/// What an attack is directed at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetKind {
    Unit,
    HexClear,
    HexIgnite,
    Building,
    BuildingIgnite,
    MinefieldClear,
    MinefieldDeliver,
    ArtilleryAimPoint,
    Fascam,
    InfernoArea,
    VibrabombArea,
    SensorPod,
    Searchlight,
}

impl TargetKind {
    /// Stable numeric tag
    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// Everything except units is pinned to a hex
    pub fn is_hex_based(&self) -> bool {
        !matches!(self, TargetKind::Unit)
    }

    pub fn label(&self) -> &'static str {
        match self {
            TargetKind::Unit => "Unit",
            TargetKind::HexClear => "Clear",
            TargetKind::HexIgnite => "Ignite",
            TargetKind::Building => "Building",
            TargetKind::BuildingIgnite => "Building Ignite",
            TargetKind::MinefieldClear => "Minefield Clear",
            TargetKind::MinefieldDeliver => "Minefield Deliver",
            TargetKind::ArtilleryAimPoint => "Artillery Aim Point",
            TargetKind::Fascam => "FASCAM",
            TargetKind::InfernoArea => "Inferno IV",
            TargetKind::VibrabombArea => "Vibrabomb",
            TargetKind::SensorPod => "Sensor Pod",
            TargetKind::Searchlight => "Searchlight",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
