//! The attackable-entity union
//!
//! Every variant answers the same questions (kind, id, position, height,
//! elevation, immobility, display name). Hex-derived variants copy what they
//! need from the board when they are built and never look at it again, so a
//! target made before a building collapses keeps the old elevation.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Coords, Hex, TerrainKind};
use crate::core::error::{CombatError, Result};
use crate::targeting::kind::{coords_to_id, TargetId, TargetKind};

fn hex_at(board: &Board, coords: Coords) -> Result<&Hex> {
    board
        .get_hex(coords)
        .ok_or(CombatError::HexNotOnBoard(coords))
}

/// Snapshot of a combat unit as seen by weapon resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitTarget {
    pub id: TargetId,
    pub name: String,
    pub position: Coords,
    pub elevation: i32,
    pub height: i32,
    pub immobile: bool,
}

/// A hex to clear or set alight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HexTarget {
    coords: Coords,
    elevation: i32,
    height: i32,
    ignite: bool,
}

impl HexTarget {
    /// Capture the hex's elevation and terrain height as they are now
    pub fn new(board: &Board, coords: Coords, ignite: bool) -> Result<Self> {
        let hex = hex_at(board, coords)?;
        Ok(Self {
            coords,
            elevation: hex.elevation(),
            height: hex.height(),
            ignite,
        })
    }

    pub fn coords(&self) -> Coords {
        self.coords
    }

    pub fn is_ignite(&self) -> bool {
        self.ignite
    }
}

/// A building attacked directly, or set alight
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingTarget {
    coords: Coords,
    elevation: i32,
    height: i32,
    ignite: bool,
}

impl BuildingTarget {
    pub fn new(board: &Board, coords: Coords, ignite: bool) -> Result<Self> {
        let hex = hex_at(board, coords)?;
        if !hex.contains_terrain(TerrainKind::Building) {
            return Err(CombatError::NoBuilding(coords));
        }
        Ok(Self {
            coords,
            elevation: hex.elevation(),
            height: hex.terrain_level(TerrainKind::BuildingElevation).unwrap_or(0),
            ignite,
        })
    }

    pub fn is_ignite(&self) -> bool {
        self.ignite
    }
}

/// A hex where mines are laid or swept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinefieldTarget {
    coords: Coords,
    elevation: i32,
    deliver: bool,
}

impl MinefieldTarget {
    pub fn new(board: &Board, coords: Coords, deliver: bool) -> Result<Self> {
        let hex = hex_at(board, coords)?;
        Ok(Self {
            coords,
            elevation: hex.elevation(),
            deliver,
        })
    }
}

/// Area weapons and devices aimed at a hex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AreaEffect {
    ArtilleryAimPoint,
    Fascam,
    InfernoArea,
    VibrabombArea,
    SensorPod,
    Searchlight,
}

impl AreaEffect {
    fn kind(&self) -> TargetKind {
        match self {
            AreaEffect::ArtilleryAimPoint => TargetKind::ArtilleryAimPoint,
            AreaEffect::Fascam => TargetKind::Fascam,
            AreaEffect::InfernoArea => TargetKind::InfernoArea,
            AreaEffect::VibrabombArea => TargetKind::VibrabombArea,
            AreaEffect::SensorPod => TargetKind::SensorPod,
            AreaEffect::Searchlight => TargetKind::Searchlight,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaTarget {
    coords: Coords,
    elevation: i32,
    effect: AreaEffect,
}

impl AreaTarget {
    pub fn new(board: &Board, coords: Coords, effect: AreaEffect) -> Result<Self> {
        let hex = hex_at(board, coords)?;
        Ok(Self {
            coords,
            elevation: hex.elevation(),
            effect,
        })
    }

    pub fn effect(&self) -> AreaEffect {
        self.effect
    }
}

/// Anything an attack can be aimed at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Target {
    Unit(UnitTarget),
    Hex(HexTarget),
    Building(BuildingTarget),
    Minefield(MinefieldTarget),
    Area(AreaTarget),
}

impl Target {
    pub fn kind(&self) -> TargetKind {
        match self {
            Target::Unit(_) => TargetKind::Unit,
            Target::Hex(h) if h.ignite => TargetKind::HexIgnite,
            Target::Hex(_) => TargetKind::HexClear,
            Target::Building(b) if b.ignite => TargetKind::BuildingIgnite,
            Target::Building(_) => TargetKind::Building,
            Target::Minefield(m) if m.deliver => TargetKind::MinefieldDeliver,
            Target::Minefield(_) => TargetKind::MinefieldClear,
            Target::Area(a) => a.effect.kind(),
        }
    }

    pub fn id(&self) -> TargetId {
        match self {
            Target::Unit(u) => u.id,
            _ => coords_to_id(self.position()),
        }
    }

    pub fn position(&self) -> Coords {
        match self {
            Target::Unit(u) => u.position,
            Target::Hex(h) => h.coords,
            Target::Building(b) => b.coords,
            Target::Minefield(m) => m.coords,
            Target::Area(a) => a.coords,
        }
    }

    /// Levels the target rises above its elevation
    pub fn height(&self) -> i32 {
        match self {
            Target::Unit(u) => u.height,
            Target::Hex(h) => h.height,
            Target::Building(b) => b.height,
            Target::Minefield(_) | Target::Area(_) => 0,
        }
    }

    pub fn elevation(&self) -> i32 {
        match self {
            Target::Unit(u) => u.elevation,
            Target::Hex(h) => h.elevation,
            Target::Building(b) => b.elevation,
            Target::Minefield(m) => m.elevation,
            Target::Area(a) => a.elevation,
        }
    }

    pub fn abs_height(&self) -> i32 {
        self.height() + self.elevation()
    }

    pub fn is_immobile(&self) -> bool {
        match self {
            Target::Unit(u) => u.immobile,
            _ => true,
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            Target::Unit(u) => u.name.clone(),
            Target::Hex(h) => format!("Hex: {} ({})", h.coords.board_num(), self.kind()),
            Target::Building(b) if b.ignite => {
                format!("Building: {} (Ignite)", b.coords.board_num())
            }
            Target::Building(b) => format!("Building: {}", b.coords.board_num()),
            Target::Minefield(m) => format!(
                "Minefield: {} ({})",
                m.coords.board_num(),
                if m.deliver { "Deliver" } else { "Clear" }
            ),
            Target::Area(a) => format!("{}: {}", self.kind(), a.coords.board_num()),
        }
    }
}

impl From<UnitTarget> for Target {
    fn from(t: UnitTarget) -> Self {
        Target::Unit(t)
    }
}

impl From<HexTarget> for Target {
    fn from(t: HexTarget) -> Self {
        Target::Hex(t)
    }
}

impl From<BuildingTarget> for Target {
    fn from(t: BuildingTarget) -> Self {
        Target::Building(t)
    }
}

impl From<MinefieldTarget> for Target {
    fn from(t: MinefieldTarget) -> Self {
        Target::Minefield(t)
    }
}

impl From<AreaTarget> for Target {
    fn from(t: AreaTarget) -> Self {
        Target::Area(t)
    }
}
