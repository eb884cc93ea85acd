//! Terrain catalogue and stacked terrain features
//!
//! Every kind has a stable integer code and a lowercase name. The
//! name/code tables live in a [`TerrainRegistry`] built once and then
//! shared read-only.

use std::fmt;
use std::sync::OnceLock;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::board::coords::HexDirection;
use crate::core::error::{CombatError, Result};

/// Terrain type that can sit on a hex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TerrainKind {
    Woods,
    Water,
    Rough,
    Rubble,
    Jungle,
    Sand,
    Tundra,
    Magma,
    Fields,
    Industrial,
    Pavement,
    Road,
    Swamp,
    Mud,
    Rapids,
    Ice,
    Snow,
    Fire,
    Smoke,
    Geyser,
    Building,
    BuildingCf,
    BuildingElevation,
    BuildingClass,
    BuildingArmor,
    Bridge,
    BridgeCf,
    BridgeElevation,
    FuelTank,
    Fortified,
    Screen,
}

impl TerrainKind {
    /// Every kind, in code order
    pub fn all() -> [TerrainKind; 31] {
        use TerrainKind::*;
        [
            Woods, Water, Rough, Rubble, Jungle, Sand, Tundra, Magma, Fields, Industrial,
            Pavement, Road, Swamp, Mud, Rapids, Ice, Snow, Fire, Smoke, Geyser, Building,
            BuildingCf, BuildingElevation, BuildingClass, BuildingArmor, Bridge, BridgeCf,
            BridgeElevation, FuelTank, Fortified, Screen,
        ]
    }

    /// Stable integer code (1-based; 0 means "no terrain")
    pub fn code(&self) -> i32 {
        *self as i32 + 1
    }

    pub fn name(&self) -> &'static str {
        match self {
            TerrainKind::Woods => "woods",
            TerrainKind::Water => "water",
            TerrainKind::Rough => "rough",
            TerrainKind::Rubble => "rubble",
            TerrainKind::Jungle => "jungle",
            TerrainKind::Sand => "sand",
            TerrainKind::Tundra => "tundra",
            TerrainKind::Magma => "magma",
            TerrainKind::Fields => "fields",
            TerrainKind::Industrial => "industrial",
            TerrainKind::Pavement => "pavement",
            TerrainKind::Road => "road",
            TerrainKind::Swamp => "swamp",
            TerrainKind::Mud => "mud",
            TerrainKind::Rapids => "rapids",
            TerrainKind::Ice => "ice",
            TerrainKind::Snow => "snow",
            TerrainKind::Fire => "fire",
            TerrainKind::Smoke => "smoke",
            TerrainKind::Geyser => "geyser",
            TerrainKind::Building => "building",
            TerrainKind::BuildingCf => "bldg_cf",
            TerrainKind::BuildingElevation => "bldg_elev",
            TerrainKind::BuildingClass => "bldg_class",
            TerrainKind::BuildingArmor => "bldg_armor",
            TerrainKind::Bridge => "bridge",
            TerrainKind::BridgeCf => "bridge_cf",
            TerrainKind::BridgeElevation => "bridge_elev",
            TerrainKind::FuelTank => "fuel_tank",
            TerrainKind::Fortified => "fortified",
            TerrainKind::Screen => "screen",
        }
    }

    /// Linear terrain carries exit bits for connectivity
    pub fn uses_exits(&self) -> bool {
        matches!(
            self,
            TerrainKind::Road | TerrainKind::Bridge | TerrainKind::Building | TerrainKind::FuelTank
        )
    }
}

/// How many levels a terrain feature rises above its hex's surface
pub fn terrain_elevation(kind: TerrainKind, level: i32) -> i32 {
    match kind {
        // Light and heavy growth stand two levels tall, ultra-heavy three
        TerrainKind::Woods | TerrainKind::Jungle => match level {
            l if l >= 3 => 3,
            l if l > 0 => 2,
            _ => 0,
        },
        TerrainKind::Smoke if level > 0 => 2,
        TerrainKind::BuildingElevation | TerrainKind::Industrial => level.max(0),
        _ => 0,
    }
}

/// Name/code lookup tables
#[derive(Debug)]
pub struct TerrainRegistry {
    by_name: AHashMap<&'static str, TerrainKind>,
    by_code: AHashMap<i32, TerrainKind>,
}

static STANDARD_REGISTRY: OnceLock<TerrainRegistry> = OnceLock::new();

impl TerrainRegistry {
    /// Build the lookup tables from the catalogue
    pub fn build() -> Self {
        let kinds = TerrainKind::all();
        Self {
            by_name: kinds.iter().map(|k| (k.name(), *k)).collect(),
            by_code: kinds.iter().map(|k| (k.code(), *k)).collect(),
        }
    }

    /// Process-wide registry, built on first use
    pub fn standard() -> &'static TerrainRegistry {
        STANDARD_REGISTRY.get_or_init(TerrainRegistry::build)
    }

    pub fn kind_by_name(&self, name: &str) -> Option<TerrainKind> {
        self.by_name.get(name.trim().to_ascii_lowercase().as_str()).copied()
    }

    pub fn kind_by_code(&self, code: i32) -> Option<TerrainKind> {
        self.by_code.get(&code).copied()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// One terrain feature stacked on a hex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Terrain {
    pub kind: TerrainKind,
    pub level: i32,
    /// One bit per hex side, bit 0 = north
    pub exits: u8,
    pub exits_specified: bool,
}

impl Terrain {
    pub fn new(kind: TerrainKind, level: i32) -> Self {
        Self {
            kind,
            level,
            exits: 0,
            exits_specified: false,
        }
    }

    pub fn with_exits(kind: TerrainKind, level: i32, exits: u8) -> Self {
        Self {
            kind,
            level,
            exits: exits & 0b11_1111,
            exits_specified: true,
        }
    }

    /// Parse `name:level` or `name:level:exits`
    pub fn parse(registry: &TerrainRegistry, text: &str) -> Result<Self> {
        let mut parts = text.split(':');
        let name = parts.next().unwrap_or_default();
        let kind = registry
            .kind_by_name(name)
            .ok_or_else(|| CombatError::UnknownTerrain(name.to_string()))?;

        let level = parts
            .next()
            .and_then(|l| l.trim().parse::<i32>().ok())
            .ok_or_else(|| CombatError::MalformedTerrain(text.to_string()))?;

        let terrain = match parts.next() {
            Some(exits) => {
                let exits = exits
                    .trim()
                    .parse::<u8>()
                    .map_err(|_| CombatError::MalformedTerrain(text.to_string()))?;
                Terrain::with_exits(kind, level, exits)
            }
            None => Terrain::new(kind, level),
        };

        if parts.next().is_some() {
            return Err(CombatError::MalformedTerrain(text.to_string()));
        }
        Ok(terrain)
    }

    /// Levels this feature rises above the hex surface
    pub fn elevation(&self) -> i32 {
        terrain_elevation(self.kind, self.level)
    }

    pub fn has_exit(&self, direction: HexDirection) -> bool {
        self.exits & (1 << direction.index()) != 0
    }

    pub fn set_exit(&mut self, direction: HexDirection, open: bool) {
        if open {
            self.exits |= 1 << direction.index();
        } else {
            self.exits &= !(1 << direction.index());
        }
        self.exits_specified = true;
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.name(), self.level)?;
        if self.exits_specified {
            write!(f, ":{}", self.exits)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_is_bijective() {
        let registry = TerrainRegistry::build();
        assert_eq!(registry.len(), TerrainKind::all().len());
        for kind in TerrainKind::all() {
            assert_eq!(registry.kind_by_name(kind.name()), Some(kind));
            assert_eq!(registry.kind_by_code(kind.code()), Some(kind));
        }
        assert_eq!(registry.kind_by_code(0), None);
    }

    #[test]
    fn test_standard_registry_is_shared() {
        let a = TerrainRegistry::standard() as *const TerrainRegistry;
        let b = TerrainRegistry::standard() as *const TerrainRegistry;
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_and_display() {
        let registry = TerrainRegistry::standard();
        let woods = Terrain::parse(registry, "woods:1").unwrap();
        assert_eq!(woods, Terrain::new(TerrainKind::Woods, 1));
        assert_eq!(woods.to_string(), "woods:1");

        let road = Terrain::parse(registry, "Road:1:9").unwrap();
        assert!(road.has_exit(HexDirection::North));
        assert!(road.has_exit(HexDirection::South));
        assert!(!road.has_exit(HexDirection::NorthEast));
        assert_eq!(road.to_string(), "road:1:9");
    }

    #[test]
    fn test_parse_errors() {
        let registry = TerrainRegistry::standard();
        assert!(matches!(
            Terrain::parse(registry, "lava:1"),
            Err(CombatError::UnknownTerrain(_))
        ));
        assert!(matches!(
            Terrain::parse(registry, "woods"),
            Err(CombatError::MalformedTerrain(_))
        ));
        assert!(matches!(
            Terrain::parse(registry, "woods:1:2:3"),
            Err(CombatError::MalformedTerrain(_))
        ));
    }

    #[test]
    fn test_woods_height() {
        assert_eq!(terrain_elevation(TerrainKind::Woods, 1), 2);
        assert_eq!(terrain_elevation(TerrainKind::Woods, 3), 3);
        assert_eq!(terrain_elevation(TerrainKind::Rough, 1), 0);
    }

    #[test]
    fn test_set_exit() {
        let mut road = Terrain::new(TerrainKind::Road, 1);
        assert!(!road.exits_specified);
        road.set_exit(HexDirection::SouthEast, true);
        assert!(road.has_exit(HexDirection::SouthEast));
        road.set_exit(HexDirection::SouthEast, false);
        assert_eq!(road.exits, 0);
        assert!(road.exits_specified);
    }
}
