//! A single board cell: stacked terrain plus elevation

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::board::coords::HexDirection;
use crate::board::terrain::{Terrain, TerrainKind};

/// One hex on the board
///
/// Holds at most one feature per terrain kind. An empty set is plain clear
/// ground. Two hexes are equal when elevation and terrain match.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Hex {
    elevation: i32,
    terrains: BTreeMap<TerrainKind, Terrain>,
}

impl Hex {
    pub fn new(elevation: i32) -> Self {
        Self {
            elevation,
            terrains: BTreeMap::new(),
        }
    }

    /// Builder-style terrain addition
    pub fn with_terrain(mut self, terrain: Terrain) -> Self {
        self.add_terrain(terrain);
        self
    }

    pub fn elevation(&self) -> i32 {
        self.elevation
    }

    pub fn set_elevation(&mut self, elevation: i32) {
        self.elevation = elevation;
    }

    pub fn terrains(&self) -> impl Iterator<Item = &Terrain> {
        self.terrains.values()
    }

    /// Replace the whole terrain set
    pub fn set_terrains(&mut self, terrains: impl IntoIterator<Item = Terrain>) {
        self.terrains = terrains.into_iter().map(|t| (t.kind, t)).collect();
    }

    /// Add a feature, replacing any existing one of the same kind
    pub fn add_terrain(&mut self, terrain: Terrain) {
        self.terrains.insert(terrain.kind, terrain);
    }

    pub fn remove_terrain(&mut self, kind: TerrainKind) -> Option<Terrain> {
        self.terrains.remove(&kind)
    }

    pub fn contains_terrain(&self, kind: TerrainKind) -> bool {
        self.terrains.contains_key(&kind)
    }

    pub fn terrain(&self, kind: TerrainKind) -> Option<&Terrain> {
        self.terrains.get(&kind)
    }

    pub fn terrain_level(&self, kind: TerrainKind) -> Option<i32> {
        self.terrains.get(&kind).map(|t| t.level)
    }

    /// No terrain at all
    pub fn is_clear(&self) -> bool {
        self.terrains.is_empty()
    }

    /// Height of the tallest feature above the surface
    pub fn height(&self) -> i32 {
        self.terrains.values().map(|t| t.elevation()).max().unwrap_or(0)
    }

    pub fn floor(&self) -> i32 {
        self.elevation
    }

    /// Top of the tallest feature
    pub fn ceiling(&self) -> i32 {
        self.elevation + self.height()
    }

    /// Does linear terrain of this kind leave through the given side?
    pub fn has_exit(&self, kind: TerrainKind, direction: HexDirection) -> bool {
        kind.uses_exits()
            && self
                .terrains
                .get(&kind)
                .is_some_and(|t| t.has_exit(direction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_creation() {
        let hex = Hex::new(-1);
        assert_eq!(hex.elevation(), -1);
        assert!(hex.is_clear());
        assert_eq!(hex.height(), 0);
    }

    #[test]
    fn test_stacked_terrain() {
        let hex = Hex::new(0)
            .with_terrain(Terrain::new(TerrainKind::Pavement, 1))
            .with_terrain(Terrain::new(TerrainKind::Woods, 2));
        assert!(hex.contains_terrain(TerrainKind::Pavement));
        assert_eq!(hex.terrain_level(TerrainKind::Woods), Some(2));
        assert_eq!(hex.terrains().count(), 2);
        assert_eq!(hex.ceiling(), 2);
    }

    #[test]
    fn test_same_kind_replaces() {
        let mut hex = Hex::new(0).with_terrain(Terrain::new(TerrainKind::Fire, 1));
        hex.add_terrain(Terrain::new(TerrainKind::Fire, 2));
        assert_eq!(hex.terrains().count(), 1);
        assert_eq!(hex.terrain_level(TerrainKind::Fire), Some(2));
    }

    #[test]
    fn test_equality_by_terrain_and_elevation() {
        let a = Hex::new(2).with_terrain(Terrain::new(TerrainKind::Rough, 1));
        let mut b = Hex::new(2).with_terrain(Terrain::new(TerrainKind::Rough, 1));
        assert_eq!(a, b);
        b.set_elevation(3);
        assert_ne!(a, b);
        b.set_elevation(2);
        b.remove_terrain(TerrainKind::Rough);
        assert_ne!(a, b);
    }

    #[test]
    fn test_exit_needs_linear_terrain() {
        let hex = Hex::new(0)
            .with_terrain(Terrain::with_exits(TerrainKind::Road, 1, 0b000001))
            .with_terrain(Terrain::with_exits(TerrainKind::Woods, 1, 0b000001));
        assert!(hex.has_exit(TerrainKind::Road, HexDirection::North));
        assert!(!hex.has_exit(TerrainKind::Woods, HexDirection::North));
    }
}
