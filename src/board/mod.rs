//! Board layer: coordinates, continuous-plane hex geometry, terrain and cells
//!
//! Geometry is only consulted for sightline and blast-line questions; the
//! board itself stores plain [`Hex`] values indexed by [`Coords`].

pub mod coords;
pub mod geometry;
pub mod hex;
pub mod map;
pub mod terrain;

pub use coords::{Coords, HexDirection};
pub use geometry::{
    center_of, hexagon_for, intersects, segment_between, HexPolygon, Segment, GEOMETRY_EPSILON,
};
pub use hex::Hex;
pub use map::{Board, MAX_BOARD_DIMENSION, MAX_BOARD_HEXES};
pub use terrain::{terrain_elevation, Terrain, TerrainKind, TerrainRegistry};
