//! Targeting - one contract over units, hexes, buildings, minefields and areas

pub mod kind;
pub mod target;

pub use kind::{coords_to_id, id_to_coords, TargetId, TargetKind, ID_ROW_FACTOR};
pub use target::{
    AreaEffect, AreaTarget, BuildingTarget, HexTarget, MinefieldTarget, Target, UnitTarget,
};
