//! Hex coordinate system for the combat board (offset columns)
//!
//! Coordinates are (column, row). Odd columns sit half a hex lower than even
//! ones, so neighbour offsets depend on column parity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Column/row coordinate of one board hex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Coords {
    pub x: i32,
    pub y: i32,
}

impl Coords {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Odd columns are shifted half a hex down
    pub fn is_x_odd(&self) -> bool {
        self.x.rem_euclid(2) == 1
    }

    /// Neighbouring hex in the given direction
    pub fn translated(&self, direction: HexDirection) -> Self {
        let odd = self.is_x_odd() as i32;
        match direction {
            HexDirection::North => Self::new(self.x, self.y - 1),
            HexDirection::NorthEast => Self::new(self.x + 1, self.y - 1 + odd),
            HexDirection::SouthEast => Self::new(self.x + 1, self.y + odd),
            HexDirection::South => Self::new(self.x, self.y + 1),
            HexDirection::SouthWest => Self::new(self.x - 1, self.y + odd),
            HexDirection::NorthWest => Self::new(self.x - 1, self.y - 1 + odd),
        }
    }

    /// All six adjacent hexes, clockwise from north
    pub fn all_adjacent(&self) -> [Coords; 6] {
        HexDirection::all().map(|d| self.translated(d))
    }

    /// Cube coordinates (q, r, s) for this offset position
    fn to_cube(self) -> (i32, i32, i32) {
        let q = self.x;
        let r = self.y - (self.x - self.x.rem_euclid(2)) / 2;
        (q, r, -q - r)
    }

    /// Distance in hexes
    pub fn distance(&self, other: &Self) -> u32 {
        let (aq, ar, a_s) = self.to_cube();
        let (bq, br, bs) = other.to_cube();
        (((aq - bq).abs() + (ar - br).abs() + (a_s - bs).abs()) / 2) as u32
    }

    /// Four-digit map label, 1-based ("0305" for column 2, row 4)
    pub fn board_num(&self) -> String {
        format!("{:02}{:02}", self.x + 1, self.y + 1)
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.board_num())
    }
}

/// Hex side direction, clockwise from north
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum HexDirection {
    #[default]
    North,
    NorthEast,
    SouthEast,
    South,
    SouthWest,
    NorthWest,
}

impl HexDirection {
    /// Side index used by terrain exit bits (0 = north)
    pub fn index(&self) -> u8 {
        *self as u8
    }

    /// Get opposite direction
    pub fn opposite(&self) -> Self {
        match self {
            HexDirection::North => HexDirection::South,
            HexDirection::NorthEast => HexDirection::SouthWest,
            HexDirection::SouthEast => HexDirection::NorthWest,
            HexDirection::South => HexDirection::North,
            HexDirection::SouthWest => HexDirection::NorthEast,
            HexDirection::NorthWest => HexDirection::SouthEast,
        }
    }

    /// All directions
    pub fn all() -> [HexDirection; 6] {
        [
            HexDirection::North,
            HexDirection::NorthEast,
            HexDirection::SouthEast,
            HexDirection::South,
            HexDirection::SouthWest,
            HexDirection::NorthWest,
        ]
    }
}
