//! The combat board: owned hexes looked up by coordinate
//!
//! Bounds checking lives here, not in [`Coords`].

use serde::{Deserialize, Serialize};

use crate::board::coords::Coords;
use crate::board::geometry::{center_of, hexagon_for, intersects, segment_between};
use crate::board::hex::Hex;
use crate::core::error::{CombatError, Result};

/// Largest width or height the coordinate id encoding supports
pub const MAX_BOARD_DIMENSION: i32 = 99_999;

/// Largest number of cells a board may allocate
///
/// Either axis may reach [`MAX_BOARD_DIMENSION`], but not both at once.
pub const MAX_BOARD_HEXES: usize = 1 << 24;

/// Height of a standing unit above its hex floor, for sightlines
const SIGHTLINE_HEIGHT: i32 = 1;

/// Rectangular board of hexes, row-major
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    width: i32,
    height: i32,
    hexes: Vec<Hex>,
}

impl Board {
    /// Create a board of clear level-0 hexes
    pub fn new(width: i32, height: i32) -> Result<Self> {
        if width <= 0
            || height <= 0
            || width > MAX_BOARD_DIMENSION
            || height > MAX_BOARD_DIMENSION
        {
            return Err(CombatError::InvalidBoardSize { width, height });
        }
        let cells = (width as usize) * (height as usize);
        if cells > MAX_BOARD_HEXES {
            return Err(CombatError::InvalidBoardSize { width, height });
        }

        Ok(Self {
            width,
            height,
            hexes: vec![Hex::default(); cells],
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Check if coordinate is within board bounds
    pub fn contains(&self, coords: Coords) -> bool {
        coords.x >= 0 && coords.y >= 0 && coords.x < self.width && coords.y < self.height
    }

    fn index(&self, coords: Coords) -> Option<usize> {
        self.contains(coords)
            .then(|| (coords.y as usize) * (self.width as usize) + coords.x as usize)
    }

    pub fn get_hex(&self, coords: Coords) -> Option<&Hex> {
        self.index(coords).map(|i| &self.hexes[i])
    }

    pub fn get_hex_mut(&mut self, coords: Coords) -> Option<&mut Hex> {
        self.index(coords).map(move |i| &mut self.hexes[i])
    }

    /// Replace the hex at a coordinate
    pub fn set_hex(&mut self, coords: Coords, hex: Hex) -> Result<()> {
        let slot = self
            .get_hex_mut(coords)
            .ok_or(CombatError::HexNotOnBoard(coords))?;
        *slot = hex;
        Ok(())
    }

    /// Every coordinate on the board, row by row
    pub fn coords(&self) -> impl Iterator<Item = Coords> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Coords::new(x, y)))
    }

    /// Hexes crossed by the center-to-center line, endpoints excluded,
    /// nearest to `from` first
    pub fn intervening_hexes(&self, from: Coords, to: Coords) -> Vec<Coords> {
        let segment = segment_between(from, to);
        let origin = center_of(from);

        let mut crossed: Vec<Coords> = (from.x.min(to.x)..=from.x.max(to.x))
            .flat_map(|x| {
                (from.y.min(to.y) - 1..=from.y.max(to.y) + 1).map(move |y| Coords::new(x, y))
            })
            .filter(|c| *c != from && *c != to && self.contains(*c))
            .filter(|c| intersects(&segment, &hexagon_for(*c)))
            .collect();

        crossed.sort_by(|a, b| {
            origin
                .distance_squared(center_of(*a))
                .total_cmp(&origin.distance_squared(center_of(*b)))
        });
        crossed
    }

    /// Check line of sight between two hexes
    ///
    /// The sightline runs one level above the higher endpoint floor. Any
    /// intervening hex whose ceiling rises above it blocks.
    pub fn has_line_of_sight(&self, from: Coords, to: Coords) -> bool {
        let (Some(a), Some(b)) = (self.get_hex(from), self.get_hex(to)) else {
            return false;
        };
        let sightline = a.floor().max(b.floor()) + SIGHTLINE_HEIGHT;

        let blocker = self
            .intervening_hexes(from, to)
            .into_iter()
            .find(|c| self.get_hex(*c).is_some_and(|h| h.ceiling() > sightline));

        if let Some(blocker) = blocker {
            tracing::trace!(%from, %to, %blocker, "line of sight blocked");
            return false;
        }
        true
    }
}
