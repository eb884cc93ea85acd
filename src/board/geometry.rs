//! Continuous-plane hexagons for line-of-sight and blast-line tests
//!
//! Hexes are flat-topped with an apothem of 1, so adjacent centers are
//! exactly 2 apart. The circumradius is `2·tan(π/6)` and columns are spaced
//! `3·tan(π/6)` apart, which makes neighbouring hexagons share edges exactly.

use std::f64::consts::FRAC_PI_6;

use glam::DVec2;

use crate::board::coords::Coords;

/// Cross products inside this band count as "on the line"
pub const GEOMETRY_EPSILON: f64 = 1e-6;

fn tan30() -> f64 {
    FRAC_PI_6.tan()
}

/// A hexagon in the continuous plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexPolygon {
    pub center: DVec2,
    /// Clockwise from the west vertex
    pub vertices: [DVec2; 6],
}

impl HexPolygon {
    /// Axis-aligned bounding box as (min, max)
    pub fn bounds(&self) -> (DVec2, DVec2) {
        let min = self.vertices.iter().fold(DVec2::splat(f64::INFINITY), |acc, v| acc.min(*v));
        let max = self.vertices.iter().fold(DVec2::splat(f64::NEG_INFINITY), |acc, v| acc.max(*v));
        (min, max)
    }

    /// Edges as (start, end) pairs, wrapping back to the first vertex
    pub fn edges(&self) -> impl Iterator<Item = (DVec2, DVec2)> + '_ {
        (0..6).map(move |i| (self.vertices[i], self.vertices[(i + 1) % 6]))
    }

    /// Is the point within epsilon of one of the six edges?
    pub fn on_boundary(&self, point: DVec2) -> bool {
        self.edges()
            .any(|(a, b)| distance_to_segment(point, a, b) < GEOMETRY_EPSILON)
    }
}

/// Center of a hex in the continuous plane
pub fn center_of(coords: Coords) -> DVec2 {
    let shift = if coords.is_x_odd() { 1.0 } else { 0.0 };
    DVec2::new(coords.x as f64 * 3.0 * tan30(), 2.0 * coords.y as f64 + shift)
}

/// Build the hexagon for a board coordinate
pub fn hexagon_for(coords: Coords) -> HexPolygon {
    let t = tan30();
    let c = center_of(coords);
    HexPolygon {
        center: c,
        vertices: [
            DVec2::new(c.x - 2.0 * t, c.y),
            DVec2::new(c.x - t, c.y - 1.0),
            DVec2::new(c.x + t, c.y - 1.0),
            DVec2::new(c.x + 2.0 * t, c.y),
            DVec2::new(c.x + t, c.y + 1.0),
            DVec2::new(c.x - t, c.y + 1.0),
        ],
    }
}

/// A line segment used for sightlines and blast lines
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: DVec2,
    pub end: DVec2,
}

impl Segment {
    pub fn new(start: DVec2, end: DVec2) -> Self {
        Self { start, end }
    }

    fn direction(&self) -> DVec2 {
        self.end - self.start
    }

    fn side_of(&self, point: DVec2) -> (Side, f64) {
        let cross = self.direction().perp_dot(point - self.start);
        let side = if cross.abs() < GEOMETRY_EPSILON {
            Side::On
        } else if cross > 0.0 {
            Side::Left
        } else {
            Side::Right
        };
        (side, cross)
    }

    /// Parameter of the point's projection, 0 at start and 1 at end
    fn param(&self, point: DVec2) -> f64 {
        let dir = self.direction();
        (point - self.start).dot(dir) / dir.length_squared()
    }
}

/// Segment between the centers of two hexes
pub fn segment_between(from: Coords, to: Coords) -> Segment {
    Segment::new(center_of(from), center_of(to))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
    On,
}

/// Does the segment cross the hexagon's boundary or interior?
///
/// A zero-length segment only counts when its point sits on the boundary.
pub fn intersects(segment: &Segment, hexagon: &HexPolygon) -> bool {
    if segment.direction().length_squared() < GEOMETRY_EPSILON * GEOMETRY_EPSILON {
        return hexagon.on_boundary(segment.start);
    }

    let sides = hexagon.vertices.map(|v| segment.side_of(v));

    // The infinite line misses unless a vertex touches it or two
    // successive vertices fall on opposite sides.
    let line_hits = (0..6).any(|i| {
        let (a, _) = sides[i];
        let (b, _) = sides[(i + 1) % 6];
        a == Side::On || (a != b && b != Side::On)
    });
    if !line_hits {
        return false;
    }

    // Chord extent along the segment
    let mut t_min = f64::INFINITY;
    let mut t_max = f64::NEG_INFINITY;
    for i in 0..6 {
        let j = (i + 1) % 6;
        let (side_a, cross_a) = sides[i];
        let (side_b, cross_b) = sides[j];
        let point = if side_a == Side::On {
            hexagon.vertices[i]
        } else if side_b != Side::On && side_a != side_b {
            let a = hexagon.vertices[i];
            let b = hexagon.vertices[j];
            a + (b - a) * (cross_a / (cross_a - cross_b))
        } else {
            continue;
        };
        let t = segment.param(point);
        t_min = t_min.min(t);
        t_max = t_max.max(t);
    }

    t_max >= -GEOMETRY_EPSILON && t_min <= 1.0 + GEOMETRY_EPSILON
}

fn distance_to_segment(point: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let len2 = ab.length_squared();
    if len2 == 0.0 {
        return point.distance(a);
    }
    let t = ((point - a).dot(ab) / len2).clamp(0.0, 1.0);
    point.distance(a + ab * t)
}
