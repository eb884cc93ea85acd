//! Board integration tests
//!
//! Geometry, terrain parsing and line of sight working together on a real
//! board.

use glam::DVec2;
use hex_combat::board::{
    center_of, hexagon_for, intersects, segment_between, Board, Coords, Hex, HexDirection,
    Segment, Terrain, TerrainKind, TerrainRegistry,
};
use hex_combat::core::CombatError;
use proptest::prelude::*;

fn board_with(placements: &[(i32, i32, i32, &str)]) -> Board {
    let registry = TerrainRegistry::standard();
    let mut board = Board::new(16, 17).unwrap();
    for (x, y, elevation, terrain) in placements {
        let mut hex = Hex::new(*elevation);
        if !terrain.is_empty() {
            hex.add_terrain(Terrain::parse(registry, terrain).unwrap());
        }
        board.set_hex(Coords::new(*x, *y), hex).unwrap();
    }
    board
}

#[test]
fn test_board_rejects_bad_dimensions() {
    assert!(matches!(
        Board::new(0, 10),
        Err(CombatError::InvalidBoardSize { .. })
    ));
    assert!(matches!(
        Board::new(10, -3),
        Err(CombatError::InvalidBoardSize { .. })
    ));
}

#[test]
fn test_neighbours_are_distance_one_and_touch() {
    for origin in [Coords::new(4, 4), Coords::new(5, 4)] {
        for direction in HexDirection::all() {
            let neighbour = origin.translated(direction);
            assert_eq!(origin.distance(&neighbour), 1);
            assert!((center_of(origin).distance(center_of(neighbour)) - 2.0).abs() < 1e-9);
            assert_eq!(neighbour.translated(direction.opposite()), origin);
        }
    }
}

#[test]
fn test_straight_column_line_crosses_every_hex_between() {
    let board = board_with(&[]);
    let crossed = board.intervening_hexes(Coords::new(3, 1), Coords::new(3, 6));
    let expected: Vec<Coords> = (2..6).map(|y| Coords::new(3, y)).collect();
    assert_eq!(crossed, expected);
}

#[test]
fn test_intervening_hexes_ordered_from_origin() {
    let board = board_with(&[]);
    let from = Coords::new(1, 4);
    let to = Coords::new(9, 4);
    let crossed = board.intervening_hexes(from, to);
    assert!(!crossed.is_empty());
    let origin = center_of(from);
    let distances: Vec<f64> = crossed.iter().map(|c| origin.distance(center_of(*c))).collect();
    assert!(distances.windows(2).all(|w| w[0] <= w[1]));
    assert!(!crossed.contains(&from));
    assert!(!crossed.contains(&to));
}

#[test]
fn test_hill_blocks_line_of_sight() {
    let board = board_with(&[(3, 4, 3, "")]);
    assert!(!board.has_line_of_sight(Coords::new(3, 1), Coords::new(3, 7)));
    assert!(board.has_line_of_sight(Coords::new(5, 1), Coords::new(5, 7)));
}

#[test]
fn test_light_woods_do_not_block_from_high_ground() {
    let board = board_with(&[(3, 4, 0, "woods:1"), (3, 1, 2, ""), (3, 7, 0, "")]);
    assert!(board.has_line_of_sight(Coords::new(3, 1), Coords::new(3, 7)));

    let low = board_with(&[(3, 4, 0, "woods:2"), (3, 4, 1, "woods:2")]);
    assert!(!low.has_line_of_sight(Coords::new(3, 1), Coords::new(3, 7)));
}

#[test]
fn test_terrain_registry_round_trip_through_hex() {
    let registry = TerrainRegistry::build();
    let mut hex = Hex::new(0);
    hex.add_terrain(Terrain::parse(&registry, "road:1:9").unwrap());
    assert!(hex.has_exit(TerrainKind::Road, HexDirection::North));
    assert!(hex.has_exit(TerrainKind::Road, HexDirection::South));
    assert!(!hex.has_exit(TerrainKind::Road, HexDirection::NorthEast));

    assert!(matches!(
        Terrain::parse(&registry, "lava:1"),
        Err(CombatError::UnknownTerrain(_))
    ));
}

#[test]
fn test_hex_snapshot_equality() {
    let mut a = Hex::new(1).with_terrain(Terrain::new(TerrainKind::Rough, 1));
    let b = Hex::new(1).with_terrain(Terrain::new(TerrainKind::Rough, 1));
    assert_eq!(a, b);
    a.set_elevation(2);
    assert_ne!(a, b);
}

proptest! {
    #[test]
    fn prop_far_segments_never_intersect(
        x in 0i32..50,
        y in 0i32..50,
        side in 0usize..4,
        offset in 5.0f64..100.0,
        along in -10.0f64..10.0,
        spread in -10.0f64..10.0,
        away in 0.0f64..10.0,
    ) {
        let hexagon = hexagon_for(Coords::new(x, y));
        let (min, max) = hexagon.bounds();
        // Both ends strictly beyond one edge of the bounding box, at any slope
        let (start, end) = match side {
            0 => (
                DVec2::new(max.x + offset, max.y + along),
                DVec2::new(max.x + offset + away, max.y + along + spread),
            ),
            1 => (
                DVec2::new(min.x - offset, min.y + along),
                DVec2::new(min.x - offset - away, min.y + along + spread),
            ),
            2 => (
                DVec2::new(min.x + along, max.y + offset),
                DVec2::new(min.x + along + spread, max.y + offset + away),
            ),
            _ => (
                DVec2::new(max.x + along, min.y - offset),
                DVec2::new(max.x + along + spread, min.y - offset - away),
            ),
        };
        prop_assert!(!intersects(&Segment::new(start, end), &hexagon));
        prop_assert!(!intersects(&Segment::new(end, start), &hexagon));
    }

    #[test]
    fn prop_segment_through_center_intersects(
        x in 0i32..50,
        y in 0i32..50,
        angle in 0.0f64..std::f64::consts::TAU,
        length in 0.1f64..20.0,
    ) {
        let hexagon = hexagon_for(Coords::new(x, y));
        let reach = DVec2::from_angle(angle) * length;
        let segment = Segment::new(hexagon.center - reach, hexagon.center + reach);
        prop_assert!(intersects(&segment, &hexagon));
    }

    #[test]
    fn prop_center_to_center_hits_both_ends(
        ax in 0i32..30, ay in 0i32..30, bx in 0i32..30, by in 0i32..30,
    ) {
        let a = Coords::new(ax, ay);
        let b = Coords::new(bx, by);
        prop_assume!(a != b);
        let segment = segment_between(a, b);
        prop_assert!(intersects(&segment, &hexagon_for(a)));
        prop_assert!(intersects(&segment, &hexagon_for(b)));
    }
}
