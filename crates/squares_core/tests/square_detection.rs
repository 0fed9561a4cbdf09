use squares_core::{find_squares, find_squares_sequential, Coordinate, Square};
use std::collections::HashSet;

fn coords(pairs: &[(i32, i32)]) -> Vec<Coordinate> {
    pairs.iter().copied().map(Coordinate::from).collect()
}

fn key_set(squares: &[Square]) -> HashSet<[Coordinate; 4]> {
    squares.iter().map(Square::key).collect()
}

fn assert_no_duplicates(squares: &[Square]) {
    assert_eq!(key_set(squares).len(), squares.len(), "duplicate square emitted");
}

#[test]
fn fewer_than_four_points_never_form_a_square() {
    for points in [
        coords(&[]),
        coords(&[(0, 0)]),
        coords(&[(0, 0), (1, 1)]),
        coords(&[(0, 0), (0, 1), (1, 0)]),
    ] {
        assert!(find_squares(&points).is_empty());
    }
}

#[test]
fn square_centered_on_origin_is_found_once() {
    let points = coords(&[(-1, 1), (1, 1), (1, -1), (-1, -1)]);
    let squares = find_squares(&points);

    assert_eq!(squares.len(), 1);
    for corner in &points {
        assert!(squares[0].contains(*corner));
    }
    assert!(squares[0].is_square());
}

#[test]
fn rhombus_like_configuration_is_not_a_square() {
    let points = coords(&[(0, 0), (1, 2), (2, 1), (3, 3)]);
    assert!(find_squares(&points).is_empty());
}

#[test]
fn disjoint_unit_squares_are_reported_separately() {
    let points = coords(&[
        (0, 0),
        (0, 1),
        (1, 0),
        (1, 1),
        (2, 2),
        (2, 3),
        (3, 2),
        (3, 3),
    ]);
    let squares = find_squares(&points);

    assert_eq!(squares.len(), 2);
    let expected: HashSet<[Coordinate; 4]> = [
        Square::from_corners([
            Coordinate::new(0, 0),
            Coordinate::new(0, 1),
            Coordinate::new(1, 0),
            Coordinate::new(1, 1),
        ])
        .key(),
        Square::from_corners([
            Coordinate::new(2, 2),
            Coordinate::new(2, 3),
            Coordinate::new(3, 2),
            Coordinate::new(3, 3),
        ])
        .key(),
    ]
    .into_iter()
    .collect();
    assert_eq!(key_set(&squares), expected);
}

#[test]
fn rotated_lattice_squares_are_detected() {
    // Edge vectors (2, 1), (3, -1) and (1, 4) rotated about different anchors.
    let cases = [
        coords(&[(0, 0), (2, 1), (1, 3), (-1, 2)]),
        coords(&[(5, 5), (8, 4), (9, 7), (6, 8)]),
        coords(&[(-10, -10), (-9, -6), (-13, -5), (-14, -9)]),
    ];

    for points in cases {
        let squares = find_squares(&points);
        assert_eq!(squares.len(), 1, "missed rotated square {points:?}");
        assert!(squares[0].is_square());
    }
}

#[test]
fn negative_coordinates_behave_like_positive_ones() {
    let shifted = coords(&[(-100, -100), (-100, -97), (-97, -100), (-97, -97)]);
    assert_eq!(find_squares(&shifted).len(), 1);
}

#[test]
fn lattice_output_has_no_duplicates_and_matches_sequential() {
    let points: Vec<Coordinate> = (-3..4)
        .flat_map(|x| (-3..4).map(move |y| Coordinate::new(x, y)))
        .collect();

    let parallel = find_squares(&points);
    let sequential = find_squares_sequential(&points);

    assert_no_duplicates(&parallel);
    assert_no_duplicates(&sequential);
    assert_eq!(key_set(&parallel), key_set(&sequential));
    // 7x7 lattice: sum over k=1..6 of (7-k)^2 * k.
    assert_eq!(parallel.len(), 196);
    assert!(parallel.iter().all(Square::is_square));
}

#[test]
fn input_order_does_not_change_the_result() {
    let mut points = coords(&[(0, 0), (2, 1), (1, 3), (-1, 2), (0, 1), (1, 1), (1, 0)]);
    let forward = key_set(&find_squares(&points));
    points.reverse();
    let backward = key_set(&find_squares(&points));
    assert_eq!(forward, backward);
    assert_eq!(forward.len(), 2);
}
