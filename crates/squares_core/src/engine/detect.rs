//! Pairwise square detection over integer coordinates.
//!
//! Every unordered pair of distinct coordinates is treated as one edge of a
//! candidate square. The two remaining corners are obtained by rotating the
//! edge vector `(dx, dy)` by ±90°, i.e. offsetting both endpoints by
//! `(-dy, dx)` or `(dy, -dx)`. A square is reported when both offset corners
//! exist. Each square is found from several pairs, so discoveries are
//! deduplicated on the canonical corner key.

use crate::model::point::Coordinate;
use crate::model::square::{Square, SquareKey};
use dashmap::DashSet;
use rayon::prelude::*;
use std::collections::HashSet;

const MIN_SQUARE_POINTS: usize = 4;

/// Finds all squares, evaluating pairs on the current rayon pool.
///
/// Duplicate coordinates in `points` are ignored. Result order is unspecified.
pub fn find_squares(points: &[Coordinate]) -> Vec<Square> {
    let lookup: HashSet<Coordinate> = points.iter().copied().collect();
    squares_in_parallel(&lookup)
}

/// Single-threaded variant of [`find_squares`] with identical output set.
pub fn find_squares_sequential(points: &[Coordinate]) -> Vec<Square> {
    let lookup: HashSet<Coordinate> = points.iter().copied().collect();
    squares_in_sequence(&lookup)
}

pub(crate) fn squares_in_parallel(lookup: &HashSet<Coordinate>) -> Vec<Square> {
    if lookup.len() < MIN_SQUARE_POINTS {
        return Vec::new();
    }

    let ordered = ordered_coordinates(lookup);
    let ordered = ordered.as_slice();
    let seen: DashSet<SquareKey> = DashSet::new();

    // `DashSet::insert` is the atomic insert-if-absent; the first discovery of
    // a key is kept. `collect` joins all workers before returning.
    (0..ordered.len())
        .into_par_iter()
        .flat_map_iter(move |i| {
            let p1 = ordered[i];
            ordered[i + 1..]
                .iter()
                .flat_map(move |&p2| candidate_squares(p1, p2, lookup))
                .flatten()
        })
        .filter(|square| seen.insert(square.key()))
        .collect()
}

pub(crate) fn squares_in_sequence(lookup: &HashSet<Coordinate>) -> Vec<Square> {
    if lookup.len() < MIN_SQUARE_POINTS {
        return Vec::new();
    }

    let ordered = ordered_coordinates(lookup);
    let mut seen: HashSet<SquareKey> = HashSet::new();
    let mut squares = Vec::new();

    for (i, &p1) in ordered.iter().enumerate() {
        for &p2 in &ordered[i + 1..] {
            for square in candidate_squares(p1, p2, lookup).into_iter().flatten() {
                if seen.insert(square.key()) {
                    squares.push(square);
                }
            }
        }
    }

    squares
}

/// Fixed indexing for `i < j` pair enumeration.
fn ordered_coordinates(lookup: &HashSet<Coordinate>) -> Vec<Coordinate> {
    let mut ordered: Vec<Coordinate> = lookup.iter().copied().collect();
    ordered.sort_unstable();
    ordered
}

/// Squares having `p1`-`p2` as an edge, one per rotation direction.
fn candidate_squares(
    p1: Coordinate,
    p2: Coordinate,
    lookup: &HashSet<Coordinate>,
) -> [Option<Square>; 2] {
    let dx = i64::from(p2.x) - i64::from(p1.x);
    let dy = i64::from(p2.y) - i64::from(p1.y);

    [(-dy, dx), (dy, -dx)].map(|(ox, oy)| {
        let p3 = p1.offset(ox, oy)?;
        let p4 = p2.offset(ox, oy)?;
        (lookup.contains(&p3) && lookup.contains(&p4))
            .then(|| Square::from_corners([p1, p2, p3, p4]))
    })
}
