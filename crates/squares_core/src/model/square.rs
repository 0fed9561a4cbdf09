//! Square value derived from four stored coordinates.
//!
//! # Responsibility
//! - Hold the four corners of a detected square in canonical order.
//! - Provide the geometric check used to validate detection output.
//!
//! # Invariants
//! - `corners` are sorted by `(x, y)`, so equality of two squares is equality
//!   of their corner sets.

use crate::model::point::Coordinate;
use serde::{Deserialize, Serialize};

/// Canonical deduplication key: the four corners sorted by `(x, y)`.
pub type SquareKey = [Coordinate; 4];

/// Four corners forming one (possibly rotated) square.
///
/// Serialized as its corner array; deserialization goes through
/// `from_corners`, so decoded squares are canonical too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "SquareKey", into = "SquareKey")]
pub struct Square {
    corners: SquareKey,
}

impl Square {
    /// Builds a square from corners in any order.
    ///
    /// Does not validate geometry; callers that accept untrusted corners should
    /// check `is_square()`.
    pub fn from_corners(corners: [Coordinate; 4]) -> Self {
        Self {
            corners: canonical_key(corners),
        }
    }

    /// Corners in canonical `(x, y)` order.
    pub fn corners(&self) -> &SquareKey {
        &self.corners
    }

    /// Canonical key used for deduplication.
    pub fn key(&self) -> SquareKey {
        self.corners
    }

    pub fn contains(&self, coordinate: Coordinate) -> bool {
        self.corners.contains(&coordinate)
    }

    /// Squared side length.
    pub fn side_squared(&self) -> i128 {
        let mut distances = self.pairwise_distances();
        distances.sort_unstable();
        distances[0]
    }

    /// Checks the four-equal-sides, two-equal-diagonals invariant with
    /// `diagonal² == 2 * side²` and a non-zero side.
    pub fn is_square(&self) -> bool {
        let mut distances = self.pairwise_distances();
        distances.sort_unstable();
        let side = distances[0];
        let diagonal = distances[4];
        side > 0
            && distances[..4].iter().all(|value| *value == side)
            && distances[4..].iter().all(|value| *value == diagonal)
            && diagonal == 2 * side
    }

    fn pairwise_distances(&self) -> [i128; 6] {
        let c = &self.corners;
        [
            c[0].distance_squared(c[1]),
            c[0].distance_squared(c[2]),
            c[0].distance_squared(c[3]),
            c[1].distance_squared(c[2]),
            c[1].distance_squared(c[3]),
            c[2].distance_squared(c[3]),
        ]
    }
}

/// Sorts four corners into canonical `(x asc, y asc)` order.
pub fn canonical_key(mut corners: [Coordinate; 4]) -> SquareKey {
    corners.sort_unstable();
    corners
}

impl From<SquareKey> for Square {
    fn from(corners: SquareKey) -> Self {
        Self::from_corners(corners)
    }
}

impl From<Square> for SquareKey {
    fn from(square: Square) -> Self {
        square.corners
    }
}

#[cfg(test)]
mod tests {
    use super::Square;
    use crate::model::point::Coordinate;

    fn c(x: i32, y: i32) -> Coordinate {
        Coordinate::new(x, y)
    }

    #[test]
    fn deserialized_corners_are_canonicalized() {
        let json = r#"[{"x":1,"y":1},{"x":0,"y":1},{"x":1,"y":0},{"x":0,"y":0}]"#;
        let decoded: Square = serde_json::from_str(json).unwrap();

        assert_eq!(decoded.corners(), &[c(0, 0), c(0, 1), c(1, 0), c(1, 1)]);
        assert_eq!(decoded, Square::from_corners([c(0, 0), c(1, 0), c(0, 1), c(1, 1)]));

        let encoded = serde_json::to_string(&decoded).unwrap();
        assert_eq!(serde_json::from_str::<Square>(&encoded).unwrap(), decoded);
    }

    #[test]
    fn corner_order_does_not_affect_equality() {
        let a = Square::from_corners([c(0, 0), c(1, 1), c(0, 1), c(1, 0)]);
        let b = Square::from_corners([c(1, 0), c(0, 1), c(1, 1), c(0, 0)]);
        assert_eq!(a, b);
        assert_eq!(a.corners()[0], c(0, 0));
        assert_eq!(a.corners()[3], c(1, 1));
    }

    #[test]
    fn is_square_accepts_rotated_and_rejects_rhombus() {
        let tilted = Square::from_corners([c(0, 0), c(2, 1), c(1, 3), c(-1, 2)]);
        assert!(tilted.is_square());
        assert_eq!(tilted.side_squared(), 5);

        let rhombus = Square::from_corners([c(0, 0), c(2, 1), c(3, 3), c(1, 2)]);
        assert!(!rhombus.is_square());
    }
}
