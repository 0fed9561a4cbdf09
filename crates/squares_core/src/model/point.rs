//! Point domain model.
//!
//! # Responsibility
//! - Define integer lattice coordinates and identified stored points.
//!
//! # Invariants
//! - `id` is assigned by the store and never changes for a point lifetime.
//! - Coordinates are unique across the store at any instant.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Store-assigned identifier of a point.
pub type PointId = i64;

/// Integer lattice coordinate.
///
/// Ordering is by `x` ascending, then `y` ascending, which is the order used
/// for canonical square keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns this coordinate shifted by `(dx, dy)`.
    ///
    /// Returns `None` when the result leaves the `i32` lattice; such a
    /// coordinate can never be stored.
    pub fn offset(self, dx: i64, dy: i64) -> Option<Self> {
        let x = i32::try_from(i64::from(self.x) + dx).ok()?;
        let y = i32::try_from(i64::from(self.y) + dy).ok()?;
        Some(Self { x, y })
    }

    /// Squared euclidean distance to `other`, widened so it cannot overflow.
    pub fn distance_squared(self, other: Self) -> i128 {
        let dx = i128::from(other.x) - i128::from(self.x);
        let dy = i128::from(other.y) - i128::from(self.y);
        dx * dx + dy * dy
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Stored point record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    /// Stable store-assigned ID.
    pub id: PointId,
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(id: PointId, x: i32, y: i32) -> Self {
        Self { id, x, y }
    }

    /// Coordinate pair of this point, without identity.
    pub const fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::Coordinate;

    #[test]
    fn ordering_is_x_then_y() {
        let mut coords = vec![
            Coordinate::new(1, 0),
            Coordinate::new(0, 5),
            Coordinate::new(0, -2),
        ];
        coords.sort();
        assert_eq!(
            coords,
            vec![
                Coordinate::new(0, -2),
                Coordinate::new(0, 5),
                Coordinate::new(1, 0)
            ]
        );
    }

    #[test]
    fn offset_rejects_values_outside_i32() {
        let edge = Coordinate::new(i32::MAX, i32::MIN);
        assert_eq!(edge.offset(1, 0), None);
        assert_eq!(edge.offset(0, -1), None);
        assert_eq!(edge.offset(-1, 1), Some(Coordinate::new(i32::MAX - 1, i32::MIN + 1)));
    }
}
