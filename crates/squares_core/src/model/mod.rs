//! Domain model for stored points and derived squares.
//!
//! # Responsibility
//! - Define the coordinate and point shapes shared by storage and detection.
//! - Define the derived `Square` value and its canonical corner ordering.
//!
//! # Invariants
//! - Every stored point is identified by a store-assigned `PointId`.
//! - Squares are never stored; they are recomputed from the point set.

pub mod point;
pub mod square;
