//! Square detection engine.
//!
//! # Responsibility
//! - Find every square whose four corners are present in a point set.
//! - Cache the last result keyed by the exact coordinate snapshot.
//! - Expose explicit invalidation for the mutation layer.
//!
//! # Invariants
//! - Detection is a pure function of the coordinate set.
//! - The cache lock is never held while detection runs.

pub mod cache;
pub mod detect;
mod square_engine;

pub use cache::{CacheEpoch, PointSnapshot, SquareCache};
pub use detect::{find_squares, find_squares_sequential};
pub use square_engine::SquareEngine;
