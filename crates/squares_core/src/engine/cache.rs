//! Single-slot cache of the last square detection result.
//!
//! # Responsibility
//! - Hold `(snapshot, squares)` for the most recent published computation.
//! - Answer hits by set equality of coordinate snapshots.
//! - Clear the slot on invalidation and fence off stale publications.
//!
//! # Invariants
//! - The mutex guards only compare, replace and clear; never detection.
//! - After `invalidate()` returns, no lookup can return the cleared result.
//! - A computation that started before an invalidation never publishes.

use crate::model::point::{Coordinate, Point};
use crate::model::square::Square;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Unordered set of coordinates present at one instant.
///
/// Point IDs are excluded: geometry depends only on coordinates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PointSnapshot {
    coordinates: HashSet<Coordinate>,
}

impl PointSnapshot {
    pub fn from_points(points: &[Point]) -> Self {
        Self {
            coordinates: points.iter().map(Point::coordinate).collect(),
        }
    }

    pub fn from_coordinates(coordinates: impl IntoIterator<Item = Coordinate>) -> Self {
        Self {
            coordinates: coordinates.into_iter().collect(),
        }
    }

    pub fn coordinates(&self) -> &HashSet<Coordinate> {
        &self.coordinates
    }

    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }
}

/// Invalidation counter value observed when a computation started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheEpoch(u64);

#[derive(Debug)]
struct CachedSquares {
    snapshot: PointSnapshot,
    squares: Arc<[Square]>,
}

#[derive(Debug, Default)]
struct CacheSlot {
    epoch: u64,
    entry: Option<CachedSquares>,
}

/// Mutex-guarded result slot: `Empty` or `Populated(snapshot, squares)`.
#[derive(Debug, Default)]
pub struct SquareCache {
    slot: Mutex<CacheSlot>,
}

impl SquareCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current epoch; take it before fetching the points to compute from.
    pub fn epoch(&self) -> CacheEpoch {
        CacheEpoch(self.lock().epoch)
    }

    /// Returns the cached squares when `snapshot` set-equals the cached one.
    pub fn lookup(&self, snapshot: &PointSnapshot) -> Option<Arc<[Square]>> {
        let slot = self.lock();
        slot.entry
            .as_ref()
            .filter(|entry| entry.snapshot == *snapshot)
            .map(|entry| Arc::clone(&entry.squares))
    }

    /// Replaces the slot unless an invalidation happened since `epoch`.
    ///
    /// Returns whether the result was stored.
    pub fn publish(
        &self,
        epoch: CacheEpoch,
        snapshot: PointSnapshot,
        squares: Arc<[Square]>,
    ) -> bool {
        let mut slot = self.lock();
        if slot.epoch != epoch.0 {
            return false;
        }
        slot.entry = Some(CachedSquares { snapshot, squares });
        true
    }

    /// Clears the slot unconditionally. Safe to call when already empty.
    pub fn invalidate(&self) {
        let mut slot = self.lock();
        slot.entry = None;
        slot.epoch = slot.epoch.wrapping_add(1);
    }

    pub fn is_populated(&self) -> bool {
        self.lock().entry.is_some()
    }

    /// Number of `invalidate` calls so far (wraps at `u64::MAX`).
    pub fn invalidations(&self) -> u64 {
        self.lock().epoch
    }

    // Every critical section leaves the slot consistent, so a poisoned lock
    // still holds valid state.
    fn lock(&self) -> MutexGuard<'_, CacheSlot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
