//! Cache-aware square computation entry point.

use crate::config::EngineConfig;
use crate::engine::cache::{PointSnapshot, SquareCache};
use crate::engine::detect::{squares_in_parallel, squares_in_sequence};
use crate::model::point::Point;
use crate::model::square::Square;
use log::{debug, info};
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Instant;

/// Owns the result cache and the detection scheduling policy.
///
/// `Send + Sync`; share through `Arc` when several callers query concurrently.
pub struct SquareEngine {
    cache: SquareCache,
    pool: Option<ThreadPool>,
    parallel_threshold: usize,
}

impl Default for SquareEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SquareEngine {
    /// Creates an engine with default config on the global rayon pool.
    pub fn new() -> Self {
        Self {
            cache: SquareCache::new(),
            pool: None,
            parallel_threshold: EngineConfig::default().parallel_threshold,
        }
    }

    /// Creates an engine from config, building a dedicated pool when
    /// `worker_threads` is set.
    ///
    /// # Errors
    /// - Returns an error when the worker pool cannot be started.
    pub fn with_config(config: &EngineConfig) -> Result<Self, ThreadPoolBuildError> {
        let pool = match config.worker_threads {
            Some(threads) => Some(
                ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|index| format!("squares-worker-{index}"))
                    .build()?,
            ),
            None => None,
        };

        Ok(Self {
            cache: SquareCache::new(),
            pool,
            parallel_threshold: config.parallel_threshold,
        })
    }

    /// Returns squares for `points`, reusing the cached result on a hit.
    pub fn compute_squares(&self, points: &[Point]) -> Arc<[Square]> {
        let result: Result<_, Infallible> = self.compute_squares_with(|| Ok(points.to_vec()));
        match result {
            Ok(squares) => squares,
            Err(never) => match never {},
        }
    }

    /// Fetches the current points through `fetch` and returns their squares.
    ///
    /// The cache epoch is read before `fetch` runs, so a result computed
    /// from points that an invalidation has since superseded is returned to
    /// this caller but never published.
    ///
    /// # Errors
    /// - Propagates `fetch` errors unchanged; the cache is left untouched.
    pub fn compute_squares_with<E, F>(&self, fetch: F) -> Result<Arc<[Square]>, E>
    where
        F: FnOnce() -> Result<Vec<Point>, E>,
    {
        let epoch = self.cache.epoch();
        let points = fetch()?;
        let snapshot = PointSnapshot::from_points(&points);

        if let Some(squares) = self.cache.lookup(&snapshot) {
            debug!(
                "event=squares_compute module=engine status=hit points={} squares={}",
                snapshot.len(),
                squares.len()
            );
            return Ok(squares);
        }

        let started_at = Instant::now();
        let squares: Arc<[Square]> = self.detect(&snapshot).into();
        let point_count = snapshot.len();
        let published = self.cache.publish(epoch, snapshot, Arc::clone(&squares));
        info!(
            "event=squares_compute module=engine status=miss points={} squares={} published={} duration_ms={}",
            point_count,
            squares.len(),
            published,
            started_at.elapsed().as_millis()
        );

        Ok(squares)
    }

    /// Clears the cached result. Idempotent.
    pub fn invalidate(&self) {
        self.cache.invalidate();
        debug!("event=squares_cache_invalidate module=engine status=ok");
    }

    /// Whether a result is currently cached.
    pub fn is_cached(&self) -> bool {
        self.cache.is_populated()
    }

    /// How many times the cache has been invalidated.
    pub fn invalidation_count(&self) -> u64 {
        self.cache.invalidations()
    }

    fn detect(&self, snapshot: &PointSnapshot) -> Vec<Square> {
        let lookup = snapshot.coordinates();
        if lookup.len() < self.parallel_threshold {
            return squares_in_sequence(lookup);
        }

        match &self.pool {
            Some(pool) => pool.install(|| squares_in_parallel(lookup)),
            None => squares_in_parallel(lookup),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SquareEngine;
    use crate::config::EngineConfig;
    use crate::model::point::Point;
    use std::sync::Arc;

    fn unit_square_points() -> Vec<Point> {
        vec![
            Point::new(1, 0, 0),
            Point::new(2, 0, 1),
            Point::new(3, 1, 0),
            Point::new(4, 1, 1),
        ]
    }

    #[test]
    fn second_call_reuses_cached_result() {
        let engine = SquareEngine::new();
        let first = engine.compute_squares(&unit_square_points());
        assert!(engine.is_cached());

        let mut reordered = unit_square_points();
        reordered.reverse();
        let second = engine.compute_squares(&reordered);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn invalidate_forces_recomputation() {
        let engine = SquareEngine::new();
        let first = engine.compute_squares(&unit_square_points());
        engine.invalidate();
        assert!(!engine.is_cached());
        assert_eq!(engine.invalidation_count(), 1);
        engine.invalidate();
        assert_eq!(engine.invalidation_count(), 2);

        let second = engine.compute_squares(&unit_square_points());
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(first.as_ref(), second.as_ref());
    }

    #[test]
    fn dedicated_pool_and_sequential_paths_agree() {
        let points: Vec<Point> = (0..6)
            .flat_map(|x| (0..6).map(move |y| (x, y)))
            .enumerate()
            .map(|(id, (x, y))| Point::new(id as i64, x, y))
            .collect();

        let pooled = SquareEngine::with_config(&EngineConfig {
            worker_threads: Some(2),
            parallel_threshold: 0,
        })
        .unwrap();
        let inline = SquareEngine::with_config(&EngineConfig {
            worker_threads: None,
            parallel_threshold: usize::MAX,
        })
        .unwrap();

        let mut a = pooled.compute_squares(&points).to_vec();
        let mut b = inline.compute_squares(&points).to_vec();
        a.sort_by_key(|square| square.key());
        b.sort_by_key(|square| square.key());
        assert_eq!(a, b);
        // 6x6 lattice: sum over k=1..5 of (6-k)^2 * k squares.
        assert_eq!(a.len(), 105);
    }

    #[test]
    fn fetch_error_leaves_cache_untouched() {
        let engine = SquareEngine::new();
        engine.compute_squares(&unit_square_points());

        let result: Result<_, &str> = engine.compute_squares_with(|| Err("store down"));
        assert_eq!(result.unwrap_err(), "store down");
        assert!(engine.is_cached());
    }
}
