//! Point use-case service.
//!
//! # Responsibility
//! - Validate add/update/delete/import before store mutation.
//! - Invalidate the square cache after every accepted mutation.
//! - Answer square queries from the current store contents.
//!
//! # Invariants
//! - A rejected mutation changes neither the store nor the cache.
//! - An accepted mutation triggers exactly one cache invalidation, before the
//!   call returns.
//! - Store failures are propagated unchanged; nothing is retried.

use crate::engine::SquareEngine;
use crate::model::point::{Coordinate, Point, PointId};
use crate::model::square::Square;
use crate::repo::point_repo::{PointRepository, RepoError};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

pub type ServiceResult<T> = Result<T, PointServiceError>;

/// Errors from point service operations.
#[derive(Debug)]
pub enum PointServiceError {
    /// Another point already occupies these coordinates.
    DuplicateCoordinate { x: i32, y: i32 },
    /// Target point does not exist.
    NotFound(PointId),
    /// Import batch was empty (`submitted == 0`) or held only duplicates.
    EmptyBatch { submitted: usize },
    /// Point store failure.
    Store(RepoError),
}

impl Display for PointServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateCoordinate { x, y } => {
                write!(f, "a point with coordinates ({x}, {y}) already exists")
            }
            Self::NotFound(id) => write!(f, "point not found: {id}"),
            Self::EmptyBatch { submitted: 0 } => write!(f, "points list cannot be empty"),
            Self::EmptyBatch { submitted } => {
                write!(f, "all {submitted} submitted points already exist")
            }
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PointServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for PointServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            other => Self::Store(other),
        }
    }
}

/// Outcome of a bulk import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    /// Points actually inserted, with assigned IDs.
    pub imported: Vec<Point>,
    /// Number of candidates in the request.
    pub submitted: usize,
    /// Candidates dropped as duplicates.
    pub skipped: usize,
}

/// Point service facade over a repository and a square engine.
pub struct PointService<R: PointRepository> {
    repo: R,
    engine: SquareEngine,
}

impl<R: PointRepository> PointService<R> {
    /// Creates a service with a default engine.
    pub fn new(repo: R) -> Self {
        Self::with_engine(repo, SquareEngine::new())
    }

    /// Creates a service with a caller-configured engine.
    pub fn with_engine(repo: R, engine: SquareEngine) -> Self {
        Self { repo, engine }
    }

    pub fn engine(&self) -> &SquareEngine {
        &self.engine
    }

    /// Lists all stored points.
    pub fn list_points(&self) -> ServiceResult<Vec<Point>> {
        Ok(self.repo.list_points()?)
    }

    /// Gets one point by ID; `None` when absent.
    pub fn get_point(&self, id: PointId) -> ServiceResult<Option<Point>> {
        Ok(self.repo.get_point(id)?)
    }

    /// Adds one point.
    ///
    /// # Errors
    /// - `DuplicateCoordinate` when `(x, y)` is already stored.
    pub fn add_point(&self, coordinate: Coordinate) -> ServiceResult<Point> {
        if self.repo.exists(coordinate.x, coordinate.y, None)? {
            return Err(self.reject_duplicate("point_add", coordinate));
        }

        let point = self.repo.add_point(coordinate)?;
        self.engine.invalidate();
        info!(
            "event=point_add module=service status=ok point_id={}",
            point.id
        );
        Ok(point)
    }

    /// Moves an existing point to new coordinates and returns it.
    ///
    /// # Errors
    /// - `NotFound` when `id` is absent.
    /// - `DuplicateCoordinate` when another point holds `(x, y)`.
    pub fn update_point(&self, id: PointId, coordinate: Coordinate) -> ServiceResult<Point> {
        if self.repo.get_point(id)?.is_none() {
            return Err(self.reject_missing("point_update", id));
        }
        if self.repo.exists(coordinate.x, coordinate.y, Some(id))? {
            return Err(self.reject_duplicate("point_update", coordinate));
        }

        self.repo.update_point(id, coordinate)?;
        self.engine.invalidate();
        info!("event=point_update module=service status=ok point_id={id}");
        Ok(Point::new(id, coordinate.x, coordinate.y))
    }

    /// Deletes one point.
    ///
    /// # Errors
    /// - `NotFound` when `id` is absent.
    pub fn delete_point(&self, id: PointId) -> ServiceResult<()> {
        if self.repo.get_point(id)?.is_none() {
            return Err(self.reject_missing("point_delete", id));
        }

        self.repo.delete_point(id)?;
        self.engine.invalidate();
        info!("event=point_delete module=service status=ok point_id={id}");
        Ok(())
    }

    /// Imports a batch, skipping coordinates that are already stored or that
    /// repeat earlier in the batch.
    ///
    /// # Errors
    /// - `EmptyBatch` when the batch is empty or nothing new remains.
    pub fn import_points(&self, candidates: &[Coordinate]) -> ServiceResult<ImportSummary> {
        let submitted = candidates.len();
        if submitted == 0 {
            warn!("event=point_import module=service status=rejected reason=empty_batch");
            return Err(PointServiceError::EmptyBatch { submitted });
        }

        let mut taken: HashSet<Coordinate> = self
            .repo
            .list_points()?
            .iter()
            .map(Point::coordinate)
            .collect();
        let fresh: Vec<Coordinate> = candidates
            .iter()
            .copied()
            .filter(|coordinate| taken.insert(*coordinate))
            .collect();

        if fresh.is_empty() {
            warn!(
                "event=point_import module=service status=rejected reason=all_duplicates submitted={submitted}"
            );
            return Err(PointServiceError::EmptyBatch { submitted });
        }

        let imported = self.repo.add_points(&fresh)?;
        self.engine.invalidate();
        let skipped = submitted - imported.len();
        info!(
            "event=point_import module=service status=ok submitted={} imported={} skipped={}",
            submitted,
            imported.len(),
            skipped
        );

        Ok(ImportSummary {
            imported,
            submitted,
            skipped,
        })
    }

    /// Returns every square formed by the stored points.
    ///
    /// # Errors
    /// - `Store` when the point set cannot be fetched.
    pub fn compute_squares(&self) -> ServiceResult<Arc<[Square]>> {
        self.engine
            .compute_squares_with(|| self.repo.list_points())
            .map_err(PointServiceError::from)
    }

    /// Clears the square cache without touching the store.
    pub fn invalidate(&self) {
        self.engine.invalidate();
    }

    fn reject_duplicate(&self, event: &str, coordinate: Coordinate) -> PointServiceError {
        warn!("event={event} module=service status=rejected reason=duplicate_coordinate");
        PointServiceError::DuplicateCoordinate {
            x: coordinate.x,
            y: coordinate.y,
        }
    }

    fn reject_missing(&self, event: &str, id: PointId) -> PointServiceError {
        warn!("event={event} module=service status=rejected reason=not_found point_id={id}");
        PointServiceError::NotFound(id)
    }
}
