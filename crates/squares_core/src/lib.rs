//! Integer point store and square detection.
//! This crate owns the detection algorithm, its result cache and the mutation
//! guard that keeps the cache consistent with the store.

pub mod config;
pub mod db;
pub mod engine;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::EngineConfig;
pub use engine::{
    find_squares, find_squares_sequential, PointSnapshot, SquareCache, SquareEngine,
};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::point::{Coordinate, Point, PointId};
pub use model::square::{Square, SquareKey};
pub use repo::point_repo::{PointRepository, RepoError, RepoResult, SqlitePointRepository};
pub use service::point_service::{ImportSummary, PointService, PointServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
