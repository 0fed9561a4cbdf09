//! Point repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and duplicate-coordinate checks over `points` storage.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - `(x, y)` is unique in storage (enforced by a table constraint too).
//! - Batch inserts run in one transaction.
//! - Read paths reject out-of-range persisted coordinates instead of
//!   truncating them.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::point::{Coordinate, Point, PointId};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const POINT_SELECT_SQL: &str = "SELECT id, x, y FROM points";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for point persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(PointId),
    InvalidData(String),
    /// Connection schema does not match what this binary expects.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "point not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted point data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Point store contract consumed by the service layer.
pub trait PointRepository {
    /// Returns every stored point, ordered by ID.
    fn list_points(&self) -> RepoResult<Vec<Point>>;
    /// Gets one point by ID.
    fn get_point(&self, id: PointId) -> RepoResult<Option<Point>>;
    /// Returns whether `(x, y)` is taken, optionally ignoring one point ID.
    fn exists(&self, x: i32, y: i32, exclude_id: Option<PointId>) -> RepoResult<bool>;
    /// Inserts one point and returns it with its assigned ID.
    fn add_point(&self, coordinate: Coordinate) -> RepoResult<Point>;
    /// Inserts all coordinates in one transaction.
    fn add_points(&self, coordinates: &[Coordinate]) -> RepoResult<Vec<Point>>;
    /// Replaces coordinates of an existing point.
    fn update_point(&self, id: PointId, coordinate: Coordinate) -> RepoResult<()>;
    /// Deletes one point.
    fn delete_point(&self, id: PointId) -> RepoResult<()>;
}

/// SQLite-backed point repository.
pub struct SqlitePointRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePointRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_point_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl PointRepository for SqlitePointRepository<'_> {
    fn list_points(&self) -> RepoResult<Vec<Point>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{POINT_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut points = Vec::new();

        while let Some(row) = rows.next()? {
            points.push(parse_point_row(row)?);
        }

        Ok(points)
    }

    fn get_point(&self, id: PointId) -> RepoResult<Option<Point>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{POINT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_point_row(row)?));
        }

        Ok(None)
    }

    fn exists(&self, x: i32, y: i32, exclude_id: Option<PointId>) -> RepoResult<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1
                 FROM points
                 WHERE x = ?1
                   AND y = ?2
                   AND (?3 IS NULL OR id <> ?3)
                 LIMIT 1;",
                params![x, y, exclude_id],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn add_point(&self, coordinate: Coordinate) -> RepoResult<Point> {
        Ok(insert_point(self.conn, coordinate)?)
    }

    fn add_points(&self, coordinates: &[Coordinate]) -> RepoResult<Vec<Point>> {
        let tx = self.conn.unchecked_transaction()?;
        let mut inserted = Vec::with_capacity(coordinates.len());
        for coordinate in coordinates {
            inserted.push(insert_point(&tx, *coordinate)?);
        }
        tx.commit()?;

        Ok(inserted)
    }

    fn update_point(&self, id: PointId, coordinate: Coordinate) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE points SET x = ?1, y = ?2 WHERE id = ?3;",
            params![coordinate.x, coordinate.y, id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn delete_point(&self, id: PointId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM points WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn insert_point(conn: &Connection, coordinate: Coordinate) -> rusqlite::Result<Point> {
    conn.execute(
        "INSERT INTO points (x, y) VALUES (?1, ?2);",
        params![coordinate.x, coordinate.y],
    )?;
    Ok(Point::new(
        conn.last_insert_rowid(),
        coordinate.x,
        coordinate.y,
    ))
}

fn parse_point_row(row: &Row<'_>) -> RepoResult<Point> {
    let id: PointId = row.get("id")?;
    let x = parse_axis(row, "x", id)?;
    let y = parse_axis(row, "y", id)?;
    Ok(Point::new(id, x, y))
}

fn parse_axis(row: &Row<'_>, column: &'static str, id: PointId) -> RepoResult<i32> {
    let value: i64 = row.get(column)?;
    i32::try_from(value).map_err(|_| {
        RepoError::InvalidData(format!(
            "coordinate `{value}` out of range in points.{column} for id {id}"
        ))
    })
}

fn ensure_point_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }
    Ok(())
}
