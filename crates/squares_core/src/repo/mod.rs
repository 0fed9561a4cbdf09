//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the point-store contract consumed by the service layer.
//! - Isolate SQLite query details from guard and detection logic.
//!
//! # Invariants
//! - Each write is atomic: fully applied or not applied at all.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod point_repo;
