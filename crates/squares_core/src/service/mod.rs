//! Core use-case services.
//!
//! # Responsibility
//! - Guard point mutations before they reach the store.
//! - Keep the square cache consistent with accepted mutations.

pub mod point_service;
