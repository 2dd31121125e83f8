//! # waypoint-store
//!
//! Embedded SQLite persistence for trips, hotel/room observations, and the
//! compiled facts cache. [`StoreEngine`] is the local implementation of the
//! [`waypoint_core::TripBackend`] contract.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StoreEngine;

use waypoint_core::errors::{StorageError, WaypointError};

/// Map an underlying SQLite failure into the workspace error type.
pub(crate) fn to_storage_err(message: String) -> WaypointError {
    WaypointError::Storage(StorageError::Sqlite { message })
}
