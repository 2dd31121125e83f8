//! The single serialized write connection.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use waypoint_core::errors::{StorageError, WaypointError, WaypointResult};

use super::pragmas::apply_pragmas;
use crate::to_storage_err;

/// Owns the one connection allowed to write. All writers serialize on the
/// inner mutex; WAL keeps readers unblocked meanwhile.
pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    /// Open the write connection for the given database file.
    pub fn open(path: &Path) -> WaypointResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory write connection (for testing).
    pub fn open_in_memory() -> WaypointResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Execute a closure while holding the write connection.
    pub fn with_conn_sync<F, T>(&self, f: F) -> WaypointResult<T>
    where
        F: FnOnce(&Connection) -> WaypointResult<T>,
    {
        let guard = self.conn.lock().map_err(|e| {
            WaypointError::Storage(StorageError::PoolPoisoned {
                reason: e.to_string(),
            })
        })?;
        f(&guard)
    }
}
