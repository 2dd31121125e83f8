//! Versioned schema migrations, tracked in `schema_migrations`.

mod v001_trip_tables;

use rusqlite::Connection;

use waypoint_core::errors::{StorageError, WaypointError, WaypointResult};

use crate::to_storage_err;

/// Ordered list of migrations. Each runs at most once per database.
const MIGRATIONS: &[(u32, fn(&Connection) -> WaypointResult<()>)] =
    &[(1, v001_trip_tables::migrate)];

/// Apply all pending migrations.
pub fn run_migrations(conn: &Connection) -> WaypointResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version    INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        )",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    let current = current_version(conn)?;
    for (version, migrate) in MIGRATIONS {
        if *version <= current {
            continue;
        }
        migrate(conn).map_err(|e| {
            WaypointError::Storage(StorageError::MigrationFailed {
                version: *version,
                reason: e.to_string(),
            })
        })?;
        conn.execute(
            "INSERT INTO schema_migrations (version) VALUES (?1)",
            [version],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
        tracing::info!(version, "applied schema migration");
    }
    Ok(())
}

/// Highest applied migration version, 0 for a fresh database.
pub fn current_version(conn: &Connection) -> WaypointResult<u32> {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )
    .map_err(|e| to_storage_err(e.to_string()))
}
