//! Trip row CRUD and the dirty-flag protocol.

use rusqlite::{params, Connection};

use waypoint_core::errors::WaypointResult;
use waypoint_core::models::{Traveler, Trip};

use super::{parse_dt, OptionalRow};
use crate::to_storage_err;

/// Insert a new trip row. Fails on a duplicate id.
pub fn insert_trip(conn: &Connection, trip: &Trip) -> WaypointResult<()> {
    let party_json = serde_json::to_string(&trip.party)?;
    conn.execute(
        "INSERT INTO trips (id, title, party, destinations, facts_dirty, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            trip.id,
            trip.title,
            party_json,
            trip.destinations,
            trip.facts_dirty as i32,
            trip.created_at.to_rfc3339(),
            trip.updated_at.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Get a single trip by id.
pub fn get_trip(conn: &Connection, id: &str) -> WaypointResult<Option<Trip>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, title, party, destinations, facts_dirty, created_at, updated_at
             FROM trips WHERE id = ?1",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let result = stmt
        .query_row(params![id], |row| Ok(row_to_trip(row)))
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    result.transpose()
}

/// All trips, most recently created first.
pub fn list_trips(conn: &Connection) -> WaypointResult<Vec<Trip>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, title, party, destinations, facts_dirty, created_at, updated_at
             FROM trips ORDER BY created_at DESC",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map([], |row| Ok(row_to_trip(row)))
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;

    rows.into_iter().collect()
}

/// Flip the trip's advisory dirty flag, bumping `updated_at`.
/// A missing trip updates zero rows; ingestion into an unknown trip is
/// permitted (observations are orphaned until the trip appears).
pub fn set_facts_dirty(conn: &Connection, trip_id: &str, dirty: bool) -> WaypointResult<()> {
    conn.execute(
        "UPDATE trips SET facts_dirty = ?2, updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
         WHERE id = ?1",
        params![trip_id, dirty as i32],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Parse a row from the trips table.
fn row_to_trip(row: &rusqlite::Row<'_>) -> WaypointResult<Trip> {
    let party_json: String = row.get(2).map_err(|e| to_storage_err(e.to_string()))?;
    let party: Vec<Traveler> = serde_json::from_str(&party_json)
        .map_err(|e| to_storage_err(format!("parse party: {e}")))?;

    let created_str: String = row.get(5).map_err(|e| to_storage_err(e.to_string()))?;
    let updated_str: String = row.get(6).map_err(|e| to_storage_err(e.to_string()))?;

    Ok(Trip {
        id: row.get(0).map_err(|e| to_storage_err(e.to_string()))?,
        title: row.get(1).map_err(|e| to_storage_err(e.to_string()))?,
        party,
        destinations: row.get(3).map_err(|e| to_storage_err(e.to_string()))?,
        facts_dirty: row
            .get::<_, i32>(4)
            .map_err(|e| to_storage_err(e.to_string()))?
            != 0,
        created_at: parse_dt(&created_str)?,
        updated_at: parse_dt(&updated_str)?,
    })
}
