//! v001: trips, hotel_cache, room_cache, trip_facts.

use rusqlite::Connection;

use waypoint_core::errors::WaypointResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> WaypointResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS trips (
            id           TEXT PRIMARY KEY,
            title        TEXT NOT NULL,
            party        TEXT NOT NULL DEFAULT '[]',
            destinations TEXT NOT NULL DEFAULT '',
            facts_dirty  INTEGER NOT NULL DEFAULT 0,
            created_at   TEXT NOT NULL,
            updated_at   TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_trips_created ON trips(created_at);

        CREATE TABLE IF NOT EXISTS hotel_cache (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            trip_id     TEXT NOT NULL,
            city        TEXT NOT NULL,
            site        TEXT NOT NULL,
            hotel_data  TEXT NOT NULL,
            lead_price  REAL NOT NULL DEFAULT 0,
            ingested_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_hotel_cache_trip ON hotel_cache(trip_id);
        CREATE INDEX IF NOT EXISTS idx_hotel_cache_trip_city ON hotel_cache(trip_id, city);
        CREATE INDEX IF NOT EXISTS idx_hotel_cache_trip_price ON hotel_cache(trip_id, lead_price);

        CREATE TABLE IF NOT EXISTS room_cache (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            trip_id     TEXT NOT NULL,
            hotel_key   TEXT NOT NULL,
            site        TEXT NOT NULL,
            room_data   TEXT NOT NULL,
            total_price REAL NOT NULL DEFAULT 0,
            ingested_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_room_cache_trip ON room_cache(trip_id);

        CREATE TABLE IF NOT EXISTS trip_facts (
            trip_id        TEXT PRIMARY KEY,
            facts          TEXT NOT NULL,
            lead_price_min REAL,
            updated_at     TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_trip_facts_price ON trip_facts(lead_price_min);
        CREATE INDEX IF NOT EXISTS idx_trip_facts_updated ON trip_facts(updated_at);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
