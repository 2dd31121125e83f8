//! Observation ingestion. Each batch commits atomically: all rows plus the
//! owning trip's dirty-flag flip, or nothing.

use chrono::Utc;
use rusqlite::{params, Connection};

use waypoint_core::errors::WaypointResult;
use waypoint_core::models::{HotelIngest, RoomIngest};

use super::trip_ops::set_facts_dirty;
use crate::to_storage_err;

/// Insert one row per hotel payload and mark the trip's facts stale.
/// Returns the number of rows ingested.
pub fn insert_hotels(conn: &Connection, batch: &HotelIngest) -> WaypointResult<usize> {
    conn.execute_batch("BEGIN IMMEDIATE")
        .map_err(|e| to_storage_err(e.to_string()))?;

    match insert_hotels_inner(conn, batch) {
        Ok(count) => {
            conn.execute_batch("COMMIT")
                .map_err(|e| to_storage_err(e.to_string()))?;
            Ok(count)
        }
        Err(e) => {
            let _ = conn.execute_batch("ROLLBACK");
            Err(e)
        }
    }
}

fn insert_hotels_inner(conn: &Connection, batch: &HotelIngest) -> WaypointResult<usize> {
    let ingested_at = Utc::now().to_rfc3339();
    let mut count = 0;
    for hotel in &batch.hotels {
        // Batch-level hints win over per-payload fields, as the payload may
        // not know which search produced it.
        let city = batch.city.as_deref().unwrap_or(&hotel.city);
        let site = batch
            .site
            .as_deref()
            .or(hotel.site.as_deref())
            .unwrap_or("unknown");
        let hotel_json = serde_json::to_string(hotel)?;

        conn.execute(
            "INSERT INTO hotel_cache (trip_id, city, site, hotel_data, lead_price, ingested_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                batch.trip_id,
                city,
                site,
                hotel_json,
                hotel.lead_price_amount(),
                ingested_at,
            ],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
        count += 1;
    }

    set_facts_dirty(conn, &batch.trip_id, true)?;
    Ok(count)
}

/// Insert one row per room across all hotel groupings and mark the trip's
/// facts stale. Returns the total number of rows ingested.
pub fn insert_rooms(conn: &Connection, batch: &RoomIngest) -> WaypointResult<usize> {
    conn.execute_batch("BEGIN IMMEDIATE")
        .map_err(|e| to_storage_err(e.to_string()))?;

    match insert_rooms_inner(conn, batch) {
        Ok(count) => {
            conn.execute_batch("COMMIT")
                .map_err(|e| to_storage_err(e.to_string()))?;
            Ok(count)
        }
        Err(e) => {
            let _ = conn.execute_batch("ROLLBACK");
            Err(e)
        }
    }
}

fn insert_rooms_inner(conn: &Connection, batch: &RoomIngest) -> WaypointResult<usize> {
    let ingested_at = Utc::now().to_rfc3339();
    let site = batch.site.as_deref().unwrap_or("unknown");
    let mut count = 0;
    for group in &batch.rooms_by_hotel {
        for room in &group.rooms {
            let room_json = serde_json::to_string(room)?;
            conn.execute(
                "INSERT INTO room_cache (trip_id, hotel_key, site, room_data, total_price, ingested_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    batch.trip_id,
                    group.hotel_key,
                    site,
                    room_json,
                    room.total_amount(),
                    ingested_at,
                ],
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
            count += 1;
        }
    }

    set_facts_dirty(conn, &batch.trip_id, true)?;
    Ok(count)
}
