//! Candidate retrieval for the recommendation selector.

use rusqlite::{params, Connection};

use waypoint_core::errors::WaypointResult;
use waypoint_core::models::HotelPayload;

use crate::to_storage_err;

/// Hotel payloads for a trip and city, ordered ascending by lead price.
/// Matches either the observation's city column or the payload's own city
/// field (older rows were ingested under a batch-level city hint).
pub fn hotels_for_city(
    conn: &Connection,
    trip_id: &str,
    city: &str,
) -> WaypointResult<Vec<HotelPayload>> {
    let mut stmt = conn
        .prepare(
            "SELECT hotel_data FROM hotel_cache
             WHERE trip_id = ?1 AND (city = ?2 OR hotel_data LIKE ?3)
             ORDER BY lead_price ASC",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let city_pattern = format!("%\"city\":\"{city}\"%");
    let rows = stmt
        .query_map(params![trip_id, city, city_pattern], |row| {
            row.get::<_, String>(0)
        })
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<Result<Vec<String>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;

    rows.iter()
        .map(|json| {
            serde_json::from_str(json)
                .map_err(|e| to_storage_err(format!("parse hotel payload: {e}")))
        })
        .collect()
}
