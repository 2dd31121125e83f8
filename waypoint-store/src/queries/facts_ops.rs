//! Facts compilation inputs, the replace-on-write facts row, and the
//! query engine's SQL narrowing.

use rusqlite::{params, Connection, ToSql};

use waypoint_core::errors::WaypointResult;
use waypoint_core::models::{
    CompiledFacts, FactsQuery, FactsSnapshot, HotelObservation, HotelPayload, RoomObservation,
    RoomPayload,
};

use super::{parse_dt, OptionalRow};
use crate::to_storage_err;

/// All hotel observations for a trip, ordered ascending by lead price.
pub fn hotels_for_trip(conn: &Connection, trip_id: &str) -> WaypointResult<Vec<HotelObservation>> {
    let mut stmt = conn
        .prepare(
            "SELECT trip_id, city, site, hotel_data, lead_price, ingested_at
             FROM hotel_cache WHERE trip_id = ?1 ORDER BY lead_price ASC",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![trip_id], |row| Ok(row_to_hotel_observation(row)))
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;

    rows.into_iter().collect()
}

/// All room observations for a trip.
pub fn rooms_for_trip(conn: &Connection, trip_id: &str) -> WaypointResult<Vec<RoomObservation>> {
    let mut stmt = conn
        .prepare(
            "SELECT trip_id, hotel_key, site, room_data, total_price, ingested_at
             FROM room_cache WHERE trip_id = ?1",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![trip_id], |row| Ok(row_to_room_observation(row)))
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;

    rows.into_iter().collect()
}

/// Replace the trip's facts row (single row per trip).
pub fn upsert_facts(conn: &Connection, compiled: &CompiledFacts) -> WaypointResult<()> {
    let facts_json = serde_json::to_string(&compiled.facts)?;
    conn.execute(
        "INSERT OR REPLACE INTO trip_facts (trip_id, facts, lead_price_min, updated_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            compiled.trip_id,
            facts_json,
            compiled.lead_price_min,
            compiled.updated_at.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// The compiled facts row for one trip, if any.
pub fn get_facts(conn: &Connection, trip_id: &str) -> WaypointResult<Option<CompiledFacts>> {
    let mut stmt = conn
        .prepare(
            "SELECT trip_id, facts, lead_price_min, updated_at
             FROM trip_facts WHERE trip_id = ?1",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let result = stmt
        .query_row(params![trip_id], |row| Ok(row_to_compiled_facts(row)))
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    result.transpose()
}

/// Filter compiled snapshots. The indexed predicates (trip id, price ceiling)
/// narrow in SQL; the rest scan the decoded snapshots. A NULL `lead_price_min`
/// never satisfies the ceiling comparison, so hotel-less trips are excluded
/// from price-bounded queries.
pub fn query_facts(conn: &Connection, query: &FactsQuery) -> WaypointResult<Vec<CompiledFacts>> {
    let mut sql = String::from(
        "SELECT trip_id, facts, lead_price_min, updated_at FROM trip_facts WHERE 1=1",
    );
    let mut sql_params: Vec<&dyn ToSql> = Vec::new();

    if let Some(trip_id) = &query.trip_id {
        sql.push_str(" AND trip_id = ?");
        sql_params.push(trip_id);
    }
    if let Some(max_lead_price) = &query.max_lead_price {
        sql.push_str(" AND lead_price_min <= ?");
        sql_params.push(max_lead_price);
    }
    sql.push_str(" ORDER BY updated_at DESC");

    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(sql_params.as_slice(), |row| Ok(row_to_compiled_facts(row)))
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;

    let compiled = rows.into_iter().collect::<WaypointResult<Vec<_>>>()?;
    Ok(compiled
        .into_iter()
        .filter(|c| c.facts.matches_scan_predicates(query))
        .collect())
}

fn row_to_hotel_observation(row: &rusqlite::Row<'_>) -> WaypointResult<HotelObservation> {
    let hotel_json: String = row.get(3).map_err(|e| to_storage_err(e.to_string()))?;
    let hotel: HotelPayload = serde_json::from_str(&hotel_json)
        .map_err(|e| to_storage_err(format!("parse hotel payload: {e}")))?;
    let ingested_str: String = row.get(5).map_err(|e| to_storage_err(e.to_string()))?;

    Ok(HotelObservation {
        trip_id: row.get(0).map_err(|e| to_storage_err(e.to_string()))?,
        city: row.get(1).map_err(|e| to_storage_err(e.to_string()))?,
        site: row.get(2).map_err(|e| to_storage_err(e.to_string()))?,
        hotel,
        lead_price: row.get(4).map_err(|e| to_storage_err(e.to_string()))?,
        ingested_at: parse_dt(&ingested_str)?,
    })
}

fn row_to_room_observation(row: &rusqlite::Row<'_>) -> WaypointResult<RoomObservation> {
    let room_json: String = row.get(3).map_err(|e| to_storage_err(e.to_string()))?;
    let room: RoomPayload = serde_json::from_str(&room_json)
        .map_err(|e| to_storage_err(format!("parse room payload: {e}")))?;
    let ingested_str: String = row.get(5).map_err(|e| to_storage_err(e.to_string()))?;

    Ok(RoomObservation {
        trip_id: row.get(0).map_err(|e| to_storage_err(e.to_string()))?,
        hotel_key: row.get(1).map_err(|e| to_storage_err(e.to_string()))?,
        site: row.get(2).map_err(|e| to_storage_err(e.to_string()))?,
        room,
        total_price: row.get(4).map_err(|e| to_storage_err(e.to_string()))?,
        ingested_at: parse_dt(&ingested_str)?,
    })
}

fn row_to_compiled_facts(row: &rusqlite::Row<'_>) -> WaypointResult<CompiledFacts> {
    let facts_json: String = row.get(1).map_err(|e| to_storage_err(e.to_string()))?;
    let facts: FactsSnapshot = serde_json::from_str(&facts_json)
        .map_err(|e| to_storage_err(format!("parse facts snapshot: {e}")))?;
    let updated_str: String = row.get(3).map_err(|e| to_storage_err(e.to_string()))?;

    Ok(CompiledFacts {
        trip_id: row.get(0).map_err(|e| to_storage_err(e.to_string()))?,
        facts,
        lead_price_min: row.get(2).map_err(|e| to_storage_err(e.to_string()))?,
        updated_at: parse_dt(&updated_str)?,
    })
}
