//! StoreEngine — owns the ConnectionPool, implements TripBackend,
//! startup migration, read routing.

use std::path::Path;

use chrono::Utc;

use waypoint_core::errors::{WaypointError, WaypointResult};
use waypoint_core::models::{
    CompiledFacts, FactsQuery, FactsSnapshot, FactsStats, HotelIngest, Recommendations,
    RoomIngest, StayPreferences, Trip, TripDraft, SCHEMA_VERSION,
};
use waypoint_core::traits::TripBackend;

use crate::migrations;
use crate::pool::ConnectionPool;
use crate::queries::{facts_ops, ingest_ops, recommend_ops, trip_ops};
use crate::to_storage_err;

/// The embedded backend. Owns the connection pool and provides the full
/// TripBackend interface over local SQLite tables.
pub struct StoreEngine {
    pool: ConnectionPool,
    /// When true, use the read pool for read operations (file-backed mode).
    /// When false, route all reads through the writer (in-memory mode,
    /// because in-memory read pool connections are isolated databases).
    use_read_pool: bool,
}

impl StoreEngine {
    /// Open a store backed by a file on disk.
    pub fn open(path: &Path) -> WaypointResult<Self> {
        let pool = ConnectionPool::open(path, crate::pool::ReadPool::default_size())?;
        let engine = Self {
            pool,
            use_read_pool: true,
        };
        engine.initialize()?;
        Ok(engine)
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory() -> WaypointResult<Self> {
        let pool = ConnectionPool::open_in_memory()?;
        let engine = Self {
            pool,
            use_read_pool: false,
        };
        engine.initialize()?;
        Ok(engine)
    }

    /// Run migrations on the writer.
    fn initialize(&self) -> WaypointResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| migrations::run_migrations(conn))
    }

    /// Get a reference to the connection pool (for advanced operations).
    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    /// Execute a read-only query on the best available connection.
    fn with_reader<F, T>(&self, f: F) -> WaypointResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> WaypointResult<T>,
    {
        if self.use_read_pool {
            self.pool.readers.with_conn(f)
        } else {
            self.pool.writer.with_conn_sync(f)
        }
    }

    /// Derive a time-based trip id. Uniqueness is only probabilistic; a
    /// collision surfaces as a primary-key insert failure.
    fn derive_trip_id() -> String {
        format!("trip_{}", Utc::now().timestamp_millis())
    }
}

impl TripBackend for StoreEngine {
    fn list_trips(&self) -> WaypointResult<Vec<Trip>> {
        self.with_reader(trip_ops::list_trips)
    }

    fn create_trip(&self, draft: &TripDraft) -> WaypointResult<String> {
        if draft.title.is_empty() {
            return Err(WaypointError::Validation { field: "title" });
        }
        let now = Utc::now();
        let trip = Trip {
            id: draft.id.clone().unwrap_or_else(Self::derive_trip_id),
            title: draft.title.clone(),
            party: draft.party.clone(),
            destinations: draft.destinations.clone(),
            facts_dirty: false,
            created_at: now,
            updated_at: now,
        };
        self.pool
            .writer
            .with_conn_sync(|conn| trip_ops::insert_trip(conn, &trip))?;
        tracing::info!(trip_id = %trip.id, "created trip");
        Ok(trip.id)
    }

    fn ingest_hotels(&self, batch: &HotelIngest) -> WaypointResult<usize> {
        batch.validate()?;
        let count = self
            .pool
            .writer
            .with_conn_sync(|conn| ingest_ops::insert_hotels(conn, batch))?;
        tracing::info!(
            trip_id = %batch.trip_id,
            city = batch.city.as_deref().unwrap_or(""),
            count,
            "ingested hotel observations"
        );
        Ok(count)
    }

    fn ingest_rooms(&self, batch: &RoomIngest) -> WaypointResult<usize> {
        batch.validate()?;
        let count = self
            .pool
            .writer
            .with_conn_sync(|conn| ingest_ops::insert_rooms(conn, batch))?;
        tracing::info!(trip_id = %batch.trip_id, count, "ingested room observations");
        Ok(count)
    }

    fn refresh_facts(&self, trip_id: &str) -> WaypointResult<FactsStats> {
        self.pool.writer.with_conn_sync(|conn| {
            let tx = conn
                .unchecked_transaction()
                .map_err(|e| to_storage_err(format!("refresh_facts begin: {e}")))?;

            let stats = match compile_facts(&tx, trip_id) {
                Ok(stats) => stats,
                Err(e) => {
                    let _ = tx.rollback();
                    return Err(e);
                }
            };

            tx.commit()
                .map_err(|e| to_storage_err(format!("refresh_facts commit: {e}")))?;
            tracing::info!(
                trip_id = %trip_id,
                hotels = stats.total_hotels,
                rooms = stats.total_rooms,
                "refreshed trip facts"
            );
            Ok(stats)
        })
    }

    fn query_facts(&self, query: &FactsQuery) -> WaypointResult<Vec<CompiledFacts>> {
        self.with_reader(|conn| facts_ops::query_facts(conn, query))
    }

    fn get_facts(&self, trip_id: &str) -> WaypointResult<CompiledFacts> {
        self.with_reader(|conn| facts_ops::get_facts(conn, trip_id))?
            .ok_or_else(|| WaypointError::FactsNotFound {
                trip_id: trip_id.to_string(),
            })
    }

    fn recommend(
        &self,
        trip_id: &str,
        city: &str,
        prefs: &StayPreferences,
    ) -> WaypointResult<Recommendations> {
        if trip_id.is_empty() {
            return Err(WaypointError::Validation { field: "trip_id" });
        }
        if city.is_empty() {
            return Err(WaypointError::Validation { field: "city" });
        }
        let candidates = self.with_reader(|conn| recommend_ops::hotels_for_city(conn, trip_id, city))?;
        // Rows arrive sorted ascending by lead price; the preference filter
        // preserves that order.
        let filtered: Vec<_> = candidates.into_iter().filter(|h| prefs.accepts(h)).collect();
        Ok(Recommendations::from_sorted(filtered))
    }
}

/// Compile the facts snapshot inside the caller's transaction: read the trip
/// and all its observations, derive stats, replace the facts row, clear the
/// dirty flag.
fn compile_facts(conn: &rusqlite::Connection, trip_id: &str) -> WaypointResult<FactsStats> {
    let trip = trip_ops::get_trip(conn, trip_id)?.ok_or_else(|| WaypointError::TripNotFound {
        trip_id: trip_id.to_string(),
    })?;

    let hotels = facts_ops::hotels_for_trip(conn, trip_id)?;
    let rooms = facts_ops::rooms_for_trip(conn, trip_id)?;

    // Observations arrive sorted ascending by lead price, so min/max come
    // from the ends. 0.0 is the stats sentinel for an empty cache; the
    // indexed projection uses NULL instead so price-ceiling queries skip
    // hotel-less trips.
    let stats = FactsStats {
        total_hotels: hotels.len(),
        total_rooms: rooms.len(),
        min_price: hotels.first().map_or(0.0, |h| h.lead_price),
        max_price: hotels.last().map_or(0.0, |h| h.lead_price),
    };
    let lead_price_min = hotels.first().map(|h| h.lead_price);

    let now = Utc::now();
    let compiled = CompiledFacts {
        trip_id: trip_id.to_string(),
        facts: FactsSnapshot {
            schema_version: SCHEMA_VERSION,
            trip_id: trip_id.to_string(),
            title: trip.title,
            destinations: trip.destinations,
            party: trip.party,
            hotels: hotels.into_iter().map(|o| o.hotel).collect(),
            rooms: rooms.into_iter().map(|o| o.room).collect(),
            stats: stats.clone(),
            refreshed_at: now,
        },
        lead_price_min,
        updated_at: now,
    };

    facts_ops::upsert_facts(conn, &compiled)?;
    trip_ops::set_facts_dirty(conn, trip_id, false)?;
    Ok(stats)
}
