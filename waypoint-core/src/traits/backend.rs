use crate::errors::WaypointResult;
use crate::models::{
    CompiledFacts, FactsQuery, FactsStats, HotelIngest, Recommendations, RoomIngest,
    StayPreferences, Trip, TripDraft,
};

/// The backend contract: trip management, observation ingestion, facts
/// compilation, querying, and tier recommendations.
///
/// Exactly one implementation (embedded store or remote proxy) is active per
/// process, selected once at startup. Both expose identical signatures and
/// response shapes, so callers never branch on mode.
pub trait TripBackend: Send + Sync {
    /// All trips, most recently created first.
    fn list_trips(&self) -> WaypointResult<Vec<Trip>>;

    /// Create a trip, returning its id. Derives a time-based id when the
    /// draft carries none.
    fn create_trip(&self, draft: &TripDraft) -> WaypointResult<String>;

    /// Persist a batch of hotel observations and mark the trip's facts stale.
    /// Returns the number of rows ingested.
    fn ingest_hotels(&self, batch: &HotelIngest) -> WaypointResult<usize>;

    /// Persist a batch of room observations and mark the trip's facts stale.
    /// Returns the number of rows ingested.
    fn ingest_rooms(&self, batch: &RoomIngest) -> WaypointResult<usize>;

    /// Compile the trip's facts snapshot from all cached observations,
    /// replace the stored row, and clear the dirty flag. Idempotent absent
    /// new ingestion (modulo the refreshed timestamp).
    fn refresh_facts(&self, trip_id: &str) -> WaypointResult<FactsStats>;

    /// Filter compiled snapshots, most recently compiled first.
    fn query_facts(&self, query: &FactsQuery) -> WaypointResult<Vec<CompiledFacts>>;

    /// The compiled facts row for one trip.
    fn get_facts(&self, trip_id: &str) -> WaypointResult<CompiledFacts>;

    /// Low/medium/high price-tier picks for a city within a trip.
    fn recommend(
        &self,
        trip_id: &str,
        city: &str,
        prefs: &StayPreferences,
    ) -> WaypointResult<Recommendations>;
}
