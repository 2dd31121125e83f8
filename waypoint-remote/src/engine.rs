//! RemoteBackend — forwards every TripBackend operation over HTTP.

use waypoint_core::config::RemoteConfig;
use waypoint_core::errors::{WaypointError, WaypointResult};
use waypoint_core::models::{
    CompiledFacts, FactsQuery, FactsStats, HotelIngest, Recommendations, RoomIngest,
    StayPreferences, Trip, TripDraft,
};
use waypoint_core::traits::TripBackend;

use crate::protocol::{
    CreateTripData, IngestData, QueryData, RecommendParams, StatsData, TripParams, TripsData,
};
use crate::transport::HttpClient;

/// The proxy backend. Validation happens locally, so malformed batches never
/// reach the wire; everything else is delegated to the remote service.
pub struct RemoteBackend {
    client: HttpClient,
}

impl RemoteBackend {
    pub fn new(config: &RemoteConfig) -> WaypointResult<Self> {
        Ok(Self {
            client: HttpClient::new(config)?,
        })
    }
}

impl TripBackend for RemoteBackend {
    fn list_trips(&self) -> WaypointResult<Vec<Trip>> {
        let data: TripsData = self.client.call("list_trips", &serde_json::json!({}))?;
        Ok(data.trips)
    }

    fn create_trip(&self, draft: &TripDraft) -> WaypointResult<String> {
        if draft.title.is_empty() {
            return Err(WaypointError::Validation { field: "title" });
        }
        let data: CreateTripData = self.client.call("create_trip", draft)?;
        Ok(data.trip_id)
    }

    fn ingest_hotels(&self, batch: &HotelIngest) -> WaypointResult<usize> {
        batch.validate()?;
        let data: IngestData = self.client.call("ingest_hotels", batch)?;
        tracing::info!(trip_id = %batch.trip_id, count = data.ingested, "forwarded hotel batch");
        Ok(data.ingested)
    }

    fn ingest_rooms(&self, batch: &RoomIngest) -> WaypointResult<usize> {
        batch.validate()?;
        let data: IngestData = self.client.call("ingest_rooms", batch)?;
        tracing::info!(trip_id = %batch.trip_id, count = data.ingested, "forwarded room batch");
        Ok(data.ingested)
    }

    fn refresh_facts(&self, trip_id: &str) -> WaypointResult<FactsStats> {
        let params = TripParams {
            trip_id: trip_id.to_string(),
        };
        let data: StatsData = self.client.call("refresh_trip_facts", &params)?;
        Ok(data.stats)
    }

    fn query_facts(&self, query: &FactsQuery) -> WaypointResult<Vec<CompiledFacts>> {
        let data: QueryData = self.client.call("query_facts", query)?;
        Ok(data.results)
    }

    fn get_facts(&self, trip_id: &str) -> WaypointResult<CompiledFacts> {
        let params = TripParams {
            trip_id: trip_id.to_string(),
        };
        self.client.call("get_facts", &params)
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
        let params = RecommendParams {
            trip_id: trip_id.to_string(),
            city: city.to_string(),
            prefs: prefs.clone(),
        };
        self.client.call("recommend_hotels", &params)
    }
}
