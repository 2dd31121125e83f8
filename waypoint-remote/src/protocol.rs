//! Versioned wire protocol — JSON envelopes with forward compatibility.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use waypoint_core::models::{CompiledFacts, FactsStats, StayPreferences, Trip};

/// Current protocol version.
pub const PROTOCOL_VERSION: &str = "1.0";

/// Fixed call path under the configured base URL.
pub const CALL_PATH: &str = "/api/call";

/// Envelope for all remote calls: one method name plus a parameter object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteRequest {
    /// Protocol version for forward compatibility.
    pub version: String,
    /// Unique request ID for tracing.
    pub request_id: String,
    /// Timestamp of the request.
    pub timestamp: DateTime<Utc>,
    /// Logical operation name.
    pub method: String,
    /// Operation parameters.
    pub params: serde_json::Value,
}

impl RemoteRequest {
    /// Create a new request envelope.
    pub fn new(method: &str, params: serde_json::Value) -> Self {
        Self {
            version: PROTOCOL_VERSION.to_string(),
            request_id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            method: method.to_string(),
            params,
        }
    }
}

/// Envelope for all remote responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct RemoteResponse<T> {
    /// Protocol version.
    #[serde(default)]
    pub version: String,
    /// Echoed request ID.
    #[serde(default)]
    pub request_id: String,
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Error message when `ok` is false.
    #[serde(default)]
    pub error: Option<String>,
    /// The response payload.
    #[serde(default)]
    pub data: Option<T>,
}

// Typed payloads, matching the embedded store's response shapes.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripsData {
    pub trips: Vec<Trip>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTripData {
    pub trip_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestData {
    pub ingested: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsData {
    pub trip_id: String,
    pub stats: FactsStats,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryData {
    pub results: Vec<CompiledFacts>,
}

/// Params for operations addressed by trip id alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripParams {
    pub trip_id: String,
}

/// Params for the recommendation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendParams {
    pub trip_id: String,
    pub city: String,
    pub prefs: StayPreferences,
}
