use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A member of the travel party.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Traveler {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// A planned trip. Owns the observation cache and the compiled facts row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
    /// Caller-supplied or time-derived identifier.
    pub id: String,
    pub title: String,
    /// Ordered list of travelers.
    pub party: Vec<Traveler>,
    /// Free-text destination description.
    pub destinations: String,
    /// Advisory marker: the compiled facts snapshot (if any) may not reflect
    /// the latest observations. Set on ingest, cleared on refresh.
    pub facts_dirty: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a trip. When `id` is absent the store derives a
/// `trip_<unix-millis>` identifier; uniqueness is only probabilistic, so
/// callers needing strong uniqueness must supply their own.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TripDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub party: Vec<Traveler>,
    #[serde(default)]
    pub destinations: String,
}
