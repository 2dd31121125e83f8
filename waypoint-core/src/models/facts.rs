use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::default_schema_version;
use super::observation::{HotelPayload, RoomPayload};
use super::trip::Traveler;

/// Summary statistics computed over a trip's observations at compile time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactsStats {
    pub total_hotels: usize,
    pub total_rooms: usize,
    /// Lowest lead price across hotel observations, 0.0 when none exist.
    pub min_price: f64,
    /// Highest lead price across hotel observations, 0.0 when none exist.
    pub max_price: f64,
}

/// The denormalized view of a trip: every observation payload plus stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactsSnapshot {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub trip_id: String,
    pub title: String,
    pub destinations: String,
    pub party: Vec<Traveler>,
    /// Hotel payloads ordered ascending by lead price.
    pub hotels: Vec<HotelPayload>,
    pub rooms: Vec<RoomPayload>,
    pub stats: FactsStats,
    pub refreshed_at: DateTime<Utc>,
}

/// A persisted facts row: snapshot plus the indexed price projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompiledFacts {
    pub trip_id: String,
    pub facts: FactsSnapshot,
    /// Minimum lead price at compile time; `None` when the trip had no
    /// hotel observations. Mirrors `facts.stats.min_price` for fast filtering.
    pub lead_price_min: Option<f64>,
    pub updated_at: DateTime<Utc>,
}

/// Predicate set for querying compiled facts. All fields optional; absent
/// fields do not constrain the result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FactsQuery {
    /// Exact trip id match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trip_id: Option<String>,
    /// Inclusive upper bound on `lead_price_min`. Trips with no hotel
    /// observations (NULL projection) never match a price ceiling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_lead_price: Option<f64>,
    /// Case-insensitive substring match against any hotel's city.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// At least one hotel must carry this exact refundable flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refundable: Option<bool>,
    /// At least one hotel must be rated at or above this value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<f64>,
}

impl FactsSnapshot {
    /// Whether this snapshot satisfies the in-memory predicates of a query
    /// (city / refundable / rating). The indexed predicates (trip id, price
    /// ceiling) are applied at the storage layer before decoding.
    pub fn matches_scan_predicates(&self, query: &FactsQuery) -> bool {
        if let Some(city) = &query.city {
            let needle = city.to_lowercase();
            if !self
                .hotels
                .iter()
                .any(|h| h.city.to_lowercase().contains(&needle))
            {
                return false;
            }
        }
        if let Some(refundable) = query.refundable {
            if !self.hotels.iter().any(|h| h.refundable == Some(refundable)) {
                return false;
            }
        }
        if let Some(min_rating) = query.min_rating {
            if !self
                .hotels
                .iter()
                .any(|h| h.rating.is_some_and(|r| r >= min_rating))
            {
                return false;
            }
        }
        true
    }
}
