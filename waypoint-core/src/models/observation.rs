use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::default_schema_version;

/// A quoted price: amount plus ISO currency code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub amount: f64,
    pub currency: String,
}

/// One hotel candidate as returned by a search site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelPayload {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub name: String,
    pub city: String,
    /// Cheapest available rate at search time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_price: Option<PriceQuote>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refundable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Source site identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
}

impl HotelPayload {
    /// Numeric sort key derived at ingest time: the lead price amount,
    /// or 0.0 when the payload carries no price.
    pub fn lead_price_amount(&self) -> f64 {
        self.lead_price.as_ref().map_or(0.0, |p| p.amount)
    }
}

/// One room option within a hotel candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomPayload {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub name: String,
    /// Total price for the stay.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refundable: Option<bool>,
}

impl RoomPayload {
    /// Numeric sort key derived at ingest time.
    pub fn total_amount(&self) -> f64 {
        self.total.unwrap_or(0.0)
    }
}

/// An ingested hotel candidate tied to a trip. Append-only; repeated searches
/// produce repeated rows, never deduplicated at this layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelObservation {
    pub trip_id: String,
    pub city: String,
    pub site: String,
    pub hotel: HotelPayload,
    /// Derived from `hotel.lead_price` for indexed sorting.
    pub lead_price: f64,
    pub ingested_at: DateTime<Utc>,
}

/// An ingested room option, keyed to a previously ingested hotel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomObservation {
    pub trip_id: String,
    pub hotel_key: String,
    pub site: String,
    pub room: RoomPayload,
    /// Derived from `room.total` for indexed sorting.
    pub total_price: f64,
    pub ingested_at: DateTime<Utc>,
}

/// A hotel ingestion batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelIngest {
    pub trip_id: String,
    /// City hint applied when a payload carries no city of its own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    pub hotels: Vec<HotelPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    /// Search session correlation id, recorded for tracing only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl HotelIngest {
    /// Reject the batch before anything is attempted: a trip id and at least
    /// one hotel are required.
    pub fn validate(&self) -> Result<(), crate::errors::WaypointError> {
        if self.trip_id.is_empty() {
            return Err(crate::errors::WaypointError::Validation { field: "trip_id" });
        }
        if self.hotels.is_empty() {
            return Err(crate::errors::WaypointError::Validation { field: "hotels" });
        }
        Ok(())
    }
}

/// Rooms grouped under one hotel key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomsForHotel {
    pub hotel_key: String,
    pub rooms: Vec<RoomPayload>,
}

/// A room ingestion batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomIngest {
    pub trip_id: String,
    pub rooms_by_hotel: Vec<RoomsForHotel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
}

impl RoomIngest {
    /// Reject the batch before anything is attempted: a trip id and at least
    /// one hotel grouping are required.
    pub fn validate(&self) -> Result<(), crate::errors::WaypointError> {
        if self.trip_id.is_empty() {
            return Err(crate::errors::WaypointError::Validation { field: "trip_id" });
        }
        if self.rooms_by_hotel.is_empty() {
            return Err(crate::errors::WaypointError::Validation {
                field: "rooms_by_hotel",
            });
        }
        Ok(())
    }
}
