//! Typed records for trips, observations, and compiled facts.
//!
//! Everything that crosses a backend boundary is an explicit serde struct
//! carrying a `schema_version`, not an opaque JSON blob.

pub mod facts;
pub mod observation;
pub mod recommendation;
pub mod trip;

pub use facts::{CompiledFacts, FactsQuery, FactsSnapshot, FactsStats};
pub use observation::{
    HotelIngest, HotelObservation, HotelPayload, PriceQuote, RoomIngest, RoomObservation,
    RoomPayload, RoomsForHotel,
};
pub use recommendation::{Recommendations, StayPreferences};
pub use trip::{Traveler, Trip, TripDraft};

/// Current payload schema version. Bump when a payload shape changes.
pub const SCHEMA_VERSION: u32 = 1;

/// Serde default so v0 payloads (no version field) decode as version 1.
pub(crate) fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}
