//! # waypoint-core
//!
//! Foundation crate for the Waypoint trip facts cache.
//! Defines all types, traits, errors, and config.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::{BackendMode, RemoteConfig, StoreConfig, WaypointConfig};
pub use errors::{WaypointError, WaypointResult};
pub use models::{
    CompiledFacts, FactsQuery, FactsSnapshot, FactsStats, HotelIngest, HotelObservation,
    HotelPayload, PriceQuote, Recommendations, RoomIngest, RoomObservation, RoomPayload,
    StayPreferences, Traveler, Trip, TripDraft,
};
pub use traits::TripBackend;
