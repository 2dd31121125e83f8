//! # waypoint
//!
//! Facade over the two [`TripBackend`] implementations. Callers build a
//! [`WaypointConfig`], hand it to [`open_backend`], and receive a boxed
//! backend; from then on the local/remote distinction is invisible.
//!
//! ```no_run
//! use waypoint::{open_backend, WaypointConfig};
//!
//! let config = WaypointConfig::from_env();
//! let backend = open_backend(&config)?;
//! for trip in backend.list_trips()? {
//!     println!("{} {}", trip.id, trip.title);
//! }
//! # Ok::<(), waypoint::WaypointError>(())
//! ```

use std::path::Path;

pub use waypoint_core::config::{BackendMode, RemoteConfig, StoreConfig, WaypointConfig};
pub use waypoint_core::errors::{WaypointError, WaypointResult};
pub use waypoint_core::models::{
    CompiledFacts, FactsQuery, FactsSnapshot, FactsStats, HotelIngest, HotelPayload, PriceQuote,
    Recommendations, RoomIngest, RoomPayload, RoomsForHotel, StayPreferences, Trip, TripDraft,
};
pub use waypoint_core::traits::TripBackend;
pub use waypoint_remote::RemoteBackend;
pub use waypoint_store::StoreEngine;

/// Construct the backend named by the config. Consulted exactly once; the
/// returned handle is injected into whatever owns it for the process lifetime.
pub fn open_backend(config: &WaypointConfig) -> WaypointResult<Box<dyn TripBackend>> {
    match config.mode {
        BackendMode::Local => {
            tracing::info!(db_path = %config.store.db_path, "opening embedded store backend");
            let engine = StoreEngine::open(Path::new(&config.store.db_path))?;
            Ok(Box::new(engine))
        }
        BackendMode::Remote => {
            tracing::info!(
                base_url = config.remote.base_url.as_deref().unwrap_or("<unset>"),
                "opening remote proxy backend"
            );
            let backend = RemoteBackend::new(&config.remote)?;
            Ok(Box::new(backend))
        }
    }
}

/// Install a process-wide tracing subscriber honoring `RUST_LOG`, defaulting
/// to `info`. Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}
