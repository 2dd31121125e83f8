//! Error taxonomy. Per-layer enums wrapped by the top-level [`WaypointError`].

mod remote_error;
mod storage_error;

pub use remote_error::RemoteError;
pub use storage_error::StorageError;

/// Convenience alias used across the workspace.
pub type WaypointResult<T> = Result<T, WaypointError>;

/// Top-level error for every backend operation.
///
/// Nothing here is retried automatically and nothing terminates the process;
/// each variant fails the current call and leaves state as far as it got.
#[derive(Debug, thiserror::Error)]
pub enum WaypointError {
    #[error("validation failed: missing or empty required field '{field}'")]
    Validation { field: &'static str },

    #[error("trip not found: {trip_id}")]
    TripNotFound { trip_id: String },

    #[error("no compiled facts for trip {trip_id}; run refresh_facts first")]
    FactsNotFound { trip_id: String },

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("remote backend error: {0}")]
    Remote(#[from] RemoteError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
