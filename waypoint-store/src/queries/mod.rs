//! Query modules: free functions over a borrowed connection.

pub mod facts_ops;
pub mod ingest_ops;
pub mod recommend_ops;
pub mod trip_ops;

/// Helper trait to make `query_row` return `Option` on not-found.
pub(crate) trait OptionalRow<T> {
    fn optional(self) -> Result<Option<T>, rusqlite::Error>;
}

impl<T> OptionalRow<T> for Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>, rusqlite::Error> {
        match self {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Parse an RFC 3339 text column into a UTC timestamp.
pub(crate) fn parse_dt(s: &str) -> waypoint_core::errors::WaypointResult<chrono::DateTime<chrono::Utc>> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .map_err(|e| crate::to_storage_err(format!("parse datetime '{s}': {e}")))
}
