//! # waypoint-remote
//!
//! Remote proxy backend: every [`waypoint_core::TripBackend`] operation is
//! forwarded as one method-plus-params envelope to a configured facts
//! service, and the response is normalized to the same typed shapes the
//! embedded store returns.

pub mod engine;
pub mod protocol;
pub mod transport;

pub use engine::RemoteBackend;
pub use transport::HttpClient;
