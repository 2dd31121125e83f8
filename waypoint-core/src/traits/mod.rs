//! Trait seams between the core and its backend implementations.

mod backend;

pub use backend::TripBackend;
