//! Remote backend behavior that needs no live service: envelope shapes,
//! unconfigured-backend failures, and local validation ordering.

use waypoint_core::config::RemoteConfig;
use waypoint_core::errors::{RemoteError, WaypointError};
use waypoint_core::models::{HotelIngest, RoomIngest, StayPreferences, TripDraft};
use waypoint_core::traits::TripBackend;
use waypoint_remote::protocol::{RemoteRequest, RemoteResponse, TripsData, PROTOCOL_VERSION};
use waypoint_remote::RemoteBackend;

fn unconfigured_backend() -> RemoteBackend {
    RemoteBackend::new(&RemoteConfig::default()).unwrap()
}

#[test]
fn request_envelope_carries_version_and_unique_ids() {
    let a = RemoteRequest::new("list_trips", serde_json::json!({}));
    let b = RemoteRequest::new("list_trips", serde_json::json!({}));

    assert_eq!(a.version, PROTOCOL_VERSION);
    assert_eq!(a.method, "list_trips");
    assert_ne!(a.request_id, b.request_id);

    let wire = serde_json::to_value(&a).unwrap();
    assert_eq!(wire["method"], "list_trips");
    assert!(wire["request_id"].is_string());
    assert!(wire["timestamp"].is_string());
}

#[test]
fn response_envelope_tolerates_minimal_payloads() {
    let ok: RemoteResponse<TripsData> =
        serde_json::from_str(r#"{"ok": true, "data": {"trips": []}}"#).unwrap();
    assert!(ok.ok);
    assert!(ok.error.is_none());
    assert!(ok.data.unwrap().trips.is_empty());

    let rejected: RemoteResponse<TripsData> =
        serde_json::from_str(r#"{"ok": false, "error": "trip not found"}"#).unwrap();
    assert!(!rejected.ok);
    assert_eq!(rejected.error.as_deref(), Some("trip not found"));
    assert!(rejected.data.is_none());
}

#[test]
fn unconfigured_backend_reports_unavailable_on_every_operation() {
    let backend = unconfigured_backend();

    let results: Vec<Result<(), WaypointError>> = vec![
        backend.list_trips().map(|_| ()),
        backend.refresh_facts("trip_1").map(|_| ()),
        backend.get_facts("trip_1").map(|_| ()),
        backend
            .query_facts(&waypoint_core::models::FactsQuery::default())
            .map(|_| ()),
        backend
            .recommend("trip_1", "Paris", &StayPreferences::default())
            .map(|_| ()),
    ];

    for result in results {
        match result {
            Err(WaypointError::Remote(RemoteError::BackendUnavailable { .. })) => {}
            other => panic!("expected BackendUnavailable, got {other:?}"),
        }
    }
}

#[test]
fn validation_runs_before_any_transport_attempt() {
    let backend = unconfigured_backend();

    let empty_title = TripDraft::default();
    match backend.create_trip(&empty_title) {
        Err(WaypointError::Validation { field: "title" }) => {}
        other => panic!("expected title validation, got {other:?}"),
    }

    let no_hotels = HotelIngest {
        trip_id: "trip_1".to_string(),
        city: Some("Paris".to_string()),
        hotels: vec![],
        site: None,
        session_id: None,
    };
    match backend.ingest_hotels(&no_hotels) {
        Err(WaypointError::Validation { field: "hotels" }) => {}
        other => panic!("expected hotels validation, got {other:?}"),
    }

    let no_rooms = RoomIngest {
        trip_id: "trip_1".to_string(),
        rooms_by_hotel: vec![],
        site: None,
    };
    match backend.ingest_rooms(&no_rooms) {
        Err(WaypointError::Validation {
            field: "rooms_by_hotel",
        }) => {}
        other => panic!("expected rooms validation, got {other:?}"),
    }

    match backend.recommend("", "Paris", &StayPreferences::default()) {
        Err(WaypointError::Validation { field: "trip_id" }) => {}
        other => panic!("expected trip_id validation, got {other:?}"),
    }
    match backend.recommend("trip_1", "", &StayPreferences::default()) {
        Err(WaypointError::Validation { field: "city" }) => {}
        other => panic!("expected city validation, got {other:?}"),
    }
}
