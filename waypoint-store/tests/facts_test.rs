//! Integration test: facts compilation — stats, projection, idempotence.

use waypoint_core::errors::WaypointError;
use waypoint_core::models::*;
use waypoint_core::traits::TripBackend;
use waypoint_store::StoreEngine;

fn hotel(name: &str, price: f64) -> HotelPayload {
    HotelPayload {
        schema_version: SCHEMA_VERSION,
        name: name.to_string(),
        city: "Paris".to_string(),
        lead_price: Some(PriceQuote {
            amount: price,
            currency: "USD".to_string(),
        }),
        refundable: Some(true),
        rating: None,
        site: None,
    }
}

fn setup_paris_trip(engine: &StoreEngine, trip_id: &str) {
    engine
        .create_trip(&TripDraft {
            id: Some(trip_id.to_string()),
            title: "Paris getaway".to_string(),
            party: vec![Traveler {
                name: "Ada".to_string(),
                email: None,
            }],
            destinations: "Paris".to_string(),
        })
        .unwrap();
    engine
        .ingest_hotels(&HotelIngest {
            trip_id: trip_id.to_string(),
            city: Some("Paris".to_string()),
            hotels: vec![hotel("a", 300.0), hotel("b", 150.0), hotel("c", 450.0)],
            site: Some("examplesite".to_string()),
            session_id: None,
        })
        .unwrap();
}

#[test]
fn refresh_unknown_trip_fails() {
    let engine = StoreEngine::open_in_memory().unwrap();
    let err = engine.refresh_facts("missing").unwrap_err();
    assert!(matches!(err, WaypointError::TripNotFound { .. }));
}

#[test]
fn refresh_computes_stats_from_sorted_prices() {
    let engine = StoreEngine::open_in_memory().unwrap();
    setup_paris_trip(&engine, "trip_paris");

    let stats = engine.refresh_facts("trip_paris").unwrap();
    assert_eq!(stats.total_hotels, 3);
    assert_eq!(stats.total_rooms, 0);
    assert_eq!(stats.min_price, 150.0);
    assert_eq!(stats.max_price, 450.0);
}

#[test]
fn refresh_clears_dirty_flag() {
    let engine = StoreEngine::open_in_memory().unwrap();
    setup_paris_trip(&engine, "trip_dirty");

    let trips = engine.list_trips().unwrap();
    assert!(trips[0].facts_dirty);

    engine.refresh_facts("trip_dirty").unwrap();

    let trips = engine.list_trips().unwrap();
    assert!(!trips[0].facts_dirty);
}

#[test]
fn projection_equals_minimum_observation_price() {
    let engine = StoreEngine::open_in_memory().unwrap();
    setup_paris_trip(&engine, "trip_proj");
    engine.refresh_facts("trip_proj").unwrap();

    let compiled = engine.get_facts("trip_proj").unwrap();
    assert_eq!(compiled.lead_price_min, Some(150.0));
    assert_eq!(compiled.facts.stats.min_price, 150.0);
    // Snapshot hotels come back sorted ascending by lead price.
    let prices: Vec<f64> = compiled
        .facts
        .hotels
        .iter()
        .map(HotelPayload::lead_price_amount)
        .collect();
    assert_eq!(prices, vec![150.0, 300.0, 450.0]);
}

#[test]
fn trip_without_observations_compiles_empty_snapshot() {
    let engine = StoreEngine::open_in_memory().unwrap();
    engine
        .create_trip(&TripDraft {
            id: Some("trip_empty".to_string()),
            title: "Nothing yet".to_string(),
            party: vec![],
            destinations: String::new(),
        })
        .unwrap();

    let stats = engine.refresh_facts("trip_empty").unwrap();
    assert_eq!(stats.total_hotels, 0);
    assert_eq!(stats.min_price, 0.0);
    assert_eq!(stats.max_price, 0.0);

    // The indexed projection is the NULL sentinel, not 0.0.
    let compiled = engine.get_facts("trip_empty").unwrap();
    assert_eq!(compiled.lead_price_min, None);
}

#[test]
fn refresh_is_idempotent_absent_new_ingestion() {
    let engine = StoreEngine::open_in_memory().unwrap();
    setup_paris_trip(&engine, "trip_idem");

    let first = engine.refresh_facts("trip_idem").unwrap();
    let first_facts = engine.get_facts("trip_idem").unwrap();

    let second = engine.refresh_facts("trip_idem").unwrap();
    let second_facts = engine.get_facts("trip_idem").unwrap();

    assert_eq!(first, second);
    // Snapshot content identical except the refreshed timestamp.
    assert_eq!(first_facts.facts.hotels, second_facts.facts.hotels);
    assert_eq!(first_facts.facts.rooms, second_facts.facts.rooms);
    assert_eq!(first_facts.facts.stats, second_facts.facts.stats);
    assert_eq!(first_facts.lead_price_min, second_facts.lead_price_min);
}

#[test]
fn refresh_includes_room_observations() {
    let engine = StoreEngine::open_in_memory().unwrap();
    setup_paris_trip(&engine, "trip_rooms");
    engine
        .ingest_rooms(&RoomIngest {
            trip_id: "trip_rooms".to_string(),
            rooms_by_hotel: vec![RoomsForHotel {
                hotel_key: "a".to_string(),
                rooms: vec![RoomPayload {
                    schema_version: SCHEMA_VERSION,
                    name: "standard".to_string(),
                    total: Some(420.0),
                    currency: Some("USD".to_string()),
                    refundable: Some(false),
                }],
            }],
            site: None,
        })
        .unwrap();

    let stats = engine.refresh_facts("trip_rooms").unwrap();
    assert_eq!(stats.total_rooms, 1);

    let compiled = engine.get_facts("trip_rooms").unwrap();
    assert_eq!(compiled.facts.rooms.len(), 1);
    assert_eq!(compiled.facts.rooms[0].name, "standard");
}

#[test]
fn get_facts_before_any_refresh_fails() {
    let engine = StoreEngine::open_in_memory().unwrap();
    setup_paris_trip(&engine, "trip_nofacts");
    let err = engine.get_facts("trip_nofacts").unwrap_err();
    assert!(matches!(err, WaypointError::FactsNotFound { .. }));
}

#[test]
fn ingestion_after_refresh_marks_facts_stale_again() {
    let engine = StoreEngine::open_in_memory().unwrap();
    setup_paris_trip(&engine, "trip_stale");
    engine.refresh_facts("trip_stale").unwrap();

    engine
        .ingest_hotels(&HotelIngest {
            trip_id: "trip_stale".to_string(),
            city: Some("Paris".to_string()),
            hotels: vec![hotel("late", 99.0)],
            site: None,
            session_id: None,
        })
        .unwrap();

    let trips = engine.list_trips().unwrap();
    assert!(trips[0].facts_dirty);
    // Staleness is advisory: the previous snapshot is untouched until the
    // next refresh.
    let compiled = engine.get_facts("trip_stale").unwrap();
    assert_eq!(compiled.lead_price_min, Some(150.0));

    let stats = engine.refresh_facts("trip_stale").unwrap();
    assert_eq!(stats.min_price, 99.0);
}
