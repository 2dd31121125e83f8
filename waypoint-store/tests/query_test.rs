//! Integration test: the facts query engine.

use waypoint_core::models::*;
use waypoint_core::traits::TripBackend;
use waypoint_store::StoreEngine;

fn hotel(name: &str, city: &str, price: f64, refundable: bool, rating: f64) -> HotelPayload {
    HotelPayload {
        schema_version: SCHEMA_VERSION,
        name: name.to_string(),
        city: city.to_string(),
        lead_price: Some(PriceQuote {
            amount: price,
            currency: "USD".to_string(),
        }),
        refundable: Some(refundable),
        rating: Some(rating),
        site: None,
    }
}

/// Creates a trip with the given hotels, refreshed so its facts are queryable.
fn add_trip(engine: &StoreEngine, trip_id: &str, hotels: Vec<HotelPayload>) {
    engine
        .create_trip(&TripDraft {
            id: Some(trip_id.to_string()),
            title: format!("Trip {trip_id}"),
            party: vec![],
            destinations: String::new(),
        })
        .unwrap();
    if !hotels.is_empty() {
        engine
            .ingest_hotels(&HotelIngest {
                trip_id: trip_id.to_string(),
                city: None,
                hotels,
                site: None,
                session_id: None,
            })
            .unwrap();
    }
    engine.refresh_facts(trip_id).unwrap();
}

fn ids(results: &[CompiledFacts]) -> Vec<&str> {
    results.iter().map(|c| c.trip_id.as_str()).collect()
}

#[test]
fn empty_query_returns_everything_most_recent_first() {
    let engine = StoreEngine::open_in_memory().unwrap();
    add_trip(&engine, "trip_a", vec![hotel("h", "Paris", 100.0, true, 4.0)]);
    std::thread::sleep(std::time::Duration::from_millis(5));
    add_trip(&engine, "trip_b", vec![hotel("h", "Rome", 200.0, true, 4.0)]);

    let results = engine.query_facts(&FactsQuery::default()).unwrap();
    assert_eq!(ids(&results), vec!["trip_b", "trip_a"]);
}

#[test]
fn trip_id_predicate_is_exact() {
    let engine = StoreEngine::open_in_memory().unwrap();
    add_trip(&engine, "trip_a", vec![hotel("h", "Paris", 100.0, true, 4.0)]);
    add_trip(&engine, "trip_b", vec![hotel("h", "Paris", 100.0, true, 4.0)]);

    let results = engine
        .query_facts(&FactsQuery {
            trip_id: Some("trip_a".to_string()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(ids(&results), vec!["trip_a"]);
}

#[test]
fn price_ceiling_never_returns_pricier_trips() {
    let engine = StoreEngine::open_in_memory().unwrap();
    add_trip(&engine, "trip_cheap", vec![hotel("h", "Paris", 80.0, true, 4.0)]);
    add_trip(&engine, "trip_mid", vec![hotel("h", "Paris", 150.0, true, 4.0)]);
    add_trip(&engine, "trip_posh", vec![hotel("h", "Paris", 900.0, true, 4.0)]);

    let results = engine
        .query_facts(&FactsQuery {
            max_lead_price: Some(150.0),
            ..Default::default()
        })
        .unwrap();

    assert_eq!(results.len(), 2);
    for compiled in &results {
        assert!(compiled.lead_price_min.unwrap() <= 150.0);
    }
}

#[test]
fn price_ceiling_excludes_trips_without_hotels() {
    let engine = StoreEngine::open_in_memory().unwrap();
    add_trip(&engine, "trip_none", vec![]);

    let results = engine
        .query_facts(&FactsQuery {
            max_lead_price: Some(1_000_000.0),
            ..Default::default()
        })
        .unwrap();
    assert!(results.is_empty());

    // Without a ceiling the hotel-less trip is still visible.
    let results = engine.query_facts(&FactsQuery::default()).unwrap();
    assert_eq!(ids(&results), vec!["trip_none"]);
}

#[test]
fn city_match_is_case_insensitive() {
    let engine = StoreEngine::open_in_memory().unwrap();
    add_trip(&engine, "trip_paris", vec![hotel("h", "Paris", 100.0, true, 4.0)]);
    add_trip(&engine, "trip_rome", vec![hotel("h", "Rome", 100.0, true, 4.0)]);

    let results = engine
        .query_facts(&FactsQuery {
            city: Some("paris".to_string()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(ids(&results), vec!["trip_paris"]);
}

#[test]
fn refundable_predicate_needs_one_matching_hotel() {
    let engine = StoreEngine::open_in_memory().unwrap();
    add_trip(
        &engine,
        "trip_mixed",
        vec![
            hotel("strict", "Paris", 100.0, false, 4.0),
            hotel("flexible", "Paris", 140.0, true, 4.0),
        ],
    );
    add_trip(&engine, "trip_strict", vec![hotel("strict", "Paris", 100.0, false, 4.0)]);

    let results = engine
        .query_facts(&FactsQuery {
            refundable: Some(true),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(ids(&results), vec!["trip_mixed"]);
}

#[test]
fn rating_floor_filters_snapshots() {
    let engine = StoreEngine::open_in_memory().unwrap();
    add_trip(&engine, "trip_good", vec![hotel("h", "Paris", 100.0, true, 4.6)]);
    add_trip(&engine, "trip_meh", vec![hotel("h", "Paris", 100.0, true, 3.1)]);

    let results = engine
        .query_facts(&FactsQuery {
            min_rating: Some(4.5),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(ids(&results), vec!["trip_good"]);
}

#[test]
fn predicates_compose() {
    let engine = StoreEngine::open_in_memory().unwrap();
    add_trip(
        &engine,
        "trip_match",
        vec![hotel("h", "Paris", 120.0, true, 4.0)],
    );
    add_trip(
        &engine,
        "trip_wrong_city",
        vec![hotel("h", "Rome", 120.0, true, 4.0)],
    );
    add_trip(
        &engine,
        "trip_too_pricey",
        vec![hotel("h", "Paris", 500.0, true, 4.0)],
    );

    let results = engine
        .query_facts(&FactsQuery {
            city: Some("Paris".to_string()),
            max_lead_price: Some(200.0),
            refundable: Some(true),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(ids(&results), vec!["trip_match"]);
}
