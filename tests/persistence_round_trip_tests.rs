// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Save/reload round trip tests.
//!
//! A reloaded session must reproduce every stored field, including the derived
//! pace/speed, and render the same entries as the session that created them.

use workout_tracker::db::{keys, FileStore, KeyValueStore, MemoryStore, StoreError};
use workout_tracker::error::{AppError, ValidationError};
use workout_tracker::models::{Coords, WorkoutKind};
use workout_tracker::services::render;
use workout_tracker::services::FixedGeolocator;

mod common;
use common::{cycling_form, running_form, test_session, FailingStore};

const HOME: Coords = Coords::new(35.715298, 51.404343);

/// Record a mix of workouts through a session over `store`.
async fn record_workouts<S: KeyValueStore>(store: S) -> Vec<workout_tracker::models::Workout> {
    let mut session = test_session(store);
    session.locate(&FixedGeolocator::at(HOME)).await;

    let forms = [
        running_form("5", "25", "180"),
        cycling_form("20", "60", "400"),
        running_form("7.3", "41.5", "172"),
        cycling_form("42.195", "97", "1280"),
    ];
    for (i, form) in forms.iter().enumerate() {
        session.toggle_kind(form.kind);
        session.select_location(Coords::new(35.7 + i as f64 * 0.01, 51.4 - i as f64 * 0.01));
        session.submit(form).expect("valid submission");
    }

    session.workouts().to_vec()
}

#[tokio::test]
async fn test_memory_round_trip_reproduces_records() {
    let store = MemoryStore::new();
    let original = record_workouts(store.clone()).await;

    let reloaded = test_session(store);

    assert_eq!(reloaded.workouts().len(), original.len());
    for (before, after) in original.iter().zip(reloaded.workouts()) {
        assert_eq!(after.id, before.id);
        assert_eq!(after.kind(), before.kind());
        assert_eq!(after.coords, before.coords);
        assert_eq!(after.distance.to_bits(), before.distance.to_bits());
        assert_eq!(after.duration.to_bits(), before.duration.to_bits());
        assert_eq!(
            after.metrics.derived().to_bits(),
            before.metrics.derived().to_bits()
        );
        assert_eq!(after.metrics.extra(), before.metrics.extra());
        assert_eq!(after.created_at, before.created_at);
    }
}

#[tokio::test]
async fn test_file_round_trip_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let original = record_workouts(FileStore::open(dir.path()).unwrap()).await;

    let reloaded = test_session(FileStore::open(dir.path()).unwrap());

    assert_eq!(reloaded.workouts(), original.as_slice());
}

#[tokio::test]
async fn test_reloaded_workouts_render_identically() {
    let store = MemoryStore::new();
    let original = record_workouts(store.clone()).await;

    let mut reloaded = test_session(store);
    reloaded.locate(&FixedGeolocator::unavailable()).await;

    let expected: Vec<_> = original.iter().map(render::entry).collect();
    assert_eq!(reloaded.sidebar().entries, expected);
    assert_eq!(reloaded.sidebar().entries[1].kind, WorkoutKind::Cycling);
    assert_eq!(reloaded.sidebar().entries[1].details[2].unit, "km/h");
}

#[tokio::test]
async fn test_stored_records_carry_type_tags() {
    let store = MemoryStore::new();
    record_workouts(store.clone()).await;

    let data = store.get(keys::WORKOUTS).unwrap().expect("workouts stored");
    let records: Vec<serde_json::Value> = serde_json::from_str(&data).unwrap();

    let tags: Vec<&str> = records
        .iter()
        .map(|r| r["type"].as_str().unwrap())
        .collect();
    assert_eq!(tags, vec!["running", "cycling", "running", "cycling"]);
    assert_eq!(records[0]["pace"], 5.0);
    assert_eq!(records[1]["speed"], 20.0);
    assert!(records[1].get("cadence").is_none());
}

#[tokio::test]
async fn test_reload_then_submit_appends() {
    let store = MemoryStore::new();
    record_workouts(store.clone()).await;

    let mut session = test_session(store.clone());
    session.locate(&FixedGeolocator::at(HOME)).await;
    session.select_location(HOME);
    session.submit(&running_form("3", "18", "165")).unwrap();

    let reloaded = test_session(store);
    assert_eq!(reloaded.workouts().len(), 5);
    assert_eq!(reloaded.workouts()[4].metrics.derived(), 6.0);
}

#[tokio::test]
async fn test_overflowing_metric_never_reaches_store() {
    let store = MemoryStore::new();
    let mut session = test_session(store.clone());
    session.locate(&FixedGeolocator::at(HOME)).await;
    session.select_location(HOME);
    session.submit(&running_form("5", "25", "180")).unwrap();

    session.toggle_kind(WorkoutKind::Cycling);
    session.select_location(HOME);
    let result = session.submit(&cycling_form("1e300", "1e-10", "10"));
    assert!(matches!(
        result,
        Err(AppError::Validation(ValidationError::OutOfRange("speed")))
    ));

    session.toggle_kind(WorkoutKind::Running);
    let result = session.submit(&running_form("1e-300", "1e300", "180"));
    assert!(matches!(
        result,
        Err(AppError::Validation(ValidationError::OutOfRange("pace")))
    ));

    assert_eq!(store.write_count(), 1);
    let reloaded = test_session(store);
    assert_eq!(reloaded.workouts(), session.workouts());
    assert_eq!(reloaded.workouts().len(), 1);
}

#[tokio::test]
async fn test_non_finite_location_never_reaches_store() {
    let store = MemoryStore::new();
    let mut session = test_session(store.clone());
    session.locate(&FixedGeolocator::at(HOME)).await;
    session.select_location(HOME);
    session.submit(&running_form("5", "25", "180")).unwrap();

    session.select_location(Coords::new(35.72, 51.41));
    assert!(!session.select_location(Coords::new(f64::NAN, f64::NAN)));
    session.submit(&running_form("3", "18", "165")).unwrap();

    let reloaded = test_session(store);
    assert_eq!(reloaded.workouts().len(), 2);
    assert_eq!(reloaded.workouts()[1].coords, Coords::new(35.72, 51.41));
}

#[tokio::test]
async fn test_unreadable_data_survives_later_submit() {
    let store = MemoryStore::with_entry(keys::WORKOUTS, "[{\"id\":");
    let mut session = test_session(store.clone());
    assert!(session.workouts().is_empty());

    session.locate(&FixedGeolocator::at(HOME)).await;
    session.select_location(HOME);
    session.submit(&running_form("5", "25", "180")).unwrap();

    assert_eq!(
        store.get(keys::WORKOUTS_CORRUPT).unwrap().as_deref(),
        Some("[{\"id\":")
    );
    assert_eq!(test_session(store).workouts().len(), 1);
}

#[tokio::test]
async fn test_unreadable_data_is_not_overwritten_without_backup() {
    let store = FailingStore {
        inner: MemoryStore::with_entry(keys::WORKOUTS, "{not json"),
    };
    let mut session = test_session(store);
    session.locate(&FixedGeolocator::at(HOME)).await;
    session.select_location(HOME);

    let result = session.submit(&running_form("5", "25", "180"));

    assert!(matches!(
        result,
        Err(AppError::Storage(StoreError::NotRestored))
    ));
    assert!(session.workouts().is_empty());
    assert_eq!(
        session.store().inner.get(keys::WORKOUTS).unwrap().as_deref(),
        Some("{not json")
    );
    assert_eq!(session.store().inner.write_count(), 0);
}
