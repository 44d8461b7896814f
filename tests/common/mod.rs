// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use workout_tracker::config::Config;
use workout_tracker::db::{KeyValueStore, MemoryStore, StoreError};
use workout_tracker::models::{FormInput, WorkoutKind};
use workout_tracker::routes::create_router;
use workout_tracker::services::{
    CommandQueueMap, FixedGeolocator, SessionController, SessionOptions, SidebarPanel,
};
use workout_tracker::{spawn_geolocation, AppState, DynStore};
use std::sync::Arc;

#[allow(dead_code)]
pub type TestSession<S = MemoryStore> = SessionController<CommandQueueMap, S, SidebarPanel>;

/// Create a session over `store` with default options.
#[allow(dead_code)]
pub fn test_session<S: KeyValueStore>(store: S) -> TestSession<S> {
    SessionController::new(
        CommandQueueMap::new(),
        store,
        SidebarPanel::new(),
        SessionOptions::default(),
    )
}

/// Running form with the given raw field values.
#[allow(dead_code)]
pub fn running_form(distance: &str, duration: &str, cadence: &str) -> FormInput {
    FormInput {
        kind: WorkoutKind::Running,
        distance: distance.to_string(),
        duration: duration.to_string(),
        cadence: cadence.to_string(),
        elevation: String::new(),
    }
}

/// Cycling form with the given raw field values.
#[allow(dead_code)]
pub fn cycling_form(distance: &str, duration: &str, elevation: &str) -> FormInput {
    FormInput {
        kind: WorkoutKind::Cycling,
        distance: distance.to_string(),
        duration: duration.to_string(),
        cadence: String::new(),
        elevation: elevation.to_string(),
    }
}

/// Store whose writes always fail.
#[allow(dead_code)]
#[derive(Default)]
pub struct FailingStore {
    pub inner: MemoryStore,
}

impl KeyValueStore for FailingStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Io {
            key: key.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        })
    }
}

/// Create a test app over `store` with the map already up at the fallback
/// position. Returns the router and the shared state.
#[allow(dead_code)]
pub async fn create_test_app(store: MemoryStore) -> (axum::Router, Arc<AppState>) {
    let config = Config::default();
    let store: DynStore = Box::new(store);
    let session = SessionController::new(
        CommandQueueMap::new(),
        store,
        SidebarPanel::new(),
        config.session_options(),
    );
    let state = Arc::new(AppState::new(config, session));

    spawn_geolocation(state.clone(), FixedGeolocator::unavailable())
        .await
        .expect("Geolocation task failed");

    (create_router(state.clone()), state)
}
