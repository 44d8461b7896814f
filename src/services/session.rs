// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session controller.
//!
//! Owns the workout collection and drives the collaborators:
//! 1. Restore stored workouts on construction
//! 2. Resolve a position (or fall back) and bring up the map
//! 3. Replay restored workouts onto the map and list
//! 4. Accept location picks and form submissions
//! 5. Persist the whole collection after each accepted workout

use serde::Serialize;
use std::iter;

use crate::db::{load_workouts, save_workouts, KeyValueStore, StoreError};
use crate::error::{AppError, ValidationError};
use crate::models::{Coords, FormInput, Workout, WorkoutKind};
use crate::services::geolocation::{GeolocationError, Geolocator, FALLBACK_COORDS};
use crate::services::map::{MapSurface, PanOptions, Popup};
use crate::services::render;
use crate::services::sidebar::Sidebar;

/// Default map zoom level.
pub const DEFAULT_ZOOM: u8 = 13;

/// Map bring-up progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Waiting for a position; the map does not exist yet.
    Locating,
    /// Map shown and restored workouts replayed.
    MapReady,
}

/// Session tunables.
#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    pub zoom: u8,
    /// Map center when geolocation fails.
    pub fallback: Coords,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            fallback: FALLBACK_COORDS,
        }
    }
}

/// Mediates between user input, the workout collection and storage.
pub struct SessionController<M, S, B> {
    map: M,
    store: S,
    sidebar: B,
    options: SessionOptions,
    workouts: Vec<Workout>,
    state: SessionState,
    map_center: Option<Coords>,
    pending_location: Option<Coords>,
    /// False when stored data could not be read; saves are refused so the
    /// unread data is never overwritten.
    restored: bool,
}

impl<M, S, B> SessionController<M, S, B>
where
    M: MapSurface,
    S: KeyValueStore,
    B: Sidebar,
{
    /// Create a session and restore any stored workouts.
    ///
    /// Restored workouts are rendered once the map is ready. If the store
    /// cannot be read the session starts empty and will not save.
    pub fn new(map: M, store: S, mut sidebar: B, options: SessionOptions) -> Self {
        sidebar.show_kind_fields(WorkoutKind::Running);

        let (workouts, restored) = match load_workouts(&store) {
            Ok(workouts) => (workouts, true),
            Err(e) => {
                tracing::error!(error = %e, "Failed to read stored workouts, saving disabled");
                (Vec::new(), false)
            }
        };
        tracing::info!(count = workouts.len(), "Restored workouts");

        Self {
            map,
            store,
            sidebar,
            options,
            workouts,
            state: SessionState::Locating,
            map_center: None,
            pending_location: None,
            restored,
        }
    }

    /// Ask `geolocator` for a position and bring up the map.
    ///
    /// Returns `false` if the map was already up.
    pub async fn locate<G: Geolocator>(&mut self, geolocator: &G) -> bool {
        if self.state == SessionState::MapReady {
            tracing::warn!("Map already initialized, skipping geolocation");
            return false;
        }
        let position = geolocator.current_position().await;
        self.on_position(position)
    }

    /// Bring up the map at `position`, or at the fallback if it failed, then
    /// replay every stored workout.
    ///
    /// Runs once per session; later calls are ignored and return `false`.
    pub fn on_position(&mut self, position: Result<Coords, GeolocationError>) -> bool {
        if self.state == SessionState::MapReady {
            tracing::warn!("Map already initialized, ignoring position");
            return false;
        }

        let center = match position {
            Ok(coords) => {
                tracing::info!(lat = coords.lat, lng = coords.lng, "Position resolved");
                coords
            }
            Err(e) => {
                tracing::warn!(error = %e, "Geolocation failed, using fallback position");
                self.options.fallback
            }
        };

        self.map.initialize(center, self.options.zoom);
        self.map_center = Some(center);
        self.state = SessionState::MapReady;

        for workout in &self.workouts {
            render_workout(&mut self.map, &mut self.sidebar, workout);
        }
        tracing::info!(replayed = self.workouts.len(), "Map ready");
        true
    }

    /// Record a location picked on the map and open the form.
    ///
    /// The latest pick replaces any earlier one. Picks arriving before the map
    /// is ready, and non-finite coordinates, are ignored.
    pub fn select_location(&mut self, at: Coords) -> bool {
        if self.state != SessionState::MapReady {
            tracing::debug!(lat = at.lat, lng = at.lng, "Location picked before map ready");
            return false;
        }
        if !at.is_finite() {
            tracing::warn!(lat = at.lat, lng = at.lng, "Ignoring non-finite location");
            return false;
        }
        self.pending_location = Some(at);
        self.sidebar.reveal_form();
        true
    }

    /// Switch the form between cadence and elevation inputs.
    pub fn toggle_kind(&mut self, kind: WorkoutKind) {
        self.sidebar.show_kind_fields(kind);
    }

    /// Validate a form submission and, if it passes, record the workout.
    ///
    /// On any error the collection and the store are left untouched and the
    /// user is alerted.
    pub fn submit(&mut self, input: &FormInput) -> Result<&Workout, AppError> {
        let workout = match self.build_workout(input) {
            Ok(workout) => workout,
            Err(e) => {
                tracing::info!(kind = %input.kind, error = %e, "Workout rejected");
                self.sidebar.alert(&e.to_string());
                return Err(e.into());
            }
        };

        // Write first so a failed save never leaves an unsaved workout in memory.
        let saved = if self.restored {
            save_workouts(
                &self.store,
                self.workouts.iter().chain(iter::once(&workout)),
            )
        } else {
            Err(StoreError::NotRestored)
        };
        if let Err(e) = saved {
            tracing::error!(workout_id = %workout.id, error = %e, "Failed to save workouts");
            self.sidebar.alert("The workout could not be saved");
            return Err(e.into());
        }

        self.sidebar.clear_fields();
        render_workout(&mut self.map, &mut self.sidebar, &workout);
        self.sidebar.hide_form();
        self.pending_location = None;

        tracing::info!(
            workout_id = %workout.id,
            kind = %workout.kind(),
            lat = workout.coords.lat,
            lng = workout.coords.lng,
            total = self.workouts.len() + 1,
            "Workout recorded"
        );
        self.workouts.push(workout);
        Ok(&self.workouts[self.workouts.len() - 1])
    }

    /// Pan the map to the workout with `id`.
    ///
    /// Unknown IDs are ignored and return `false`.
    pub fn focus_workout(&mut self, id: &str) -> bool {
        if self.state != SessionState::MapReady {
            return false;
        }
        let Some(coords) = self.workouts.iter().find(|w| w.id == id).map(|w| w.coords) else {
            tracing::debug!(workout_id = id, "No workout to focus");
            return false;
        };
        self.map.pan_to(coords, self.options.zoom, PanOptions::default());
        true
    }

    fn build_workout(&self, input: &FormInput) -> Result<Workout, ValidationError> {
        let form = input.validate()?;
        let coords = self
            .pending_location
            .ok_or(ValidationError::NoLocationSelected)?;
        Workout::new(coords, form.distance, form.duration, form.input)
    }

    /// Workouts in insertion order.
    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Where the map was centered when it came up.
    pub fn map_center(&self) -> Option<Coords> {
        self.map_center
    }

    pub fn pending_location(&self) -> Option<Coords> {
        self.pending_location
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut M {
        &mut self.map
    }

    pub fn sidebar(&self) -> &B {
        &self.sidebar
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

/// Add a workout to the list and drop its marker on the map.
fn render_workout<M: MapSurface, B: Sidebar>(map: &mut M, sidebar: &mut B, workout: &Workout) {
    sidebar.append_entry(render::entry(workout));
    let popup = Popup::for_kind(workout.kind(), render::popup_label(workout));
    map.place_marker(workout.coords, &popup);
}
