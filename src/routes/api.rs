// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes driving the workout session from a browser map client.

use crate::error::{AppError, Result, ValidationError};
use crate::models::{Coords, FormInput, WorkoutKind};
use crate::services::map::MapCommand;
use crate::services::render::{self, WorkoutEntry};
use crate::services::sidebar::FormState;
use crate::services::SessionState;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// API routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/session", get(get_session))
        .route("/api/workouts", get(list_workouts).post(submit_workout))
        .route("/api/workouts/html", get(list_workouts_html))
        .route("/api/workouts/geojson", get(workouts_geojson))
        .route("/api/workouts/{id}/focus", post(focus_workout))
        .route("/api/location", post(select_location))
        .route("/api/form", get(get_form))
        .route("/api/form/kind", put(set_form_kind))
        .route("/api/map/commands", get(drain_map_commands))
}

// ─── Session ─────────────────────────────────────────────────

/// Session overview response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub state: SessionState,
    pub map_center: Option<Coords>,
    pub pending_location: Option<Coords>,
    pub workout_count: usize,
}

async fn get_session(State(state): State<Arc<AppState>>) -> Json<SessionResponse> {
    let session = state.session.lock().await;
    Json(SessionResponse {
        state: session.state(),
        map_center: session.map_center(),
        pending_location: session.pending_location(),
        workout_count: session.workouts().len(),
    })
}

// ─── Workouts ────────────────────────────────────────────────

/// Rendered workout list, in the order entries were added.
async fn list_workouts(State(state): State<Arc<AppState>>) -> Json<Vec<WorkoutEntry>> {
    let session = state.session.lock().await;
    Json(session.sidebar().entries.clone())
}

/// Rendered workout list as HTML list items.
async fn list_workouts_html(State(state): State<Arc<AppState>>) -> Html<String> {
    let session = state.session.lock().await;
    let items: Vec<String> = session
        .sidebar()
        .entries
        .iter()
        .map(render::entry_html)
        .collect();
    Html(items.join("\n"))
}

/// All workout markers as a GeoJSON FeatureCollection.
async fn workouts_geojson(State(state): State<Arc<AppState>>) -> Json<geojson::FeatureCollection> {
    let session = state.session.lock().await;
    Json(render::feature_collection(session.workouts()))
}

/// Submit the workout form for the selected location.
async fn submit_workout(
    State(state): State<Arc<AppState>>,
    Json(input): Json<FormInput>,
) -> Result<(StatusCode, Json<WorkoutEntry>)> {
    let mut session = state.session.lock().await;
    let workout = session.submit(&input)?;
    Ok((StatusCode::CREATED, Json(render::entry(workout))))
}

/// Pan the map to a workout. Unknown IDs are accepted and ignored.
async fn focus_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> StatusCode {
    state.session.lock().await.focus_workout(&id);
    StatusCode::NO_CONTENT
}

// ─── Map & Form ──────────────────────────────────────────────

/// Location picked on the map.
#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LocationRequest {
    pub lat: f64,
    pub lng: f64,
}

async fn select_location(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LocationRequest>,
) -> Result<StatusCode> {
    let mut session = state.session.lock().await;
    if session.state() != SessionState::MapReady {
        return Err(AppError::BadRequest("Map is not ready".to_string()));
    }
    if session.select_location(Coords::new(request.lat, request.lng)) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ValidationError::InvalidLocation.into())
    }
}

async fn get_form(State(state): State<Arc<AppState>>) -> Json<FormState> {
    let session = state.session.lock().await;
    Json(session.sidebar().form.clone())
}

/// Workout kind selector.
#[derive(Debug, Deserialize)]
pub struct KindRequest {
    #[serde(rename = "type")]
    pub kind: WorkoutKind,
}

async fn set_form_kind(
    State(state): State<Arc<AppState>>,
    Json(request): Json<KindRequest>,
) -> StatusCode {
    state.session.lock().await.toggle_kind(request.kind);
    StatusCode::NO_CONTENT
}

/// Take the map commands issued since the last call.
async fn drain_map_commands(State(state): State<Arc<AppState>>) -> Json<Vec<MapCommand>> {
    let mut session = state.session.lock().await;
    Json(session.map_mut().drain())
}
