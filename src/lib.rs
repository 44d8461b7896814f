// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Workout Tracker: log runs and rides by dropping markers on a map
//!
//! This crate provides the workout model, the session controller that ties
//! the map, sidebar and storage together, and an HTTP API for a browser map
//! client.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::KeyValueStore;
use services::{CommandQueueMap, Geolocator, SessionController, SidebarPanel};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Storage backend shared by the server session.
pub type DynStore = Box<dyn KeyValueStore + Send + Sync>;

/// The session type served over HTTP.
pub type Session = SessionController<CommandQueueMap, DynStore, SidebarPanel>;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    /// Events are applied one at a time under this lock.
    pub session: Mutex<Session>,
}

impl AppState {
    pub fn new(config: Config, session: Session) -> Self {
        Self {
            config,
            session: Mutex::new(session),
        }
    }
}

/// Resolve the position in the background, then bring up the map.
///
/// The session lock is only taken once the position is known.
pub fn spawn_geolocation<G>(state: Arc<AppState>, geolocator: G) -> JoinHandle<()>
where
    G: Geolocator + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let position = geolocator.current_position().await;
        state.session.lock().await.on_position(position);
    })
}
