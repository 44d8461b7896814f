// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout Tracker API Server
//!
//! Serves the workout session to a browser map client and persists workouts
//! to a local file store.

use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use workout_tracker::{
    config::Config,
    db::FileStore,
    services::{CommandQueueMap, FixedGeolocator, HttpGeolocator, SessionController, SidebarPanel},
    spawn_geolocation, AppState, DynStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env().context("Invalid configuration")?;
    tracing::info!(port = config.port, "Starting Workout Tracker API");

    // Open the workout store
    let store: DynStore = Box::new(
        FileStore::open(&config.store_dir).context("Failed to open workout store")?,
    );

    // Restore stored workouts; they are replayed once the map is up
    let session = SessionController::new(
        CommandQueueMap::new(),
        store,
        SidebarPanel::new(),
        config.session_options(),
    );

    // Build shared state
    let state = Arc::new(AppState::new(config.clone(), session));

    // Resolve the position while the server starts accepting requests
    match &config.geolocation_url {
        Some(url) => {
            tracing::info!(url = %url, "Using IP geolocation");
            let geolocator = HttpGeolocator::new(url.clone())
                .context("Failed to create geolocation client")?;
            spawn_geolocation(state.clone(), geolocator);
        }
        None => {
            tracing::info!("Geolocation disabled, using fallback position");
            spawn_geolocation(state.clone(), FixedGeolocator::unavailable());
        }
    }

    // Build router
    let app = workout_tracker::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> anyhow::Result<()> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("workout_tracker=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
