// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Map surface abstraction.
//!
//! The session only issues commands; tiles, markers and animation belong to
//! whatever implements [`MapSurface`]. Location clicks flow the other way,
//! into `SessionController::select_location`.

use serde::Serialize;

use crate::models::{Coords, WorkoutKind};

/// Map rendering commands.
pub trait MapSurface {
    /// Show the map centered on `center`.
    fn initialize(&mut self, center: Coords, zoom: u8);

    /// Add a marker with an open popup.
    fn place_marker(&mut self, at: Coords, popup: &Popup);

    /// Move the view to `at`.
    fn pan_to(&mut self, at: Coords, zoom: u8, options: PanOptions);
}

/// Popup attached to a workout marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Popup {
    pub label: String,
    pub class_name: String,
    pub max_width: u32,
    pub min_width: u32,
    pub auto_close: bool,
    pub close_on_click: bool,
}

impl Popup {
    /// Popup styled for a workout kind; stays open when others open.
    pub fn for_kind(kind: WorkoutKind, label: String) -> Self {
        Self {
            label,
            class_name: format!("{}-popup", kind.as_str()),
            max_width: 250,
            min_width: 100,
            auto_close: false,
            close_on_click: false,
        }
    }
}

/// Pan animation settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanOptions {
    pub animate: bool,
    pub duration_secs: f64,
}

impl Default for PanOptions {
    fn default() -> Self {
        Self {
            animate: true,
            duration_secs: 1.0,
        }
    }
}

/// A command issued to the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum MapCommand {
    Initialize {
        center: Coords,
        zoom: u8,
    },
    PlaceMarker {
        at: Coords,
        popup: Popup,
    },
    PanTo {
        at: Coords,
        zoom: u8,
        options: PanOptions,
    },
}

/// Headless map that queues commands for a browser client to replay.
#[derive(Debug, Default)]
pub struct CommandQueueMap {
    pending: Vec<MapCommand>,
    initialized: bool,
}

impl CommandQueueMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands not yet taken.
    pub fn pending(&self) -> &[MapCommand] {
        &self.pending
    }

    /// Take all pending commands.
    pub fn drain(&mut self) -> Vec<MapCommand> {
        std::mem::take(&mut self.pending)
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

impl MapSurface for CommandQueueMap {
    fn initialize(&mut self, center: Coords, zoom: u8) {
        self.initialized = true;
        self.pending.push(MapCommand::Initialize { center, zoom });
    }

    fn place_marker(&mut self, at: Coords, popup: &Popup) {
        self.pending.push(MapCommand::PlaceMarker {
            at,
            popup: popup.clone(),
        });
    }

    fn pan_to(&mut self, at: Coords, zoom: u8, options: PanOptions) {
        self.pending.push(MapCommand::PanTo { at, zoom, options });
    }
}
