// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Workout model for storage and rendering.
//!
//! A workout is a single record with the fields every activity shares plus a
//! tagged [`Metrics`] payload. All per-kind behavior dispatches on that tag,
//! so a record restored from storage behaves exactly like a freshly built one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::ValidationError;

/// Number of trailing timestamp digits used as a workout ID.
const ID_DIGITS: usize = 10;

/// Latitude/longitude pair, stored as `[lat, lng]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coords {
    pub lat: f64,
    pub lng: f64,
}

impl Coords {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Both components are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

impl From<[f64; 2]> for Coords {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coords> for [f64; 2] {
    fn from(coords: Coords) -> Self {
        [coords.lat, coords.lng]
    }
}

impl From<Coords> for geo::Point<f64> {
    /// Geo points are (x = longitude, y = latitude).
    fn from(coords: Coords) -> Self {
        geo::Point::new(coords.lng, coords.lat)
    }
}

/// Workout discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    #[default]
    Running,
    Cycling,
}

impl WorkoutKind {
    /// Lowercase tag, as stored and used in CSS class names.
    pub fn as_str(self) -> &'static str {
        match self {
            WorkoutKind::Running => "running",
            WorkoutKind::Cycling => "cycling",
        }
    }

    /// Display units and icons for this kind.
    pub fn display(self) -> KindDisplay {
        match self {
            WorkoutKind::Running => KindDisplay {
                label: "Running",
                icon: "🏃‍♂️",
                metric_name: "pace",
                metric_unit: "min/km",
                extra_name: "cadence",
                extra_icon: "🦶🏼",
                extra_unit: "spm",
            },
            WorkoutKind::Cycling => KindDisplay {
                label: "Cycling",
                icon: "🚴‍♀️",
                metric_name: "speed",
                metric_unit: "km/h",
                extra_name: "elevationGain",
                extra_icon: "⛰",
                extra_unit: "m",
            },
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-kind rendering vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindDisplay {
    /// Capitalized title label ("Running")
    pub label: &'static str,
    /// Icon shown next to the distance
    pub icon: &'static str,
    /// Name of the derived field ("pace" / "speed")
    pub metric_name: &'static str,
    /// Unit of the derived field
    pub metric_unit: &'static str,
    /// Name of the kind-specific input field
    pub extra_name: &'static str,
    pub extra_icon: &'static str,
    pub extra_unit: &'static str,
}

/// Kind-specific value supplied when a workout is created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorkoutInput {
    Running { cadence: f64 },
    Cycling { elevation_gain: f64 },
}

impl WorkoutInput {
    pub fn kind(&self) -> WorkoutKind {
        match self {
            WorkoutInput::Running { .. } => WorkoutKind::Running,
            WorkoutInput::Cycling { .. } => WorkoutKind::Cycling,
        }
    }

    fn value(&self) -> f64 {
        match *self {
            WorkoutInput::Running { cadence } => cadence,
            WorkoutInput::Cycling { elevation_gain } => elevation_gain,
        }
    }
}

/// Kind-specific fields, including the derived metric.
///
/// Serialized inline with the workout under a `type` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Metrics {
    Running {
        /// Steps per minute
        cadence: f64,
        /// Minutes per kilometer
        pace: f64,
    },
    Cycling {
        /// Meters climbed
        #[serde(rename = "elevationGain")]
        elevation_gain: f64,
        /// Kilometers per hour
        speed: f64,
    },
}

impl Metrics {
    pub fn kind(&self) -> WorkoutKind {
        match self {
            Metrics::Running { .. } => WorkoutKind::Running,
            Metrics::Cycling { .. } => WorkoutKind::Cycling,
        }
    }

    /// The derived value (pace or speed).
    pub fn derived(&self) -> f64 {
        match *self {
            Metrics::Running { pace, .. } => pace,
            Metrics::Cycling { speed, .. } => speed,
        }
    }

    /// The kind-specific input value (cadence or elevation gain).
    pub fn extra(&self) -> f64 {
        match *self {
            Metrics::Running { cadence, .. } => cadence,
            Metrics::Cycling { elevation_gain, .. } => elevation_gain,
        }
    }
}

/// A logged workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    /// Last ten digits of the creation timestamp in milliseconds.
    ///
    /// Two workouts created in the same millisecond share an ID.
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub coords: Coords,
    /// Kilometers
    pub distance: f64,
    /// Minutes
    pub duration: f64,
    #[serde(flatten)]
    pub metrics: Metrics,
}

impl Workout {
    /// Create a workout stamped with the current time.
    pub fn new(
        coords: Coords,
        distance: f64,
        duration: f64,
        input: WorkoutInput,
    ) -> Result<Self, ValidationError> {
        Self::with_created_at(coords, distance, duration, input, Utc::now())
    }

    /// Create a workout with an explicit creation time.
    ///
    /// The derived metric is computed here once and never again. Every stored
    /// number must be finite, since JSON has no encoding for NaN or infinity.
    pub fn with_created_at(
        coords: Coords,
        distance: f64,
        duration: f64,
        input: WorkoutInput,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        if !is_positive(distance) {
            return Err(ValidationError::NonPositiveDistance);
        }
        if !is_positive(duration) {
            return Err(ValidationError::NonPositiveDuration);
        }
        if !coords.is_finite() {
            return Err(ValidationError::InvalidLocation);
        }
        if !input.value().is_finite() {
            let name = match input.kind() {
                WorkoutKind::Running => "cadence",
                WorkoutKind::Cycling => "elevation gain",
            };
            return Err(ValidationError::NotANumber(name));
        }

        let metrics = match input {
            WorkoutInput::Running { cadence } => Metrics::Running {
                cadence,
                pace: pace(distance, duration),
            },
            WorkoutInput::Cycling { elevation_gain } => Metrics::Cycling {
                elevation_gain,
                speed: speed(distance, duration),
            },
        };
        if !metrics.derived().is_finite() {
            return Err(ValidationError::OutOfRange(input.kind().display().metric_name));
        }

        Ok(Self {
            id: id_from_timestamp(created_at),
            created_at,
            coords,
            distance,
            duration,
            metrics,
        })
    }

    pub fn kind(&self) -> WorkoutKind {
        self.metrics.kind()
    }
}

/// Finite and strictly greater than zero.
pub fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Running pace in min/km, rounded to two decimals.
pub fn pace(distance: f64, duration: f64) -> f64 {
    round2(duration / distance)
}

/// Cycling speed in km/h, rounded to two decimals.
pub fn speed(distance: f64, duration: f64) -> f64 {
    round2(distance / duration * 60.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn id_from_timestamp(created_at: DateTime<Utc>) -> String {
    let millis = created_at.timestamp_millis().to_string();
    let start = millis.len().saturating_sub(ID_DIGITS);
    millis[start..].to_string()
}
