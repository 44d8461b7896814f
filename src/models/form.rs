// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Raw workout form input and its validation.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::ValidationError;
use crate::models::workout::{is_positive, WorkoutInput, WorkoutKind};

/// Field values as typed into the workout form.
///
/// Only the field matching `kind` is read out of cadence/elevation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FormInput {
    #[serde(rename = "type", default)]
    pub kind: WorkoutKind,
    #[serde(default)]
    pub distance: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub cadence: String,
    #[serde(default)]
    pub elevation: String,
}

/// A submission that passed every field check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedForm {
    pub distance: f64,
    pub duration: f64,
    pub input: WorkoutInput,
}

impl FormInput {
    /// Check fields in order: distance, duration, then the kind-specific field.
    ///
    /// The first failing field wins.
    pub fn validate(&self) -> Result<ValidatedForm, ValidationError> {
        let distance = parse_field("distance", &self.distance)?;
        if !is_positive(distance) {
            return Err(ValidationError::NonPositiveDistance);
        }

        let duration = parse_field("duration", &self.duration)?;
        if !is_positive(duration) {
            return Err(ValidationError::NonPositiveDuration);
        }

        let input = match self.kind {
            WorkoutKind::Running => {
                let cadence = parse_field("cadence", &self.cadence)?;
                if !is_positive(cadence) {
                    return Err(ValidationError::NonPositiveCadence);
                }
                WorkoutInput::Running { cadence }
            }
            WorkoutKind::Cycling => {
                // Zero elevation is rejected along with negative values.
                let elevation_gain = parse_field("elevation gain", &self.elevation)?;
                if !is_positive(elevation_gain) {
                    return Err(ValidationError::NonPositiveElevation);
                }
                WorkoutInput::Cycling { elevation_gain }
            }
        };

        Ok(ValidatedForm {
            distance,
            duration,
            input,
        })
    }
}

/// Parse a numeric field. An empty field reads as zero.
fn parse_field(name: &'static str, raw: &str) -> Result<f64, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0.0);
    }
    raw.parse::<f64>()
        .map_err(|_| ValidationError::NotANumber(name))
}
