// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout rendering: list entries, popups and map features.
//!
//! Everything here dispatches on [`WorkoutKind`] through
//! [`WorkoutKind::display`], never on how a record was constructed.

use geojson::{feature::Id, Feature, FeatureCollection, Geometry, JsonObject};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::{Workout, WorkoutKind};
use crate::time_utils::{display_date, format_utc_rfc3339};

const DURATION_ICON: &str = "⏱";
const METRIC_ICON: &str = "⚡️";

/// A rendered list entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutEntry {
    /// Lookup key for click-to-pan
    pub id: String,
    #[serde(rename = "type")]
    pub kind: WorkoutKind,
    pub title: String,
    pub details: Vec<EntryDetail>,
}

/// One icon/value/unit row of a list entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct EntryDetail {
    pub icon: String,
    pub value: String,
    pub unit: String,
}

impl EntryDetail {
    fn new(icon: &str, value: String, unit: &str) -> Self {
        Self {
            icon: icon.to_string(),
            value,
            unit: unit.to_string(),
        }
    }
}

/// "Running on April 3"
pub fn title(workout: &Workout) -> String {
    format!(
        "{} on {}",
        workout.kind().display().label,
        display_date(workout.created_at)
    )
}

/// "running on April 3"
pub fn popup_label(workout: &Workout) -> String {
    format!("{} on {}", workout.kind(), display_date(workout.created_at))
}

/// Build the list entry for a workout.
pub fn entry(workout: &Workout) -> WorkoutEntry {
    let display = workout.kind().display();
    WorkoutEntry {
        id: workout.id.clone(),
        kind: workout.kind(),
        title: title(workout),
        details: vec![
            EntryDetail::new(display.icon, workout.distance.to_string(), "km"),
            EntryDetail::new(DURATION_ICON, workout.duration.to_string(), "min"),
            EntryDetail::new(
                METRIC_ICON,
                format!("{:.2}", workout.metrics.derived()),
                display.metric_unit,
            ),
            EntryDetail::new(
                display.extra_icon,
                workout.metrics.extra().to_string(),
                display.extra_unit,
            ),
        ],
    }
}

/// Render a list entry as an HTML `<li>`.
pub fn entry_html(entry: &WorkoutEntry) -> String {
    let mut html = format!(
        "<li class=\"workout workout--{}\" data-id=\"{}\">\n  <h2 class=\"workout__title\">{}</h2>\n",
        entry.kind,
        escape_html(&entry.id),
        escape_html(&entry.title)
    );
    for detail in &entry.details {
        html.push_str(&format!(
            "  <div class=\"workout__details\">\n    <span class=\"workout__icon\">{}</span>\n    <span class=\"workout__value\">{}</span>\n    <span class=\"workout__unit\">{}</span>\n  </div>\n",
            detail.icon,
            escape_html(&detail.value),
            detail.unit
        ));
    }
    html.push_str("</li>");
    html
}

/// All workouts as GeoJSON point features, in insertion order.
pub fn feature_collection(workouts: &[Workout]) -> FeatureCollection {
    let features = workouts
        .iter()
        .map(|workout| {
            let point: geo::Point<f64> = workout.coords.into();

            let mut properties = JsonObject::new();
            properties.insert("type".to_string(), workout.kind().as_str().into());
            properties.insert("title".to_string(), title(workout).into());
            properties.insert("popup".to_string(), popup_label(workout).into());
            properties.insert(
                "createdAt".to_string(),
                format_utc_rfc3339(workout.created_at).into(),
            );
            properties.insert(
                workout.kind().display().metric_name.to_string(),
                workout.metrics.derived().into(),
            );

            Feature {
                bbox: None,
                geometry: Some(Geometry::new(geojson::Value::from(&point))),
                id: Some(Id::String(workout.id.clone())),
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
