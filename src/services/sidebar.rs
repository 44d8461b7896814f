// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sidebar surface: the workout form and the rendered workout list.

use serde::Serialize;

use crate::models::WorkoutKind;
use crate::services::render::WorkoutEntry;

/// Commands the session issues to the sidebar.
pub trait Sidebar {
    /// Show the form after a location was picked.
    fn reveal_form(&mut self);

    fn hide_form(&mut self);

    /// Empty all four numeric inputs.
    fn clear_fields(&mut self);

    /// Show the cadence or elevation input, whichever `kind` uses.
    fn show_kind_fields(&mut self, kind: WorkoutKind);

    /// Blocking message to the user.
    fn alert(&mut self, message: &str);

    /// Append an entry to the bottom of the workout list.
    fn append_entry(&mut self, entry: WorkoutEntry);
}

/// Form state as shown to the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    pub visible: bool,
    #[serde(rename = "type")]
    pub kind: WorkoutKind,
    /// Bumped each time the inputs are cleared.
    pub clear_count: u32,
    pub last_alert: Option<String>,
}

/// In-memory sidebar, exposed to clients over the API.
#[derive(Debug, Clone, Default)]
pub struct SidebarPanel {
    pub form: FormState,
    pub entries: Vec<WorkoutEntry>,
}

impl SidebarPanel {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Sidebar for SidebarPanel {
    fn reveal_form(&mut self) {
        self.form.visible = true;
        self.form.last_alert = None;
    }

    fn hide_form(&mut self) {
        self.form.visible = false;
    }

    /// The browser owns the input values; the panel only records the clear.
    fn clear_fields(&mut self) {
        self.form.clear_count += 1;
    }

    fn show_kind_fields(&mut self, kind: WorkoutKind) {
        self.form.kind = kind;
    }

    fn alert(&mut self, message: &str) {
        tracing::info!(message, "Form alert");
        self.form.last_alert = Some(message.to_string());
    }

    fn append_entry(&mut self, entry: WorkoutEntry) {
        self.entries.push(entry);
    }
}
