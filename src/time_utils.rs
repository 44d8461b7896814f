// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, Datelike, SecondsFormat, Utc};

pub const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Workout title date, e.g. "April 3".
///
/// The number is the day of the week counted from Sunday = 0, not the day
/// of the month. Existing titles were rendered this way. Month and weekday
/// are taken in UTC, not the viewer's local time zone.
pub fn display_date(date: DateTime<Utc>) -> String {
    let month = MONTHS[date.month0() as usize];
    format!("{} {}", month, date.weekday().num_days_from_sunday())
}
