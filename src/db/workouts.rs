// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout collection persistence.
//!
//! The whole collection is written as one JSON array under
//! [`keys::WORKOUTS`] on every save. Derived metrics are stored as computed
//! and read back verbatim; nothing is re-derived on load.

use super::{keys, KeyValueStore, StoreError};
use crate::models::Workout;

/// Serialize workouts into the stored representation.
pub fn encode_workouts<'a, I>(workouts: I) -> Result<String, StoreError>
where
    I: IntoIterator<Item = &'a Workout>,
{
    let records: Vec<&Workout> = workouts.into_iter().collect();
    Ok(serde_json::to_string(&records)?)
}

/// Parse the stored representation.
pub fn decode_workouts(data: &str) -> Result<Vec<Workout>, serde_json::Error> {
    serde_json::from_str(data)
}

/// Overwrite the stored collection.
pub fn save_workouts<'a, S, I>(store: &S, workouts: I) -> Result<(), StoreError>
where
    S: KeyValueStore + ?Sized,
    I: IntoIterator<Item = &'a Workout>,
{
    let data = encode_workouts(workouts)?;
    store.set(keys::WORKOUTS, &data)?;
    tracing::debug!(bytes = data.len(), "Saved workouts");
    Ok(())
}

/// Load the stored collection.
///
/// A missing key is an empty collection. Stored data that cannot be parsed is
/// copied to [`keys::WORKOUTS_CORRUPT`] and then treated as empty, so a later
/// save cannot destroy the only copy. If that copy fails the error is returned.
pub fn load_workouts<S>(store: &S) -> Result<Vec<Workout>, StoreError>
where
    S: KeyValueStore + ?Sized,
{
    let Some(data) = store.get(keys::WORKOUTS)? else {
        tracing::debug!("No stored workouts");
        return Ok(Vec::new());
    };

    match decode_workouts(&data) {
        Ok(workouts) => Ok(workouts),
        Err(e) => {
            store.set(keys::WORKOUTS_CORRUPT, &data)?;
            tracing::error!(
                error = %e,
                backup_key = keys::WORKOUTS_CORRUPT,
                "Stored workouts are unreadable, starting empty"
            );
            Ok(Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{KeyValueStore, MemoryStore};
    use crate::models::{Coords, Metrics, WorkoutInput, WorkoutKind};

    fn sample() -> Vec<Workout> {
        vec![
            Workout::new(
                Coords::new(35.715298, 51.404343),
                5.2,
                24.0,
                WorkoutInput::Running { cadence: 178.0 },
            )
            .unwrap(),
            Workout::new(
                Coords::new(35.8, 51.3),
                27.0,
                95.0,
                WorkoutInput::Cycling {
                    elevation_gain: 523.0,
                },
            )
            .unwrap(),
        ]
    }

    #[test]
    fn test_save_then_load_preserves_records() {
        let store = MemoryStore::new();
        let workouts = sample();

        save_workouts(&store, &workouts).unwrap();
        let loaded = load_workouts(&store).unwrap();

        assert_eq!(loaded, workouts);
        assert_eq!(loaded[0].kind(), WorkoutKind::Running);
        assert_eq!(loaded[1].kind(), WorkoutKind::Cycling);
    }

    #[test]
    fn test_load_missing_key_is_empty() {
        let store = MemoryStore::new();
        assert!(load_workouts(&store).unwrap().is_empty());
    }

    #[test]
    fn test_load_corrupt_data_is_empty_and_backed_up() {
        let store = MemoryStore::with_entry(keys::WORKOUTS, "{not json");

        assert!(load_workouts(&store).unwrap().is_empty());
        assert_eq!(
            store.get(keys::WORKOUTS_CORRUPT).unwrap().as_deref(),
            Some("{not json")
        );
        assert_eq!(
            store.get(keys::WORKOUTS).unwrap().as_deref(),
            Some("{not json")
        );
    }

    #[test]
    fn test_null_metric_is_unreadable() {
        // serde_json writes non-finite floats as null
        let data = r#"[{"id":"0000000001","createdAt":"2024-01-15T10:00:00Z",
            "coords":[1.0,2.0],"distance":1e300,"duration":1e-10,
            "type":"cycling","elevationGain":10.0,"speed":null}]"#;
        let store = MemoryStore::with_entry(keys::WORKOUTS, data);

        assert!(load_workouts(&store).unwrap().is_empty());
        assert_eq!(store.get(keys::WORKOUTS_CORRUPT).unwrap().as_deref(), Some(data));
    }

    #[test]
    fn test_derived_values_are_not_recomputed_on_load() {
        // A stored pace that disagrees with distance/duration is kept as-is.
        let data = r#"[{"id":"0000000001","createdAt":"2024-01-15T10:00:00Z",
            "coords":[1.0,2.0],"distance":10.0,"duration":50.0,
            "type":"running","cadence":170.0,"pace":4.99}]"#;
        let store = MemoryStore::with_entry(keys::WORKOUTS, data);

        let loaded = load_workouts(&store).unwrap();

        assert_eq!(
            loaded[0].metrics,
            Metrics::Running {
                cadence: 170.0,
                pace: 4.99
            }
        );
    }

    #[test]
    fn test_save_overwrites_whole_collection() {
        let store = MemoryStore::new();
        let workouts = sample();

        save_workouts(&store, &workouts).unwrap();
        save_workouts(&store, &workouts[..1]).unwrap();

        assert_eq!(load_workouts(&store).unwrap().len(), 1);
        assert_eq!(store.write_count(), 2);
    }
}
