use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::workout::{Workout, WorkoutDraft};

/// Field the workout list is ordered by. Persisted alongside the workouts
/// as its kebab-case string ("time-created", "distance", "duration").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    TimeCreated,
    Distance,
    Duration,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::TimeCreated, SortKey::Distance, SortKey::Duration];

    pub fn value(&self) -> &'static str {
        match self {
            SortKey::TimeCreated => "time-created",
            SortKey::Distance => "distance",
            SortKey::Duration => "duration",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::TimeCreated => "time created",
            SortKey::Distance => "distance",
            SortKey::Duration => "duration",
        }
    }

    pub fn from_value(value: &str) -> Option<SortKey> {
        SortKey::ALL.into_iter().find(|key| key.value() == value)
    }
}

#[derive(Debug, PartialEq)]
pub enum LogError {
    InvalidInput,
    UnknownWorkout(i64),
}

/// The ordered workout collection and its active sort key. All mutation goes
/// through the methods here; the list itself is only handed out as a slice.
#[derive(Debug, Default)]
pub struct WorkoutLog {
    workouts: Vec<Workout>,
    sort_by: SortKey,
}

impl WorkoutLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the log from a persisted snapshot, re-applying the sort key
    /// that was active when it was saved.
    pub fn restore(workouts: Vec<Workout>, sort_by: SortKey) -> Self {
        let mut log = Self { workouts, sort_by };
        log.resort();
        log
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn sort_by(&self) -> SortKey {
        self.sort_by
    }

    pub fn get(&self, id: i64) -> Option<&Workout> {
        self.workouts.iter().find(|workout| workout.id == id)
    }

    /// Validates the draft and appends a new workout at the clicked position.
    /// The list is not re-sorted until the next sort event. Ids are creation
    /// millis; a same-millisecond collision bumps until free.
    pub fn add(
        &mut self,
        draft: WorkoutDraft,
        latitude: f64,
        longitude: f64,
        timestamp: DateTime<Utc>,
    ) -> Result<Workout, LogError> {
        if !draft.is_valid() {
            return Err(LogError::InvalidInput);
        }
        let mut workout = Workout::new(
            latitude,
            longitude,
            draft.distance,
            draft.duration,
            draft.kind,
            timestamp,
        );
        while self.workouts.iter().any(|existing| existing.id == workout.id) {
            workout.id += 1;
        }
        self.workouts.push(workout.clone());
        Ok(workout)
    }

    /// Replaces distance, duration and kind of the matching workout in place,
    /// keeping its id, position, creation time and list slot. The description
    /// is regenerated from the new data.
    pub fn edit(&mut self, id: i64, draft: WorkoutDraft) -> Result<Workout, LogError> {
        if !draft.is_valid() {
            return Err(LogError::InvalidInput);
        }
        let Some(workout) = self.workouts.iter_mut().find(|workout| workout.id == id) else {
            return Err(LogError::UnknownWorkout(id));
        };
        workout.distance = draft.distance;
        workout.duration = draft.duration;
        workout.kind = draft.kind;
        workout.description = workout.describe();
        Ok(workout.clone())
    }

    /// Removes the matching workout, leaving the others' relative order
    /// untouched. Returns the removed record, or None for an unknown id.
    pub fn delete(&mut self, id: i64) -> Option<Workout> {
        let index = self.workouts.iter().position(|workout| workout.id == id)?;
        Some(self.workouts.remove(index))
    }

    pub fn set_sort(&mut self, sort_by: SortKey) {
        self.sort_by = sort_by;
        self.resort();
    }

    /// Stable ascending sort on the active key.
    fn resort(&mut self) {
        match self.sort_by {
            SortKey::TimeCreated => self.workouts.sort_by_key(|workout| workout.id),
            SortKey::Distance => self
                .workouts
                .sort_by(|a, b| a.distance.total_cmp(&b.distance)),
            SortKey::Duration => self
                .workouts
                .sort_by(|a, b| a.duration.total_cmp(&b.duration)),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::workout::WorkoutKind;

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 21, 8, minute, 0).unwrap()
    }

    fn running(distance: f64, duration: f64) -> WorkoutDraft {
        WorkoutDraft {
            distance,
            duration,
            kind: WorkoutKind::Running { cadence: 150.0 },
        }
    }

    fn cycling(distance: f64, duration: f64) -> WorkoutDraft {
        WorkoutDraft {
            distance,
            duration,
            kind: WorkoutKind::Cycling { elevation_gain: 200.0 },
        }
    }

    #[test]
    fn adding_a_running_workout_yields_its_pace() {
        let mut log = WorkoutLog::new();
        let added = log.add(running(5.0, 30.0), 40.0, -8.0, at(0)).unwrap();

        assert_eq!(log.workouts().len(), 1);
        assert_eq!(added.pace(), Some(6.0));
        assert_eq!(added.latitude(), 40.0);
        assert_eq!(added.longitude(), -8.0);
        assert_eq!(log.get(added.id), Some(&added));
    }

    #[test]
    fn invalid_draft_leaves_the_log_unchanged() {
        let mut log = WorkoutLog::new();
        let result = log.add(running(5.0, -1.0), 40.0, -8.0, at(0));

        assert_eq!(result, Err(LogError::InvalidInput));
        assert!(log.workouts().is_empty());
    }

    #[test]
    fn same_millisecond_ids_are_bumped_until_unique() {
        let mut log = WorkoutLog::new();
        let first = log.add(running(5.0, 30.0), 40.0, -8.0, at(0)).unwrap();
        let second = log.add(cycling(20.0, 60.0), 40.0, -8.0, at(0)).unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(second.id, first.id + 1);
    }

    #[test]
    fn sorting_permutes_without_loss() {
        let mut log = WorkoutLog::new();
        log.add(running(5.0, 90.0), 40.0, -8.0, at(0)).unwrap();
        log.add(cycling(30.0, 45.0), 40.0, -8.0, at(1)).unwrap();
        log.add(running(1.0, 60.0), 40.0, -8.0, at(2)).unwrap();

        let mut ids: Vec<i64> = log.workouts().iter().map(|w| w.id).collect();
        ids.sort();

        for key in SortKey::ALL {
            log.set_sort(key);
            let mut after: Vec<i64> = log.workouts().iter().map(|w| w.id).collect();
            after.sort();
            assert_eq!(after, ids);
        }

        log.set_sort(SortKey::Distance);
        let distances: Vec<f64> = log.workouts().iter().map(|w| w.distance).collect();
        assert_eq!(distances, vec![1.0, 5.0, 30.0]);

        log.set_sort(SortKey::Duration);
        let durations: Vec<f64> = log.workouts().iter().map(|w| w.duration).collect();
        assert_eq!(durations, vec![45.0, 60.0, 90.0]);

        log.set_sort(SortKey::TimeCreated);
        let stamps: Vec<_> = log.workouts().iter().map(|w| w.timestamp).collect();
        assert_eq!(stamps, vec![at(0), at(1), at(2)]);
    }

    #[test]
    fn sort_ties_keep_insertion_order() {
        let mut log = WorkoutLog::new();
        let first = log.add(running(5.0, 30.0), 40.0, -8.0, at(0)).unwrap();
        let second = log.add(cycling(5.0, 45.0), 40.0, -8.0, at(1)).unwrap();

        log.set_sort(SortKey::Distance);
        let ids: Vec<i64> = log.workouts().iter().map(|w| w.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[test]
    fn add_appends_without_resorting() {
        let mut log = WorkoutLog::new();
        log.add(running(5.0, 30.0), 40.0, -8.0, at(0)).unwrap();
        log.add(running(1.0, 10.0), 40.0, -8.0, at(1)).unwrap();
        log.set_sort(SortKey::Distance);

        log.add(running(0.5, 5.0), 40.0, -8.0, at(2)).unwrap();
        let distances: Vec<f64> = log.workouts().iter().map(|w| w.distance).collect();
        assert_eq!(distances, vec![1.0, 5.0, 0.5]);
    }

    #[test]
    fn delete_removes_exactly_the_matching_workout() {
        let mut log = WorkoutLog::new();
        let first = log.add(running(5.0, 30.0), 40.0, -8.0, at(0)).unwrap();
        let second = log.add(cycling(20.0, 60.0), 40.0, -8.0, at(1)).unwrap();
        let third = log.add(running(8.0, 50.0), 40.0, -8.0, at(2)).unwrap();

        let removed = log.delete(second.id).unwrap();
        assert_eq!(removed.id, second.id);

        let ids: Vec<i64> = log.workouts().iter().map(|w| w.id).collect();
        assert_eq!(ids, vec![first.id, third.id]);

        assert_eq!(log.delete(second.id), None);
    }

    #[test]
    fn edit_replaces_in_place_and_regenerates_the_description() {
        let mut log = WorkoutLog::new();
        log.add(running(5.0, 30.0), 40.0, -8.0, at(0)).unwrap();
        let target = log.add(running(8.0, 50.0), 41.0, -7.0, at(1)).unwrap();
        log.add(running(3.0, 20.0), 40.0, -8.0, at(2)).unwrap();

        let edited = log
            .edit(target.id, cycling(25.0, 75.0))
            .unwrap();

        assert_eq!(edited.id, target.id);
        assert_eq!(edited.timestamp, target.timestamp);
        assert_eq!(edited.latitude(), 41.0);
        assert_eq!(edited.longitude(), -7.0);
        assert_eq!(edited.distance, 25.0);
        assert_eq!(edited.duration, 75.0);
        assert_eq!(edited.speed(), Some(20.0));
        assert_eq!(edited.description, "Cycling on August 21");

        let slot = log
            .workouts()
            .iter()
            .position(|w| w.id == target.id)
            .unwrap();
        assert_eq!(slot, 1);
    }

    #[test]
    fn edit_rejects_invalid_drafts_and_unknown_ids() {
        let mut log = WorkoutLog::new();
        let added = log.add(running(5.0, 30.0), 40.0, -8.0, at(0)).unwrap();

        let invalid = log.edit(added.id, running(f64::NAN, 30.0));
        assert_eq!(invalid, Err(LogError::InvalidInput));
        assert_eq!(log.get(added.id).unwrap().distance, 5.0);

        let unknown = log.edit(added.id + 999, running(5.0, 30.0));
        assert_eq!(unknown, Err(LogError::UnknownWorkout(added.id + 999)));
    }

    #[test]
    fn restore_applies_the_persisted_sort_key() {
        let mut source = WorkoutLog::new();
        source.add(running(5.0, 30.0), 40.0, -8.0, at(0)).unwrap();
        source.add(running(1.0, 10.0), 40.0, -8.0, at(1)).unwrap();

        let log = WorkoutLog::restore(source.workouts().to_vec(), SortKey::Distance);
        assert_eq!(log.sort_by(), SortKey::Distance);
        let distances: Vec<f64> = log.workouts().iter().map(|w| w.distance).collect();
        assert_eq!(distances, vec![1.0, 5.0]);
    }

    #[test]
    fn sort_key_round_trips_through_its_value_string() {
        for key in SortKey::ALL {
            assert_eq!(SortKey::from_value(key.value()), Some(key));
        }
        assert_eq!(SortKey::from_value("calories"), None);

        let json = serde_json::to_string(&SortKey::TimeCreated).unwrap();
        assert_eq!(json, "\"time-created\"");
        let restored: SortKey = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, SortKey::TimeCreated);
    }
}
