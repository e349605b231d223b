use chrono::{DateTime, Utc};
use geo_types::Point;
use serde::{Deserialize, Serialize};

/// Running pace in min/km.
pub fn pace(distance_km: f64, duration_min: f64) -> f64 {
    duration_min / distance_km
}

/// Cycling speed in km/h.
pub fn speed(distance_km: f64, duration_min: f64) -> f64 {
    distance_km / (duration_min / 60.0)
}

/// Every numeric workout input has to be finite and strictly positive.
pub fn valid_inputs(inputs: &[f64]) -> bool {
    inputs.iter().all(|input| input.is_finite() && *input > 0.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WorkoutKind {
    Running { cadence: f64 },
    Cycling { elevation_gain: f64 },
}

impl WorkoutKind {
    pub fn type_str(&self) -> &'static str {
        match self {
            WorkoutKind::Running { .. } => "running",
            WorkoutKind::Cycling { .. } => "cycling",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WorkoutKind::Running { .. } => "Running",
            WorkoutKind::Cycling { .. } => "Cycling",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            WorkoutKind::Running { .. } => "🏃‍♂️",
            WorkoutKind::Cycling { .. } => "🚴‍♀️",
        }
    }

    /// The kind-specific input, cadence or elevation gain.
    pub fn extra_input(&self) -> f64 {
        match self {
            WorkoutKind::Running { cadence } => *cadence,
            WorkoutKind::Cycling { elevation_gain } => *elevation_gain,
        }
    }
}

/// One logged exercise session. The kind tag is flattened so the persisted
/// JSON stays a flat record; pace and speed are derived on demand and never
/// stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub position: Point,
    pub distance: f64,
    pub duration: f64,
    pub description: String,
    #[serde(flatten)]
    pub kind: WorkoutKind,
}

impl Workout {
    pub fn new(
        latitude: f64,
        longitude: f64,
        distance: f64,
        duration: f64,
        kind: WorkoutKind,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let mut workout = Self {
            id: timestamp.timestamp_millis(),
            timestamp,
            position: Point::new(longitude, latitude),
            distance,
            duration,
            description: String::new(),
            kind,
        };
        workout.description = workout.describe();
        workout
    }

    /// "Running on August 21" style summary, built from the kind and the
    /// creation date. Edits regenerate this instead of patching the text.
    pub fn describe(&self) -> String {
        format!("{} on {}", self.kind.label(), self.timestamp.format("%B %-d"))
    }

    pub fn latitude(&self) -> f64 {
        self.position.y()
    }

    pub fn longitude(&self) -> f64 {
        self.position.x()
    }

    pub fn pace(&self) -> Option<f64> {
        matches!(self.kind, WorkoutKind::Running { .. }).then(|| pace(self.distance, self.duration))
    }

    pub fn speed(&self) -> Option<f64> {
        matches!(self.kind, WorkoutKind::Cycling { .. }).then(|| speed(self.distance, self.duration))
    }
}

/// Parsed form input for a new workout or an edit, not yet validated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkoutDraft {
    pub distance: f64,
    pub duration: f64,
    pub kind: WorkoutKind,
}

impl WorkoutDraft {
    pub fn is_valid(&self) -> bool {
        valid_inputs(&[self.distance, self.duration, self.kind.extra_input()])
    }
}
