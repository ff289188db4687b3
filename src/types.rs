use crate::error::{Error, Result};
use crate::id;
use chrono::{DateTime, Datelike, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

const MONTHS: [&str; 12] = [
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

/// A point on the map, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lng: f64,
}

impl Position {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5},{:.5}", self.lat, self.lng)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkoutType {
    Running,
    Cycling,
}

impl WorkoutType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Cycling => "cycling",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Running => "Running",
            Self::Cycling => "Cycling",
        }
    }
}

impl fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Variant-specific attributes plus the metric derived from them.
///
/// Serialized inline with the record, discriminated by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WorkoutKind {
    Running {
        /// steps/min
        cadence: f64,
        /// min/km
        pace: f64,
    },
    Cycling {
        /// meters
        #[serde(rename = "elevGain")]
        elevation_gain: f64,
        /// km/h
        speed: f64,
    },
}

impl WorkoutKind {
    pub const fn workout_type(&self) -> WorkoutType {
        match self {
            Self::Running { .. } => WorkoutType::Running,
            Self::Cycling { .. } => WorkoutType::Cycling,
        }
    }

    /// Pace for running, speed for cycling.
    pub const fn metric(&self) -> f64 {
        match self {
            Self::Running { pace, .. } => *pace,
            Self::Cycling { speed, .. } => *speed,
        }
    }

    pub const fn metric_unit(&self) -> &'static str {
        match self {
            Self::Running { .. } => "min/km",
            Self::Cycling { .. } => "km/h",
        }
    }

    /// Cadence for running, elevation gain for cycling.
    pub const fn extra(&self) -> f64 {
        match self {
            Self::Running { cadence, .. } => *cadence,
            Self::Cycling { elevation_gain, .. } => *elevation_gain,
        }
    }

    pub const fn extra_unit(&self) -> &'static str {
        match self {
            Self::Running { .. } => "spm",
            Self::Cycling { .. } => "m",
        }
    }
}

/// One logged exercise session.
///
/// Fields are private: everything except the interaction counter is fixed once the
/// record exists, and the counter only moves through the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRecord {
    id: String,
    created_at: DateTime<Utc>,
    distance: f64,
    duration: f64,
    position: Position,
    #[serde(default)]
    interaction_count: u32,
    description: String,
    #[serde(flatten)]
    kind: WorkoutKind,
}

impl WorkoutRecord {
    /// Build a running workout. `distance` in km, `duration` in minutes, `cadence` in steps/min.
    pub fn running(distance: f64, duration: f64, position: Position, cadence: f64) -> Result<Self> {
        ensure_measurement("distance", distance)?;
        ensure_measurement("duration", duration)?;
        ensure_measurement("cadence", cadence)?;

        let pace = duration / distance;
        ensure_measurement("pace", pace)?;

        let kind = WorkoutKind::Running { cadence, pace };
        Ok(Self::assemble(distance, duration, position, kind, Utc::now()))
    }

    /// Build a cycling workout. `elevation_gain` in meters.
    pub fn cycling(
        distance: f64,
        duration: f64,
        position: Position,
        elevation_gain: f64,
    ) -> Result<Self> {
        ensure_measurement("distance", distance)?;
        ensure_measurement("duration", duration)?;
        ensure_measurement("elevation gain", elevation_gain)?;

        let speed = distance / (duration / 60.0);
        ensure_measurement("speed", speed)?;

        let kind = WorkoutKind::Cycling {
            elevation_gain,
            speed,
        };
        Ok(Self::assemble(distance, duration, position, kind, Utc::now()))
    }

    fn assemble(
        distance: f64,
        duration: f64,
        position: Position,
        kind: WorkoutKind,
        created_at: DateTime<Utc>,
    ) -> Self {
        let description = describe(kind.workout_type(), created_at.with_timezone(&Local));
        Self {
            id: id::next_id(),
            created_at,
            distance,
            duration,
            position,
            interaction_count: 0,
            description,
            kind,
        }
    }

    /// Re-check the construction invariants on a record that came from storage.
    pub(crate) fn validate(&self) -> Result<()> {
        ensure_measurement("distance", self.distance)?;
        ensure_measurement("duration", self.duration)?;
        match self.kind {
            WorkoutKind::Running { cadence, pace } => {
                ensure_measurement("cadence", cadence)?;
                ensure_measurement("pace", pace)
            }
            WorkoutKind::Cycling {
                elevation_gain,
                speed,
            } => {
                ensure_measurement("elevation gain", elevation_gain)?;
                ensure_measurement("speed", speed)
            }
        }
    }

    pub(crate) fn bump_interaction(&mut self) {
        self.interaction_count = self.interaction_count.saturating_add(1);
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub const fn distance(&self) -> f64 {
        self.distance
    }

    pub const fn duration(&self) -> f64 {
        self.duration
    }

    pub const fn position(&self) -> Position {
        self.position
    }

    pub const fn interaction_count(&self) -> u32 {
        self.interaction_count
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub const fn kind(&self) -> &WorkoutKind {
        &self.kind
    }

    pub const fn workout_type(&self) -> WorkoutType {
        self.kind.workout_type()
    }
}

/// Raw values captured by the input form.
///
/// Only the attribute matching `workout_type` is read on submit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkoutForm {
    pub workout_type: WorkoutType,
    pub distance: f64,
    pub duration: f64,
    pub cadence: f64,
    pub elevation_gain: f64,
}

impl WorkoutForm {
    pub fn build(&self, position: Position) -> Result<WorkoutRecord> {
        match self.workout_type {
            WorkoutType::Running => {
                WorkoutRecord::running(self.distance, self.duration, position, self.cadence)
            }
            WorkoutType::Cycling => {
                WorkoutRecord::cycling(self.distance, self.duration, position, self.elevation_gain)
            }
        }
    }
}

/// `"<Label> on <day-of-week> <month>"`, day of week counted from Sunday = 0.
pub fn describe(workout_type: WorkoutType, at: DateTime<Local>) -> String {
    let day = at.weekday().num_days_from_sunday();
    let month = MONTHS[at.month0() as usize];
    format!("{} on {day} {month}", workout_type.label())
}

fn ensure_measurement(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidMeasurement { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const LONDON: Position = Position::new(51.5, -0.1);

    #[test]
    fn running_pace_is_duration_over_distance() {
        let w = WorkoutRecord::running(5.0, 25.0, LONDON, 178.0).unwrap();
        assert_eq!(w.kind().metric(), 5.0);
        assert_eq!(w.workout_type(), WorkoutType::Running);
        assert!(w.description().starts_with("Running on"));
        assert_eq!(w.interaction_count(), 0);
        assert_eq!(w.position(), LONDON);
    }

    #[test]
    fn cycling_speed_is_km_per_hour() {
        let w = WorkoutRecord::cycling(20.0, 60.0, LONDON, 400.0).unwrap();
        assert_eq!(w.kind().metric(), 20.0);
        assert_eq!(w.kind().extra(), 400.0);
        assert!(w.description().starts_with("Cycling on"));
    }

    #[test]
    fn rejects_zero_negative_and_non_finite() {
        let err = WorkoutRecord::running(0.0, 25.0, LONDON, 178.0).unwrap_err();
        assert!(matches!(err, Error::InvalidMeasurement { field: "distance", .. }));

        let err = WorkoutRecord::cycling(10.0, -1.0, LONDON, 10.0).unwrap_err();
        assert!(matches!(err, Error::InvalidMeasurement { field: "duration", .. }));

        let err = WorkoutRecord::running(5.0, 25.0, LONDON, f64::NAN).unwrap_err();
        assert!(matches!(err, Error::InvalidMeasurement { field: "cadence", .. }));

        let err = WorkoutRecord::cycling(5.0, 25.0, LONDON, f64::INFINITY).unwrap_err();
        assert!(matches!(err, Error::InvalidMeasurement { field: "elevation gain", .. }));
    }

    #[test]
    fn rejects_inputs_whose_metric_overflows() {
        let err = WorkoutRecord::running(1e-300, 1e300, LONDON, 178.0).unwrap_err();
        assert!(matches!(err, Error::InvalidMeasurement { field: "pace", .. }));

        let err = WorkoutRecord::running(1e300, 1e-300, LONDON, 178.0).unwrap_err();
        assert!(matches!(err, Error::InvalidMeasurement { field: "pace", .. }));

        let err = WorkoutRecord::cycling(10.0, f64::MIN_POSITIVE / 4.0, LONDON, 5.0).unwrap_err();
        assert!(matches!(err, Error::InvalidMeasurement { field: "speed", .. }));
    }

    #[test]
    fn description_uses_day_of_week_index_and_month_name() {
        // 2024-03-05 was a Tuesday.
        let at = Local.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap();
        assert_eq!(describe(WorkoutType::Running, at), "Running on 2 March");

        let sunday = Local.with_ymd_and_hms(2024, 12, 1, 9, 30, 0).unwrap();
        assert_eq!(describe(WorkoutType::Cycling, sunday), "Cycling on 0 December");
    }

    #[test]
    fn form_reads_only_the_matching_attribute() {
        let form = WorkoutForm {
            workout_type: WorkoutType::Cycling,
            distance: 20.0,
            duration: 60.0,
            cadence: 0.0,
            elevation_gain: 400.0,
        };
        let w = form.build(LONDON).unwrap();
        assert_eq!(w.workout_type(), WorkoutType::Cycling);

        let running = WorkoutForm {
            workout_type: WorkoutType::Running,
            ..form
        };
        assert!(running.build(LONDON).is_err());
    }

    #[test]
    fn json_shape_carries_type_tag() {
        let w = WorkoutRecord::cycling(20.0, 60.0, LONDON, 400.0).unwrap();
        let v = serde_json::to_value(&w).unwrap();
        assert_eq!(v["type"], "cycling");
        assert_eq!(v["elevGain"], 400.0);
        assert_eq!(v["speed"], 20.0);
        assert_eq!(v["position"]["lat"], 51.5);
        assert_eq!(v["interactionCount"], 0);
        assert!(v["id"].is_string());
    }
}
