use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    pub fn label(self) -> &'static str {
        match self {
            WorkoutKind::Running => "running",
            WorkoutKind::Cycling => "cycling",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            WorkoutKind::Running => "🏃",
            WorkoutKind::Cycling => "🚴",
        }
    }
}

/// Variant payload: the extra raw field plus the derived metric, both of
/// which are persisted rather than recomputed on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WorkoutDetails {
    Running { cadence: f64, pace: f64 },
    Cycling { elevation_gain: f64, speed: f64 },
}

/// Identifies the record field behind a rendered row value. Each list row
/// carries its field identifier explicitly so an edit commit names the field
/// it targets instead of being inferred from presentation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditField {
    Distance,
    Duration,
    Pace,
    Cadence,
    ElevationGain,
    Speed,
}

impl EditField {
    pub fn as_str(self) -> &'static str {
        match self {
            EditField::Distance => "distance",
            EditField::Duration => "duration",
            EditField::Pace => "pace",
            EditField::Cadence => "cadence",
            EditField::ElevationGain => "elevation_gain",
            EditField::Speed => "speed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "distance" => Some(EditField::Distance),
            "duration" => Some(EditField::Duration),
            "pace" => Some(EditField::Pace),
            "cadence" => Some(EditField::Cadence),
            "elevation_gain" | "elevation" => Some(EditField::ElevationGain),
            "speed" => Some(EditField::Speed),
            _ => None,
        }
    }

    /// Edits re-apply the creation-time rules: the fields that had to be
    /// strictly positive at creation stay strictly positive, the rest only
    /// need to be finite.
    pub fn validate(self, value: f64) -> Result<(), AppError> {
        if !value.is_finite() {
            return Err(AppError::InvalidInput(format!(
                "{} must be a finite number",
                self.as_str()
            )));
        }
        match self {
            EditField::Distance | EditField::Duration | EditField::Cadence if value <= 0.0 => Err(
                AppError::InvalidInput(format!("{} must be positive", self.as_str())),
            ),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub coords: Coordinates,
    pub distance_km: f64,
    pub duration_min: f64,
    pub description: String,
    #[serde(flatten)]
    pub details: WorkoutDetails,
}

impl Workout {
    /// Builds a running workout. No validation happens here: the session
    /// controller is the sole gate, and NaN or negative inputs simply
    /// produce NaN or negative derived metrics.
    pub fn running(coords: Coordinates, distance_km: f64, duration_min: f64, cadence: f64) -> Self {
        // min/km
        let pace = duration_min / distance_km;
        Self::new(
            coords,
            distance_km,
            duration_min,
            WorkoutDetails::Running { cadence, pace },
        )
    }

    /// Builds a cycling workout.
    pub fn cycling(
        coords: Coordinates,
        distance_km: f64,
        duration_min: f64,
        elevation_gain: f64,
    ) -> Self {
        // km/h
        let speed = distance_km / (duration_min / 60.0);
        Self::new(
            coords,
            distance_km,
            duration_min,
            WorkoutDetails::Cycling {
                elevation_gain,
                speed,
            },
        )
    }

    fn new(
        coords: Coordinates,
        distance_km: f64,
        duration_min: f64,
        details: WorkoutDetails,
    ) -> Self {
        let created_at = OffsetDateTime::now_utc();
        let kind = match details {
            WorkoutDetails::Running { .. } => WorkoutKind::Running,
            WorkoutDetails::Cycling { .. } => WorkoutKind::Cycling,
        };
        Self {
            id: Uuid::new_v4(),
            created_at,
            coords,
            distance_km,
            duration_min,
            description: describe(kind, created_at),
            details,
        }
    }

    pub fn kind(&self) -> WorkoutKind {
        match self.details {
            WorkoutDetails::Running { .. } => WorkoutKind::Running,
            WorkoutDetails::Cycling { .. } => WorkoutKind::Cycling,
        }
    }

    /// The variant's derived metric: pace for running, speed for cycling.
    pub fn derived_metric(&self) -> f64 {
        match self.details {
            WorkoutDetails::Running { pace, .. } => pace,
            WorkoutDetails::Cycling { speed, .. } => speed,
        }
    }

    /// Assigns `value` to the named field. Derived metrics and the
    /// description are left untouched: they are computed at construction
    /// only. A field that does not exist on this variant is rejected.
    pub fn set_field(&mut self, field: EditField, value: f64) -> Result<(), AppError> {
        field.validate(value)?;
        match (field, &mut self.details) {
            (EditField::Distance, _) => self.distance_km = value,
            (EditField::Duration, _) => self.duration_min = value,
            (EditField::Cadence, WorkoutDetails::Running { cadence, .. }) => *cadence = value,
            (EditField::Pace, WorkoutDetails::Running { pace, .. }) => *pace = value,
            (EditField::ElevationGain, WorkoutDetails::Cycling { elevation_gain, .. }) => {
                *elevation_gain = value
            }
            (EditField::Speed, WorkoutDetails::Cycling { speed, .. }) => *speed = value,
            (field, _) => {
                return Err(AppError::InvalidInput(format!(
                    "{} workouts have no {} field",
                    self.kind().label(),
                    field.as_str()
                )));
            }
        }
        Ok(())
    }
}

/// "Running on August 23" style title, computed once at construction and
/// frozen thereafter (it is persisted verbatim, never recomputed).
fn describe(kind: WorkoutKind, created_at: OffsetDateTime) -> String {
    format!(
        "{} on {} {}",
        capitalize(kind.label()),
        created_at.month(),
        created_at.day()
    )
}

fn capitalize(tag: &str) -> String {
    let mut chars = tag.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn running_pace_follows_formula() {
        let w = Workout::running(Coordinates::new(40.0, -3.7), 5.0, 30.0, 150.0);
        assert_eq!(w.derived_metric(), 6.0);
        assert_eq!(w.kind(), WorkoutKind::Running);
    }

    #[test]
    fn cycling_speed_follows_formula() {
        let w = Workout::cycling(Coordinates::new(40.0, -3.7), 20.0, 60.0, 300.0);
        assert_eq!(w.derived_metric(), 20.0);
        assert_eq!(w.kind(), WorkoutKind::Cycling);
    }

    #[test]
    fn description_names_kind_month_and_day() {
        let w = Workout::running(Coordinates::new(40.0, -3.7), 5.0, 30.0, 150.0);
        let expected = format!("Running on {} {}", w.created_at.month(), w.created_at.day());
        assert_eq!(w.description, expected);
    }

    #[test]
    fn ids_are_unique_across_records() {
        let a = Workout::running(Coordinates::new(40.0, -3.7), 5.0, 30.0, 150.0);
        let b = Workout::running(Coordinates::new(40.0, -3.7), 5.0, 30.0, 150.0);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn construction_does_not_validate() {
        // Validation is the controller's job; the constructor lets bad
        // numbers through and the derived metric reflects them.
        let w = Workout::running(Coordinates::new(0.0, 0.0), -5.0, f64::NAN, 150.0);
        assert!(w.derived_metric().is_nan());
    }

    #[test]
    fn edit_leaves_derived_metric_and_description_frozen() {
        let mut w = Workout::running(Coordinates::new(40.0, -3.7), 5.0, 30.0, 150.0);
        let description = w.description.clone();
        w.set_field(EditField::Distance, 10.0).unwrap();
        assert_eq!(w.distance_km, 10.0);
        assert_eq!(w.derived_metric(), 6.0);
        assert_eq!(w.description, description);
    }

    #[test]
    fn edit_rejects_nonpositive_required_fields() {
        let mut w = Workout::running(Coordinates::new(40.0, -3.7), 5.0, 30.0, 150.0);
        assert!(matches!(
            w.set_field(EditField::Duration, 0.0),
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            w.set_field(EditField::Cadence, -1.0),
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            w.set_field(EditField::Distance, f64::NAN),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn edit_allows_negative_elevation_gain() {
        let mut w = Workout::cycling(Coordinates::new(40.0, -3.7), 20.0, 60.0, 300.0);
        w.set_field(EditField::ElevationGain, -10.0).unwrap();
        assert_eq!(
            w.details,
            WorkoutDetails::Cycling {
                elevation_gain: -10.0,
                speed: 20.0
            }
        );
    }

    #[test]
    fn edit_rejects_field_missing_on_variant() {
        let mut w = Workout::cycling(Coordinates::new(40.0, -3.7), 20.0, 60.0, 300.0);
        assert!(matches!(
            w.set_field(EditField::Cadence, 90.0),
            Err(AppError::InvalidInput(_))
        ));
    }
}
