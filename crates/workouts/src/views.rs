use uuid::Uuid;

use crate::models::{Coordinates, EditField, Workout, WorkoutDetails, WorkoutKind};

/// One metric cell of a rendered row. `field` names the record field behind
/// the value so an edit commit can target it directly.
#[derive(Debug, Clone, PartialEq)]
pub struct RowMetric {
    pub field: EditField,
    pub value: String,
    pub unit: &'static str,
}

/// Read-only projection of a workout handed to the list view.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutRow {
    pub id: Uuid,
    pub kind: WorkoutKind,
    pub title: String,
    pub metrics: Vec<RowMetric>,
}

impl WorkoutRow {
    pub fn for_workout(workout: &Workout) -> Self {
        let mut metrics = vec![
            RowMetric {
                field: EditField::Distance,
                value: workout.distance_km.to_string(),
                unit: "km",
            },
            RowMetric {
                field: EditField::Duration,
                value: workout.duration_min.to_string(),
                unit: "min",
            },
        ];
        match workout.details {
            WorkoutDetails::Running { cadence, pace } => {
                metrics.push(RowMetric {
                    field: EditField::Pace,
                    value: format!("{pace:.1}"),
                    unit: "min/km",
                });
                metrics.push(RowMetric {
                    field: EditField::Cadence,
                    value: cadence.to_string(),
                    unit: "spm",
                });
            }
            WorkoutDetails::Cycling {
                elevation_gain,
                speed,
            } => {
                metrics.push(RowMetric {
                    field: EditField::Speed,
                    value: format!("{speed:.1}"),
                    unit: "km/h",
                });
                metrics.push(RowMetric {
                    field: EditField::ElevationGain,
                    value: elevation_gain.to_string(),
                    unit: "m",
                });
            }
        }
        Self {
            id: workout.id,
            kind: workout.kind(),
            title: workout.description.clone(),
            metrics,
        }
    }
}

/// Marker popup text, glyph plus the frozen description.
pub fn marker_popup(workout: &Workout) -> String {
    format!("{} {}", workout.kind().glyph(), workout.description)
}

/// Renders markers given coordinates and a popup string. The session
/// controller drives it; it never reaches back into the store.
pub trait MapView {
    fn render_marker(&mut self, id: Uuid, coords: Coordinates, popup: &str, kind: WorkoutKind);
    fn remove_marker(&mut self, id: Uuid);
    fn pan_to(&mut self, coords: Coordinates, zoom: u8);
    fn clear_markers(&mut self);
}

/// Collects raw field values and shows validation failures to the user.
pub trait FormView {
    fn show(&mut self);
    fn hide_and_clear(&mut self);
    fn report_error(&mut self, message: &str);
}

/// Renders one row per record, in store order.
pub trait ListView {
    fn render_row(&mut self, row: &WorkoutRow);
    fn update_row(&mut self, row: &WorkoutRow);
    fn remove_row(&mut self, id: Uuid);
    fn clear(&mut self);
}
