use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{EditField, Workout};

/// Insertion-ordered collection of workouts. The same order drives marker
/// and list rendering, so nothing here ever reorders.
#[derive(Debug, Default)]
pub struct WorkoutStore {
    workouts: Vec<Workout>,
}

impl WorkoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the store from a previously persisted collection, keeping
    /// the stored order.
    pub fn from_records(workouts: Vec<Workout>) -> Self {
        Self { workouts }
    }

    /// Appends. Ids are v4, so uniqueness is the caller's (cheap) guarantee.
    pub fn add(&mut self, workout: Workout) {
        self.workouts.push(workout);
    }

    pub fn find(&self, id: Uuid) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id == id)
    }

    pub fn find_mut(&mut self, id: Uuid) -> Option<&mut Workout> {
        self.workouts.iter_mut().find(|w| w.id == id)
    }

    /// Drops the workout with the given id, keeping order for the rest.
    /// Removing an absent id is a no-op, so a second delete of the same id
    /// changes nothing.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.workouts.len();
        self.workouts.retain(|w| w.id != id);
        self.workouts.len() != before
    }

    /// Coerces `raw` to a number and assigns it to the named field of the
    /// workout with the given id. Derived metrics are not recomputed.
    pub fn update_field(&mut self, id: Uuid, field: EditField, raw: &str) -> Result<(), AppError> {
        let value: f64 = raw.trim().parse().map_err(|_| {
            AppError::InvalidInput(format!("{:?} is not a number", raw))
        })?;
        let workout = self.find_mut(id).ok_or_else(|| {
            warn!("edit targets unknown workout {id}");
            AppError::NotFound(id)
        })?;
        workout.set_field(field, value)
    }

    pub fn records(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn iter(&self) -> impl Iterator<Item = &Workout> {
        self.workouts.iter()
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    pub fn clear(&mut self) {
        self.workouts.clear();
    }
}
