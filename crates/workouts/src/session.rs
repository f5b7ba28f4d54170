use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{Coordinates, EditField, Workout};
use crate::persistence::{SlotStore, WorkoutArchive};
use crate::store::WorkoutStore;
use crate::views::{FormView, ListView, MapView, WorkoutRow, marker_popup};

pub const MAP_ZOOM_LEVEL: u8 = 13;

const VALIDATION_MESSAGE: &str = "Inputs have to be positive numbers!";

/// Where the create workflow currently stands. Every other operation runs
/// in `Idle` without leaving it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionState {
    Idle,
    FormOpen { pending: Coordinates },
}

/// Raw field values exactly as the form view collected them. Coercion and
/// validation happen in the controller, nowhere earlier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormInput {
    pub kind: String,
    pub distance: String,
    pub duration: String,
    pub cadence: String,
    pub elevation_gain: String,
}

/// Orchestrates the create/edit/delete/reset workflow. Owns the store and
/// the archive; the views only ever receive read-only projections.
pub struct Session<S: SlotStore, M: MapView, L: ListView, F: FormView> {
    store: WorkoutStore,
    archive: WorkoutArchive<S>,
    state: SessionState,
    map: M,
    list: L,
    form: F,
}

impl<S: SlotStore, M: MapView, L: ListView, F: FormView> Session<S, M, L, F> {
    pub fn new(slots: S, map: M, list: L, form: F) -> Self {
        Self {
            store: WorkoutStore::new(),
            archive: WorkoutArchive::new(slots),
            state: SessionState::Idle,
            map,
            list,
            form,
        }
    }

    /// Restores the previous session from the archive and renders it, in
    /// stored order. A corrupt slot is logged and treated as no prior
    /// state; it does not take the session down.
    pub fn start(&mut self) -> Result<(), AppError> {
        let records = match self.archive.load() {
            Ok(records) => records,
            Err(AppError::CorruptState(e)) => {
                warn!("ignoring corrupt persisted state: {e}");
                Vec::new()
            }
            Err(e) => return Err(e),
        };
        info!(count = records.len(), "restored workouts");
        self.store = WorkoutStore::from_records(records);
        for workout in self.store.iter() {
            self.map.render_marker(
                workout.id,
                workout.coords,
                &marker_popup(workout),
                workout.kind(),
            );
            self.list.render_row(&WorkoutRow::for_workout(workout));
        }
        Ok(())
    }

    /// A map click captures the provisional location and opens the form. A
    /// second click while the form is open just moves the pending location.
    pub fn map_clicked(&mut self, coords: Coordinates) {
        self.state = SessionState::FormOpen { pending: coords };
        self.form.show();
    }

    /// Escape or outside click: discard the provisional location.
    pub fn cancel_form(&mut self) {
        if let SessionState::FormOpen { .. } = self.state {
            self.form.hide_and_clear();
            self.state = SessionState::Idle;
        }
    }

    /// Validates the submitted fields, creates the record, persists the
    /// whole collection, and tells the views. Any validation failure is
    /// reported once through the form view and leaves everything untouched,
    /// with the form still open.
    pub fn submit_form(&mut self, input: FormInput) -> Result<(), AppError> {
        let SessionState::FormOpen { pending } = self.state else {
            return Err(AppError::InvalidInput("no location selected".to_string()));
        };

        let distance = coerce(&input.distance);
        let duration = coerce(&input.duration);

        let workout = match input.kind.as_str() {
            "running" => {
                let cadence = coerce(&input.cadence);
                if !all_finite(&[distance, duration, cadence])
                    || !all_positive(&[distance, duration, cadence])
                {
                    return self.reject_creation();
                }
                Workout::running(pending, distance, duration, cadence)
            }
            "cycling" => {
                let elevation_gain = coerce(&input.elevation_gain);
                // Elevation gain may be negative (downhill rides).
                if !all_finite(&[distance, duration, elevation_gain])
                    || !all_positive(&[distance, duration])
                {
                    return self.reject_creation();
                }
                Workout::cycling(pending, distance, duration, elevation_gain)
            }
            other => {
                let message = format!("unknown workout type {other:?}");
                self.form.report_error(&message);
                return Err(AppError::InvalidInput(message));
            }
        };

        info!(id = %workout.id, kind = workout.kind().label(), "recorded workout");
        let row = WorkoutRow::for_workout(&workout);
        let popup = marker_popup(&workout);
        let (id, coords, kind) = (workout.id, workout.coords, workout.kind());

        self.store.add(workout);
        self.archive.save(self.store.records())?;
        self.map.render_marker(id, coords, &popup, kind);
        self.list.render_row(&row);
        self.form.hide_and_clear();
        self.state = SessionState::Idle;
        Ok(())
    }

    /// Edit commit from the list view: single-record mutation, then the
    /// whole collection is re-persisted. Derived metrics stay as they were.
    pub fn edit_field(&mut self, id: Uuid, field: EditField, raw: &str) -> Result<(), AppError> {
        self.store.update_field(id, field, raw)?;
        self.archive.save(self.store.records())?;
        let row = self
            .store
            .find(id)
            .map(WorkoutRow::for_workout)
            .ok_or(AppError::NotFound(id))?;
        self.list.update_row(&row);
        info!(%id, field = field.as_str(), "updated workout field");
        Ok(())
    }

    /// Removes the record and its visual entities. Deleting an id that is
    /// already gone changes nothing and raises nothing.
    pub fn delete(&mut self, id: Uuid) -> Result<(), AppError> {
        if !self.store.remove(id) {
            debug!("delete of unknown workout {id} ignored");
            return Ok(());
        }
        self.archive.save(self.store.records())?;
        self.list.remove_row(id);
        self.map.remove_marker(id);
        info!(%id, "deleted workout");
        Ok(())
    }

    /// Row click: pan the map to the record's location.
    pub fn focus(&mut self, id: Uuid) -> Result<(), AppError> {
        let coords = self.store.find(id).map(|w| w.coords).ok_or_else(|| {
            warn!("focus targets unknown workout {id}");
            AppError::NotFound(id)
        })?;
        self.map.pan_to(coords, MAP_ZOOM_LEVEL);
        Ok(())
    }

    /// Clears the slot and the in-memory state. A no-op while the store is
    /// empty.
    pub fn reset(&mut self) -> Result<(), AppError> {
        if self.store.is_empty() {
            return Ok(());
        }
        self.archive.clear()?;
        self.store.clear();
        self.list.clear();
        self.map.clear_markers();
        self.state = SessionState::Idle;
        info!("reset workout log");
        Ok(())
    }

    pub fn workouts(&self) -> &[Workout] {
        self.store.records()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn map_view(&self) -> &M {
        &self.map
    }

    pub fn list_view(&self) -> &L {
        &self.list
    }

    pub fn form_view(&self) -> &F {
        &self.form
    }

    fn reject_creation(&mut self) -> Result<(), AppError> {
        self.form.report_error(VALIDATION_MESSAGE);
        Err(AppError::InvalidInput(VALIDATION_MESSAGE.to_string()))
    }
}

/// Minimal numeric coercion: anything unparseable becomes NaN and falls
/// into the single validation failure.
fn coerce(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(f64::NAN)
}

fn all_finite(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite())
}

fn all_positive(values: &[f64]) -> bool {
    values.iter().all(|v| *v > 0.0)
}
