//! Test data generation for workout-log.
//!
//! Provides randomized, well-formed workouts for seeding a persistence slot
//! so the console app has something to show during manual testing.

pub mod generators;

pub use generators::{Region, WorkoutGenerator};
