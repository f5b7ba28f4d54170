//! Workout generation.

use rand::Rng;

use workouts::models::{Coordinates, Workout};

/// Bounding box the generated locations fall into.
#[derive(Debug, Clone, Copy)]
pub struct Region {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Region {
    pub const MADRID: Region = Region {
        min_lat: 40.35,
        max_lat: 40.50,
        min_lng: -3.80,
        max_lng: -3.60,
    };

    fn sample<R: Rng>(&self, rng: &mut R) -> Coordinates {
        Coordinates::new(
            rng.gen_range(self.min_lat..self.max_lat),
            rng.gen_range(self.min_lng..self.max_lng),
        )
    }
}

/// Generates workouts with plausible distances, durations, cadences, and
/// elevation gains. Everything produced passes creation validation.
pub struct WorkoutGenerator {
    region: Region,
}

impl WorkoutGenerator {
    pub fn new() -> Self {
        Self {
            region: Region::MADRID,
        }
    }

    pub fn with_region(region: Region) -> Self {
        Self { region }
    }

    pub fn generate<R: Rng>(&self, rng: &mut R) -> Workout {
        let coords = self.region.sample(rng);
        if rng.gen_bool(0.5) {
            let distance_km = rng.gen_range(3.0..15.0);
            // Easy-run to tempo pace range.
            let duration_min = distance_km * rng.gen_range(4.5..7.0);
            let cadence = rng.gen_range(150.0..190.0);
            Workout::running(coords, distance_km, duration_min, cadence)
        } else {
            let distance_km = rng.gen_range(15.0..80.0);
            let duration_min = distance_km / rng.gen_range(18.0..32.0) * 60.0;
            // Net downhill rides are allowed.
            let elevation_gain = rng.gen_range(-50.0..1200.0);
            Workout::cycling(coords, distance_km, duration_min, elevation_gain)
        }
    }

    pub fn generate_batch<R: Rng>(&self, count: usize, rng: &mut R) -> Vec<Workout> {
        (0..count).map(|_| self.generate(rng)).collect()
    }
}

impl Default for WorkoutGenerator {
    fn default() -> Self {
        Self::new()
    }
}
