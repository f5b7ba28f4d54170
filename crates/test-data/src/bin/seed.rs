//! Default seed script - fills the workouts slot with sample data
//!
//! Run with:
//! ```
//! cargo run -p test-data --bin seed
//! ```

use test_data::WorkoutGenerator;
use tracing_subscriber::EnvFilter;
use workouts::persistence::{FileSlotStore, WorkoutArchive};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let data_dir = std::env::var("WORKOUTS_DATA_DIR").unwrap_or_else(|_| "./data".to_string());
    let count: usize = std::env::var("SEED_COUNT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8);

    let mut rng = rand::thread_rng();
    let workouts = WorkoutGenerator::new().generate_batch(count, &mut rng);

    let mut archive = WorkoutArchive::new(FileSlotStore::new(&data_dir)?);
    archive.save(&workouts)?;

    tracing::info!("Seed completed!");
    tracing::info!("  Workouts: {}", workouts.len());
    tracing::info!("  Slot dir: {}", data_dir);

    Ok(())
}
