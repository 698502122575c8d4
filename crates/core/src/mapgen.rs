//! Procedural dungeon carving split into coherent submodules.

pub mod model;

mod buildables;
mod directions;
mod generator;
mod grid;
mod seed;

pub use buildables::{
    BuildableEntry, BuildableId, BuildableRegistry, PlacementCount, PlacementCounts,
};
pub use directions::DirectionQueue;
pub use generator::{
    GenerateError, GenerationEngine, IDLE_ITERATIONS_PER_CELL, STALL_RESETS_PER_CELL,
    StallReason, StepOutcome,
};
pub use grid::{Grid, GridError};
pub use model::{GeneratedDungeon, GenerationStats, Placement, PlayerMarker};
pub use seed::{RollSource, seeded_rolls};

use crate::config::DungeonConfig;

pub fn generate_dungeon(
    config: DungeonConfig,
    rolls: impl RollSource,
) -> Result<GeneratedDungeon, GenerateError> {
    GenerationEngine::new(config, rolls)?.run()
}

/// Generation driven by a ChaCha stream seeded from `seed`.
pub fn generate_seeded(config: DungeonConfig, seed: u64) -> Result<GeneratedDungeon, GenerateError> {
    generate_dungeon(config, seeded_rolls(seed))
}
