pub mod config;
pub mod mapgen;
pub mod types;

pub use config::{BuildableSpec, ConfigError, DungeonConfig};
pub use mapgen::{
    GenerateError, GeneratedDungeon, GenerationEngine, Grid, PlayerMarker, RollSource,
    StallReason, StepOutcome, generate_dungeon, generate_seeded,
};
pub use types::*;
