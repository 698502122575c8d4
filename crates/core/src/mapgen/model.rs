//! Public data models for a finished generation.

use serde::Serialize;
use xxhash_rust::xxh3::xxh3_64;

use crate::config::DungeonConfig;
use crate::types::{Marker, Pos};

use super::buildables::PlacementCounts;
use super::grid::Grid;

/// The start cell. The grid shows the player marker there; the marker it replaced
/// is kept here for renderers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PlayerMarker {
    pub x: usize,
    pub y: usize,
    pub previous_marker: Marker,
}

impl PlayerMarker {
    pub fn pos(&self) -> Pos {
        Pos::new(self.x, self.y)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub key: String,
    pub marker: Marker,
    pub pos: Pos,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GenerationStats {
    pub iterations: u64,
    pub builds: u64,
    pub moves: u64,
    pub resets: u64,
    /// Resets triggered by a spent idle budget rather than a dead end.
    pub forced_resets: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GeneratedDungeon {
    pub config: DungeonConfig,
    pub grid: Grid,
    pub player: PlayerMarker,
    pub placement_counts: PlacementCounts,
    /// Buildables in the order they were placed.
    pub placements: Vec<Placement>,
    pub stats: GenerationStats,
}

impl GeneratedDungeon {
    /// Cells not holding the empty marker, the player cell included.
    pub fn used_tiles(&self) -> usize {
        self.grid.count_not(self.config.empty_marker)
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.grid.width() as u32).to_le_bytes());
        bytes.extend((self.grid.height() as u32).to_le_bytes());
        for &cell in self.grid.cells() {
            bytes.extend(u32::from(cell).to_le_bytes());
        }
        bytes.extend((self.player.x as u32).to_le_bytes());
        bytes.extend((self.player.y as u32).to_le_bytes());

        bytes.extend((self.placements.len() as u32).to_le_bytes());
        for placement in &self.placements {
            bytes.extend(u32::from(placement.marker).to_le_bytes());
            bytes.extend((placement.pos.x as u32).to_le_bytes());
            bytes.extend((placement.pos.y as u32).to_le_bytes());
        }

        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}
