//! Buildable registry and the first-match selection policy used when a tile is carved.
//!
//! Each entry gets an independent chance draw in registry order and the first
//! entry that both wins its draw and still has room under its cap is placed.
//! It is not a weighted draw: earlier entries win ties, so list order doubles
//! as priority.

use serde::Serialize;

use crate::config::BuildableSpec;
use crate::types::Marker;

use super::seed::RollSource;

/// Index of an entry in a [`BuildableRegistry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BuildableId(usize);

#[derive(Clone, Debug, PartialEq)]
pub struct BuildableEntry {
    pub key: String,
    pub chance_to_build: f64,
    pub marker: Marker,
    pub max: usize,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct BuildableRegistry {
    entries: Vec<BuildableEntry>,
}

impl BuildableRegistry {
    /// Negative caps are rejected by config validation; here they collapse to zero.
    pub fn from_specs(specs: &[BuildableSpec]) -> Self {
        let entries = specs
            .iter()
            .map(|spec| BuildableEntry {
                key: spec.key.clone(),
                chance_to_build: spec.chance_to_build,
                marker: spec.marker,
                max: usize::try_from(spec.max).unwrap_or(0),
            })
            .collect();
        Self { entries }
    }

    pub fn entry(&self, id: BuildableId) -> &BuildableEntry {
        &self.entries[id.0]
    }

    pub fn entries(&self) -> impl Iterator<Item = (BuildableId, &BuildableEntry)> {
        self.entries.iter().enumerate().map(|(index, entry)| (BuildableId(index), entry))
    }

    pub fn id_of(&self, key: &str) -> Option<BuildableId> {
        self.entries.iter().position(|entry| entry.key == key).map(BuildableId)
    }

    /// First entry, in registry order, that is under its cap and wins its draw.
    ///
    /// Entries already at their cap are skipped without consuming a roll.
    pub fn select_for(
        &self,
        counts: &PlacementCounts,
        rolls: &mut impl RollSource,
    ) -> Option<BuildableId> {
        self.entries().map(|(id, _)| id).find(|&id| {
            let entry = self.entry(id);
            counts.count(id) < entry.max && rolls.roll_chance(entry.chance_to_build)
        })
    }

    pub fn empty_counts(&self) -> PlacementCounts {
        PlacementCounts {
            entries: self
                .entries
                .iter()
                .map(|entry| PlacementCount { key: entry.key.clone(), count: 0, max: entry.max })
                .collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlacementCount {
    pub key: String,
    pub count: usize,
    pub max: usize,
}

/// Per-key placement tally, parallel to the registry it was created from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PlacementCounts {
    entries: Vec<PlacementCount>,
}

impl PlacementCounts {
    pub fn count(&self, id: BuildableId) -> usize {
        self.entries[id.0].count
    }

    pub fn get(&self, key: &str) -> Option<usize> {
        self.entries.iter().find(|entry| entry.key == key).map(|entry| entry.count)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlacementCount> {
        self.entries.iter()
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|entry| entry.count).sum()
    }

    /// Counts never pass the cap; a call on a full entry is ignored.
    pub fn record_placement(&mut self, id: BuildableId) {
        let entry = &mut self.entries[id.0];
        debug_assert!(entry.count < entry.max, "placement of '{}' past its cap", entry.key);
        if entry.count < entry.max {
            entry.count += 1;
        }
    }
}
