//! Generation settings, their defaults, and validation performed before any tile is carved.

use std::mem;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Marker;

/// Guards the ceiling in [`DungeonConfig::target_tiles`] against products such as
/// `10 * 10 * 0.07 == 7.000000000000001`.
const TARGET_EPSILON: f64 = 1e-9;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DungeonConfig {
    pub width: usize,
    pub height: usize,
    /// Explicit start column. When absent a column in `[1, width - 2]` is rolled.
    pub start_x: Option<usize>,
    /// Explicit start row. When absent a row in `[1, height - 2]` is rolled.
    pub start_y: Option<usize>,
    pub empty_marker: Marker,
    pub built_empty_marker: Marker,
    pub player_marker: Marker,
    pub start_marker: Marker,
    pub placeholder_marker: Marker,
    pub max_tile_usage_fraction: f64,
    pub chance_to_build: f64,
    pub fog_radius: Option<f64>,
    /// Selection priority follows list order.
    pub buildables: Vec<BuildableSpec>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BuildableSpec {
    pub key: String,
    pub chance_to_build: f64,
    pub marker: Marker,
    /// Population cap. Zero means the buildable is never placed.
    pub max: i64,
}

impl BuildableSpec {
    pub fn new(key: impl Into<String>, chance_to_build: f64, marker: Marker, max: i64) -> Self {
        Self { key: key.into(), chance_to_build, marker, max }
    }
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            start_x: None,
            start_y: None,
            empty_marker: 'X',
            built_empty_marker: '.',
            player_marker: '@',
            start_marker: 'S',
            placeholder_marker: '!',
            max_tile_usage_fraction: 0.6,
            chance_to_build: 0.5,
            fog_radius: None,
            buildables: vec![
                BuildableSpec::new("goblin", 0.1, 'G', 10),
                BuildableSpec::new("imp", 0.1, 'I', 5),
                BuildableSpec::new("gold", 0.025, '*', 5),
            ],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },
    #[error("a {width}x{height} grid does not fit in memory")]
    GridTooLarge { width: usize, height: usize },
    #[error("start ({x}, {y}) lies outside the {width}x{height} grid")]
    StartOutOfBounds { x: usize, y: usize, width: usize, height: usize },
    #[error("max_tile_usage_fraction must be in (0, 1], got {0}")]
    TileUsageOutOfRange(f64),
    #[error("{field} must be in [0, 1], got {value}")]
    ChanceOutOfRange { field: String, value: f64 },
    #[error("buildable '{key}' has a negative max of {max}")]
    NegativeMax { key: String, max: i64 },
    #[error("buildable key '{0}' is configured more than once")]
    DuplicateBuildable(String),
    #[error("{field} marker '{marker}' is the same as the empty marker")]
    MarkerMatchesEmpty { field: String, marker: Marker },
    #[error("fog_radius must not be negative, got {0}")]
    NegativeFogRadius(f64),
}

impl DungeonConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyGrid { width: self.width, height: self.height });
        }
        let cell_bytes = self
            .width
            .checked_mul(self.height)
            .and_then(|area| area.checked_mul(mem::size_of::<Marker>()));
        if cell_bytes.is_none_or(|bytes| bytes > isize::MAX as usize) {
            return Err(ConfigError::GridTooLarge { width: self.width, height: self.height });
        }

        let start_x = self.start_x.unwrap_or(0);
        let start_y = self.start_y.unwrap_or(0);
        if start_x >= self.width || start_y >= self.height {
            return Err(ConfigError::StartOutOfBounds {
                x: start_x,
                y: start_y,
                width: self.width,
                height: self.height,
            });
        }

        let fraction = self.max_tile_usage_fraction;
        if !(fraction > 0.0 && fraction <= 1.0) {
            return Err(ConfigError::TileUsageOutOfRange(fraction));
        }
        check_chance("chance_to_build", self.chance_to_build)?;

        let tile_markers = [("built_empty", self.built_empty_marker), ("player", self.player_marker)];
        for (field, marker) in tile_markers {
            if marker == self.empty_marker {
                return Err(ConfigError::MarkerMatchesEmpty { field: field.to_string(), marker });
            }
        }

        if let Some(radius) = self.fog_radius
            && (radius < 0.0 || radius.is_nan())
        {
            return Err(ConfigError::NegativeFogRadius(radius));
        }

        for (index, buildable) in self.buildables.iter().enumerate() {
            let field = format!("buildables.{}.chance_to_build", buildable.key);
            check_chance(&field, buildable.chance_to_build)?;
            if buildable.max < 0 {
                return Err(ConfigError::NegativeMax {
                    key: buildable.key.clone(),
                    max: buildable.max,
                });
            }
            if buildable.marker == self.empty_marker {
                return Err(ConfigError::MarkerMatchesEmpty {
                    field: format!("buildables.{}", buildable.key),
                    marker: buildable.marker,
                });
            }
            if self.buildables[..index].iter().any(|earlier| earlier.key == buildable.key) {
                return Err(ConfigError::DuplicateBuildable(buildable.key.clone()));
            }
        }

        Ok(())
    }

    /// Number of non-empty cells a finished grid holds, the player cell included.
    pub fn target_tiles(&self) -> usize {
        let area = self.width.saturating_mul(self.height) as f64;
        let target = (area * self.max_tile_usage_fraction - TARGET_EPSILON).ceil();
        (target.max(1.0) as usize).min(self.width.saturating_mul(self.height))
    }
}

fn check_chance(field: &str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ChanceOutOfRange { field: field.to_string(), value })
    }
}
