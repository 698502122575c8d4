//! Dungeon configuration files on disk.
//!
//! Format follows the extension: `.toml` or `.json`. Missing keys take their
//! defaults, and buildables are an ordered array so selection priority survives
//! the round trip.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use dungeon_core::DungeonConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            _ => bail!("unsupported config format for {}: expected .toml or .json", path.display()),
        }
    }

    fn parse(self, content: &str) -> Result<DungeonConfig> {
        Ok(match self {
            Self::Toml => toml::from_str(content)?,
            Self::Json => serde_json::from_str(content)?,
        })
    }

    fn serialize(self, config: &DungeonConfig) -> Result<String> {
        Ok(match self {
            Self::Toml => toml::to_string_pretty(config)?,
            Self::Json => serde_json::to_string_pretty(config)?,
        })
    }
}

pub fn load_config(path: &Path) -> Result<DungeonConfig> {
    let format = ConfigFormat::from_path(path)?;
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    format
        .parse(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Writes through a sibling temp file and renames it into place.
pub fn write_config_atomic(config: &DungeonConfig, path: &Path) -> Result<()> {
    let format = ConfigFormat::from_path(path)?;
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let contents = format.serialize(config)?;
    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("Failed to write config file: {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path)
        .with_context(|| format!("Failed to move config file into place: {}", path.display()))?;
    Ok(())
}
