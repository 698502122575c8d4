use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use dungeon_core::{DungeonConfig, generate_seeded};
use tools::config_file::{load_config, write_config_atomic};
use tools::render::{render_html, render_text};
use tools::seed::resolve_seed;
use tools::{format_fingerprint, init_tracing};
use tracing::info;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Html,
    Json,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Dungeon config file (.toml or .json); defaults apply without one
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Seed for the walk; a runtime seed is generated and reported when absent
    #[arg(short, long)]
    seed: Option<u64>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    #[arg(long)]
    width: Option<usize>,
    #[arg(long)]
    height: Option<usize>,
    #[arg(long)]
    fog_radius: Option<f64>,
    /// Save the effective config (after overrides) to this path
    #[arg(long)]
    write_config: Option<PathBuf>,
}

impl Args {
    fn effective_config(&self) -> Result<DungeonConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => DungeonConfig::default(),
        };
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(radius) = self.fog_radius {
            config.fog_radius = Some(radius);
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = args.effective_config()?;
    if let Some(path) = &args.write_config {
        write_config_atomic(&config, path)
            .with_context(|| format!("Failed to save config to {}", path.display()))?;
    }

    let seed = resolve_seed(args.seed);
    if seed.is_generated() {
        eprintln!("Seed: {}", seed.value());
    }

    let dungeon = generate_seeded(config, seed.value())
        .with_context(|| format!("Generation failed for seed {}", seed.value()))?;
    info!(
        seed = seed.value(),
        fingerprint = %format_fingerprint(dungeon.fingerprint()),
        "dungeon.generated"
    );

    match args.format {
        OutputFormat::Text => print!("{}", render_text(&dungeon)),
        OutputFormat::Html => println!("{}", render_html(&dungeon)),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&dungeon).context("Failed to serialize dungeon JSON")?
        ),
    }

    Ok(())
}
