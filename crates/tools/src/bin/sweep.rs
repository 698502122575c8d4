use std::collections::{BTreeSet, VecDeque};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use dungeon_core::{Direction, DungeonConfig, GenerateError, GeneratedDungeon, generate_seeded};
use tools::config_file::load_config;
use tools::seed::run_seeds;
use tools::{format_fingerprint, init_tracing};
use tracing::debug;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1000)]
    runs: usize,
}

#[derive(Debug, Default)]
struct SweepTally {
    completed: u64,
    stalls: u64,
    forced_resets: u64,
    violations: Vec<String>,
}

fn check_invariants(dungeon: &GeneratedDungeon, target: usize) -> Vec<String> {
    let config = &dungeon.config;
    let mut problems = Vec::new();

    if dungeon.grid.rows().count() != config.height
        || dungeon.grid.rows().any(|row| row.len() != config.width)
    {
        problems.push("grid shape differs from the config".to_string());
    }
    if dungeon.used_tiles() != target {
        problems.push(format!("used {} tiles, target {target}", dungeon.used_tiles()));
    }
    if dungeon.grid.at(dungeon.player.pos()) != Ok(config.player_marker) {
        problems.push("player marker missing from the start cell".to_string());
    }
    for count in dungeon.placement_counts.iter() {
        if count.count > count.max {
            problems.push(format!("{} placed {} times, cap {}", count.key, count.count, count.max));
        }
    }

    let reachable = reachable_used_tiles(dungeon);
    if reachable != dungeon.used_tiles() {
        problems.push(format!("{reachable} of {} used tiles reachable", dungeon.used_tiles()));
    }

    problems
}

fn reachable_used_tiles(dungeon: &GeneratedDungeon) -> usize {
    let empty = dungeon.config.empty_marker;
    let start = dungeon.player.pos();
    let mut open = VecDeque::from([start]);
    let mut seen = BTreeSet::from([start]);

    while let Some(pos) = open.pop_front() {
        for direction in Direction::ALL {
            let Some(next) = dungeon.grid.step(pos, direction) else {
                continue;
            };
            if dungeon.grid.at(next).is_ok_and(|cell| cell != empty) && seen.insert(next) {
                open.push_back(next);
            }
        }
    }

    seen.len()
}

fn run_sweep(config: &DungeonConfig, base_seed: u64, runs: usize) -> Result<SweepTally> {
    config.validate().context("Config rejected before sweeping")?;
    let target = config.target_tiles();
    let mut tally = SweepTally::default();

    for seed in run_seeds(base_seed).take(runs) {
        match generate_seeded(config.clone(), seed) {
            Ok(dungeon) => {
                debug!(seed, fingerprint = %format_fingerprint(dungeon.fingerprint()), "sweep.run");
                tally.completed += 1;
                tally.forced_resets += dungeon.stats.forced_resets;
                for problem in check_invariants(&dungeon, target) {
                    tally.violations.push(format!("seed {seed}: {problem}"));
                }
            }
            Err(err @ GenerateError::Stalled { .. }) => {
                debug!(seed, %err, "sweep.stalled");
                tally.stalls += 1;
            }
            Err(err @ GenerateError::Config(_)) => return Err(err.into()),
        }
    }

    Ok(tally)
}

fn main() -> Result<ExitCode> {
    init_tracing();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => DungeonConfig::default(),
    };

    println!(
        "Sweeping {} runs of a {}x{} dungeon from seed {}...",
        args.runs, config.width, config.height, args.seed
    );
    let tally = run_sweep(&config, args.seed, args.runs)?;

    println!("Completed: {}", tally.completed);
    println!("Stalled: {}", tally.stalls);
    println!("Forced resets in completed runs: {}", tally.forced_resets);

    if tally.violations.is_empty() {
        println!("All invariants held.");
        return Ok(ExitCode::SUCCESS);
    }

    for violation in &tally.violations {
        eprintln!("Invariant failed: {violation}");
    }
    Ok(ExitCode::FAILURE)
}
