//! The biased walk that carves a connected region outward from the start cell.
//!
//! Every iteration first tries to build one step away from the cursor, in
//! direction-queue order. If nothing is built it tries to move onto an already
//! used neighbour, again in queue order. A successful build or move rotates the
//! queue so that direction is tried first next time, which is what gives the
//! carved region its corridor-like runs.
//!
//! When neither phase succeeds the queue is shifted by one and the cursor goes
//! back to the start cell. Keeping the cursor in place instead is the other
//! reasonable policy and produces differently shaped regions; returning to the
//! start is what this engine does.
//!
//! Queue-order moves are deterministic, so the cursor can circle built cells
//! forever without touching the frontier. Each reset grants an idle budget;
//! once it is spent the move phase is skipped and the iteration resets instead.
//! From then until the next build the engine wanders: the move phase picks a
//! rolled used neighbour rather than the first one, which reaches the frontier
//! of any connected region. Only running past the reset limit ends a walk early.

mod guard;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{ConfigError, DungeonConfig};
use crate::types::{Direction, Marker, Pos};

use super::buildables::{BuildableId, BuildableRegistry, PlacementCounts};
use super::directions::DirectionQueue;
use super::grid::Grid;
use super::model::{GeneratedDungeon, GenerationStats, Placement, PlayerMarker};
use super::seed::{RollSource, random_start_coordinate};

pub use guard::{IDLE_ITERATIONS_PER_CELL, STALL_RESETS_PER_CELL, StallReason};
use guard::StallGuard;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(
        "generation stalled ({reason}) after {iterations} iterations: \
         {used_tiles} of {target_tiles} tiles used, {resets} resets"
    )]
    Stalled {
        reason: StallReason,
        used_tiles: usize,
        target_tiles: usize,
        resets: u64,
        iterations: u64,
    },
}

/// What a single iteration of the walk did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Built { direction: Direction, pos: Pos, buildable: Option<BuildableId> },
    Moved { direction: Direction, pos: Pos },
    /// Neither phase succeeded: queue shifted and cursor sent back to the start.
    Reset,
}

/// Outcome of a successful build phase. Lives for one iteration.
#[derive(Clone, Copy, Debug)]
struct BuildAttempt {
    pos: Pos,
    direction: Direction,
    marker: Marker,
    buildable: Option<BuildableId>,
}

pub struct GenerationEngine<R> {
    config: DungeonConfig,
    registry: BuildableRegistry,
    rolls: R,
    grid: Grid,
    start: Pos,
    cursor: Pos,
    directions: DirectionQueue,
    counts: PlacementCounts,
    placements: Vec<Placement>,
    used_tiles: usize,
    target_tiles: usize,
    guard: StallGuard,
    /// Set by an idle-budget reset, cleared by the next build.
    wandering: bool,
    stats: GenerationStats,
}

impl<R: RollSource> GenerationEngine<R> {
    /// Validates `config`, resolves the start cell and stamps the player marker on it.
    pub fn new(config: DungeonConfig, mut rolls: R) -> Result<Self, ConfigError> {
        config.validate()?;

        let start_x =
            config.start_x.unwrap_or_else(|| random_start_coordinate(&mut rolls, config.width));
        let start_y =
            config.start_y.unwrap_or_else(|| random_start_coordinate(&mut rolls, config.height));
        let start = Pos::new(start_x, start_y);

        let mut grid = Grid::new(config.width, config.height, config.empty_marker);
        grid.set(start.x, start.y, config.player_marker).map_err(|err| {
            ConfigError::StartOutOfBounds {
                x: err.x,
                y: err.y,
                width: err.width,
                height: err.height,
            }
        })?;

        let registry = BuildableRegistry::from_specs(&config.buildables);
        let counts = registry.empty_counts();
        let guard = StallGuard::new(config.width * config.height, config.chance_to_build);
        let target_tiles = config.target_tiles();

        Ok(Self {
            config,
            registry,
            rolls,
            grid,
            start,
            cursor: start,
            directions: DirectionQueue::default(),
            counts,
            placements: Vec::new(),
            used_tiles: 1,
            target_tiles,
            guard,
            wandering: false,
            stats: GenerationStats::default(),
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn start(&self) -> Pos {
        self.start
    }

    pub fn cursor(&self) -> Pos {
        self.cursor
    }

    pub fn directions(&self) -> &DirectionQueue {
        &self.directions
    }

    pub fn placement_counts(&self) -> &PlacementCounts {
        &self.counts
    }

    pub fn used_tiles(&self) -> usize {
        self.used_tiles
    }

    pub fn target_tiles(&self) -> usize {
        self.target_tiles
    }

    pub fn is_complete(&self) -> bool {
        self.used_tiles >= self.target_tiles
    }

    pub fn is_wandering(&self) -> bool {
        self.wandering
    }

    pub fn stats(&self) -> &GenerationStats {
        &self.stats
    }

    /// Runs one build / move / reset iteration.
    pub fn step(&mut self) -> Result<StepOutcome, GenerateError> {
        self.stats.iterations += 1;

        if let Some(attempt) = self.build_phase() {
            if let Some(id) = attempt.buildable {
                self.counts.record_placement(id);
                self.placements.push(Placement {
                    key: self.registry.entry(id).key.clone(),
                    marker: attempt.marker,
                    pos: attempt.pos,
                });
            }
            self.cursor = attempt.pos;
            self.used_tiles += 1;
            self.directions.rotate_to_front(attempt.direction);
            self.guard.record_build();
            self.wandering = false;
            self.stats.builds += 1;
            return Ok(StepOutcome::Built {
                direction: attempt.direction,
                pos: attempt.pos,
                buildable: attempt.buildable,
            });
        }

        let budget_left = self.guard.record_idle();
        if budget_left && let Some((direction, pos)) = self.move_phase() {
            self.cursor = pos;
            self.directions.rotate_to_front(direction);
            self.stats.moves += 1;
            return Ok(StepOutcome::Moved { direction, pos });
        }

        debug!(
            target: "dungeon_core::mapgen",
            cursor_x = self.cursor.x,
            cursor_y = self.cursor.y,
            front = ?self.directions.front(),
            idle_budget_spent = !budget_left,
            "walk.reset"
        );
        if !budget_left {
            self.wandering = true;
            self.stats.forced_resets += 1;
        }
        self.directions.shuffle_one_step();
        self.cursor = self.start;
        self.stats.resets += 1;
        self.guard.record_reset().map_err(|reason| self.stalled(reason))?;
        Ok(StepOutcome::Reset)
    }

    /// Walks until the target tile count is reached or a guard trips.
    pub fn run(mut self) -> Result<GeneratedDungeon, GenerateError> {
        while !self.is_complete() {
            self.step()?;
        }

        info!(
            target: "dungeon_core::mapgen",
            width = self.config.width,
            height = self.config.height,
            used_tiles = self.used_tiles,
            placements = self.placements.len(),
            iterations = self.stats.iterations,
            resets = self.stats.resets,
            forced_resets = self.stats.forced_resets,
            "walk.complete"
        );

        let player = PlayerMarker {
            x: self.start.x,
            y: self.start.y,
            previous_marker: self.config.start_marker,
        };
        Ok(GeneratedDungeon {
            config: self.config,
            grid: self.grid,
            player,
            placement_counts: self.counts,
            placements: self.placements,
            stats: self.stats,
        })
    }

    fn build_phase(&mut self) -> Option<BuildAttempt> {
        for direction in self.directions.order() {
            let Some(candidate) = self.grid.step(self.cursor, direction) else {
                continue;
            };
            if self.grid.at(candidate) != Ok(self.config.empty_marker) {
                continue;
            }
            if !self.rolls.roll_chance(self.config.chance_to_build) {
                continue;
            }

            let buildable = self.registry.select_for(&self.counts, &mut self.rolls);
            let marker = buildable
                .map_or(self.config.built_empty_marker, |id| self.registry.entry(id).marker);
            self.grid.set(candidate.x, candidate.y, marker).ok()?;
            return Some(BuildAttempt { pos: candidate, direction, marker, buildable });
        }
        None
    }

    /// First neighbour, in queue order, that is already used. While wandering
    /// the used neighbour is rolled instead.
    fn move_phase(&mut self) -> Option<(Direction, Pos)> {
        let used: Vec<(Direction, Pos)> = self
            .directions
            .order()
            .into_iter()
            .filter_map(|direction| {
                let next = self.grid.step(self.cursor, direction)?;
                let used =
                    self.grid.at(next).is_ok_and(|marker| marker != self.config.empty_marker);
                used.then_some((direction, next))
            })
            .collect();

        let index = if self.wandering && used.len() > 1 {
            self.rolls.roll_range(0, used.len() - 1)
        } else {
            0
        };
        used.get(index).copied()
    }

    fn stalled(&self, reason: StallReason) -> GenerateError {
        warn!(
            target: "dungeon_core::mapgen",
            %reason,
            used_tiles = self.used_tiles,
            target_tiles = self.target_tiles,
            iterations = self.stats.iterations,
            "walk.stalled"
        );
        GenerateError::Stalled {
            reason,
            used_tiles: self.used_tiles,
            target_tiles: self.target_tiles,
            resets: self.stats.resets,
            iterations: self.stats.iterations,
        }
    }
}
