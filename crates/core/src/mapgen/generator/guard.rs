//! Termination guards for the walk.

use std::fmt;

/// Stagnation resets allowed since the last build, per grid cell.
pub const STALL_RESETS_PER_CELL: usize = 4;
/// Non-building iterations allowed between resets, per grid cell, before
/// scaling by the inverse of the build chance.
pub const IDLE_ITERATIONS_PER_CELL: f64 = 16.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StallReason {
    /// The cursor was sent back to the start too many times without a build.
    ResetLimit,
}

impl fmt::Display for StallReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResetLimit => write!(f, "stagnation reset limit reached"),
        }
    }
}

#[derive(Clone, Debug)]
pub(super) struct StallGuard {
    resets_since_build: usize,
    reset_limit: usize,
    idle_since_reset: u64,
    idle_limit: Option<u64>,
}

impl StallGuard {
    pub(super) fn new(area: usize, chance_to_build: f64) -> Self {
        let idle_limit = (chance_to_build > 0.0).then(|| {
            // Saturates for vanishing chances.
            (IDLE_ITERATIONS_PER_CELL * area as f64 / chance_to_build).ceil() as u64
        });
        Self {
            resets_since_build: 0,
            reset_limit: STALL_RESETS_PER_CELL.saturating_mul(area),
            idle_since_reset: 0,
            idle_limit,
        }
    }

    pub(super) fn record_build(&mut self) {
        self.resets_since_build = 0;
        self.idle_since_reset = 0;
    }

    /// Counts one iteration without a build. Returns `false` once the idle
    /// budget since the last build or reset is spent.
    pub(super) fn record_idle(&mut self) -> bool {
        self.idle_since_reset += 1;
        self.idle_limit.is_none_or(|limit| self.idle_since_reset <= limit)
    }

    /// Counts one reset and refills the idle budget.
    pub(super) fn record_reset(&mut self) -> Result<(), StallReason> {
        self.idle_since_reset = 0;
        self.resets_since_build += 1;
        if self.resets_since_build > self.reset_limit {
            return Err(StallReason::ResetLimit);
        }
        Ok(())
    }
}
