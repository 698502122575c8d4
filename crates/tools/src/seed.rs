//! Seeds for the command-line tools: taken from `--seed` or drawn at runtime.

use std::iter;
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedChoice {
    Cli(u64),
    Generated(u64),
}

impl SeedChoice {
    pub fn value(self) -> u64 {
        match self {
            Self::Cli(seed) | Self::Generated(seed) => seed,
        }
    }

    pub fn is_generated(self) -> bool {
        matches!(self, Self::Generated(_))
    }
}

static RUNTIME_DRAWS: AtomicU64 = AtomicU64::new(0);

/// Clock, process id and a per-process draw counter, whitened through ChaCha.
pub fn generate_runtime_seed() -> u64 {
    let nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |elapsed| elapsed.as_nanos());
    let draw = RUNTIME_DRAWS.fetch_add(1, Ordering::Relaxed);
    let entropy = (nanos as u64) ^ u64::from(process::id()).rotate_left(32) ^ draw.rotate_left(48);
    ChaCha8Rng::seed_from_u64(entropy).next_u64()
}

/// `--seed` when given, otherwise a fresh runtime seed.
pub fn resolve_seed(cli_seed: Option<u64>) -> SeedChoice {
    match cli_seed {
        Some(seed) => SeedChoice::Cli(seed),
        None => SeedChoice::Generated(generate_runtime_seed()),
    }
}

/// Per-run seeds of a sweep rooted at `base`, drawn from one ChaCha stream.
pub fn run_seeds(base: u64) -> impl Iterator<Item = u64> {
    let mut rng = ChaCha8Rng::seed_from_u64(base);
    iter::repeat_with(move || rng.next_u64())
}
