//! Injectable randomness for the walk and seeded streams for reproducible runs.

use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

/// Source of the raw bits behind every chance draw and rolled coordinate.
///
/// Generation never reaches for ambient randomness: two runs fed the same
/// sequence of bits carve byte-identical grids.
pub trait RollSource {
    fn next_bits(&mut self) -> u64;

    /// Uniform draw in `[0, 1)` built from the top 53 bits.
    fn roll_unit(&mut self) -> f64 {
        (self.next_bits() >> 11) as f64 * (1.0 / (1_u64 << 53) as f64)
    }

    /// Bernoulli trial: `1.0` always succeeds, `0.0` never does.
    fn roll_chance(&mut self, chance: f64) -> bool {
        self.roll_unit() < chance
    }

    /// Inclusive range draw.
    fn roll_range(&mut self, min_value: usize, max_value: usize) -> usize {
        debug_assert!(min_value <= max_value);
        let range_size = (max_value - min_value) as u64 + 1;
        min_value + (self.next_bits() % range_size) as usize
    }
}

impl RollSource for ChaCha8Rng {
    fn next_bits(&mut self) -> u64 {
        self.next_u64()
    }
}

impl<R: RollSource + ?Sized> RollSource for &mut R {
    fn next_bits(&mut self) -> u64 {
        (**self).next_bits()
    }
}

pub fn seeded_rolls(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Start coordinate along an axis of `length` cells when none is configured.
///
/// Keeps off the rim when the axis is wide enough, so the first steps have room
/// in every direction.
pub(super) fn random_start_coordinate(rolls: &mut impl RollSource, length: usize) -> usize {
    if length >= 3 { rolls.roll_range(1, length - 2) } else { rolls.roll_range(0, length - 1) }
}


#[cfg(test)]
mod tests {
    use super::scripted::ScriptedRolls;
    use super::*;

    #[test]
    fn roll_range_stays_inside_requested_bounds() {
        let mut rolls = seeded_rolls(12_345);
        for _ in 0..100 {
            let value = rolls.roll_range(7, 13);
            assert!((7..=13).contains(&value));
        }
    }

    #[test]
    fn roll_unit_covers_the_half_open_unit_range() {
        assert_eq!(ScriptedRolls::always_succeed().roll_unit(), 0.0);
        let top = ScriptedRolls::always_fail().roll_unit();
        assert!(top < 1.0 && top > 0.999_999, "got {top}");
    }

    #[test]
    fn certain_and_impossible_chances_ignore_the_roll() {
        let mut low = ScriptedRolls::always_succeed();
        let mut high = ScriptedRolls::always_fail();
        assert!(low.roll_chance(1.0) && high.roll_chance(1.0));
        assert!(!low.roll_chance(0.0) && !high.roll_chance(0.0));
    }

    #[test]
    fn same_seed_produces_same_stream() {
        let mut a = seeded_rolls(99);
        let mut b = seeded_rolls(99);
        let mut c = seeded_rolls(98);
        let first: Vec<u64> = (0..8).map(|_| a.next_bits()).collect();
        let second: Vec<u64> = (0..8).map(|_| b.next_bits()).collect();
        let other: Vec<u64> = (0..8).map(|_| c.next_bits()).collect();
        assert_eq!(first, second);
        assert_ne!(first, other);
    }

    #[test]
    fn random_start_avoids_the_rim_on_wide_axes() {
        let mut rolls = seeded_rolls(7);
        for _ in 0..200 {
            let coordinate = random_start_coordinate(&mut rolls, 6);
            assert!((1..=4).contains(&coordinate));
        }
        for length in [1, 2] {
            let coordinate = random_start_coordinate(&mut rolls, length);
            assert!(coordinate < length);
        }
    }

    #[test]
    fn scripted_rolls_cycle() {
        let mut rolls = ScriptedRolls::new(vec![1, 2]);
        let drawn: Vec<u64> = (0..5).map(|_| rolls.next_bits()).collect();
        assert_eq!(drawn, [1, 2, 1, 2, 1]);
    }
}
