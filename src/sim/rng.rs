//! Seeded random sampling helpers
//!
//! Every random draw in the simulation goes through the state's `Pcg32`, so a run is
//! fully determined by its seed, settings and input commands.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::color::Rgb;

/// Create the simulation RNG for a seed
pub fn seeded(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Uniform integer in the closed interval `[min, max]`
///
/// Callers guarantee `min <= max` (settings are validated before any sampling).
#[inline]
pub fn random_int(rng: &mut impl Rng, min: i32, max: i32) -> i32 {
    rng.random_range(min..=max)
}

/// Random opaque color, each channel uniform in [0, 255]
pub fn random_color(rng: &mut impl Rng) -> Rgb {
    Rgb::new(rng.random(), rng.random(), rng.random())
}
