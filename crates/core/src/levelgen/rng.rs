//! Seeded pseudo-random source for level generation.
//! This module exists to keep every nondeterministic draw behind one type.
//! It does not own pattern shapes or placement policy.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

/// Requested seed value meaning "draw a fresh seed at construction time".
pub const FRESH_SEED: u64 = 0;

static FRESH_SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Deterministic random source. Same seed + same call sequence produces an
/// identical output sequence.
pub struct LevelRng {
    seed: u64,
    rng: ChaCha8Rng,
}

impl LevelRng {
    /// A requested seed of [`FRESH_SEED`] is replaced by a freshly drawn
    /// runtime seed; any other value is used verbatim. The resolved seed is
    /// exposed through [`LevelRng::seed`] so a run can be reproduced.
    pub fn from_seed(requested: u64) -> Self {
        let seed = if requested == FRESH_SEED { draw_runtime_seed() } else { requested };
        Self { seed, rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform float in `[lo, hi)`.
    pub fn next_f32(&mut self, lo: f32, hi: f32) -> f32 {
        debug_assert!(lo <= hi);
        // 24 mantissa bits keep the unit draw exactly representable and < 1.0.
        let unit = (self.rng.next_u32() >> 8) as f32 / (1_u32 << 24) as f32;
        lo + (hi - lo) * unit
    }

    /// Uniform integer, `lo` inclusive, `hi` exclusive.
    pub fn next_i32(&mut self, lo: i32, hi: i32) -> i32 {
        debug_assert!(lo < hi);
        let span = (i64::from(hi) - i64::from(lo)) as u64;
        (i64::from(lo) + (self.rng.next_u64() % span) as i64) as i32
    }

    /// Bernoulli draw; `probability` is expected to lie in `[0, 1]`.
    pub fn chance(&mut self, probability: f32) -> bool {
        self.next_f32(0.0, 1.0) < probability
    }
}

fn draw_runtime_seed() -> u64 {
    let now_nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |duration| duration.as_nanos());
    let pid = u64::from(std::process::id());
    let counter = FRESH_SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    let entropy = (now_nanos as u64)
        ^ ((now_nanos >> 64) as u64)
        ^ pid.rotate_left(17)
        ^ counter.rotate_left(7);

    // The mixed value could land on FRESH_SEED itself; nudge off it so the
    // resolved seed always round-trips through configuration verbatim.
    mix_seed(entropy).max(1)
}

fn mix_seed(mut value: u64) -> u64 {
    value ^= value >> 30;
    value = value.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    value ^= value >> 27;
    value = value.wrapping_mul(0x94D0_49BB_1331_11EB);
    value ^ (value >> 31)
}
