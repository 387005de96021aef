//! Seeded pseudo-random numbers for element seeds and nonces.

use once_cell::sync::Lazy;
use std::sync::Mutex;

const MULTIPLIER: i32 = 48271;
const TWO_POW_31: f64 = 2147483648.0;

/// Park–Miller style generator with 32-bit wrapping state.
///
/// The same seed always yields the same sequence, which keeps hand-drawn
/// stroke jitter stable between renders.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    seed: i32,
}

impl SeededRandom {
    /// Seeds wider than 32 bits are truncated modulo 2^32.
    ///
    /// A seed whose low 31 bits are all zero would make every draw 0, so it
    /// is replaced by an odd value taken from the clock.
    pub fn new(seed: i64) -> Self {
        let seed = seed as i32;
        if (seed & i32::MAX) == 0 {
            let reseeded = chrono::Utc::now().timestamp_subsec_nanos() as i32 | 1;
            crate::log_debug!("random", "seed {} is degenerate, using {}", seed, reseeded);
            return Self { seed: reseeded };
        }
        Self { seed }
    }

    /// Next value in `[0, 1)`.
    pub fn next(&mut self) -> f64 {
        self.seed = self.seed.wrapping_mul(MULTIPLIER);
        f64::from(self.seed & i32::MAX) / TWO_POW_31
    }

    /// Next integer in `[0, 2^31)`.
    pub fn next_integer(&mut self) -> u32 {
        (self.next() * TWO_POW_31).floor() as u32
    }
}

static RANDOM: Lazy<Mutex<SeededRandom>> = Lazy::new(|| {
    let seed = chrono::Utc::now().timestamp_millis();
    crate::log_debug!("random", "seeding generator with {}", seed);
    Mutex::new(SeededRandom::new(seed))
});

/// Random integer in `[0, 2^31)` from the process-wide generator.
pub fn random_integer() -> u32 {
    let mut random = RANDOM.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    random.next_integer()
}
