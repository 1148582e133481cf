//! Strategies for spreading tips across the pool.
//!
//! Selection only balances contention on the shared objects, it carries no
//! security property, so a time-seeded non-cryptographic RNG is enough.

use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use once_cell::sync::Lazy;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::tip::pool::{SharedTipObject, TipObjectPool};

pub trait TipSelector: Send + Sync {
    /// Index in `0..len`. `len` is never zero.
    fn pick(&self, len: usize) -> usize;
}

/// Uniform choice from a mutex-guarded RNG.
pub struct RandomSelector {
    rng: Mutex<StdRng>,
}

impl RandomSelector {
    /// Seeded from the current time.
    pub fn new() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos() as u64;
        Self::with_seed(nanos)
    }

    /// Reproducible sequence for tests and replays.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl TipSelector for RandomSelector {
    fn pick(&self, len: usize) -> usize {
        let mut rng = self.rng.lock().unwrap_or_else(|p| p.into_inner());
        rng.gen_range(0..len)
    }
}

/// Always the same slot.
#[derive(Clone, Copy, Debug)]
pub struct FixedSelector(pub usize);

impl TipSelector for FixedSelector {
    fn pick(&self, len: usize) -> usize {
        self.0 % len
    }
}

pub static DEFAULT_POOL: Lazy<TipObjectPool> = Lazy::new(TipObjectPool::default);

static DEFAULT_SELECTOR: Lazy<RandomSelector> = Lazy::new(RandomSelector::new);

pub fn default_selector() -> &'static RandomSelector {
    &DEFAULT_SELECTOR
}

/// Random entry of the compiled-in pool.
pub fn select_tip_object() -> SharedTipObject {
    DEFAULT_POOL.select(default_selector()).clone()
}
