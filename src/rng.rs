//! Seeded random stream shared by setup and every yearly system.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// One stream per run. Draw order is part of the observable result, so every
/// component takes `&mut SimRng` instead of reaching for thread-local state.
#[derive(Clone, Debug)]
pub struct SimRng {
    inner: ChaCha8Rng,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Default for SimRng {
    fn default() -> Self {
        Self::new(42)
    }
}

impl RngCore for SimRng {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.inner.try_fill_bytes(dest)
    }
}

/// Helper draws used by the model.
pub trait RngExt {
    /// Uniform draw in `[0, 1)`.
    fn unit(&mut self) -> f32;
    /// `true` with the given probability.
    fn chance(&mut self, probability: f32) -> bool;
}

impl<R: Rng> RngExt for R {
    fn unit(&mut self) -> f32 {
        self.gen::<f32>()
    }

    fn chance(&mut self, probability: f32) -> bool {
        self.gen::<f32>() < probability
    }
}
