use rand_chacha::{rand_core::RngCore, ChaCha8Rng};

/// Source of uniform samples in `[0, 1)`.
///
/// Every randomized choice in a show goes through this trait so that tests can swap in a
/// seeded or scripted source.
pub trait Random {
    fn random(&mut self) -> f64;

    /// Uniform sample in `[low, high)`.
    fn range(&mut self, low: f64, high: f64) -> f64 {
        low + self.random() * (high - low)
    }

    /// Bernoulli trial succeeding with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.random() < p
    }
}

impl Random for ChaCha8Rng {
    fn random(&mut self) -> f64 {
        // Upper 53 bits fill the mantissa exactly.
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }
}
