//! Additive Gaussian noise over a seeded deterministic PRNG.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::transform::Transform;

/// `y = x + N(0, amplitude)` with `amplitude` as the standard deviation.
///
/// The stream is a seeded ChaCha8 generator: identical seeds produce
/// identical noise sequences, and cloning copies the stream position so the
/// clone emits the same next sample. `amplitude <= 0` is a passthrough.
#[derive(Debug, Clone)]
pub struct Noise {
    amplitude: f64,
    seed: u64,
    rng: ChaCha8Rng,
}

impl Noise {
    pub fn new(amplitude: f64, seed: u64) -> Self {
        Self {
            amplitude,
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Standard-normal sample via the Box-Muller transform.
    fn standard_normal(rng: &mut ChaCha8Rng) -> f64 {
        let u1: f64 = rng.gen::<f64>().max(1e-300); // avoid ln(0)
        let u2: f64 = rng.gen();
        (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
    }
}

impl Transform for Noise {
    fn apply(&mut self, input: f64, _dt: f64) -> f64 {
        if self.amplitude <= 0.0 {
            return input;
        }
        input + self.amplitude * Self::standard_normal(&mut self.rng)
    }

    fn reset(&mut self) {
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nonpositive_amplitude_is_passthrough() {
        let mut t = Noise::new(0.0, 7);
        assert_eq!(t.apply(5.0, 0.1), 5.0);
        let mut t = Noise::new(-1.0, 7);
        assert_eq!(t.apply(5.0, 0.1), 5.0);
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Noise::new(0.5, 42);
        let mut b = Noise::new(0.5, 42);
        for _ in 0..32 {
            assert_eq!(a.apply(1.0, 0.1), b.apply(1.0, 0.1));
        }
    }

    #[test]
    fn different_seeds_differ() {
        let mut a = Noise::new(0.5, 1);
        let mut b = Noise::new(0.5, 2);
        let same = (0..16).all(|_| a.apply(0.0, 0.1) == b.apply(0.0, 0.1));
        assert!(!same);
    }

    #[test]
    fn reset_replays_from_the_seed() {
        let mut t = Noise::new(1.0, 99);
        let first: Vec<f64> = (0..8).map(|_| t.apply(0.0, 0.1)).collect();
        t.reset();
        let replay: Vec<f64> = (0..8).map(|_| t.apply(0.0, 0.1)).collect();
        assert_eq!(first, replay);
    }

    #[test]
    fn sample_mean_near_zero() {
        let mut t = Noise::new(1.0, 2024);
        let n = 20_000;
        let mean: f64 = (0..n).map(|_| t.apply(0.0, 0.1)).sum::<f64>() / n as f64;
        assert!(mean.abs() < 0.05, "mean = {mean}");
    }
}
