//! Transform trait and the polymorphic transform set.

use crate::deadband::Deadband;
use crate::delay::Delay;
use crate::first_order_lag::FirstOrderLag;
use crate::linear::Linear;
use crate::moving_average::MovingAverage;
use crate::noise::Noise;
use crate::rate_limiter::RateLimiter;
use crate::saturation::Saturation;

/// Stateful per-edge signal operator.
///
/// Transforms process one sample per tick and carry their own state between
/// calls. All operations are total over the real line; numeric trouble
/// (overflow, NaN) flows through as signal values rather than errors.
pub trait Transform {
    /// Apply the transform to one input sample.
    ///
    /// `dt` is the tick time step in seconds; stateless transforms ignore it.
    fn apply(&mut self, input: f64, dt: f64) -> f64;

    /// Reset internal state to initial conditions.
    fn reset(&mut self);
}

/// The closed set of transform kinds, one variant per operator.
///
/// Dispatch is a static match; `Clone` deep-copies configuration *and*
/// current state (FIFO buffers, PRNG stream position, initialization
/// latches), so a clone produces the same next sample the original would
/// have.
#[derive(Debug, Clone)]
pub enum TransformKind {
    Linear(Linear),
    FirstOrderLag(FirstOrderLag),
    Delay(Delay),
    Noise(Noise),
    Saturation(Saturation),
    Deadband(Deadband),
    RateLimiter(RateLimiter),
    MovingAverage(MovingAverage),
}

impl Transform for TransformKind {
    fn apply(&mut self, input: f64, dt: f64) -> f64 {
        match self {
            TransformKind::Linear(t) => t.apply(input, dt),
            TransformKind::FirstOrderLag(t) => t.apply(input, dt),
            TransformKind::Delay(t) => t.apply(input, dt),
            TransformKind::Noise(t) => t.apply(input, dt),
            TransformKind::Saturation(t) => t.apply(input, dt),
            TransformKind::Deadband(t) => t.apply(input, dt),
            TransformKind::RateLimiter(t) => t.apply(input, dt),
            TransformKind::MovingAverage(t) => t.apply(input, dt),
        }
    }

    fn reset(&mut self) {
        match self {
            TransformKind::Linear(t) => t.reset(),
            TransformKind::FirstOrderLag(t) => t.reset(),
            TransformKind::Delay(t) => t.reset(),
            TransformKind::Noise(t) => t.reset(),
            TransformKind::Saturation(t) => t.reset(),
            TransformKind::Deadband(t) => t.reset(),
            TransformKind::RateLimiter(t) => t.reset(),
            TransformKind::MovingAverage(t) => t.reset(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clone_duplicates_state() {
        let mut original = TransformKind::FirstOrderLag(FirstOrderLag::new(1.0));
        original.apply(10.0, 0.1);
        original.apply(5.0, 0.1);

        let mut clone = original.clone();
        // Both must emit the identical next sample.
        assert_eq!(original.apply(0.0, 0.1), clone.apply(0.0, 0.1));
    }

    #[test]
    fn clone_duplicates_prng_stream() {
        let mut original = TransformKind::Noise(Noise::new(1.0, 1234));
        original.apply(0.0, 0.1);
        original.apply(0.0, 0.1);

        let mut clone = original.clone();
        for _ in 0..8 {
            assert_eq!(original.apply(3.0, 0.1), clone.apply(3.0, 0.1));
        }
    }
}
