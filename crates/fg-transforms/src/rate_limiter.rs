//! Slew-rate limiter.

use crate::transform::Transform;

/// Limits `dy/dt` to `max_rate_per_sec` in either direction.
///
/// The first call latches the output to the input. With `max_rate <= 0` or
/// `dt <= 0` the limiter tracks the input directly.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    max_rate: f64,
    output: f64,
    initialized: bool,
}

impl RateLimiter {
    pub fn new(max_rate_per_sec: f64) -> Self {
        Self {
            max_rate: max_rate_per_sec,
            output: 0.0,
            initialized: false,
        }
    }
}

impl Transform for RateLimiter {
    fn apply(&mut self, input: f64, dt: f64) -> f64 {
        if !self.initialized {
            self.output = input;
            self.initialized = true;
            return self.output;
        }

        if self.max_rate <= 0.0 || dt <= 0.0 {
            self.output = input;
            return self.output;
        }

        let max_change = self.max_rate * dt;
        let delta = (input - self.output).clamp(-max_change, max_change);
        self.output += delta;
        self.output
    }

    fn reset(&mut self) {
        self.output = 0.0;
        self.initialized = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_call_latches_input() {
        let mut t = RateLimiter::new(1.0);
        assert_eq!(t.apply(100.0, 0.1), 100.0);
    }

    #[test]
    fn limits_slew_in_both_directions() {
        let mut t = RateLimiter::new(10.0); // 1.0 per 0.1 s tick
        t.apply(0.0, 0.1);
        assert_eq!(t.apply(5.0, 0.1), 1.0);
        assert_eq!(t.apply(5.0, 0.1), 2.0);
        assert_eq!(t.apply(-5.0, 0.1), 1.0);
    }

    #[test]
    fn small_changes_pass_unmodified() {
        let mut t = RateLimiter::new(10.0);
        t.apply(0.0, 0.1);
        assert_eq!(t.apply(0.5, 0.1), 0.5);
    }

    #[test]
    fn nonpositive_rate_tracks_input() {
        let mut t = RateLimiter::new(0.0);
        t.apply(0.0, 0.1);
        assert_eq!(t.apply(1e6, 0.1), 1e6);
    }

    #[test]
    fn reset_clears_latch() {
        let mut t = RateLimiter::new(1.0);
        t.apply(50.0, 0.1);
        t.reset();
        assert_eq!(t.apply(-7.0, 0.1), -7.0);
    }
}
