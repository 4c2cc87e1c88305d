//! Pure time delay through a FIFO sample buffer.

use std::collections::VecDeque;

use crate::transform::Transform;

/// `y(t) = x(t - delay_sec)`, discretized to whole samples.
///
/// The required sample count `N = max(1, round(delay_sec / dt))` is
/// recomputed from the current `dt` on every call; hosts that vary `dt`
/// between ticks change the effective delay and are outside the engine's
/// determinism envelope (tick `dt` is constant by contract).
///
/// While the buffer is still filling, the oldest buffered sample is
/// returned, so the first reads see the earliest appended input.
/// `delay_sec <= 0` is a passthrough.
#[derive(Debug, Clone)]
pub struct Delay {
    delay_sec: f64,
    buffer: VecDeque<f64>,
}

impl Delay {
    pub fn new(delay_sec: f64) -> Self {
        Self {
            delay_sec,
            buffer: VecDeque::new(),
        }
    }
}

impl Transform for Delay {
    fn apply(&mut self, input: f64, dt: f64) -> f64 {
        if self.delay_sec <= 0.0 {
            return input;
        }

        let required = ((self.delay_sec / dt).round() as usize).max(1);

        self.buffer.push_back(input);

        if self.buffer.len() > required {
            if let Some(output) = self.buffer.pop_front() {
                return output;
            }
        }
        self.buffer.front().copied().unwrap_or(input)
    }

    fn reset(&mut self) {
        self.buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nonpositive_delay_is_passthrough() {
        let mut t = Delay::new(0.0);
        assert_eq!(t.apply(3.0, 0.1), 3.0);
        assert_eq!(t.apply(-1.0, 0.1), -1.0);
    }

    #[test]
    fn step_shifts_by_rounded_sample_count() {
        // delay_sec = 0.3, dt = 0.1 -> N = 3 samples.
        let dt = 0.1;
        let mut t = Delay::new(0.3);

        let mut outputs = Vec::new();
        for i in 0..10 {
            let input = if i < 5 { 0.0 } else { 1.0 };
            outputs.push(t.apply(input, dt));
        }

        // The step written at sample 5 emerges at sample 8.
        for (i, y) in outputs.iter().enumerate() {
            let expected = if i < 8 { 0.0 } else { 1.0 };
            assert!((y - expected).abs() < 1e-6, "sample {i}: {y}");
        }
    }

    #[test]
    fn filling_buffer_returns_earliest_sample() {
        let mut t = Delay::new(0.5); // N = 5 at dt = 0.1
        assert_eq!(t.apply(10.0, 0.1), 10.0);
        assert_eq!(t.apply(20.0, 0.1), 10.0);
        assert_eq!(t.apply(30.0, 0.1), 10.0);
    }

    #[test]
    fn reset_empties_buffer() {
        let mut t = Delay::new(0.2);
        t.apply(1.0, 0.1);
        t.apply(2.0, 0.1);
        t.reset();
        assert_eq!(t.apply(9.0, 0.1), 9.0);
    }
}
