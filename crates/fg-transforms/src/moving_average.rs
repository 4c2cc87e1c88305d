//! Moving average over a sliding sample window.

use std::collections::VecDeque;

use crate::transform::Transform;

/// `y = mean(x[t-N+1] ... x[t])` over at most `window_size` samples.
///
/// Until the window fills, the average runs over the samples seen so far
/// (the first sample returns itself). `window_size` must be at least 1;
/// the compiler enforces this at parse time.
#[derive(Debug, Clone)]
pub struct MovingAverage {
    window_size: usize,
    samples: VecDeque<f64>,
}

impl MovingAverage {
    pub fn new(window_size: usize) -> Self {
        Self {
            window_size,
            samples: VecDeque::with_capacity(window_size),
        }
    }
}

impl Transform for MovingAverage {
    fn apply(&mut self, input: f64, _dt: f64) -> f64 {
        self.samples.push_back(input);
        if self.samples.len() > self.window_size {
            self.samples.pop_front();
        }
        let sum: f64 = self.samples.iter().sum();
        sum / self.samples.len() as f64
    }

    fn reset(&mut self) {
        self.samples.clear();
    }
}
