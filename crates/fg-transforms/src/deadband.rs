//! Deadband around zero.

use crate::transform::Transform;

/// `y = 0` if `|x| < threshold`, else `y = x`. Stateless.
#[derive(Debug, Clone)]
pub struct Deadband {
    threshold: f64,
}

impl Deadband {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }
}

impl Transform for Deadband {
    fn apply(&mut self, input: f64, _dt: f64) -> f64 {
        if input.abs() < self.threshold {
            0.0
        } else {
            input
        }
    }

    fn reset(&mut self) {
        // No state.
    }
}
