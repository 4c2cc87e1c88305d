//! Linear scaling and offset with optional clamping.

use crate::transform::Transform;

/// `y = clamp(scale * x + offset, clamp_min, clamp_max)`. Stateless.
#[derive(Debug, Clone)]
pub struct Linear {
    scale: f64,
    offset: f64,
    clamp_min: f64,
    clamp_max: f64,
}

impl Linear {
    /// Unclamped form; bounds default to the full real line.
    pub fn new(scale: f64, offset: f64) -> Self {
        Self::with_clamp(scale, offset, f64::NEG_INFINITY, f64::INFINITY)
    }

    pub fn with_clamp(scale: f64, offset: f64, clamp_min: f64, clamp_max: f64) -> Self {
        Self {
            scale,
            offset,
            clamp_min,
            clamp_max,
        }
    }
}

impl Transform for Linear {
    fn apply(&mut self, input: f64, _dt: f64) -> f64 {
        (self.scale * input + self.offset).clamp(self.clamp_min, self.clamp_max)
    }

    fn reset(&mut self) {
        // No state.
    }
}
