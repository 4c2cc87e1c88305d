//! Saturation (clipping).

use crate::transform::Transform;

/// `y = clamp(x, min, max)`. Stateless.
#[derive(Debug, Clone)]
pub struct Saturation {
    min: f64,
    max: f64,
}

impl Saturation {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

impl Transform for Saturation {
    fn apply(&mut self, input: f64, _dt: f64) -> f64 {
        input.clamp(self.min, self.max)
    }

    fn reset(&mut self) {
        // No state.
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clips_to_bounds() {
        let mut t = Saturation::new(-1.0, 1.0);
        assert_eq!(t.apply(0.5, 0.1), 0.5);
        assert_eq!(t.apply(2.0, 0.1), 1.0);
        assert_eq!(t.apply(-2.0, 0.1), -1.0);
        assert_eq!(t.apply(1.0, 0.1), 1.0);
    }
}
