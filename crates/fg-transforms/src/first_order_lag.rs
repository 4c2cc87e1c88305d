//! First-order lag (low-pass filter).

use crate::transform::Transform;

/// Exponential approach to the input with time constant `tau_s`:
/// `dy/dt = (x - y) / tau`.
///
/// The first call latches the output to the input (no startup transient).
/// With `tau_s <= 0` the filter degenerates to a passthrough.
#[derive(Debug, Clone)]
pub struct FirstOrderLag {
    tau_s: f64,
    output: f64,
    initialized: bool,
}

impl FirstOrderLag {
    pub fn new(tau_s: f64) -> Self {
        Self {
            tau_s,
            output: 0.0,
            initialized: false,
        }
    }
}

impl Transform for FirstOrderLag {
    fn apply(&mut self, input: f64, dt: f64) -> f64 {
        if !self.initialized {
            self.output = input;
            self.initialized = true;
            return self.output;
        }

        if self.tau_s <= 0.0 {
            self.output = input;
            return self.output;
        }

        // Exact discretization: y += (1 - e^(-dt/tau)) * (x - y)
        let alpha = 1.0 - (-dt / self.tau_s).exp();
        self.output += alpha * (input - self.output);
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
        let mut t = FirstOrderLag::new(1.0);
        assert_eq!(t.apply(5.0, 0.1), 5.0);
    }

    #[test]
    fn nonpositive_tau_is_passthrough() {
        let mut t = FirstOrderLag::new(0.0);
        t.apply(1.0, 0.1);
        assert_eq!(t.apply(7.0, 0.1), 7.0);
    }

    #[test]
    fn reset_clears_latch() {
        let mut t = FirstOrderLag::new(1.0);
        t.apply(5.0, 0.1);
        t.apply(5.0, 0.1);
        t.reset();
        // After reset the next call latches again.
        assert_eq!(t.apply(-2.0, 0.1), -2.0);
    }

    #[test]
    fn step_response_matches_closed_form() {
        // From rest (y latched to 0), step input of 1.0: y(t) = 1 - e^(-t/tau).
        let tau = 2.0;
        let dt = tau / 10.0;
        let mut t = FirstOrderLag::new(tau);
        t.apply(0.0, dt); // latch at 0

        let mut time = 0.0;
        while time < 5.0 * tau {
            let y = t.apply(1.0, dt);
            time += dt;
            let expected = 1.0 - (-time / tau).exp();
            assert!(
                (y - expected).abs() < 1e-3,
                "t={time}: y={y}, expected {expected}"
            );
        }
    }
}
