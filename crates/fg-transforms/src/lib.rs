//! fg-transforms: stateful per-edge signal operators for FluxGraph.
//!
//! Eight transform kinds behind one [`Transform`] trait:
//! - `linear`, `saturation`, `deadband`: stateless closed forms
//! - `first_order_lag`, `rate_limiter`: latch-on-first-call dynamics
//! - `delay`, `moving_average`: FIFO sample buffers
//! - `noise`: seeded deterministic Gaussian noise
//!
//! The set is closed over [`TransformKind`], a tagged enum with static-match
//! dispatch. Cloning a transform deep-copies its state (buffers, PRNG stream
//! position, initialization latches), so a clone emits the identical next
//! sample that the original would have.

pub mod deadband;
pub mod delay;
pub mod first_order_lag;
pub mod linear;
pub mod moving_average;
pub mod noise;
pub mod rate_limiter;
pub mod saturation;
pub mod transform;

// Re-exports
pub use deadband::Deadband;
pub use delay::Delay;
pub use first_order_lag::FirstOrderLag;
pub use linear::Linear;
pub use moving_average::MovingAverage;
pub use noise::Noise;
pub use rate_limiter::RateLimiter;
pub use saturation::Saturation;
pub use transform::{Transform, TransformKind};
