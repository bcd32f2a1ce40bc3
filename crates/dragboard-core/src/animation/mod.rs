#![forbid(unsafe_code)]

//! Time-driven animation primitives.
//!
//! Animations never sleep or own a clock: the owner calls
//! [`Animation::tick`] with the elapsed frame time and reads the result. This
//! keeps every drag and scroll animation deterministic under test.
//!
//! # Invariants
//!
//! 1. `value()` is in [0.0, 1.0].
//! 2. Once `is_complete()` is true it stays true until `reset()`.
//! 3. `tick(Duration::ZERO)` never changes state.

mod tween;

pub use tween::{Interpolate, Tween};

use std::time::Duration;

/// A time-driven animation.
pub trait Animation {
    /// Advance by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its end.
    fn is_complete(&self) -> bool;

    /// Normalized progress in [0.0, 1.0] after easing.
    fn value(&self) -> f32;

    /// Return to the initial state.
    fn reset(&mut self);
}

/// Easing curve mapping linear progress to eased progress, both in [0, 1].
pub type EasingFn = fn(f32) -> f32;

#[inline]
pub fn linear(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

#[inline]
pub fn ease_in(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t
}

#[inline]
pub fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Decelerating cubic; the default for settle and snap motion.
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_endpoints() {
        for easing in [linear, ease_in, ease_out, ease_in_out, ease_out_cubic] {
            assert_eq!(easing(0.0), 0.0);
            assert!((easing(1.0) - 1.0).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn easing_clamps_input() {
        assert_eq!(ease_out_cubic(-1.0), 0.0);
        assert_eq!(ease_out_cubic(2.0), 1.0);
    }

    #[test]
    fn ease_out_leads_linear() {
        assert!(ease_out(0.3) > linear(0.3));
        assert!(ease_out_cubic(0.3) > ease_out(0.3));
    }
}
