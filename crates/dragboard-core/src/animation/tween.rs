#![forbid(unsafe_code)]

//! Fixed-duration interpolation between two values.
//!
//! # Failure Modes
//!
//! - Zero duration: the tween completes on the first tick (or immediately
//!   if constructed with [`Duration::ZERO`]).

use std::time::Duration;

use super::{Animation, EasingFn, ease_out_cubic};
use crate::geometry::Point;

/// Values a [`Tween`] can interpolate.
pub trait Interpolate: Copy {
    fn interpolate(self, to: Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    #[inline]
    fn interpolate(self, to: Self, t: f32) -> Self {
        self + (to - self) * t
    }
}

impl Interpolate for Point {
    #[inline]
    fn interpolate(self, to: Self, t: f32) -> Self {
        self.lerp(to, t)
    }
}

/// Eased interpolation from `from` to `to` over `duration`.
#[derive(Debug, Clone, Copy)]
pub struct Tween<T: Interpolate> {
    from: T,
    to: T,
    duration: Duration,
    elapsed: Duration,
    easing: EasingFn,
}

impl<T: Interpolate> Tween<T> {
    /// Create a tween with the default decelerating curve.
    #[must_use]
    pub fn new(from: T, to: T, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
            easing: ease_out_cubic,
        }
    }

    /// Set the easing curve (builder pattern).
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    #[inline]
    pub fn from(&self) -> T {
        self.from
    }

    #[inline]
    pub fn to(&self) -> T {
        self.to
    }

    /// Interpolated value at the current progress.
    #[must_use]
    pub fn current(&self) -> T {
        self.from.interpolate(self.to, self.value())
    }

    /// Redirect an in-flight tween: restart from the current value towards
    /// `to` with the full duration.
    pub fn retarget(&mut self, to: T) {
        self.from = self.current();
        self.to = to;
        self.elapsed = Duration::ZERO;
    }

    fn raw_progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }
}

impl<T: Interpolate> Animation for Tween<T> {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f32 {
        (self.easing)(self.raw_progress()).clamp(0.0, 1.0)
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }
}
