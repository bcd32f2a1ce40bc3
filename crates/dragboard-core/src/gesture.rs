#![forbid(unsafe_code)]

//! Pointer gesture primitives: slop detection and velocity estimation.
//!
//! [`VelocityTracker`] keeps a short history of pointer samples and
//! estimates release velocity from the samples inside a trailing time
//! window, which is what fling recognition needs.
//!
//! # Invariants
//!
//! 1. Samples are stored in arrival order; samples older than the window
//!    (relative to the newest sample) are discarded on insert.
//! 2. With fewer than two samples, or zero elapsed time between the oldest
//!    and newest retained sample, velocity is zero.

use std::collections::VecDeque;
use std::time::Duration;

use web_time::Instant;

use crate::geometry::Point;

/// Default trailing window for velocity estimation.
pub const DEFAULT_VELOCITY_WINDOW: Duration = Duration::from_millis(100);

/// Upper bound on retained samples regardless of window.
const MAX_SAMPLES: usize = 20;

/// Whether `current` has moved at least `slop` pixels away from `origin`.
#[inline]
#[must_use]
pub fn exceeds_slop(origin: Point, current: Point, slop: f32) -> bool {
    let dx = current.x - origin.x;
    let dy = current.y - origin.y;
    dx * dx + dy * dy >= slop * slop
}

/// Estimates pointer velocity in pixels per second.
#[derive(Debug, Clone)]
pub struct VelocityTracker {
    window: Duration,
    samples: VecDeque<(Point, Instant)>,
}

impl Default for VelocityTracker {
    fn default() -> Self {
        Self::new(DEFAULT_VELOCITY_WINDOW)
    }
}

impl VelocityTracker {
    /// Create a tracker with the given trailing window.
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            samples: VecDeque::with_capacity(MAX_SAMPLES),
        }
    }

    /// Record a sample.
    pub fn add(&mut self, position: Point, time: Instant) {
        if self.samples.len() == MAX_SAMPLES {
            self.samples.pop_front();
        }
        self.samples.push_back((position, time));
        while let Some(&(_, oldest)) = self.samples.front() {
            if time.saturating_duration_since(oldest) > self.window {
                self.samples.pop_front();
            } else {
                break;
            }
        }
    }

    /// Drop all samples.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Number of retained samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Velocity in pixels per second, `(0, 0)` when undetermined.
    #[must_use]
    pub fn velocity(&self) -> Point {
        let (Some(&(first, t0)), Some(&(last, t1))) = (self.samples.front(), self.samples.back())
        else {
            return Point::ZERO;
        };
        let secs = t1.saturating_duration_since(t0).as_secs_f32();
        if secs <= 0.0 {
            return Point::ZERO;
        }
        Point::new((last.x - first.x) / secs, (last.y - first.y) / secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_10: Duration = Duration::from_millis(10);

    #[test]
    fn slop_threshold_is_inclusive() {
        let origin = Point::new(0.0, 0.0);
        assert!(!exceeds_slop(origin, Point::new(2.0, 0.0), 3.0));
        assert!(exceeds_slop(origin, Point::new(3.0, 0.0), 3.0));
        assert!(exceeds_slop(origin, Point::new(3.0, 3.0), 4.0));
    }

    #[test]
    fn empty_tracker_has_zero_velocity() {
        let tracker = VelocityTracker::default();
        assert_eq!(tracker.velocity(), Point::ZERO);
    }

    #[test]
    fn single_sample_has_zero_velocity() {
        let mut tracker = VelocityTracker::default();
        tracker.add(Point::new(5.0, 5.0), Instant::now());
        assert_eq!(tracker.velocity(), Point::ZERO);
    }

    #[test]
    fn constant_motion_velocity() {
        let t = Instant::now();
        let mut tracker = VelocityTracker::default();
        for i in 0..5u32 {
            tracker.add(Point::new(i as f32 * 10.0, 0.0), t + MS_10 * i);
        }
        let v = tracker.velocity();
        assert!((v.x - 1000.0).abs() < 1.0, "got {v:?}");
        assert_eq!(v.y, 0.0);
    }

    #[test]
    fn stale_samples_fall_out_of_window() {
        let t = Instant::now();
        let mut tracker = VelocityTracker::new(Duration::from_millis(50));
        tracker.add(Point::new(0.0, 0.0), t);
        tracker.add(Point::new(0.0, 100.0), t + Duration::from_millis(500));
        tracker.add(Point::new(0.0, 110.0), t + Duration::from_millis(510));
        assert_eq!(tracker.len(), 2);
        let v = tracker.velocity();
        assert!((v.y - 1000.0).abs() < 1.0, "got {v:?}");
    }

    #[test]
    fn clear_resets() {
        let mut tracker = VelocityTracker::default();
        tracker.add(Point::ZERO, Instant::now());
        tracker.clear();
        assert!(tracker.is_empty());
    }
}
