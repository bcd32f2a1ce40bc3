#![forbid(unsafe_code)]

//! Deterministic pointer sequences for stress and fuzz-style tests.
//!
//! A walk is one pointer going down at `start`, wandering inside `bounds`
//! with bounded random steps, and lifting. The same seed always produces the
//! same events.

use std::time::Duration;

use dragboard::{Instant, Point, PointerEvent, PointerId, Size};

/// Parameters of a [`pointer_walk`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerWalk {
    pub seed: u64,
    pub pointer_id: PointerId,
    pub start: Point,
    pub bounds: Size,
    /// Number of move events between down and up.
    pub moves: usize,
    /// Largest per-axis step in pixels.
    pub max_step: f32,
    /// Time between consecutive events.
    pub interval: Duration,
}

impl PointerWalk {
    #[must_use]
    pub fn new(seed: u64, start: Point, bounds: Size) -> Self {
        Self {
            seed,
            pointer_id: 1,
            start,
            bounds,
            moves: 64,
            max_step: 40.0,
            interval: Duration::from_millis(16),
        }
    }
}

struct Rng {
    state: u64,
}

impl Rng {
    fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Uniform in `[-1, 1]`.
    fn next_signed_unit(&mut self) -> f32 {
        (self.next() % 2001) as f32 / 1000.0 - 1.0
    }
}

/// Generate down, `moves` moves, then up, starting at `epoch`.
#[must_use]
pub fn pointer_walk(walk: &PointerWalk, epoch: Instant) -> Vec<PointerEvent> {
    let mut rng = Rng::new(walk.seed);
    let mut events = Vec::with_capacity(walk.moves + 2);
    let mut time = epoch;
    let mut at = walk.start;
    events.push(PointerEvent::down(walk.pointer_id, at, time));
    for _ in 0..walk.moves {
        time += walk.interval;
        at = Point::new(
            (at.x + rng.next_signed_unit() * walk.max_step).clamp(0.0, walk.bounds.width),
            (at.y + rng.next_signed_unit() * walk.max_step).clamp(0.0, walk.bounds.height),
        );
        events.push(PointerEvent::moved(walk.pointer_id, at, time));
    }
    time += walk.interval;
    events.push(PointerEvent::up(walk.pointer_id, at, time));
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use dragboard::PointerEventKind;

    #[test]
    fn walk_is_deterministic_and_bounded() {
        let epoch = Instant::now();
        let walk = PointerWalk::new(42, Point::new(50.0, 50.0), Size::new(300.0, 200.0));
        let a = pointer_walk(&walk, epoch);
        let b = pointer_walk(&walk, epoch);
        assert_eq!(a, b);
        assert_eq!(a.len(), 66);
        assert_eq!(a[0].kind, PointerEventKind::Down);
        assert_eq!(a[65].kind, PointerEventKind::Up);
        assert!(a.iter().all(|e| {
            (0.0..=300.0).contains(&e.position.x) && (0.0..=200.0).contains(&e.position.y)
        }));
    }
}
