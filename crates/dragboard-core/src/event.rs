#![forbid(unsafe_code)]

//! Canonical pointer event types.
//!
//! Hosts translate their native touch or mouse input into [`PointerEvent`]
//! values. Positions are in board viewport coordinates (the visible area of
//! the board, not its scrolled content).
//!
//! # Design Notes
//!
//! - Timestamps are [`web_time::Instant`] so the same code runs on wasm hosts.
//! - Only one pointer drives a gesture; events from other pointer ids are
//!   ignored by the router rather than rejected here.

use web_time::Instant;

use crate::geometry::Point;

/// Host-assigned identifier of a pointer (finger, pen, mouse).
pub type PointerId = u32;

/// The phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventKind {
    /// Pointer pressed.
    Down,
    /// Pointer moved while pressed.
    Move,
    /// Pointer released.
    Up,
    /// The host aborted the gesture (focus loss, system gesture, lost capture).
    Cancel,
}

/// A single pointer sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub pointer_id: PointerId,
    /// Position in board viewport coordinates.
    pub position: Point,
    pub time: Instant,
}

impl PointerEvent {
    /// Create a new pointer event.
    #[must_use]
    pub const fn new(
        kind: PointerEventKind,
        pointer_id: PointerId,
        position: Point,
        time: Instant,
    ) -> Self {
        Self {
            kind,
            pointer_id,
            position,
            time,
        }
    }

    #[must_use]
    pub const fn down(pointer_id: PointerId, position: Point, time: Instant) -> Self {
        Self::new(PointerEventKind::Down, pointer_id, position, time)
    }

    #[must_use]
    pub const fn moved(pointer_id: PointerId, position: Point, time: Instant) -> Self {
        Self::new(PointerEventKind::Move, pointer_id, position, time)
    }

    #[must_use]
    pub const fn up(pointer_id: PointerId, position: Point, time: Instant) -> Self {
        Self::new(PointerEventKind::Up, pointer_id, position, time)
    }

    #[must_use]
    pub const fn cancel(pointer_id: PointerId, position: Point, time: Instant) -> Self {
        Self::new(PointerEventKind::Cancel, pointer_id, position, time)
    }

    /// Whether this event ends the gesture (release or cancel).
    #[inline]
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self.kind, PointerEventKind::Up | PointerEventKind::Cancel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_kind() {
        let t = Instant::now();
        let p = Point::new(1.0, 2.0);
        assert_eq!(PointerEvent::down(1, p, t).kind, PointerEventKind::Down);
        assert_eq!(PointerEvent::moved(1, p, t).kind, PointerEventKind::Move);
        assert_eq!(PointerEvent::up(1, p, t).kind, PointerEventKind::Up);
        assert_eq!(PointerEvent::cancel(1, p, t).kind, PointerEventKind::Cancel);
    }

    #[test]
    fn terminal_events() {
        let t = Instant::now();
        let p = Point::ZERO;
        assert!(PointerEvent::up(0, p, t).is_terminal());
        assert!(PointerEvent::cancel(0, p, t).is_terminal());
        assert!(!PointerEvent::moved(0, p, t).is_terminal());
        assert!(!PointerEvent::down(0, p, t).is_terminal());
    }
}
