#![forbid(unsafe_code)]

//! Pointer event dispatch between the active drag and board scrolling.
//!
//! A [`GestureRouter`] follows exactly one pointer at a time. While the
//! board has a drag session, moves and releases of that pointer drive the
//! drag. Otherwise they are recognised as a scroll once they pass the touch
//! slop, and a release becomes either a fling to a neighbouring column or a
//! settle on the closest column.
//!
//! # Invariants
//!
//! 1. Events from any pointer other than the tracked one are ignored until
//!    the tracked pointer lifts or cancels.
//! 2. Cancel is handled exactly like release.
//! 3. A release while no pointer is tracked is ignored, even with a drag in
//!    progress.

use dragboard_core::event::{PointerEvent, PointerEventKind, PointerId};
use dragboard_core::geometry::Point;
use dragboard_core::gesture::{VelocityTracker, exceeds_slop};

use crate::board::Board;
use crate::config::GestureConfig;
use crate::container::Container;
use crate::error::DragError;
use crate::ghost::GhostRenderer;
use crate::listener::DragListener;
use crate::snap;

/// What the router did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Event belongs to a pointer the router is not tracking.
    Ignored,
    /// Pointer is down but has not moved past the slop.
    Pending,
    /// Event drove the active drag.
    Drag,
    /// Event scrolled the board (or ended a scroll with a fling or settle).
    Scroll,
    /// Fling released towards this column.
    Fling(usize),
    /// Pointer lifted without scrolling or dragging.
    Tap,
}

#[derive(Debug, Clone)]
struct Track {
    pointer_id: PointerId,
    down: Point,
    last: Point,
    start_column: usize,
    scrolling: bool,
    velocity: VelocityTracker,
}

/// Routes raw pointer events to a [`Board`].
#[derive(Debug, Clone)]
pub struct GestureRouter {
    config: GestureConfig,
    track: Option<Track>,
}

impl GestureRouter {
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            track: None,
        }
    }

    /// Pointer currently followed, if any.
    #[must_use]
    pub fn tracked_pointer(&self) -> Option<PointerId> {
        self.track.as_ref().map(|t| t.pointer_id)
    }

    /// Whether the tracked pointer is scrolling the board.
    #[must_use]
    pub fn is_scrolling(&self) -> bool {
        self.track.as_ref().is_some_and(|t| t.scrolling)
    }

    /// Dispatch one pointer event.
    pub fn handle<C, R, L>(
        &mut self,
        board: &mut Board<C, R, L>,
        event: PointerEvent,
    ) -> Result<Route, DragError>
    where
        C: Container,
        R: GhostRenderer,
        L: DragListener,
    {
        if let Some(track) = &self.track
            && track.pointer_id != event.pointer_id
        {
            tracing::trace!(pointer = event.pointer_id, tracked = track.pointer_id, "pointer ignored");
            return Ok(Route::Ignored);
        }

        match event.kind {
            PointerEventKind::Down => {
                self.begin(board, &event);
                Ok(Route::Pending)
            }
            PointerEventKind::Move => self.on_move(board, &event),
            PointerEventKind::Up | PointerEventKind::Cancel => self.on_release(board, &event),
        }
    }

    fn begin<C, R, L>(&mut self, board: &mut Board<C, R, L>, event: &PointerEvent)
    where
        C: Container,
        R: GhostRenderer,
        L: DragListener,
    {
        board.stop_scroll_animation();
        let mut velocity = VelocityTracker::new(self.config.velocity_window);
        velocity.add(event.position, event.time);
        self.track = Some(Track {
            pointer_id: event.pointer_id,
            down: event.position,
            last: event.position,
            start_column: board.focused_column().or_else(|| board.closest_column()).unwrap_or(0),
            scrolling: false,
            velocity,
        });
    }

    fn on_move<C, R, L>(
        &mut self,
        board: &mut Board<C, R, L>,
        event: &PointerEvent,
    ) -> Result<Route, DragError>
    where
        C: Container,
        R: GhostRenderer,
        L: DragListener,
    {
        // A drag started by the host without a routed down adopts this pointer.
        if self.track.is_none() {
            if !board.is_dragging() {
                return Ok(Route::Ignored);
            }
            self.begin(board, event);
        }
        let Some(track) = self.track.as_mut() else {
            return Ok(Route::Ignored);
        };

        if board.is_dragging() {
            track.scrolling = false;
            track.last = event.position;
            board.update_drag(event.position, event.time)?;
            return Ok(Route::Drag);
        }

        track.velocity.add(event.position, event.time);
        if !track.scrolling && exceeds_slop(track.down, event.position, self.config.touch_slop) {
            track.scrolling = true;
            tracing::trace!(pointer = track.pointer_id, "scroll recognised");
        }
        if !track.scrolling {
            return Ok(Route::Pending);
        }
        let axis = board.config().orientation;
        let delta = axis.main(track.last) - axis.main(event.position);
        track.last = event.position;
        board.scroll_by(delta);
        Ok(Route::Scroll)
    }

    fn on_release<C, R, L>(
        &mut self,
        board: &mut Board<C, R, L>,
        event: &PointerEvent,
    ) -> Result<Route, DragError>
    where
        C: Container,
        R: GhostRenderer,
        L: DragListener,
    {
        // A host-started drag is only released by the pointer that adopted it.
        let Some(mut track) = self.track.take() else {
            return Ok(Route::Ignored);
        };
        if board.is_dragging() {
            board.end_drag(event.time)?;
            return Ok(Route::Drag);
        }
        if !track.scrolling {
            return Ok(Route::Tap);
        }

        track.velocity.add(event.position, event.time);
        let axis = board.config().orientation;
        if !board.config().snap_to_column_when_scrolling {
            return Ok(Route::Scroll);
        }
        let velocity = axis.main(track.velocity.velocity());
        if velocity.abs() >= self.config.min_fling_velocity {
            let displacement = axis.main(event.position) - axis.main(track.down);
            let target = snap::fling_target(track.start_column, displacement, velocity, board.len());
            tracing::debug!(velocity, from = track.start_column, to = target, "fling");
            if board.is_empty() {
                return Ok(Route::Scroll);
            }
            board.scroll_to_column(target, true)?;
            Ok(Route::Fling(target))
        } else {
            board.settle_scroll()?;
            Ok(Route::Scroll)
        }
    }
}

impl Default for GestureRouter {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}
