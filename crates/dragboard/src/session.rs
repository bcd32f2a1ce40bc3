#![forbid(unsafe_code)]

//! Drag session record and lifecycle state.

use dragboard_core::geometry::Point;

/// Lifecycle of a drag, shared by the board session and each container's
/// controller.
///
/// ```text
/// Ended --start--> Started --pointer--> Dragging --end--> Settling --settled--> Ended
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    /// No drag in this container.
    #[default]
    Ended,
    /// Item picked up (or just transferred in); no pointer update yet.
    Started,
    /// Pointer is moving the item.
    Dragging,
    /// Released; the ghost is animating into the item's slot.
    Settling,
}

impl DragState {
    /// Whether the item still follows the pointer.
    #[must_use]
    pub const fn is_live(self) -> bool {
        matches!(self, Self::Started | Self::Dragging)
    }
}

/// The one active drag on a board.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession<Id> {
    /// Identity of the dragged item.
    pub item_id: Id,
    pub origin_container: usize,
    pub origin_index: usize,
    /// Container that currently holds the item.
    pub current_container: usize,
    /// Index of the item in `current_container`.
    pub current_index: usize,
    /// Last pointer position, board viewport coordinates.
    pub pointer: Point,
    pub state: DragState,
}

/// Deferred work scheduled on a board's timer queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardTimer {
    /// Auto-scroll tick of the container at this index.
    ListAutoScroll(usize),
    /// Board-level auto-scroll tick.
    BoardAutoScroll,
    /// End of the transfer hold in the container at this index.
    ReleaseHold(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn live_states() {
        assert!(!DragState::Ended.is_live());
        assert!(DragState::Started.is_live());
        assert!(DragState::Dragging.is_live());
        assert!(!DragState::Settling.is_live());
        assert_eq!(DragState::default(), DragState::Ended);
    }
}
