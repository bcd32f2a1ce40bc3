#![forbid(unsafe_code)]

//! Outbound notifications and the pluggable drag policy.

use crate::error::ListenerResult;

/// Receives drag lifecycle notifications from a board.
///
/// Every callback runs after the board has reached a consistent state. An
/// error is returned unchanged from the board operation that triggered it
/// as [`DragError::Listener`](crate::DragError::Listener); later
/// notifications of the same operation are still delivered.
pub trait DragListener {
    /// An item was picked up at `row` of `container`.
    fn on_drag_started(&mut self, container: usize, row: usize) -> ListenerResult {
        let _ = (container, row);
        Ok(())
    }

    /// The dragged item moved from container `old` into container `new`.
    fn on_container_changed(&mut self, old: usize, new: usize) -> ListenerResult {
        let _ = (old, new);
        Ok(())
    }

    /// The drag finished (after the settle animation).
    fn on_drag_ended(
        &mut self,
        from_container: usize,
        from_row: usize,
        to_container: usize,
        to_row: usize,
    ) -> ListenerResult {
        let _ = (from_container, from_row, to_container, to_row);
        Ok(())
    }

    /// The dragged item was reordered inside `container`.
    fn on_item_moved(&mut self, container: usize, from_row: usize, to_row: usize) -> ListenerResult {
        let _ = (container, from_row, to_row);
        Ok(())
    }

    /// The column the board rests on changed.
    fn on_focused_container_changed(&mut self, old: Option<usize>, new: usize) -> ListenerResult {
        let _ = (old, new);
        Ok(())
    }
}

impl DragListener for () {}

/// Decides which items may be picked up and where they may land.
pub trait DragPolicy {
    fn can_drag_item_at(&self, container: usize, row: usize) -> bool {
        let _ = (container, row);
        true
    }

    /// Whether the item picked up at (`from_container`, `from_row`) may
    /// occupy `to_row` of `to_container`.
    fn can_drop_at(
        &self,
        from_container: usize,
        from_row: usize,
        to_container: usize,
        to_row: usize,
    ) -> bool {
        let _ = (from_container, from_row, to_container, to_row);
        true
    }
}

/// Policy that allows everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl DragPolicy for AllowAll {}

/// One queued listener notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Notification {
    DragStarted { container: usize, row: usize },
    ContainerChanged { old: usize, new: usize },
    ItemMoved { container: usize, from: usize, to: usize },
    DragEnded { from: (usize, usize), to: (usize, usize) },
    FocusChanged { old: Option<usize>, new: usize },
}

impl Notification {
    pub(crate) fn deliver<L: DragListener + ?Sized>(self, listener: &mut L) -> ListenerResult {
        match self {
            Self::DragStarted { container, row } => listener.on_drag_started(container, row),
            Self::ContainerChanged { old, new } => listener.on_container_changed(old, new),
            Self::ItemMoved {
                container,
                from,
                to,
            } => listener.on_item_moved(container, from, to),
            Self::DragEnded { from, to } => listener.on_drag_ended(from.0, from.1, to.0, to.1),
            Self::FocusChanged { old, new } => listener.on_focused_container_changed(old, new),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Log(Vec<String>);

    impl DragListener for Log {
        fn on_container_changed(&mut self, old: usize, new: usize) -> ListenerResult {
            self.0.push(format!("changed {old}->{new}"));
            Ok(())
        }

        fn on_drag_ended(&mut self, fc: usize, fr: usize, tc: usize, tr: usize) -> ListenerResult {
            if tc == 9 {
                return Err("refused".into());
            }
            self.0.push(format!("ended {fc}:{fr}->{tc}:{tr}"));
            Ok(())
        }
    }

    #[test]
    fn notifications_dispatch_to_callbacks() {
        let mut log = Log::default();
        Notification::ContainerChanged { old: 0, new: 1 }
            .deliver(&mut log)
            .expect("ok");
        Notification::DragEnded {
            from: (0, 2),
            to: (1, 0),
        }
        .deliver(&mut log)
        .expect("ok");
        Notification::ItemMoved {
            container: 0,
            from: 1,
            to: 2,
        }
        .deliver(&mut log)
        .expect("default no-op");
        assert_eq!(log.0, vec!["changed 0->1", "ended 0:2->1:0"]);
    }

    #[test]
    fn listener_errors_surface() {
        let mut log = Log::default();
        let err = Notification::DragEnded {
            from: (0, 0),
            to: (9, 0),
        }
        .deliver(&mut log)
        .expect_err("listener refuses");
        assert_eq!(err.to_string(), "refused");
    }

    #[test]
    fn allow_all_allows() {
        assert!(AllowAll.can_drag_item_at(3, 4));
        assert!(AllowAll.can_drop_at(0, 0, 1, 5));
    }
}
