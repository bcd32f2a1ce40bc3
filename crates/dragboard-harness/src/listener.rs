#![forbid(unsafe_code)]

//! Listener that records notifications, with optional failure injection.

use dragboard::{DragListener, ListenerResult};

/// One notification received by a [`RecordingListener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerEvent {
    DragStarted { container: usize, row: usize },
    ContainerChanged { old: usize, new: usize },
    DragEnded { from: (usize, usize), to: (usize, usize) },
    ItemMoved { container: usize, from: usize, to: usize },
    FocusChanged { old: Option<usize>, new: usize },
}

impl ListenerEvent {
    fn kind(&self) -> &'static str {
        match self {
            Self::DragStarted { .. } => "drag_started",
            Self::ContainerChanged { .. } => "container_changed",
            Self::DragEnded { .. } => "drag_ended",
            Self::ItemMoved { .. } => "item_moved",
            Self::FocusChanged { .. } => "focus_changed",
        }
    }
}

/// Records every notification in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingListener {
    pub events: Vec<ListenerEvent>,
    fail_on: Option<&'static str>,
}

impl RecordingListener {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every notification of `kind` (`"drag_started"`,
    /// `"container_changed"`, `"drag_ended"`, `"item_moved"`,
    /// `"focus_changed"`). The event is still recorded.
    #[must_use]
    pub fn failing_on(kind: &'static str) -> Self {
        Self {
            events: Vec::new(),
            fail_on: Some(kind),
        }
    }

    /// Container changes as `(old, new)`.
    #[must_use]
    pub fn container_changes(&self) -> Vec<(usize, usize)> {
        self.events
            .iter()
            .filter_map(|e| match *e {
                ListenerEvent::ContainerChanged { old, new } => Some((old, new)),
                _ => None,
            })
            .collect()
    }

    /// Drag-ended notifications as `(from, to)`.
    #[must_use]
    pub fn drag_ends(&self) -> Vec<((usize, usize), (usize, usize))> {
        self.events
            .iter()
            .filter_map(|e| match *e {
                ListenerEvent::DragEnded { from, to } => Some((from, to)),
                _ => None,
            })
            .collect()
    }

    /// In-container reorders as `(container, from, to)`.
    #[must_use]
    pub fn item_moves(&self) -> Vec<(usize, usize, usize)> {
        self.events
            .iter()
            .filter_map(|e| match *e {
                ListenerEvent::ItemMoved {
                    container,
                    from,
                    to,
                } => Some((container, from, to)),
                _ => None,
            })
            .collect()
    }

    fn record(&mut self, event: ListenerEvent) -> ListenerResult {
        self.events.push(event);
        if self.fail_on == Some(event.kind()) {
            return Err(format!("injected failure on {}", event.kind()).into());
        }
        Ok(())
    }
}

impl DragListener for RecordingListener {
    fn on_drag_started(&mut self, container: usize, row: usize) -> ListenerResult {
        self.record(ListenerEvent::DragStarted { container, row })
    }

    fn on_container_changed(&mut self, old: usize, new: usize) -> ListenerResult {
        self.record(ListenerEvent::ContainerChanged { old, new })
    }

    fn on_drag_ended(
        &mut self,
        from_container: usize,
        from_row: usize,
        to_container: usize,
        to_row: usize,
    ) -> ListenerResult {
        self.record(ListenerEvent::DragEnded {
            from: (from_container, from_row),
            to: (to_container, to_row),
        })
    }

    fn on_item_moved(&mut self, container: usize, from_row: usize, to_row: usize) -> ListenerResult {
        self.record(ListenerEvent::ItemMoved {
            container,
            from: from_row,
            to: to_row,
        })
    }

    fn on_focused_container_changed(&mut self, old: Option<usize>, new: usize) -> ListenerResult {
        self.record(ListenerEvent::FocusChanged { old, new })
    }
}
