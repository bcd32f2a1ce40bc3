#![forbid(unsafe_code)]

//! Ghost renderer that records what it was asked to draw.

use dragboard::{GhostRenderer, Point};

/// One call received by a [`RecordingGhost`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GhostCall {
    Show,
    Hide,
    Position(Point),
    Offset(Point),
    Bind { container: usize, row: usize },
}

/// Records ghost calls and keeps the latest state.
#[derive(Debug, Clone, Default)]
pub struct RecordingGhost {
    pub visible: bool,
    pub position: Point,
    pub offset: Point,
    pub bound: Option<(usize, usize)>,
    pub calls: Vec<GhostCall>,
}

impl RecordingGhost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Where the host would draw the ghost's top-left.
    #[must_use]
    pub fn screen_position(&self) -> Point {
        self.offset.add(self.position)
    }

    /// Number of offset changes (one per container switch, plus the first).
    #[must_use]
    pub fn offset_changes(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, GhostCall::Offset(_)))
            .count()
    }
}

impl GhostRenderer for RecordingGhost {
    fn show(&mut self) {
        self.visible = true;
        self.calls.push(GhostCall::Show);
    }

    fn hide(&mut self) {
        self.visible = false;
        self.calls.push(GhostCall::Hide);
    }

    fn set_position(&mut self, position: Point) {
        self.position = position;
        self.calls.push(GhostCall::Position(position));
    }

    fn set_offset(&mut self, offset: Point) {
        self.offset = offset;
        self.calls.push(GhostCall::Offset(offset));
    }

    fn bind_visual(&mut self, container: usize, row: usize) {
        self.bound = Some((container, row));
        self.calls.push(GhostCall::Bind { container, row });
    }
}
