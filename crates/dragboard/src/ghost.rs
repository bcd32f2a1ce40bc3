#![forbid(unsafe_code)]

//! The floating proxy of the dragged item.
//!
//! [`GhostRenderer`] is the host's paint sink. [`DragGhost`] wraps it and
//! keeps the ghost's geometry: `position` is the top-left of the dragged
//! item in the owning container's local coordinates, `offset` is that
//! container's origin on screen. The host draws the visual at
//! `offset + position`.

use dragboard_core::geometry::{Point, Rect};

/// Host-side drawing of the ghost.
pub trait GhostRenderer {
    fn show(&mut self);
    fn hide(&mut self);
    /// Item top-left in the owning container's local coordinates.
    fn set_position(&mut self, position: Point);
    /// Screen origin of the owning container.
    fn set_offset(&mut self, offset: Point);
    /// Render the visual of the item at `row` of `container`.
    fn bind_visual(&mut self, container: usize, row: usize);
}

/// Geometry-tracking wrapper around a [`GhostRenderer`].
#[derive(Debug)]
pub struct DragGhost<R> {
    renderer: R,
    visible: bool,
    position: Point,
    offset: Point,
    grab_offset: Point,
}

impl<R: GhostRenderer> DragGhost<R> {
    #[must_use]
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            visible: false,
            position: Point::ZERO,
            offset: Point::ZERO,
            grab_offset: Point::ZERO,
        }
    }

    /// Pick up the item laid out at `item` under `pointer` (both local).
    ///
    /// With `center_on_pointer` the pointer holds the item's center instead
    /// of the spot it was grabbed at.
    pub fn begin(
        &mut self,
        container: usize,
        row: usize,
        item: Rect,
        pointer: Point,
        offset: Point,
        center_on_pointer: bool,
    ) {
        self.grab_offset = if center_on_pointer {
            Point::new(item.width / 2.0, item.height / 2.0)
        } else {
            pointer.sub(item.origin())
        };
        self.renderer.bind_visual(container, row);
        self.set_offset(offset);
        self.follow(pointer);
        self.visible = true;
        self.renderer.show();
    }

    /// Keep the grab point under `pointer` (local).
    pub fn follow(&mut self, pointer: Point) {
        self.move_to(pointer.sub(self.grab_offset));
    }

    /// Place the item's top-left at `position` (local).
    pub fn move_to(&mut self, position: Point) {
        self.position = position;
        self.renderer.set_position(position);
    }

    pub fn set_offset(&mut self, offset: Point) {
        self.offset = offset;
        self.renderer.set_offset(offset);
    }

    pub fn hide(&mut self) {
        if self.visible {
            self.visible = false;
            self.renderer.hide();
        }
    }

    #[must_use]
    pub const fn position(&self) -> Point {
        self.position
    }

    #[must_use]
    pub const fn offset(&self) -> Point {
        self.offset
    }

    /// Pointer position relative to the item's top-left.
    #[must_use]
    pub const fn grab_offset(&self) -> Point {
        self.grab_offset
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Ghost top-left on screen.
    #[must_use]
    pub fn screen_position(&self) -> Point {
        self.offset.add(self.position)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}
