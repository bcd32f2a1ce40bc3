#![forbid(unsafe_code)]

//! Capabilities a container must provide to take part in drags.
//!
//! A container is split into two capabilities: [`ContainerAdapter`] owns the
//! ordered items and their identities, [`ContainerGeometry`] reports where
//! the container sits on the board and where its children are currently laid
//! out. Any type implementing both is a [`Container`].
//!
//! Coordinate spaces:
//! - **board content**: the board's scrolled content, origin at the first
//!   container. [`ContainerPlacement::origin`] is in this space.
//! - **container local**: the container's visible viewport, origin at its
//!   top-left corner (padding included). [`ChildLayout::bounds`] is in this
//!   space and already reflects the container's own scroll position.

use std::fmt::Debug;
use std::hash::Hash;

use dragboard_core::geometry::{Orientation, Point, Rect, Sides, Size};

/// Data capability of one container.
pub trait ContainerAdapter {
    /// Item payload.
    type Item;
    /// Stable identity of an item, unique across the whole board.
    type Id: Clone + Eq + Hash + Debug;

    fn item_count(&self) -> usize;

    /// Identity of the item at `index`, `None` when out of range.
    fn id_at(&self, index: usize) -> Option<Self::Id>;

    /// Insert `item` at `index` (clamped to `item_count()`).
    fn insert(&mut self, index: usize, item: Self::Item);

    /// Remove and return the item at `index`.
    fn remove_at(&mut self, index: usize) -> Option<Self::Item>;

    /// Move the item at `from` to `to`, shifting the items in between.
    fn move_item(&mut self, from: usize, to: usize);

    /// Hide the visual of the item with this identity (or show everything
    /// again for `None`). The item stays in the sequence.
    fn set_drag_item(&mut self, id: Option<Self::Id>);

    /// Whether identities stay attached to items across mutations.
    fn has_stable_ids(&self) -> bool {
        true
    }

    /// Position of the item with identity `id`.
    fn position_of(&self, id: &Self::Id) -> Option<usize> {
        (0..self.item_count()).find(|&i| self.id_at(i).as_ref() == Some(id))
    }
}

/// Layout strategy of a container's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    /// One child per row (vertical) or column (horizontal).
    Linear,
    /// Children wrap into `spans` lanes.
    Grid { spans: u16 },
    /// Staggered or masonry layouts where lanes are not aligned.
    Staggered,
    /// Anything else.
    Custom,
}

impl LayoutKind {
    /// Whether the drag engine can hit-test this layout.
    #[must_use]
    pub const fn is_supported(self) -> bool {
        matches!(self, Self::Linear | Self::Grid { .. })
    }
}

/// Where a container sits on the board.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContainerPlacement {
    /// Top-left corner in board content coordinates.
    pub origin: Point,
    /// Visible size of the container.
    pub size: Size,
    /// Inner padding; children never scroll under it.
    pub padding: Sides,
}

impl ContainerPlacement {
    #[must_use]
    pub const fn new(origin: Point, size: Size, padding: Sides) -> Self {
        Self {
            origin,
            size,
            padding,
        }
    }

    /// Bounds in board content coordinates.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.origin, self.size)
    }

    /// Visible rectangle in container-local coordinates, inside the padding.
    #[must_use]
    pub fn content_rect(&self) -> Rect {
        Rect::from_origin_size(Point::ZERO, self.size).inset(self.padding)
    }
}

/// One laid-out child of a container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChildLayout {
    /// Adapter index of the item this child displays.
    pub index: usize,
    /// Child bounds in container-local coordinates.
    pub bounds: Rect,
    /// Layout margins around the child.
    pub margins: Sides,
}

impl ChildLayout {
    #[must_use]
    pub const fn new(index: usize, bounds: Rect, margins: Sides) -> Self {
        Self {
            index,
            bounds,
            margins,
        }
    }

    /// Bounds grown by the margins: the child's hit area.
    #[must_use]
    pub fn hit_bounds(&self) -> Rect {
        self.bounds.outset(self.margins)
    }
}

/// Geometry capability of one container.
pub trait ContainerGeometry {
    fn placement(&self) -> ContainerPlacement;

    /// Axis along which the container's children flow and scroll.
    fn orientation(&self) -> Orientation;

    fn layout_kind(&self) -> LayoutKind {
        LayoutKind::Linear
    }

    /// Children currently laid out (visible or partially visible), in layout
    /// order.
    fn children(&self) -> Vec<ChildLayout>;

    /// Scroll the container's content by the given delta. Returns the delta
    /// actually applied along the container's axis (zero at a scroll limit).
    fn scroll_by(&mut self, dx: f32, dy: f32) -> f32;
}

/// A full container: items plus geometry.
pub trait Container: ContainerAdapter + ContainerGeometry {}

impl<T: ContainerAdapter + ContainerGeometry> Container for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_layouts() {
        assert!(LayoutKind::Linear.is_supported());
        assert!(LayoutKind::Grid { spans: 3 }.is_supported());
        assert!(!LayoutKind::Staggered.is_supported());
        assert!(!LayoutKind::Custom.is_supported());
    }

    #[test]
    fn placement_rects() {
        let placement = ContainerPlacement::new(
            Point::new(100.0, 0.0),
            Size::new(200.0, 400.0),
            Sides::all(10.0),
        );
        assert_eq!(placement.bounds(), Rect::new(100.0, 0.0, 200.0, 400.0));
        assert_eq!(placement.content_rect(), Rect::new(10.0, 10.0, 180.0, 380.0));
    }

    #[test]
    fn child_hit_bounds_include_margins() {
        let child = ChildLayout::new(
            0,
            Rect::new(0.0, 10.0, 100.0, 40.0),
            Sides::new(5.0, 0.0, 5.0, 0.0),
        );
        assert_eq!(child.hit_bounds(), Rect::new(0.0, 5.0, 100.0, 50.0));
    }
}
