#![forbid(unsafe_code)]

//! `Vec`-backed container with a fixed-extent linear layout.
//!
//! Items are laid out back to back along the container's orientation, each
//! `item_extent` long plus its margins, starting inside the padding. Only
//! children overlapping the visible content area are reported, like a
//! recycling list view would.

use std::fmt::Debug;
use std::hash::Hash;

use dragboard::{
    ChildLayout, ContainerAdapter, ContainerGeometry, ContainerPlacement, LayoutKind, Orientation,
    Point, Rect, Sides, Size,
};

/// In-memory container.
#[derive(Debug, Clone)]
pub struct VecContainer<T, I> {
    items: Vec<T>,
    id_of: fn(&T) -> I,
    placement: ContainerPlacement,
    orientation: Orientation,
    item_extent: f32,
    margins: Sides,
    scroll: f32,
    hidden: Option<I>,
    stable_ids: bool,
    layout_kind: LayoutKind,
    moves: Vec<(usize, usize)>,
}

impl VecContainer<&'static str, &'static str> {
    /// Vertical column of string labels, each label its own identity.
    #[must_use]
    pub fn labels(labels: &[&'static str]) -> Self {
        Self::new(labels.to_vec(), |s| *s)
    }
}

impl<T, I: Clone + Eq + Hash + Debug> VecContainer<T, I> {
    /// Vertical container at the origin, 100x400, 40px items, no padding.
    #[must_use]
    pub fn new(items: Vec<T>, id_of: fn(&T) -> I) -> Self {
        Self {
            items,
            id_of,
            placement: ContainerPlacement::new(Point::ZERO, Size::new(100.0, 400.0), Sides::ZERO),
            orientation: Orientation::Vertical,
            item_extent: 40.0,
            margins: Sides::ZERO,
            scroll: 0.0,
            hidden: None,
            stable_ids: true,
            layout_kind: LayoutKind::Linear,
            moves: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_placement(mut self, origin: Point, size: Size) -> Self {
        self.placement.origin = origin;
        self.placement.size = size;
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding: Sides) -> Self {
        self.placement.padding = padding;
        self
    }

    #[must_use]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    #[must_use]
    pub fn with_item_extent(mut self, extent: f32) -> Self {
        self.item_extent = extent;
        self
    }

    #[must_use]
    pub fn with_margins(mut self, margins: Sides) -> Self {
        self.margins = margins;
        self
    }

    #[must_use]
    pub fn with_stable_ids(mut self, stable: bool) -> Self {
        self.stable_ids = stable;
        self
    }

    #[must_use]
    pub fn with_layout(mut self, kind: LayoutKind) -> Self {
        self.layout_kind = kind;
        self
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Identities in order.
    #[must_use]
    pub fn ids(&self) -> Vec<I> {
        self.items.iter().map(self.id_of).collect()
    }

    /// Identity currently hidden for a drag.
    #[must_use]
    pub fn hidden(&self) -> Option<&I> {
        self.hidden.as_ref()
    }

    /// Every `move_item(from, to)` call received.
    #[must_use]
    pub fn moves(&self) -> &[(usize, usize)] {
        &self.moves
    }

    #[must_use]
    pub const fn scroll_offset(&self) -> f32 {
        self.scroll
    }

    /// Main-axis distance from one item's start to the next.
    fn pitch(&self) -> f32 {
        self.item_extent + self.margins.start(self.orientation) + self.margins.end(self.orientation)
    }

    fn max_scroll(&self) -> f32 {
        let content = self.placement.content_rect();
        let visible = self.orientation.extent(content.size());
        (self.items.len() as f32 * self.pitch() - visible).max(0.0)
    }
}

impl<T, I: Clone + Eq + Hash + Debug> ContainerAdapter for VecContainer<T, I> {
    type Item = T;
    type Id = I;

    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn id_at(&self, index: usize) -> Option<I> {
        self.items.get(index).map(self.id_of)
    }

    fn insert(&mut self, index: usize, item: T) {
        let index = index.min(self.items.len());
        self.items.insert(index, item);
    }

    fn remove_at(&mut self, index: usize) -> Option<T> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    fn move_item(&mut self, from: usize, to: usize) {
        self.moves.push((from, to));
        if from < self.items.len() && to < self.items.len() {
            let item = self.items.remove(from);
            self.items.insert(to, item);
        }
    }

    fn set_drag_item(&mut self, id: Option<I>) {
        self.hidden = id;
    }

    fn has_stable_ids(&self) -> bool {
        self.stable_ids
    }
}

impl<T, I: Clone + Eq + Hash + Debug> ContainerGeometry for VecContainer<T, I> {
    fn placement(&self) -> ContainerPlacement {
        self.placement
    }

    fn orientation(&self) -> Orientation {
        self.orientation
    }

    fn layout_kind(&self) -> LayoutKind {
        self.layout_kind
    }

    fn children(&self) -> Vec<ChildLayout> {
        let axis = self.orientation;
        let content = self.placement.content_rect();
        let (view_start, view_end) = (content.start(axis), content.end(axis));
        let cross_start = content.start(axis.cross());
        let cross_extent = axis.cross().extent(content.size());
        let pitch = self.pitch();
        let lead = self.margins.start(axis);

        (0..self.items.len())
            .filter_map(|i| {
                let start = view_start + i as f32 * pitch + lead - self.scroll;
                let end = start + self.item_extent;
                if end < view_start || start > view_end {
                    return None;
                }
                let origin = axis.point(start, cross_start);
                let size = match axis {
                    Orientation::Vertical => Size::new(cross_extent, self.item_extent),
                    Orientation::Horizontal => Size::new(self.item_extent, cross_extent),
                };
                Some(ChildLayout::new(
                    i,
                    Rect::from_origin_size(origin, size),
                    self.margins,
                ))
            })
            .collect()
    }

    fn scroll_by(&mut self, dx: f32, dy: f32) -> f32 {
        let delta = match self.orientation {
            Orientation::Horizontal => dx,
            Orientation::Vertical => dy,
        };
        let next = (self.scroll + delta).clamp(0.0, self.max_scroll());
        let applied = next - self.scroll;
        self.scroll = next;
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_reports_visible_children_only() {
        let column = VecContainer::labels(&["A", "B", "C", "D", "E"])
            .with_placement(Point::ZERO, Size::new(100.0, 100.0));
        let children = column.children();
        assert_eq!(
            children.iter().map(|c| c.index).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        assert_eq!(children[1].bounds, Rect::new(0.0, 40.0, 100.0, 40.0));
    }

    #[test]
    fn scrolling_is_clamped() {
        let mut column = VecContainer::labels(&["A", "B", "C", "D", "E"])
            .with_placement(Point::ZERO, Size::new(100.0, 100.0));
        assert_eq!(column.scroll_by(0.0, 500.0), 100.0);
        assert_eq!(column.scroll_by(0.0, -30.0), -30.0);
        assert_eq!(column.scroll_offset(), 70.0);
        assert_eq!(column.children()[0].index, 1);
    }

    #[test]
    fn moves_are_recorded() {
        let mut column = VecContainer::labels(&["A", "B", "C"]);
        column.move_item(0, 2);
        assert_eq!(column.ids(), vec!["B", "C", "A"]);
        assert_eq!(column.moves(), &[(0, 2)]);
    }

    #[test]
    fn padding_and_margins_shift_layout() {
        let column = VecContainer::labels(&["A", "B"])
            .with_padding(Sides::all(10.0))
            .with_margins(Sides::new(5.0, 0.0, 5.0, 0.0));
        let children = column.children();
        assert_eq!(children[0].bounds, Rect::new(10.0, 15.0, 80.0, 40.0));
        assert_eq!(children[1].bounds.top(), 65.0);
    }
}
