#![forbid(unsafe_code)]

//! Pointer to child-index mapping inside one container.
//!
//! # Invariants
//!
//! 1. A child's hit area is its bounds grown by its layout margins, edges
//!    inclusive.
//! 2. Overlapping hit areas resolve to the later child (reverse scan).
//! 3. A coordinate at or before the first child's leading edge along the
//!    container axis resolves to the first laid-out child, so fast drags to
//!    the very top still land on index 0 of an unscrolled container.
//! 4. Otherwise a miss yields `None`; callers keep their previous index.

use dragboard_core::geometry::{Orientation, Point};

use crate::container::ChildLayout;

/// Index of the child under `point` (container-local coordinates).
#[must_use]
pub fn child_at(children: &[ChildLayout], point: Point, axis: Orientation) -> Option<usize> {
    let first = children.first()?;
    if axis.main(point) <= first.hit_bounds().start(axis) {
        return Some(first.index);
    }
    children
        .iter()
        .rev()
        .find(|child| child.hit_bounds().contains(point))
        .map(|child| child.index)
}

/// Index at which an item arriving from another container should be
/// inserted, judged along `axis` only.
///
/// Past the last child the item goes after it; in a gap between children it
/// goes before the next one; an empty container takes it at 0.
#[must_use]
pub fn insertion_index(children: &[ChildLayout], coordinate: f32, axis: Orientation) -> usize {
    let Some(first) = children.first() else {
        return 0;
    };
    if coordinate <= first.hit_bounds().start(axis) {
        return first.index;
    }
    if let Some(child) = children
        .iter()
        .rev()
        .find(|child| child.hit_bounds().contains_along(axis, coordinate))
    {
        return child.index;
    }
    children
        .iter()
        .find(|child| child.hit_bounds().start(axis) > coordinate)
        .or(children.last())
        .map_or(0, |child| {
            if child.hit_bounds().start(axis) > coordinate {
                child.index
            } else {
                child.index + 1
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use dragboard_core::geometry::{Rect, Sides};

    /// Four 40px rows with 5px vertical margins, starting at y = 10.
    fn column() -> Vec<ChildLayout> {
        (0..4)
            .map(|i| {
                ChildLayout::new(
                    i,
                    Rect::new(0.0, 15.0 + i as f32 * 50.0, 100.0, 40.0),
                    Sides::new(5.0, 0.0, 5.0, 0.0),
                )
            })
            .collect()
    }

    #[test]
    fn hit_inside_child() {
        let children = column();
        assert_eq!(
            child_at(&children, Point::new(50.0, 80.0), Orientation::Vertical),
            Some(1)
        );
    }

    #[test]
    fn margin_counts_as_hit() {
        let children = column();
        // Row 1 body spans 65..105, margins extend to 60..110.
        assert_eq!(
            child_at(&children, Point::new(50.0, 61.0), Orientation::Vertical),
            Some(1)
        );
    }

    #[test]
    fn overlap_prefers_later_child() {
        let children = column();
        // y = 60 is the bottom margin edge of row 0 and the top margin edge of row 1.
        assert_eq!(
            child_at(&children, Point::new(50.0, 60.0), Orientation::Vertical),
            Some(1)
        );
    }

    #[test]
    fn above_first_clamps_to_first() {
        let children = column();
        assert_eq!(
            child_at(&children, Point::new(50.0, -30.0), Orientation::Vertical),
            Some(0)
        );
        assert_eq!(
            child_at(&children, Point::new(500.0, 2.0), Orientation::Vertical),
            Some(0)
        );
    }

    #[test]
    fn clamp_uses_first_laid_out_child() {
        let children: Vec<_> = column()
            .into_iter()
            .map(|mut c| {
                c.index += 7;
                c
            })
            .collect();
        assert_eq!(
            child_at(&children, Point::new(50.0, 0.0), Orientation::Vertical),
            Some(7)
        );
    }

    #[test]
    fn miss_below_or_beside_is_none() {
        let children = column();
        assert_eq!(
            child_at(&children, Point::new(50.0, 400.0), Orientation::Vertical),
            None
        );
        assert_eq!(
            child_at(&children, Point::new(150.0, 80.0), Orientation::Vertical),
            None
        );
    }

    #[test]
    fn empty_container_has_no_target() {
        assert_eq!(
            child_at(&[], Point::new(0.0, 0.0), Orientation::Vertical),
            None
        );
    }

    #[test]
    fn horizontal_axis() {
        let children: Vec<_> = (0..3)
            .map(|i| {
                ChildLayout::new(
                    i,
                    Rect::new(i as f32 * 60.0 + 10.0, 0.0, 60.0, 80.0),
                    Sides::ZERO,
                )
            })
            .collect();
        assert_eq!(
            child_at(&children, Point::new(100.0, 40.0), Orientation::Horizontal),
            Some(1)
        );
        assert_eq!(
            child_at(&children, Point::new(5.0, 400.0), Orientation::Horizontal),
            Some(0)
        );
    }

    #[test]
    fn insertion_index_rules() {
        let children = column();
        assert_eq!(insertion_index(&[], 100.0, Orientation::Vertical), 0);
        assert_eq!(insertion_index(&children, 0.0, Orientation::Vertical), 0);
        assert_eq!(insertion_index(&children, 120.0, Orientation::Vertical), 2);
        assert_eq!(insertion_index(&children, 900.0, Orientation::Vertical), 4);
    }

    #[test]
    fn insertion_index_in_gap_goes_before_next() {
        let children = vec![
            ChildLayout::new(0, Rect::new(0.0, 0.0, 100.0, 40.0), Sides::ZERO),
            ChildLayout::new(1, Rect::new(0.0, 60.0, 100.0, 40.0), Sides::ZERO),
        ];
        assert_eq!(insertion_index(&children, 50.0, Orientation::Vertical), 1);
    }
}
