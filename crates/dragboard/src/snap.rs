#![forbid(unsafe_code)]

//! Column snapping: which column the board should rest on and where.
//!
//! All offsets are board scroll offsets along the board axis: the content
//! coordinate shown at the viewport's leading edge.

/// Which part of a column aligns with the viewport when the board snaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "snake_case"))]
pub enum ColumnSnapPosition {
    /// Column start on the viewport start.
    Start,
    /// Column center on the viewport center.
    #[default]
    Center,
    /// Column end on the viewport end.
    End,
}

/// A column's span along the board axis, in board content coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSpan {
    pub start: f32,
    pub extent: f32,
}

impl ColumnSpan {
    #[must_use]
    pub const fn new(start: f32, extent: f32) -> Self {
        Self { start, extent }
    }

    #[inline]
    #[must_use]
    pub fn end(&self) -> f32 {
        self.start + self.extent
    }

    #[inline]
    #[must_use]
    pub fn center(&self) -> f32 {
        self.start + self.extent / 2.0
    }
}

/// Largest valid scroll offset for content of `content_extent` shown in a
/// viewport of `viewport_extent`.
#[inline]
#[must_use]
pub fn max_scroll_offset(content_extent: f32, viewport_extent: f32) -> f32 {
    (content_extent - viewport_extent).max(0.0)
}

/// Scroll offset that rests `column` at `position`, clamped to
/// `[0, max_offset]`.
#[must_use]
pub fn settled_offset(
    column: ColumnSpan,
    viewport_extent: f32,
    position: ColumnSnapPosition,
    max_offset: f32,
) -> f32 {
    let raw = match position {
        ColumnSnapPosition::Start => column.start,
        ColumnSnapPosition::Center => column.center() - viewport_extent / 2.0,
        ColumnSnapPosition::End => column.end() - viewport_extent,
    };
    raw.clamp(0.0, max_offset.max(0.0))
}

/// Column whose center is nearest the viewport center. Ties go to the
/// earlier column.
#[must_use]
pub fn closest_column(columns: &[ColumnSpan], scroll_offset: f32, viewport_extent: f32) -> Option<usize> {
    let viewport_center = scroll_offset + viewport_extent / 2.0;
    columns
        .iter()
        .enumerate()
        .map(|(i, c)| (i, (c.center() - viewport_center).abs()))
        .fold(None, |best: Option<(usize, f32)>, (i, d)| match best {
            Some((_, bd)) if bd <= d => best,
            _ => Some((i, d)),
        })
        .map(|(i, _)| i)
}

/// Column a fling should land on.
///
/// `displacement` and `velocity` are pointer motion along the board axis
/// since touch-down; negative values move the content forward. A fling only
/// advances when both agree, so a pointer that changed its mind stays put.
#[must_use]
pub fn fling_target(start_column: usize, displacement: f32, velocity: f32, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let target = if velocity < 0.0 && displacement < 0.0 {
        start_column.saturating_add(1)
    } else if velocity > 0.0 && displacement > 0.0 {
        start_column.saturating_sub(1)
    } else {
        start_column
    };
    target.min(count - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Three 300px columns, viewport 400px wide.
    fn columns() -> Vec<ColumnSpan> {
        (0..3).map(|i| ColumnSpan::new(i as f32 * 300.0, 300.0)).collect()
    }

    #[test]
    fn settled_offsets_per_position() {
        let col = ColumnSpan::new(300.0, 300.0);
        let max = max_scroll_offset(900.0, 400.0);
        assert_eq!(max, 500.0);
        assert_eq!(settled_offset(col, 400.0, ColumnSnapPosition::Start, max), 300.0);
        assert_eq!(settled_offset(col, 400.0, ColumnSnapPosition::Center, max), 250.0);
        assert_eq!(settled_offset(col, 400.0, ColumnSnapPosition::End, max), 200.0);
    }

    #[test]
    fn settled_offset_is_clamped() {
        let first = ColumnSpan::new(0.0, 300.0);
        let last = ColumnSpan::new(600.0, 300.0);
        assert_eq!(settled_offset(first, 400.0, ColumnSnapPosition::Center, 500.0), 0.0);
        assert_eq!(settled_offset(last, 400.0, ColumnSnapPosition::Start, 500.0), 500.0);
        assert_eq!(settled_offset(last, 1000.0, ColumnSnapPosition::Start, -3.0), 0.0);
    }

    #[test]
    fn closest_by_center() {
        let cols = columns();
        assert_eq!(closest_column(&cols, 0.0, 400.0), Some(0));
        assert_eq!(closest_column(&cols, 260.0, 400.0), Some(1));
        assert_eq!(closest_column(&cols, 500.0, 400.0), Some(2));
        assert_eq!(closest_column(&[], 0.0, 400.0), None);
    }

    #[test]
    fn closest_tie_prefers_earlier() {
        let cols = columns();
        // Viewport center at 300: equidistant from columns 0 and 1.
        assert_eq!(closest_column(&cols, 100.0, 400.0), Some(0));
    }

    #[test]
    fn fling_requires_agreeing_direction() {
        assert_eq!(fling_target(1, -40.0, -900.0, 3), 2);
        assert_eq!(fling_target(1, 40.0, 900.0, 3), 0);
        assert_eq!(fling_target(1, 40.0, -900.0, 3), 1);
        assert_eq!(fling_target(1, -40.0, 900.0, 3), 1);
    }

    #[test]
    fn fling_is_clamped() {
        assert_eq!(fling_target(2, -40.0, -900.0, 3), 2);
        assert_eq!(fling_target(0, 40.0, 900.0, 3), 0);
        assert_eq!(fling_target(5, 0.0, 0.0, 0), 0);
    }
}
