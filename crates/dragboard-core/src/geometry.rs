#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! All coordinates are logical pixels as `f32`, origin at top-left. Rectangles
//! use inclusive edges for hit testing because drag targets are expected to
//! respond on their boundary pixel.

/// Layout axis of a container or of the board itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Orientation {
    /// Children flow left to right.
    Horizontal,
    /// Children flow top to bottom.
    #[default]
    Vertical,
}

impl Orientation {
    /// The perpendicular orientation.
    #[must_use]
    pub const fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }

    /// Component of `point` along this axis.
    #[inline]
    #[must_use]
    pub const fn main(self, point: Point) -> f32 {
        match self {
            Self::Horizontal => point.x,
            Self::Vertical => point.y,
        }
    }

    /// Component of `size` along this axis.
    #[inline]
    #[must_use]
    pub const fn extent(self, size: Size) -> f32 {
        match self {
            Self::Horizontal => size.width,
            Self::Vertical => size.height,
        }
    }

    /// Build a point whose component along this axis is `main` and whose
    /// other component is `cross`.
    #[inline]
    #[must_use]
    pub const fn point(self, main: f32, cross: f32) -> Point {
        match self {
            Self::Horizontal => Point::new(main, cross),
            Self::Vertical => Point::new(cross, main),
        }
    }
}

/// A 2-D point or vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Component-wise translation.
    #[inline]
    #[must_use]
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Component-wise difference `self - other`.
    #[inline]
    #[must_use]
    pub fn sub(self, other: Point) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    /// Component-wise sum.
    #[inline]
    #[must_use]
    pub fn add(self, other: Point) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    /// Linear interpolation towards `to` by `t` (unclamped).
    #[inline]
    #[must_use]
    pub fn lerp(self, to: Point, t: f32) -> Self {
        Self::new(self.x + (to.x - self.x) * t, self.y + (to.y - self.y) * t)
    }

    /// Euclidean distance.
    #[must_use]
    pub fn distance(self, other: Point) -> f32 {
        let d = self.sub(other);
        (d.x * d.x + d.y * d.y).sqrt()
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle for layout bounds and hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from an origin and size.
    #[inline]
    pub const fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    #[inline]
    pub const fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub const fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Center point.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Leading edge along `axis` (left or top).
    #[inline]
    pub fn start(&self, axis: Orientation) -> f32 {
        match axis {
            Orientation::Horizontal => self.left(),
            Orientation::Vertical => self.top(),
        }
    }

    /// Trailing edge along `axis` (right or bottom).
    #[inline]
    pub fn end(&self, axis: Orientation) -> f32 {
        match axis {
            Orientation::Horizontal => self.right(),
            Orientation::Vertical => self.bottom(),
        }
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Check if a point lies inside the rectangle, edges included.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.right()
            && point.y >= self.y
            && point.y <= self.bottom()
    }

    /// Check if a coordinate lies inside the rectangle's span along `axis`,
    /// edges included.
    #[inline]
    pub fn contains_along(&self, axis: Orientation, coordinate: f32) -> bool {
        coordinate >= self.start(axis) && coordinate <= self.end(axis)
    }

    /// Grow the rectangle outward by `sides`.
    pub fn outset(&self, sides: Sides) -> Rect {
        Rect {
            x: self.x - sides.left,
            y: self.y - sides.top,
            width: self.width + sides.horizontal_sum(),
            height: self.height + sides.vertical_sum(),
        }
    }

    /// Shrink the rectangle inward by `sides`, never below zero size.
    pub fn inset(&self, sides: Sides) -> Rect {
        Rect {
            x: self.x + sides.left,
            y: self.y + sides.top,
            width: (self.width - sides.horizontal_sum()).max(0.0),
            height: (self.height - sides.vertical_sum()).max(0.0),
        }
    }

    /// Translate by a vector.
    #[inline]
    pub fn translate(&self, by: Point) -> Rect {
        Rect::new(self.x + by.x, self.y + by.y, self.width, self.height)
    }
}

/// Per-side insets for padding and margins.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sides {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Sides {
    pub const ZERO: Self = Self::all(0.0);

    /// Create new sides with equal values.
    pub const fn all(val: f32) -> Self {
        Self {
            top: val,
            right: val,
            bottom: val,
            left: val,
        }
    }

    /// Create new sides with specific values.
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Sum of left and right.
    #[inline]
    pub fn horizontal_sum(&self) -> f32 {
        self.left + self.right
    }

    /// Sum of top and bottom.
    #[inline]
    pub fn vertical_sum(&self) -> f32 {
        self.top + self.bottom
    }

    /// Leading inset along `axis`.
    #[inline]
    pub const fn start(&self, axis: Orientation) -> f32 {
        match axis {
            Orientation::Horizontal => self.left,
            Orientation::Vertical => self.top,
        }
    }

    /// Trailing inset along `axis`.
    #[inline]
    pub const fn end(&self, axis: Orientation) -> f32 {
        match axis {
            Orientation::Horizontal => self.right,
            Orientation::Vertical => self.bottom,
        }
    }
}

impl From<f32> for Sides {
    fn from(val: f32) -> Self {
        Self::all(val)
    }
}

impl From<(f32, f32)> for Sides {
    fn from((vertical, horizontal): (f32, f32)) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }
}
