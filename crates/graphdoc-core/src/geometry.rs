//! Geometric primitives for canvas positions.
//!
//! Graph nodes and annotations carry a position on the visual-programming
//! canvas. Positions take part in documentation only through proximity
//! queries: a floating annotation is associated with the nearest node by
//! Euclidean distance.
//!
//! The coordinate system is the host tool's canvas: origin at the top-left,
//! X increasing rightward, Y increasing downward.

/// A 2D point representing a position on the graph canvas.
///
/// # Examples
///
/// ```
/// # use graphdoc_core::geometry::Point;
/// let a = Point::new(0.0, 0.0);
/// let b = Point::new(3.0, 4.0);
/// assert_eq!(a.distance(b), 5.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }

    /// Returns the Euclidean distance between this point and another.
    pub fn distance(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Checks whether this point lies within `offset` of another.
    pub fn is_within(self, other: Point, offset: f64) -> bool {
        self.distance(other) < offset
    }
}
