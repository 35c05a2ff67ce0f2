use crate::math::Vec2;

use super::shape::{Rect, Shape};

/// An axis-aligned bounding box defined by minimum and maximum points.
///
/// Used for broad-phase queries. `min` is the top-left corner in screen
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner (smallest x and y)
    pub min: Vec2,
    /// Maximum corner (largest x and y)
    pub max: Vec2,
}

impl Aabb {
    /// Creates an AABB from minimum and maximum points
    #[inline]
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Creates an AABB covering a rect
    #[inline]
    pub fn from_rect(rect: &Rect) -> Self {
        Self::new(
            Vec2::new(rect.x0(), rect.y0()),
            Vec2::new(rect.x1(), rect.y1()),
        )
    }

    /// Returns the center of the AABB
    #[inline]
    pub fn center(self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Returns the full size of the AABB
    #[inline]
    pub fn size(self) -> Vec2 {
        self.max - self.min
    }

    #[inline]
    pub fn width(self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(self) -> f64 {
        self.max.y - self.min.y
    }

    /// Returns true if the point lies inside or on the edge of the AABB
    #[inline]
    pub fn contains_point(self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Returns true if the boxes overlap or share an edge
    #[inline]
    pub fn intersects(self, other: Self) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// Returns a new AABB that is the union of this and another AABB
    #[inline]
    pub fn union(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Returns the box swept by moving this one by `delta`.
    ///
    /// Only the sides facing the direction of motion are extended.
    #[inline]
    pub fn swept(self, delta: Vec2) -> Self {
        self.union(Self::new(self.min + delta, self.max + delta))
    }

    /// Converts the box into a rect shape
    #[inline]
    pub fn to_rect(self) -> Rect {
        Rect::new(self.center(), self.width(), self.height())
    }

    /// Converts the box into a rect [`Shape`]
    #[inline]
    pub fn to_shape(self) -> Shape {
        Shape::Rect(self.to_rect())
    }
}
