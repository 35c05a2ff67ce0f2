use serde::{Deserialize, Serialize};

use crate::math::utils::round_for_float;
use crate::math::Vec2;

use super::aabb::Aabb;

/// Radius of a circle built with `Circle::default()`
pub const DEFAULT_RADIUS: f64 = 12.0;

/// Side length of a rect built with `Rect::default()`
pub const DEFAULT_RECT_SIZE: f64 = 24.0;

/// Width and height of an area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// The type of collision shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeType {
    Circle,
    Rect,
}

/// A collision shape owned by a body.
///
/// The shape is the only holder of a body's position and extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// A circle defined by its center and radius
    Circle(Circle),
    /// An axis-aligned rectangle defined by its center, width and height
    Rect(Rect),
}

impl Shape {
    /// Creates a circle shape centered at `center`
    #[inline]
    pub fn circle(center: Vec2, radius: f64) -> Self {
        Self::Circle(Circle::new(center, radius))
    }

    /// Creates a rect shape centered at `center`
    #[inline]
    pub fn rect(center: Vec2, width: f64, height: f64) -> Self {
        Self::Rect(Rect::new(center, width, height))
    }

    /// Returns the shape type
    #[inline]
    pub fn shape_type(&self) -> ShapeType {
        match self {
            Shape::Circle(_) => ShapeType::Circle,
            Shape::Rect(_) => ShapeType::Rect,
        }
    }

    /// Center of the shape
    #[inline]
    pub fn center(&self) -> Vec2 {
        match self {
            Shape::Circle(c) => c.center,
            Shape::Rect(r) => r.center,
        }
    }

    /// Moves the shape so that its center is at `position`
    #[inline]
    pub fn move_to(&mut self, position: Vec2) {
        match self {
            Shape::Circle(c) => c.center = position,
            Shape::Rect(r) => r.center = position,
        }
    }

    /// Moves the shape by `delta`
    #[inline]
    pub fn translate(&mut self, delta: Vec2) {
        let center = self.center();
        self.move_to(center + delta);
    }

    /// Full width of the shape's bounds
    #[inline]
    pub fn width(&self) -> f64 {
        match self {
            Shape::Circle(c) => c.radius * 2.0,
            Shape::Rect(r) => r.width,
        }
    }

    /// Full height of the shape's bounds
    #[inline]
    pub fn height(&self) -> f64 {
        match self {
            Shape::Circle(c) => c.radius * 2.0,
            Shape::Rect(r) => r.height,
        }
    }

    /// Left bound
    #[inline]
    pub fn x0(&self) -> f64 {
        self.center().x - self.width() / 2.0
    }

    /// Right bound
    #[inline]
    pub fn x1(&self) -> f64 {
        self.center().x + self.width() / 2.0
    }

    /// Top bound
    #[inline]
    pub fn y0(&self) -> f64 {
        self.center().y - self.height() / 2.0
    }

    /// Bottom bound
    #[inline]
    pub fn y1(&self) -> f64 {
        self.center().y + self.height() / 2.0
    }

    /// Axis-aligned bounds of the shape
    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::new(
            Vec2::new(self.x0(), self.y0()),
            Vec2::new(self.x1(), self.y1()),
        )
    }

    /// Returns true if the interiors of the two shapes overlap.
    ///
    /// Shapes that merely touch do not intersect. Penetration is rounded
    /// before the test, so a contact left a hair inside by float error still
    /// counts as touching.
    #[inline]
    pub fn intersects(&self, other: &Shape) -> bool {
        round_for_float(penetration(self, other)) > 0.0
    }

    /// Returns true if the shapes overlap or touch
    #[inline]
    pub fn intersects_inclusive(&self, other: &Shape) -> bool {
        round_for_float(penetration(self, other)) >= 0.0
    }
}

impl From<Circle> for Shape {
    fn from(circle: Circle) -> Self {
        Shape::Circle(circle)
    }
}

impl From<Rect> for Shape {
    fn from(rect: Rect) -> Self {
        Shape::Rect(rect)
    }
}

/// Signed overlap depth of two shapes: positive when overlapping, zero when
/// touching, negative when apart.
fn penetration(a: &Shape, b: &Shape) -> f64 {
    match (a, b) {
        (Shape::Circle(a), Shape::Circle(b)) => a.radius + b.radius - a.center.distance(b.center),
        (Shape::Circle(c), Shape::Rect(r)) | (Shape::Rect(r), Shape::Circle(c)) => {
            circle_rect_penetration(c, r)
        }
        (Shape::Rect(a), Shape::Rect(b)) => {
            let overlap_x = a.x1().min(b.x1()) - a.x0().max(b.x0());
            let overlap_y = a.y1().min(b.y1()) - a.y0().max(b.y0());
            overlap_x.min(overlap_y)
        }
    }
}

fn circle_rect_penetration(circle: &Circle, rect: &Rect) -> f64 {
    let min = Vec2::new(rect.x0(), rect.y0());
    let max = Vec2::new(rect.x1(), rect.y1());
    let closest = circle.center.clamp(min, max);

    if closest == circle.center {
        // center inside the rect: depth to the nearest edge plus the radius
        let to_edge = (circle.center.x - min.x)
            .min(max.x - circle.center.x)
            .min(circle.center.y - min.y)
            .min(max.y - circle.center.y);
        return circle.radius + to_edge;
    }

    circle.radius - circle.center.distance(closest)
}

/// A circle collision shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f64,
}

impl Default for Circle {
    /// A circle of radius 12 whose bounds start at the origin
    fn default() -> Self {
        Self::new(Vec2::splat(DEFAULT_RADIUS), DEFAULT_RADIUS)
    }
}

impl Circle {
    /// Creates a new circle
    #[inline]
    pub fn new(center: Vec2, radius: f64) -> Self {
        Self { center, radius }
    }

    #[inline]
    pub fn x0(&self) -> f64 {
        self.center.x - self.radius
    }

    #[inline]
    pub fn x1(&self) -> f64 {
        self.center.x + self.radius
    }

    #[inline]
    pub fn y0(&self) -> f64 {
        self.center.y - self.radius
    }

    #[inline]
    pub fn y1(&self) -> f64 {
        self.center.y + self.radius
    }
}

/// An axis-aligned rectangle collision shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub center: Vec2,
    pub width: f64,
    pub height: f64,
}

impl Default for Rect {
    /// A 24x24 rect whose bounds start at the origin
    fn default() -> Self {
        let half = DEFAULT_RECT_SIZE / 2.0;
        Self::new(Vec2::splat(half), DEFAULT_RECT_SIZE, DEFAULT_RECT_SIZE)
    }
}

impl Rect {
    /// Creates a new rect centered at `center`
    #[inline]
    pub fn new(center: Vec2, width: f64, height: f64) -> Self {
        Self {
            center,
            width,
            height,
        }
    }

    /// Creates a rect from its top-left corner and size
    #[inline]
    pub fn from_corner(x0: f64, y0: f64, width: f64, height: f64) -> Self {
        Self::new(
            Vec2::new(x0 + width / 2.0, y0 + height / 2.0),
            width,
            height,
        )
    }

    #[inline]
    pub fn x0(&self) -> f64 {
        self.center.x - self.width / 2.0
    }

    #[inline]
    pub fn x1(&self) -> f64 {
        self.center.x + self.width / 2.0
    }

    #[inline]
    pub fn y0(&self) -> f64 {
        self.center.y - self.height / 2.0
    }

    #[inline]
    pub fn y1(&self) -> f64 {
        self.center.y + self.height / 2.0
    }

    /// Corners in the order top-left, top-right, bottom-right, bottom-left
    #[inline]
    pub fn corners(&self) -> [Vec2; 4] {
        [
            Vec2::new(self.x0(), self.y0()),
            Vec2::new(self.x1(), self.y0()),
            Vec2::new(self.x1(), self.y1()),
            Vec2::new(self.x0(), self.y1()),
        ]
    }

    /// Splits the rect into its four quadrants: top-left, top-right,
    /// bottom-left, bottom-right
    pub fn quadrants(&self) -> [Rect; 4] {
        let (x0, y0) = (self.x0(), self.y0());
        let w = self.width / 2.0;
        let h = self.height / 2.0;
        [
            Rect::from_corner(x0, y0, w, h),
            Rect::from_corner(x0 + w, y0, w, h),
            Rect::from_corner(x0, y0 + h, w, h),
            Rect::from_corner(x0 + w, y0 + h, w, h),
        ]
    }
}
