mod aabb;
mod shape;

pub use aabb::Aabb;
pub use shape::{Circle, Dimensions, Rect, Shape, ShapeType, DEFAULT_RADIUS, DEFAULT_RECT_SIZE};
