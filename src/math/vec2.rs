use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

use super::utils::round_for_float;

/// A 2D vector with f64 components.
///
/// Used for positions, velocities, forces and contact normals. Screen
/// convention: `+y` points down.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    /// Zero vector (0, 0)
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Unit vector along X axis (1, 0)
    pub const X: Self = Self::new(1.0, 0.0);

    /// Unit vector along Y axis (0, 1)
    pub const Y: Self = Self::new(0.0, 1.0);

    /// Creates a new Vec2 from components
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Creates a Vec2 with both components set to the same value
    #[inline]
    pub const fn splat(v: f64) -> Self {
        Self::new(v, v)
    }

    /// Dot product of two vectors
    #[inline]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Squared length of the vector (avoids sqrt)
    #[inline]
    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    /// Length (magnitude) of the vector
    #[inline]
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Returns true if both components are exactly zero
    #[inline]
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// The vector rotated by 90 degrees
    #[inline]
    pub fn normal(self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// Returns this vector scaled to the given magnitude.
    ///
    /// A zero vector has no direction, so `None` is returned for it.
    #[inline]
    pub fn rescale(self, magnitude: f64) -> Option<Self> {
        let length = self.length();
        if length == 0.0 {
            return None;
        }
        Some(self * (magnitude / length))
    }

    /// Projects this vector onto another vector
    #[inline]
    pub fn project_onto(self, other: Self) -> Self {
        let other_len_sq = other.length_squared();
        if other_len_sq > 0.0 {
            other * (self.dot(other) / other_len_sq)
        } else {
            Self::ZERO
        }
    }

    /// Returns the component of this vector perpendicular to another
    #[inline]
    pub fn reject_from(self, other: Self) -> Self {
        self - self.project_onto(other)
    }

    /// Reflects this vector about the line perpendicular to `normal`.
    ///
    /// `normal` does not need to be unit length.
    #[inline]
    pub fn reflect(self, normal: Self) -> Self {
        self - self.project_onto(normal) * 2.0
    }

    /// Rounds both components with [`round_for_float`]
    #[inline]
    pub fn round_for_float(self) -> Self {
        Self::new(round_for_float(self.x), round_for_float(self.y))
    }

    /// Component-wise minimum
    #[inline]
    pub fn min(self, other: Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y))
    }

    /// Component-wise maximum
    #[inline]
    pub fn max(self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y))
    }

    /// Clamps each component to the range [min, max]
    #[inline]
    pub fn clamp(self, min: Self, max: Self) -> Self {
        self.max(min).min(max)
    }

    /// Returns the distance between two points
    #[inline]
    pub fn distance(self, other: Self) -> f64 {
        (other - self).length()
    }
}

// Operator overloads

impl Add for Vec2 {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl SubAssign for Vec2 {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f64) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }
}

impl Mul<Vec2> for f64 {
    type Output = Vec2;

    #[inline]
    fn mul(self, vec: Vec2) -> Vec2 {
        Vec2::new(self * vec.x, self * vec.y)
    }
}

impl MulAssign<f64> for Vec2 {
    #[inline]
    fn mul_assign(&mut self, scalar: f64) {
        self.x *= scalar;
        self.y *= scalar;
    }
}

impl Div<f64> for Vec2 {
    type Output = Self;

    #[inline]
    fn div(self, scalar: f64) -> Self {
        Self::new(self.x / scalar, self.y / scalar)
    }
}

impl Neg for Vec2 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl From<[f64; 2]> for Vec2 {
    #[inline]
    fn from(arr: [f64; 2]) -> Self {
        Self::new(arr[0], arr[1])
    }
}

impl From<(f64, f64)> for Vec2 {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn vec2_approx_eq(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON
    }

    #[test]
    fn test_dot_and_length() {
        let a = Vec2::new(3.0, 4.0);
        assert_eq!(a.dot(Vec2::new(2.0, 1.0)), 10.0);
        assert_eq!(a.length(), 5.0);
        assert_eq!(a.length_squared(), 25.0);
    }

    #[test]
    fn test_normal_is_perpendicular() {
        let v = Vec2::new(2.0, -7.0);
        assert_eq!(v.normal().dot(v), 0.0);
        assert_eq!(Vec2::X.normal(), Vec2::Y);
    }

    #[test]
    fn test_rescale() {
        let v = Vec2::new(3.0, 4.0).rescale(10.0).unwrap();
        assert!(vec2_approx_eq(v, Vec2::new(6.0, 8.0)));
        assert!(Vec2::ZERO.rescale(1.0).is_none());
    }

    #[test]
    fn test_project_and_reject() {
        let v = Vec2::new(3.0, 4.0);
        assert!(vec2_approx_eq(v.project_onto(Vec2::X * 5.0), Vec2::new(3.0, 0.0)));
        assert!(vec2_approx_eq(v.reject_from(Vec2::X), Vec2::new(0.0, 4.0)));
        assert_eq!(v.project_onto(Vec2::ZERO), Vec2::ZERO);
    }

    #[test]
    fn test_reflect() {
        let v = Vec2::new(1.0, -1.0);
        assert!(vec2_approx_eq(v.reflect(Vec2::Y * 3.0), Vec2::new(1.0, 1.0)));
    }

    #[test]
    fn test_operators() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(4.0, 6.0);

        assert_eq!(a + b, Vec2::new(5.0, 8.0));
        assert_eq!(b - a, Vec2::new(3.0, 4.0));
        assert_eq!(a * 2.0, Vec2::new(2.0, 4.0));
        assert_eq!(2.0 * a, Vec2::new(2.0, 4.0));
        assert_eq!(b / 2.0, Vec2::new(2.0, 3.0));
        assert_eq!(-a, Vec2::new(-1.0, -2.0));
    }

    #[test]
    fn test_round_for_float() {
        let v = Vec2::new(4.99999999, -0.0000001);
        assert_eq!(v.round_for_float(), Vec2::new(5.0, 0.0));
    }
}
