//! Planar geometry primitives shared by the scorer and the path generator.

use core::ops::{Add, Div, Mul, Sub};

/// A coordinate in workspace units.
///
/// Plain value type: two points with the same coordinates are interchangeable.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit-circle point at `angle` radians scaled by `length`.
    pub fn from_polar(angle: f64, length: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(cos * length, sin * length)
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance(self, other: Self) -> f64 {
        (self - other).length()
    }

    pub fn distance_squared(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Returns true when `other` lies within `radius` (inclusive).
    ///
    /// Compares squared distances so the boundary test is exact for points
    /// that were constructed on integer coordinates.
    pub fn within(self, other: Self, radius: f64) -> bool {
        self.distance_squared(other) <= radius * radius
    }

    /// Like [`Point::within`] but excludes the boundary.
    pub fn strictly_within(self, other: Self, radius: f64) -> bool {
        self.distance_squared(other) < radius * radius
    }

    /// Linear interpolation: `t = 0` yields `self`, `t = 1` yields `other`.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    pub fn midpoint(self, other: Self) -> Self {
        (self + other) / 2.0
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Point {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn within_is_inclusive_on_the_boundary() {
        let a = Point::new(0.0, 0.0);
        assert!(a.within(Point::new(3.0, 4.0), 5.0));
        assert!(!a.within(Point::new(3.0, 4.1), 5.0));
    }

    #[test]
    fn strictly_within_excludes_the_boundary() {
        let a = Point::new(0.0, 0.0);
        assert!(!a.strictly_within(Point::new(3.0, 4.0), 5.0));
        assert!(a.strictly_within(Point::new(3.0, 3.9), 5.0));
    }

    #[test]
    fn lerp_hits_both_endpoints() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(5.0, -2.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Point::new(3.0, 0.0));
        assert_eq!(a.midpoint(b), Point::new(3.0, 0.0));
    }

    #[test]
    fn polar_length_matches_radius() {
        let p = Point::from_polar(1.234, 7.5);
        assert!((p.length() - 7.5).abs() < 1e-12);
    }
}
