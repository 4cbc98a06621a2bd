//! Geometric primitives: Point, Size

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// A position or a translation in logical pixels.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn distance(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Largest of the absolute components (Chebyshev length).
    pub fn max_abs(&self) -> f32 {
        self.x.abs().max(self.y.abs())
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point {
    type Output = Point;

    fn mul(self, rhs: f32) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

/// Extent of a surface, typically the device viewport.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_arithmetic() {
        let a = Point::new(3.0, -4.0);
        let b = Point::new(1.0, 1.0);
        assert_eq!(a + b, Point::new(4.0, -3.0));
        assert_eq!(a - b, Point::new(2.0, -5.0));
        assert_eq!(a * 2.0, Point::new(6.0, -8.0));
        assert_eq!(-a, Point::new(-3.0, 4.0));
        assert_eq!(a.distance(), 5.0);
        assert_eq!(a.max_abs(), 4.0);
    }

    #[test]
    fn non_finite_points_are_detected() {
        assert!(Point::ZERO.is_finite());
        assert!(!Point::new(f32::NAN, 0.0).is_finite());
        assert!(!Point::new(0.0, f32::INFINITY).is_finite());
    }

    #[test]
    fn empty_size() {
        assert!(Size::ZERO.is_empty());
        assert!(!Size::new(390.0, 844.0).is_empty());
    }
}
