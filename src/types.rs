// Core value types shared by every drawing module.
// Pixel space is integer (`Point`), curve/animation space is float (`PointF`).

use std::ops::{Add, Mul, Sub};

/// Pixel color on a 1-bit panel: `true` = ink (black), `false` = paper (white).
pub type Color = bool;

pub const BLACK: Color = true;
pub const WHITE: Color = false;

/// Integer point in pixel space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Float point for bezier curves and animation math.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointF {
    pub x: f64,
    pub y: f64,
}

impl PointF {
    pub const ZERO: PointF = PointF { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Nearest pixel, ties to even on both axes.
    #[inline]
    pub fn to_point(self) -> Point {
        Point::new(round_half_even(self.x), round_half_even(self.y))
    }
}

impl From<(f64, f64)> for PointF {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<Point> for PointF {
    fn from(p: Point) -> Self {
        Self { x: p.x as f64, y: p.y as f64 }
    }
}

impl Add for PointF {
    type Output = PointF;
    fn add(self, o: PointF) -> PointF {
        PointF::new(self.x + o.x, self.y + o.y)
    }
}

impl Sub for PointF {
    type Output = PointF;
    fn sub(self, o: PointF) -> PointF {
        PointF::new(self.x - o.x, self.y - o.y)
    }
}

impl Mul<f64> for PointF {
    type Output = PointF;
    fn mul(self, s: f64) -> PointF {
        PointF::new(self.x * s, self.y * s)
    }
}

/// Round to the nearest integer, halves going to the even neighbour.
/// Every float-to-pixel conversion in the crate goes through here so fixtures stay reproducible.
#[inline]
pub fn round_half_even(v: f64) -> i32 {
    v.round_ties_even() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halves_round_to_even() {
        assert_eq!(round_half_even(0.5), 0);
        assert_eq!(round_half_even(1.5), 2);
        assert_eq!(round_half_even(2.5), 2);
        assert_eq!(round_half_even(-0.5), 0);
        assert_eq!(round_half_even(-1.5), -2);
        assert_eq!(round_half_even(2.4), 2);
        assert_eq!(round_half_even(2.6), 3);
    }

    #[test]
    fn pointf_arithmetic() {
        let a = PointF::new(1.0, 2.0);
        let b = PointF::new(4.0, 6.0);
        assert_eq!(b - a, PointF::new(3.0, 4.0));
        assert_eq!((b - a).length(), 5.0);
        assert_eq!(a + b, PointF::new(5.0, 8.0));
        assert_eq!(a * 2.0, PointF::new(2.0, 4.0));
        assert_eq!(PointF::new(2.5, 3.5).to_point(), Point::new(2, 4));
    }
}
