//! Geometry value types for screen, tile, and cell positions.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

/// A 2D position in pixels or tile indices.
///
/// Coordinates are signed: camera math and clip math both produce positions
/// left of or above the origin before they are fixed up.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Pod, Zeroable,
)]
#[repr(C)]
pub struct Point {
    /// X coordinate
    pub x: i32,
    /// Y coordinate
    pub y: i32,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The origin point (0, 0).
    pub const ZERO: Self = Self::new(0, 0);

    /// Wraps this point toroidally into `[0, extent)` on each axis.
    ///
    /// Used both for tile lookups outside the map and for anchor positions
    /// carried across the map seam.
    #[must_use]
    pub const fn wrapped(self, extent: Extent) -> Self {
        Self {
            x: self.x.rem_euclid(extent.w),
            y: self.y.rem_euclid(extent.h),
        }
    }

    /// Manhattan distance to another point.
    #[must_use]
    pub const fn manhattan_distance(self, other: Self) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Converts to a row-major linear index for a grid of the given extent.
    ///
    /// The point must already lie inside the extent.
    #[must_use]
    pub const fn to_index(self, extent: Extent) -> usize {
        (self.y as usize) * (extent.w as usize) + (self.x as usize)
    }
}

impl Add for Point {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Point {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl Mul<i32> for Point {
    type Output = Self;
    fn mul(self, rhs: i32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

/// A 2D size in pixels, tiles, or cells.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Pod, Zeroable,
)]
#[repr(C)]
pub struct Extent {
    /// Width
    pub w: i32,
    /// Height
    pub h: i32,
}

impl Extent {
    /// Creates a new extent.
    #[must_use]
    pub const fn new(w: i32, h: i32) -> Self {
        Self { w, h }
    }

    /// Total number of elements covered (`w * h`).
    #[must_use]
    pub const fn area(self) -> usize {
        (self.w as usize) * (self.h as usize)
    }

    /// True when either axis is zero or negative.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Scales both axes by a zoom factor, truncating toward zero.
    #[must_use]
    pub fn scaled(self, zoom: f32) -> Self {
        Self::new((self.w as f32 * zoom) as i32, (self.h as f32 * zoom) as i32)
    }
}

impl Mul for Extent {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self::new(self.w * rhs.w, self.h * rhs.h)
    }
}

impl Div for Extent {
    type Output = Self;
    fn div(self, rhs: Self) -> Self {
        Self::new(self.w / rhs.w, self.h / rhs.h)
    }
}

impl Mul<Extent> for Point {
    type Output = Point;
    fn mul(self, rhs: Extent) -> Point {
        Point::new(self.x * rhs.w, self.y * rhs.h)
    }
}

/// An axis-aligned rectangle spanning `min` to `max` inclusive.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub min: Point,
    /// Bottom-right corner (inclusive)
    pub max: Point,
}

impl Rect {
    /// Creates a rectangle from two corners.
    #[must_use]
    pub const fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Creates a rectangle from an origin and an extent.
    #[must_use]
    pub const fn from_origin(origin: Point, extent: Extent) -> Self {
        Self {
            min: origin,
            max: Point::new(origin.x + extent.w, origin.y + extent.h),
        }
    }

    /// Size of the rectangle.
    #[must_use]
    pub const fn size(self) -> Extent {
        Extent::new(
            (self.max.x - self.min.x).abs(),
            (self.max.y - self.min.y).abs(),
        )
    }

    /// Center point of the rectangle.
    #[must_use]
    pub const fn center(self) -> Point {
        Point::new(
            self.min.x + (self.max.x - self.min.x) / 2,
            self.min.y + (self.max.y - self.min.y) / 2,
        )
    }

    /// True when the point lies inside the rectangle (inclusive bounds).
    #[must_use]
    pub const fn contains(self, p: Point) -> bool {
        p.x >= self.min.x && p.y >= self.min.y && p.x <= self.max.x && p.y <= self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_wrapped_negative() {
        let e = Extent::new(100, 100);
        assert_eq!(Point::new(-1, -1).wrapped(e), Point::new(99, 99));
        assert_eq!(Point::new(-250, 0).wrapped(e), Point::new(50, 0));
    }

    #[test]
    fn test_wrapped_overflow() {
        let e = Extent::new(100, 50);
        assert_eq!(Point::new(100, 50).wrapped(e), Point::ZERO);
        assert_eq!(Point::new(149, 120).wrapped(e), Point::new(49, 20));
    }

    #[test]
    fn test_wrapped_identity_inside() {
        let e = Extent::new(64, 64);
        let p = Point::new(10, 63);
        assert_eq!(p.wrapped(e), p);
    }

    #[test]
    fn test_manhattan_distance() {
        let a = Point::new(3, -4);
        let b = Point::new(-1, 2);
        assert_eq!(a.manhattan_distance(b), 10);
        assert_eq!(b.manhattan_distance(a), 10);
        assert_eq!(a.manhattan_distance(a), 0);
    }

    #[test]
    fn test_to_index_row_major() {
        let e = Extent::new(10, 5);
        assert_eq!(Point::new(0, 0).to_index(e), 0);
        assert_eq!(Point::new(9, 0).to_index(e), 9);
        assert_eq!(Point::new(0, 1).to_index(e), 10);
        assert_eq!(Point::new(9, 4).to_index(e), 49);
    }

    #[test]
    fn test_rect_from_origin() {
        let r = Rect::from_origin(Point::new(5, 5), Extent::new(10, 20));
        assert_eq!(r.max, Point::new(15, 25));
        assert_eq!(r.size(), Extent::new(10, 20));
        assert_eq!(r.center(), Point::new(10, 15));
    }

    #[test]
    fn test_rect_contains() {
        let r = Rect::from_origin(Point::ZERO, Extent::new(10, 10));
        assert!(r.contains(Point::ZERO));
        assert!(r.contains(Point::new(10, 10)));
        assert!(!r.contains(Point::new(11, 10)));
        assert!(!r.contains(Point::new(-1, 0)));
    }

    #[test]
    fn test_extent_scaled() {
        let e = Extent::new(32, 32);
        assert_eq!(e.scaled(2.0), Extent::new(64, 64));
        assert_eq!(e.scaled(0.5), Extent::new(16, 16));
        assert_eq!(e.scaled(0.125), Extent::new(4, 4));
    }

    #[test]
    fn test_point_times_extent() {
        let p = Point::new(3, 4) * Extent::new(16, 16);
        assert_eq!(p, Point::new(48, 64));
    }

    proptest! {
        #[test]
        fn prop_wrapped_always_inside(
            x in -10_000i32..10_000,
            y in -10_000i32..10_000,
            w in 1i32..512,
            h in 1i32..512,
        ) {
            let e = Extent::new(w, h);
            let p = Point::new(x, y).wrapped(e);
            prop_assert!(p.x >= 0 && p.x < w);
            prop_assert!(p.y >= 0 && p.y < h);
            // Wrapping is idempotent.
            prop_assert_eq!(p.wrapped(e), p);
        }
    }
}
