//! Spatial primitives
//!
//! The simulation uses canvas-style coordinates: +x right, +y down,
//! angles in radians measured from +x toward +y.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A 2D vector / point
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing at `angle` radians.
    pub fn from_angle(angle: f32) -> Self {
        Self {
            x: angle.cos(),
            y: angle.sin(),
        }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance(&self, other: Self) -> f32 {
        (other - *self).length()
    }

    /// Angle of this vector in radians.
    pub fn angle(&self) -> f32 {
        self.y.atan2(self.x)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Vec2 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, s: f32) -> Self {
        Self {
            x: self.x * s,
            y: self.y * s,
        }
    }
}

/// An axis-aligned rectangle (top-left origin, canvas coordinates)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle spanning two corner points in any order.
    pub fn from_points(a: Vec2, b: Vec2) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self {
            x,
            y,
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    /// Grow the rectangle by `pad` on every side.
    pub fn padded(&self, pad: f32) -> Self {
        Self {
            x: self.x - pad,
            y: self.y - pad,
            width: self.width + 2.0 * pad,
            height: self.height + 2.0 * pad,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Half-open AABB overlap test: touching edges do not count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }

    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }
}

/// A circle (head hitboxes, point queries)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub const fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn contains_point(&self, p: Vec2) -> bool {
        self.center.distance(p) <= self.radius
    }

    /// Circle-vs-rect overlap via closest-point clamping.
    pub fn overlaps_rect(&self, rect: &Rect) -> bool {
        let cx = self.center.x.clamp(rect.x, rect.x + rect.width);
        let cy = self.center.y.clamp(rect.y, rect.y + rect.height);
        self.contains_point(Vec2::new(cx, cy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_overlap_is_half_open() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let touching = Rect::new(10.0, 0.0, 10.0, 10.0);
        let overlapping = Rect::new(9.0, 9.0, 10.0, 10.0);
        let apart = Rect::new(20.0, 20.0, 5.0, 5.0);

        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&overlapping));
        assert!(!a.overlaps(&apart));
    }

    #[test]
    fn rect_from_points_normalizes_order() {
        let r = Rect::from_points(Vec2::new(5.0, 1.0), Vec2::new(1.0, 5.0));
        assert_eq!(r, Rect::new(1.0, 1.0, 4.0, 4.0));
    }

    #[test]
    fn circle_contains_boundary_point() {
        let c = Circle::new(Vec2::new(0.0, 0.0), 2.0);
        assert!(c.contains_point(Vec2::new(2.0, 0.0)));
        assert!(!c.contains_point(Vec2::new(2.1, 0.0)));
    }

    #[test]
    fn circle_rect_overlap() {
        let c = Circle::new(Vec2::new(0.0, 0.0), 2.0);
        assert!(c.overlaps_rect(&Rect::new(1.0, 1.0, 4.0, 4.0)));
        assert!(!c.overlaps_rect(&Rect::new(3.0, 3.0, 4.0, 4.0)));
    }

    #[test]
    fn vec2_from_angle_unit_length() {
        let v = Vec2::from_angle(std::f32::consts::FRAC_PI_3);
        assert!((v.length() - 1.0).abs() < 1e-6);
    }
}
