//! Plane geometry helpers for the cursor and target
//!
//! Screen space: origin at the viewport's top-left corner, y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// A circular region
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub const fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Circle inscribed in a bounding box (center of the box, half its width)
    pub fn from_bounds(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            center: Vec2::new(left + width / 2.0, top + height / 2.0),
            radius: width / 2.0,
        }
    }

    /// Strict containment: points on the rim are outside
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        distance(point, self.center) < self.radius
    }
}

/// Axis-aligned rectangle given by its min and max corners (inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Rectangle anchored at `origin` spanning `size`; negative spans collapse to the origin
    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self {
            min: origin,
            max: origin + size.max(Vec2::ZERO),
        }
    }

    /// Extent along each axis
    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Clamp a point into the rectangle
    #[inline]
    pub fn clamp_point(&self, point: Vec2) -> Vec2 {
        // Max first, then min: a degenerate rect pins to `min` like the page does
        point.min(self.max).max(self.min)
    }

    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_distance() {
        assert_eq!(distance(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0)), 5.0);
        assert_eq!(distance(Vec2::new(7.0, 7.0), Vec2::new(7.0, 7.0)), 0.0);
    }

    #[test]
    fn test_circle_rim_is_outside() {
        let circle = Circle::new(Vec2::new(500.0, 400.0), 50.0);
        assert!(circle.contains(Vec2::new(500.0, 400.0)));
        assert!(circle.contains(Vec2::new(549.0, 400.0)));
        assert!(!circle.contains(Vec2::new(550.0, 400.0)));
        assert!(!circle.contains(Vec2::new(560.0, 400.0)));
    }

    #[test]
    fn test_circle_from_bounds() {
        let circle = Circle::from_bounds(450.0, 350.0, 100.0, 100.0);
        assert_eq!(circle.center, Vec2::new(500.0, 400.0));
        assert_eq!(circle.radius, 50.0);
    }

    #[test]
    fn test_clamp_point() {
        let rect = Rect::from_origin_size(Vec2::ZERO, Vec2::new(980.0, 780.0));
        assert_eq!(rect.clamp_point(Vec2::new(-5.0, 900.0)), Vec2::new(0.0, 780.0));
        assert_eq!(rect.clamp_point(Vec2::new(10.0, 20.0)), Vec2::new(10.0, 20.0));
    }

    #[test]
    fn test_degenerate_rect_pins_to_origin() {
        // Viewport narrower than the marker
        let rect = Rect::from_origin_size(Vec2::ZERO, Vec2::new(-10.0, 5.0));
        assert_eq!(rect.max, Vec2::new(0.0, 5.0));
        assert_eq!(rect.clamp_point(Vec2::new(30.0, 3.0)), Vec2::new(0.0, 3.0));
    }

    proptest! {
        #[test]
        fn prop_clamp_stays_inside(
            w in 0.0f32..4000.0,
            h in 0.0f32..4000.0,
            x in -1.0e5f32..1.0e5,
            y in -1.0e5f32..1.0e5,
        ) {
            let rect = Rect::from_origin_size(Vec2::ZERO, Vec2::new(w, h));
            let p = rect.clamp_point(Vec2::new(x, y));
            prop_assert!(rect.contains(p));
        }

        #[test]
        fn prop_contains_matches_distance(
            cx in -1000.0f32..1000.0,
            cy in -1000.0f32..1000.0,
            r in 0.0f32..500.0,
            x in -2000.0f32..2000.0,
            y in -2000.0f32..2000.0,
        ) {
            let circle = Circle::new(Vec2::new(cx, cy), r);
            let p = Vec2::new(x, y);
            prop_assert_eq!(circle.contains(p), distance(p, circle.center) < r);
        }
    }
}
