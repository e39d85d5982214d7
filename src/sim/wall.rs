//! Static boundary segments
//!
//! Walls are one-sided: the playable side is to the left when walking from
//! `start` to `end`. The rink rectangle is wound counter-clockwise so every
//! wall faces inward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub start: Vec2,
    pub end: Vec2,
    /// Fraction of normal speed kept on bounce
    pub elasticity: f32,
    /// Fraction of tangential speed removed on bounce
    pub friction: f32,
}

impl Wall {
    pub fn new(start: Vec2, end: Vec2, elasticity: f32, friction: f32) -> Self {
        Self {
            start,
            end,
            elasticity,
            friction,
        }
    }

    /// The four walls enclosing a `width` x `height` rink with its corner at
    /// the origin. Perfectly elastic and frictionless.
    pub fn rink(width: f32, height: f32) -> [Wall; 4] {
        let bottom_left = Vec2::ZERO;
        let bottom_right = Vec2::new(width, 0.0);
        let top_right = Vec2::new(width, height);
        let top_left = Vec2::new(0.0, height);
        [
            Wall::new(bottom_left, bottom_right, 1.0, 0.0),
            Wall::new(top_right, top_left, 1.0, 0.0),
            Wall::new(top_left, bottom_left, 1.0, 0.0),
            Wall::new(bottom_right, top_right, 1.0, 0.0),
        ]
    }

    #[inline]
    pub fn direction(&self) -> Vec2 {
        self.end - self.start
    }

    /// Unit normal pointing into the playable side
    pub fn inward_normal(&self) -> Vec2 {
        self.direction().perp().normalize_or_zero()
    }

    /// Closest point on the segment and its parameter in [0, 1]
    pub fn closest_point(&self, p: Vec2) -> (Vec2, f32) {
        let seg = self.direction();
        let len_sq = seg.length_squared();
        if len_sq < 1e-12 {
            return (self.start, 0.0);
        }
        let t = ((p - self.start).dot(seg) / len_sq).clamp(0.0, 1.0);
        (self.start + seg * t, t)
    }

    /// Signed distance from `p` to the wall's line, positive on the playable side
    pub fn signed_distance(&self, p: Vec2) -> f32 {
        (p - self.start).dot(self.inward_normal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rink_walls_face_inward() {
        let center = Vec2::new(50.0, 15.0);
        for wall in Wall::rink(100.0, 30.0) {
            assert!(wall.signed_distance(center) > 0.0);
            assert!((wall.inward_normal().length() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_signed_distance_to_bottom_wall() {
        let [bottom, ..] = Wall::rink(100.0, 30.0);
        assert_eq!(bottom.inward_normal(), Vec2::Y);
        assert_eq!(bottom.signed_distance(Vec2::new(20.0, 2.0)), 2.0);
        assert_eq!(bottom.signed_distance(Vec2::new(20.0, -1.5)), -1.5);
    }

    #[test]
    fn test_closest_point_clamps_to_segment() {
        let wall = Wall::new(Vec2::ZERO, Vec2::new(10.0, 0.0), 1.0, 0.0);
        let (p, t) = wall.closest_point(Vec2::new(15.0, 3.0));
        assert_eq!(p, Vec2::new(10.0, 0.0));
        assert_eq!(t, 1.0);
        let (p, t) = wall.closest_point(Vec2::new(4.0, -2.0));
        assert_eq!(p, Vec2::new(4.0, 0.0));
        assert!((t - 0.4).abs() < 1e-6);
    }
}
