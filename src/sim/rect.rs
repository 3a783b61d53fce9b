//! Axis-aligned rectangle geometry for board entities
//!
//! Bricks, paddles, and the falling pickups are all rects; balls and pucks
//! are circles. Collision response needs the contact normal and penetration
//! depth so the tick can reflect velocities and push circles back out.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle, stored as center + half extents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub center: Vec2,
    pub half: Vec2,
}

impl Rect {
    pub fn new(center: Vec2, half: Vec2) -> Self {
        Self { center, half }
    }

    /// Build from a top-left corner and full size
    pub fn from_top_left(top_left: Vec2, size: Vec2) -> Self {
        Self {
            center: top_left + size / 2.0,
            half: size / 2.0,
        }
    }

    /// Top-left corner
    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half
    }

    /// Bottom-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half
    }

    /// Whether a point lies inside (inclusive of edges)
    pub fn contains(&self, point: Vec2) -> bool {
        let d = (point - self.center).abs();
        d.x <= self.half.x && d.y <= self.half.y
    }

    /// Closest point on or inside the rect to `point`
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min(), self.max())
    }

    /// Rect-rect overlap test
    pub fn intersects(&self, other: &Rect) -> bool {
        let d = (other.center - self.center).abs();
        let reach = self.half + other.half;
        d.x <= reach.x && d.y <= reach.y
    }
}

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Collision point (if hit)
    pub point: Vec2,
    /// Surface normal at collision (pointing toward the circle center)
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check collision between a circle and a rect
///
/// The normal points from the contact point toward the circle center, so
/// reflecting the velocity off it bounces the circle away from the rect.
pub fn circle_rect_collision(center: Vec2, radius: f32, rect: &Rect) -> CollisionResult {
    if rect.contains(center) {
        // Center inside the rect (tunneling case): push out along the
        // shallowest axis rather than toward an arbitrary closest point.
        let min = rect.min();
        let max = rect.max();
        let exits = [
            (center.x - min.x, Vec2::NEG_X),
            (max.x - center.x, Vec2::X),
            (center.y - min.y, Vec2::NEG_Y),
            (max.y - center.y, Vec2::Y),
        ];
        let (depth, normal) = exits
            .into_iter()
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .unwrap_or((0.0, Vec2::NEG_Y));
        return CollisionResult {
            hit: true,
            point: center,
            normal,
            penetration: depth + radius,
        };
    }

    let closest = rect.closest_point(center);
    let delta = center - closest;
    let dist_sq = delta.length_squared();
    if dist_sq >= radius * radius {
        return CollisionResult::miss();
    }

    let dist = dist_sq.sqrt();
    let normal = if dist > f32::EPSILON {
        delta / dist
    } else {
        Vec2::NEG_Y
    };
    CollisionResult {
        hit: true,
        point: closest,
        normal,
        penetration: radius - dist,
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}
