//! Collision detection and response for discs on a flat rink
//!
//! Stones are circles; walls are one-sided segments. Detection reports the
//! contact normal and penetration depth, response applies an impulse and
//! pushes bodies apart along the normal.

use glam::Vec2;

use super::stone::Stone;
use super::wall::Wall;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Contact normal. For stone pairs it points from the first stone to the
    /// second; for walls it points into the playable side.
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check overlap between two circles.
///
/// Concentric circles have no defined line of centers; they are separated
/// along +x so the pair can still be pulled apart.
pub fn circle_circle_collision(
    center_a: Vec2,
    radius_a: f32,
    center_b: Vec2,
    radius_b: f32,
) -> CollisionResult {
    let delta = center_b - center_a;
    let dist = delta.length();
    let min_dist = radius_a + radius_b;

    if dist >= min_dist {
        return CollisionResult::miss();
    }

    let normal = if dist > 1e-6 { delta / dist } else { Vec2::X };
    CollisionResult {
        hit: true,
        normal,
        penetration: min_dist - dist,
    }
}

/// Check overlap between a circle and a one-sided wall segment.
///
/// Within the segment's span the inward normal is used, so a stone that has
/// crossed the line is still pushed back to the playable side. Past the
/// endpoints the segment behaves as a rounded cap.
pub fn circle_wall_collision(center: Vec2, radius: f32, wall: &Wall) -> CollisionResult {
    let inward = wall.inward_normal();
    if inward == Vec2::ZERO {
        return CollisionResult::miss(); // Degenerate segment
    }

    let (closest, t) = wall.closest_point(center);
    let on_span = t > 0.0 && t < 1.0;

    if on_span {
        let signed = wall.signed_distance(center);
        if signed >= radius {
            return CollisionResult::miss();
        }
        return CollisionResult {
            hit: true,
            normal: inward,
            penetration: radius - signed,
        };
    }

    let offset = center - closest;
    let dist = offset.length();
    if dist >= radius {
        return CollisionResult::miss();
    }
    let normal = if dist > 1e-6 && offset.dot(inward) >= 0.0 {
        offset / dist
    } else {
        inward
    };
    CollisionResult {
        hit: true,
        normal,
        penetration: radius - offset.dot(normal),
    }
}

/// Combined restitution of a stone pair (product of the two)
#[inline]
pub fn combined_elasticity(a: &Stone, b: &Stone) -> f32 {
    a.params.elasticity * b.params.elasticity
}

/// Detect and resolve a collision between two stones.
///
/// Applies the impulse along the line of centers when the stones approach,
/// then separates them in proportion to their inverse masses. Returns
/// whether they were overlapping.
pub fn resolve_stone_pair(a: &mut Stone, b: &mut Stone) -> bool {
    let result = circle_circle_collision(a.position(), a.radius(), b.position(), b.radius());
    if !result.hit {
        return false;
    }

    let n = result.normal;
    let inv_a = a.body.inverse_mass();
    let inv_b = b.body.inverse_mass();
    let inv_sum = inv_a + inv_b;

    let closing = (b.body.velocity - a.body.velocity).dot(n);
    if closing < 0.0 {
        let e = combined_elasticity(a, b);
        let j = -(1.0 + e) * closing / inv_sum;
        a.body.velocity -= n * (j * inv_a);
        b.body.velocity += n * (j * inv_b);
    }

    // Positional correction
    let correction = n * (result.penetration / inv_sum);
    a.body.position -= correction * inv_a;
    b.body.position += correction * inv_b;

    true
}

/// Detect and resolve a collision between a stone and a wall.
///
/// The normal component of velocity is reflected and scaled by the wall's
/// elasticity, the tangential component loses the wall's friction fraction,
/// and the stone is moved back onto the playable side. Returns whether the
/// stone was touching the wall.
pub fn resolve_stone_wall(stone: &mut Stone, wall: &Wall) -> bool {
    let result = circle_wall_collision(stone.position(), stone.radius(), wall);
    if !result.hit {
        return false;
    }

    let n = result.normal;
    let v = stone.body.velocity;
    let vn = v.dot(n);
    if vn < 0.0 {
        let normal_part = n * vn;
        let tangent_part = v - normal_part;
        stone.body.velocity =
            tangent_part * (1.0 - wall.friction) - normal_part * wall.elasticity;
    }

    stone.body.position += n * result.penetration;
    true
}
