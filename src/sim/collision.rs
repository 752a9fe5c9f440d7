//! Collision detection and response for the ground
//!
//! The ground under the player is linearized into the single segment between
//! the two surrounding tile boundaries. A circle is tested against that
//! segment only; nothing past the segment ends is considered.

use glam::Vec2;

use super::vector::{normalized, upward_perp};
use crate::consts::CONTACT_BIAS;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Closest point on the segment
    pub point: Vec2,
    /// Surface normal at collision (pointing toward circle center)
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

/// Closest point to `p` on the segment `a..b`
///
/// The projection parameter is clamped to the segment, so points beyond either
/// end snap to that endpoint.
pub fn closest_point_on_segment(p: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let along = b - a;
    let Ok(tangent) = normalized(along) else {
        // Zero-length segment is just a point
        return a;
    };
    let t = (p - a).dot(tangent).clamp(0.0, along.length());
    a + tangent * t
}

/// Check a circle of radius `reach` centered at `center` against segment `a..b`
pub fn circle_segment_collision(center: Vec2, reach: f32, a: Vec2, b: Vec2) -> CollisionResult {
    let point = closest_point_on_segment(center, a, b);
    let to_center = center - point;
    let penetration = reach - to_center.length();

    if penetration <= 0.0 {
        return CollisionResult::miss();
    }

    let normal = match normalized(to_center) {
        Ok(n) => n,
        // Center sits exactly on the segment: push out upward
        Err(_) => normalized(b - a).map(upward_perp).unwrap_or(Vec2::NEG_Y),
    };

    CollisionResult {
        hit: true,
        point,
        normal,
        penetration,
    }
}

/// Push a body out of the surface and cancel its velocity along the normal
///
/// Upward-facing contacts get a small extra push so a body resting on near-flat
/// ground separates cleanly instead of re-colliding every tick. The whole normal
/// component of velocity is removed, in either direction, which pins a
/// touching body to the surface; tangential velocity is untouched.
pub fn resolve_contact(pos: &mut Vec2, vel: &mut Vec2, contact: &CollisionResult) {
    if !contact.hit {
        return;
    }

    let mut depth = contact.penetration;
    if contact.normal.y < 0.0 {
        depth += CONTACT_BIAS;
    }
    *pos += contact.normal * depth;

    *vel -= contact.normal * vel.dot(contact.normal);
}
