//! Collision detection and response for circles against the field geometry
//!
//! Everything that moves is a circle. Static geometry is either a side wall,
//! an axis-aligned box (shields) or a horizontal band (life bar).

use glam::Vec2;

use super::body::Side;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Surface normal at collision (pointing toward the circle center)
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

/// Two circles overlap
#[inline]
pub fn circles_overlap(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> bool {
    let reach = a_radius + b_radius;
    a_pos.distance_squared(b_pos) <= reach * reach
}

/// Circle against an axis-aligned box given by center and half extents
pub fn circle_box_collision(pos: Vec2, radius: f32, center: Vec2, half: Vec2) -> CollisionResult {
    let closest = pos.clamp(center - half, center + half);
    let delta = pos - closest;
    let dist_sq = delta.length_squared();

    if dist_sq > radius * radius {
        return CollisionResult::miss();
    }

    let dist = dist_sq.sqrt();
    let normal = if dist > 1e-6 {
        delta / dist
    } else {
        // Center inside the box: push out along the shallowest axis
        let offset = pos - center;
        let gap = half - offset.abs();
        if gap.x < gap.y {
            Vec2::new(offset.x.signum(), 0.0)
        } else {
            Vec2::new(0.0, offset.y.signum())
        }
    };

    CollisionResult {
        hit: true,
        normal,
        penetration: radius - dist,
    }
}

/// Circle against a full-width horizontal band centred at `y`
pub fn circle_band_collision(pos: Vec2, radius: f32, y: f32, half_height: f32) -> bool {
    (pos.y - y).abs() <= radius + half_height
}

/// Check a circle against the left and right walls of a field `width` wide
pub fn side_wall_collision(pos: Vec2, radius: f32, width: f32) -> Option<(Side, CollisionResult)> {
    if pos.x - radius < 0.0 {
        return Some((
            Side::Left,
            CollisionResult {
                hit: true,
                normal: Side::Left.normal(),
                penetration: radius - pos.x,
            },
        ));
    }
    if pos.x + radius > width {
        return Some((
            Side::Right,
            CollisionResult {
                hit: true,
                normal: Side::Right.normal(),
                penetration: pos.x + radius - width,
            },
        ));
    }
    None
}

/// Reflect velocity off a surface with given normal
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Point lies inside the `width` x `height` frame anchored at the origin
#[inline]
pub fn in_frame(pos: Vec2, width: f32, height: f32) -> bool {
    pos.x >= 0.0 && pos.x <= width && pos.y >= 0.0 && pos.y <= height
}
