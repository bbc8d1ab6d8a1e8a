//! Circle-circle collision and play field bounds

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Collision radii for every entity kind
///
/// Derived from sprite sizes and render scales, see
/// [`Settings::hitboxes`](crate::Settings::hitboxes).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hitboxes {
    pub player: f32,
    /// Enemy radius when touching the player
    pub enemy_body: f32,
    /// Enemy radius when hit by a bullet
    pub enemy_hurt: f32,
    pub bullet: f32,
}

/// True when two circles touch or overlap
#[inline]
pub fn circles_overlap(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> bool {
    let reach = radius_a + radius_b;
    a.distance_squared(b) <= reach * reach
}

/// True when `pos` is on or beyond any edge of a field spanning `(0, 0)..field`
#[inline]
pub fn outside_field(pos: Vec2, field: Vec2) -> bool {
    pos.x <= 0.0 || pos.y <= 0.0 || pos.x >= field.x || pos.y >= field.y
}
