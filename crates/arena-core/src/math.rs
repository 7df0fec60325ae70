//! Vector helpers for motion and proximity tests.
//!
//! The arena is a ground plane: x and z are the horizontal axes and y is
//! height. Collision only looks at the x/z plane.

use glam::{Vec2, Vec3};

/// Project a world-space vector onto the ground plane.
#[inline]
pub fn planar(v: Vec3) -> Vec2 {
    Vec2::new(v.x, v.z)
}

/// Embed a ground-plane vector in world space with y = 0.
#[inline]
pub fn embed_planar(v: Vec2) -> Vec3 {
    Vec3::new(v.x, 0.0, v.y)
}

/// Distance between two points on the x/z plane, ignoring height.
#[inline]
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    planar(a).distance(planar(b))
}

#[inline]
pub fn planar_distance_squared(a: Vec3, b: Vec3) -> f32 {
    planar(a).distance_squared(planar(b))
}

/// Normalize `v` and embed it, or return `fallback` for zero or non-finite input.
pub fn normalize_planar_or(v: Vec2, fallback: Vec3) -> Vec3 {
    match v.try_normalize() {
        Some(n) => embed_planar(n),
        None => fallback,
    }
}

/// Aim direction from a stick vector with a dead zone.
///
/// Above `threshold` the stick is normalized into a unit ground-plane
/// direction. At or below it the `previous` aim persists, so releasing the
/// stick never divides by a near-zero length.
pub fn dead_zone_aim(axis: Vec2, previous: Vec3, threshold: f32) -> Vec3 {
    if axis.length() > threshold {
        normalize_planar_or(axis, previous)
    } else {
        previous
    }
}

/// Linear interpolation. `t` is not clamped.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    (1.0 - t) * a + t * b
}
