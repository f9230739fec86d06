//! Plane geometry shared by every collision test
//!
//! Everything here works on world-space `Vec2`. Hit tests are plain
//! radius checks or point-to-segment distances; no broadphase is needed at
//! the entity counts a wave produces.

use glam::Vec2;

/// Distance from `p` to the closed segment `a`-`b`
///
/// Projects `p` onto the segment and clamps the projection parameter to
/// [0, 1]. A degenerate segment collapses to the distance to `a`.
pub fn point_segment_distance(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let seg = b - a;
    let len_sq = seg.length_squared();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(seg) / len_sq).clamp(0.0, 1.0);
    p.distance(a + seg * t)
}

/// Inclusive radius test
#[inline]
pub fn within_radius(p: Vec2, center: Vec2, radius: f32) -> bool {
    p.distance(center) <= radius
}

/// Unit vector pointing from `from` to `to`, zero when they coincide
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}

/// Heading of a vector in radians
#[inline]
pub fn heading(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}

/// Unit vector for a heading
#[inline]
pub fn unit(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Clamp a point into the rectangle `[0, size]`
#[inline]
pub fn clamp_to_bounds(p: Vec2, size: Vec2) -> Vec2 {
    p.clamp(Vec2::ZERO, size)
}
