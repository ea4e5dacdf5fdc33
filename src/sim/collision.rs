//! Trail vs melon collision
//!
//! A melon is cut when any segment of the pointer trail passes closer to its
//! centre than its radius.

use glam::Vec2;

use super::entity::Projectile;
use super::trail::Trail;
use crate::distance_sq;

/// Segments shorter than this are treated as a single point
const DEGENERATE_LEN_SQ: f32 = 0.0;

/// Closest point to `p` on the segment `a`-`b`
pub fn closest_point_on_segment(p: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let seg = b - a;
    let len_sq = seg.length_squared();

    if len_sq <= DEGENERATE_LEN_SQ {
        return a;
    }

    let t = ((p - a).dot(seg) / len_sq).clamp(0.0, 1.0);
    a + seg * t
}

/// Euclidean distance from `p` to the segment `a`-`b`
#[inline]
pub fn point_segment_distance(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    distance_sq(p, closest_point_on_segment(p, a, b)).sqrt()
}

/// True on the first segment that passes strictly within `radius` of `center`
pub fn circle_hits_segments(
    center: Vec2,
    radius: f32,
    segments: impl IntoIterator<Item = (Vec2, Vec2)>,
) -> bool {
    segments
        .into_iter()
        .any(|(a, b)| point_segment_distance(center, a, b) < radius)
}

/// Check whether the trail cuts through a melon.
///
/// Sliced melons and trails without a full segment never hit.
pub fn projectile_hits_trail(projectile: &Projectile, trail: &Trail) -> bool {
    if projectile.sliced || !trail.can_slice() {
        return false;
    }
    circle_hits_segments(projectile.body.pos, projectile.radius, trail.segments())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::Body;

    fn melon_at(x: f32, y: f32) -> Projectile {
        Projectile::new(1, Body::new(Vec2::new(x, y), Vec2::ZERO, 0.0, 0.0), 40.0)
    }

    fn trail_of(points: &[(f32, f32)]) -> Trail {
        let mut trail = Trail::new(20, 100.0);
        let mut iter = points.iter();
        if let Some(&(x, y)) = iter.next() {
            trail.begin(Vec2::new(x, y));
        }
        for &(x, y) in iter {
            trail.extend(Vec2::new(x, y));
        }
        trail
    }

    #[test]
    fn test_point_segment_distance_projection() {
        let d = point_segment_distance(Vec2::new(5.0, 3.0), Vec2::ZERO, Vec2::new(10.0, 0.0));
        assert!((d - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_point_segment_distance_clamps_to_endpoints() {
        // Beyond the end: distance to endpoint b
        let d = point_segment_distance(Vec2::new(13.0, 4.0), Vec2::ZERO, Vec2::new(10.0, 0.0));
        assert!((d - 5.0).abs() < 1e-5);
        // Before the start: distance to endpoint a
        let d = point_segment_distance(Vec2::new(-3.0, -4.0), Vec2::ZERO, Vec2::new(10.0, 0.0));
        assert!((d - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_degenerate_segment_uses_point_distance() {
        let a = Vec2::new(2.0, 2.0);
        let d = point_segment_distance(Vec2::new(5.0, 6.0), a, a);
        assert!((d - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_trail_through_center_hits() {
        let melon = melon_at(100.0, 100.0);
        assert!(projectile_hits_trail(&melon, &trail_of(&[(0.0, 100.0), (200.0, 100.0)])));
        // Offset by less than the radius still hits
        assert!(projectile_hits_trail(&melon, &trail_of(&[(0.0, 139.0), (200.0, 139.0)])));
        assert!(projectile_hits_trail(&melon, &trail_of(&[(61.0, 0.0), (61.0, 200.0)])));
    }

    #[test]
    fn test_distant_trail_misses() {
        let melon = melon_at(100.0, 100.0);
        assert!(!projectile_hits_trail(&melon, &trail_of(&[(0.0, 0.0), (0.0, 200.0)])));
        // Exactly at the radius is not a hit
        assert!(!projectile_hits_trail(&melon, &trail_of(&[(0.0, 140.0), (200.0, 140.0)])));
    }

    #[test]
    fn test_later_segment_hits() {
        let melon = melon_at(100.0, 100.0);
        let trail = trail_of(&[(0.0, 0.0), (0.0, 200.0), (100.0, 200.0), (100.0, 120.0)]);
        assert!(projectile_hits_trail(&melon, &trail));
    }

    #[test]
    fn test_single_point_trail_never_hits() {
        let melon = melon_at(100.0, 100.0);
        assert!(!projectile_hits_trail(&melon, &trail_of(&[(100.0, 100.0)])));
    }

    #[test]
    fn test_sliced_melon_never_hits() {
        let mut melon = melon_at(100.0, 100.0);
        melon.sliced = true;
        assert!(!projectile_hits_trail(&melon, &trail_of(&[(0.0, 100.0), (200.0, 100.0)])));
    }
}
