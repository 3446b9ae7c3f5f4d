//! Interpolation primitives
//!
//! All functions are unclamped: `t` outside `[0, 1]` extrapolates along the
//! same rule. Use [`lerp_clamped`] where overshoot is unwanted.

use std::f32::consts::{PI, TAU};

use crate::value::{Vec2, Vec3};

/// Linear interpolation, unclamped
#[inline]
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// Linear interpolation with `t` clamped to `[0, 1]`
#[inline]
pub fn lerp_clamped(from: f32, to: f32, t: f32) -> f32 {
    lerp(from, to, t.clamp(0.0, 1.0))
}

/// Inverse of [`lerp`]: the `t` at which `value` lies between `a` and `b`
///
/// Returns `0.0` for a degenerate range (`a == b`).
#[inline]
pub fn inverse_lerp_unclamped(a: f32, b: f32, value: f32) -> f32 {
    if a == b {
        return 0.0;
    }
    (value - a) / (b - a)
}

/// Shortest signed difference `to - from` wrapped into `(-π, π]`
pub fn delta_angle(from: f32, to: f32) -> f32 {
    let delta = (to - from).rem_euclid(TAU);
    if delta > PI {
        delta - TAU
    } else {
        delta
    }
}

/// Interpolate between two angles (radians) along the shortest arc
///
/// Not clamped: `t > 1` keeps rotating past `to`.
#[inline]
pub fn lerp_angle(from: f32, to: f32, t: f32) -> f32 {
    from + delta_angle(from, to) * t
}

/// Spherical 2D interpolation: shortest-arc angle lerp plus magnitude lerp
///
/// A zero-length endpoint takes the direction of the other endpoint so the
/// blend does not swing through an arbitrary angle.
pub fn slerp_vec2(from: Vec2, to: Vec2, t: f32) -> Vec2 {
    let from_len = from.length();
    let to_len = to.length();

    let from_angle = if from_len > 0.0 { from.angle() } else { to.angle() };
    let to_angle = if to_len > 0.0 { to.angle() } else { from_angle };

    let angle = lerp_angle(from_angle, to_angle, t);
    let magnitude = lerp(from_len, to_len, t);
    Vec2::from_angle(angle) * magnitude
}

/// Spherical 3D interpolation: rotate the direction along the great arc and
/// lerp the magnitude
///
/// Falls back to component-wise lerp when the directions are (anti)parallel
/// or either endpoint has zero length.
pub fn slerp_vec3(from: Vec3, to: Vec3, t: f32) -> Vec3 {
    let from_len = from.length();
    let to_len = to.length();
    if from_len == 0.0 || to_len == 0.0 {
        return Vec3::lerp(from, to, t);
    }

    let a = from / from_len;
    let b = to / to_len;
    let cos = a.dot(b).clamp(-1.0, 1.0);
    let theta = cos.acos();
    let sin = theta.sin();
    if sin.abs() < 1e-6 {
        return Vec3::lerp(from, to, t);
    }

    let wa = ((1.0 - t) * theta).sin() / sin;
    let wb = (t * theta).sin() / sin;
    (a * wa + b * wb) * lerp(from_len, to_len, t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_lerp_unclamped() {
        assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
        assert_eq!(lerp(0.0, 10.0, 1.5), 15.0);
        assert_eq!(lerp(0.0, 10.0, -0.5), -5.0);
        assert_eq!(lerp_clamped(0.0, 10.0, 1.5), 10.0);
    }

    #[test]
    fn test_inverse_lerp_degenerate_range() {
        for a in [-3.0, 0.0, 7.5] {
            for v in [-100.0, 0.0, 3.0, 1e6] {
                assert_eq!(inverse_lerp_unclamped(a, a, v), 0.0);
            }
        }
        assert_eq!(inverse_lerp_unclamped(0.0, 10.0, 15.0), 1.5);
    }

    #[test]
    fn test_delta_angle_wraps() {
        let d = delta_angle(350f32.to_radians(), 10f32.to_radians());
        assert!(approx(d, 20f32.to_radians()));

        let d = delta_angle(10f32.to_radians(), 350f32.to_radians());
        assert!(approx(d, -20f32.to_radians()));

        // Exactly half a turn resolves to +π
        assert!(approx(delta_angle(0.0, PI), PI));
    }

    #[test]
    fn test_lerp_angle_shortest_path() {
        let mid = lerp_angle(350f32.to_radians(), 10f32.to_radians(), 0.5);
        // 360° is the same heading as 0°
        assert!(approx(mid.rem_euclid(TAU).min(TAU - mid.rem_euclid(TAU)), 0.0));
        assert!(approx(mid, 360f32.to_radians()));
    }

    #[test]
    fn test_lerp_angle_continues_past_end() {
        let a = lerp_angle(0.0, 10f32.to_radians(), 2.0);
        assert!(approx(a, 20f32.to_radians()));
    }

    #[test]
    fn test_slerp_vec2_arcs() {
        let a = Vec2::new(1.0, 0.0);
        let b = Vec2::new(0.0, 1.0);
        let mid = slerp_vec2(a, b, 0.5);
        // Stays on the unit circle rather than cutting the corner
        assert!(approx(mid.length(), 1.0));
        assert!(approx(mid.x, mid.y));

        let naive = Vec2::lerp(a, b, 0.5);
        assert!(naive.length() < 0.75);
    }

    #[test]
    fn test_slerp_vec2_lerps_magnitude() {
        let mid = slerp_vec2(Vec2::new(2.0, 0.0), Vec2::new(0.0, 4.0), 0.5);
        assert!(approx(mid.length(), 3.0));
    }

    #[test]
    fn test_slerp_vec3_arcs() {
        let mid = slerp_vec3(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0), 0.5);
        assert!(approx(mid.length(), 1.0));
        assert!(approx(mid.x, mid.z));
        assert!(approx(mid.y, 0.0));
    }
}
