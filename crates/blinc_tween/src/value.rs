//! Animatable value shapes
//!
//! The engine animates a closed set of shapes: scalars, angles, 2D and 3D
//! vectors, and rotations. Each shape implements [`Animatable`], which
//! decides which [`LerpMode`]s it supports and how to interpolate under each.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::lerp::{lerp, lerp_angle, slerp_vec2, slerp_vec3};

/// Interpolation strategy selector
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LerpMode {
    /// Unclamped component-wise linear interpolation
    #[default]
    Linear,
    /// Treat components as angles (radians) and take the shortest arc
    ShortestAngle,
    /// Interpolate direction along an arc and magnitude linearly
    Slerp,
}

/// The shape of an animated value, used in error reporting
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueShape {
    Scalar,
    Angle,
    Vec2,
    Vec3,
    Rotation,
    /// Sequences animate their own clock rather than a value
    Sequence,
}

impl fmt::Display for ValueShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueShape::Scalar => "scalar",
            ValueShape::Angle => "angle",
            ValueShape::Vec2 => "vec2",
            ValueShape::Vec3 => "vec3",
            ValueShape::Rotation => "rotation",
            ValueShape::Sequence => "sequence",
        };
        f.write_str(name)
    }
}

/// A value the scheduler can tween
pub trait Animatable: Copy + fmt::Debug + 'static {
    const SHAPE: ValueShape;

    /// Whether `mode` is meaningful for this shape
    fn supports(mode: LerpMode) -> bool {
        mode == LerpMode::Linear
    }

    /// Interpolate under a supported mode
    fn interpolate(from: Self, to: Self, t: f32, mode: LerpMode) -> Self;
}

impl Animatable for f32 {
    const SHAPE: ValueShape = ValueShape::Scalar;

    fn supports(mode: LerpMode) -> bool {
        matches!(mode, LerpMode::Linear | LerpMode::ShortestAngle)
    }

    fn interpolate(from: Self, to: Self, t: f32, mode: LerpMode) -> Self {
        match mode {
            LerpMode::ShortestAngle => lerp_angle(from, to, t),
            _ => lerp(from, to, t),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Angle
// ─────────────────────────────────────────────────────────────────────────────

/// An angle in radians
///
/// Linear mode spins through the full numeric range (0 → 4π turns twice);
/// [`LerpMode::ShortestAngle`] takes the shortest arc.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Angle(pub f32);

impl Angle {
    pub const ZERO: Angle = Angle(0.0);

    pub const fn radians(radians: f32) -> Self {
        Self(radians)
    }

    pub fn from_degrees(degrees: f32) -> Self {
        Self(degrees.to_radians())
    }

    pub fn to_degrees(self) -> f32 {
        self.0.to_degrees()
    }
}

impl Animatable for Angle {
    const SHAPE: ValueShape = ValueShape::Angle;

    fn supports(mode: LerpMode) -> bool {
        matches!(mode, LerpMode::Linear | LerpMode::ShortestAngle)
    }

    fn interpolate(from: Self, to: Self, t: f32, mode: LerpMode) -> Self {
        Angle(f32::interpolate(from.0, to.0, t, mode))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Vectors
// ─────────────────────────────────────────────────────────────────────────────

/// 2D vector
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };
    pub const ONE: Vec2 = Vec2 { x: 1.0, y: 1.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing at `radians` from the +x axis
    pub fn from_angle(radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self::new(cos, sin)
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Heading in radians, `(-π, π]`
    pub fn angle(&self) -> f32 {
        self.y.atan2(self.x)
    }

    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 0.0 {
            Self::new(self.x / len, self.y / len)
        } else {
            Self::ZERO
        }
    }

    pub fn lerp(from: Vec2, to: Vec2, t: f32) -> Vec2 {
        Vec2::new(lerp(from.x, to.x, t), lerp(from.y, to.y, t))
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Animatable for Vec2 {
    const SHAPE: ValueShape = ValueShape::Vec2;

    fn supports(_mode: LerpMode) -> bool {
        true
    }

    fn interpolate(from: Self, to: Self, t: f32, mode: LerpMode) -> Self {
        match mode {
            LerpMode::Linear => Vec2::lerp(from, to, t),
            LerpMode::ShortestAngle => Vec2::new(
                lerp_angle(from.x, to.x, t),
                lerp_angle(from.y, to.y, t),
            ),
            LerpMode::Slerp => slerp_vec2(from, to, t),
        }
    }
}

/// 3D vector
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    pub const ONE: Vec3 = Vec3 {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 0.0 {
            *self / len
        } else {
            Self::ZERO
        }
    }

    pub fn dot(&self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn lerp(from: Vec3, to: Vec3, t: f32) -> Vec3 {
        Vec3::new(
            lerp(from.x, to.x, t),
            lerp(from.y, to.y, t),
            lerp(from.z, to.z, t),
        )
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Div<f32> for Vec3 {
    type Output = Vec3;
    fn div(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl Animatable for Vec3 {
    const SHAPE: ValueShape = ValueShape::Vec3;

    fn supports(_mode: LerpMode) -> bool {
        true
    }

    fn interpolate(from: Self, to: Self, t: f32, mode: LerpMode) -> Self {
        match mode {
            LerpMode::Linear => Vec3::lerp(from, to, t),
            LerpMode::ShortestAngle => Vec3::new(
                lerp_angle(from.x, to.x, t),
                lerp_angle(from.y, to.y, t),
                lerp_angle(from.z, to.z, t),
            ),
            LerpMode::Slerp => slerp_vec3(from, to, t),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rotation
// ─────────────────────────────────────────────────────────────────────────────

/// Unit quaternion rotation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    pub const IDENTITY: Quat = Quat {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Rotation of `radians` around `axis` (need not be normalized)
    pub fn from_axis_angle(axis: Vec3, radians: f32) -> Self {
        let axis = axis.normalize();
        let (sin, cos) = (radians * 0.5).sin_cos();
        Self::new(axis.x * sin, axis.y * sin, axis.z * sin, cos)
    }

    pub fn dot(&self, other: Quat) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    pub fn length(&self) -> f32 {
        self.dot(*self).sqrt()
    }

    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 0.0 {
            Self::new(self.x / len, self.y / len, self.z / len, self.w / len)
        } else {
            Self::IDENTITY
        }
    }

    /// Angle between two rotations in radians, `[0, π]`
    pub fn angle_between(&self, other: Quat) -> f32 {
        2.0 * self.dot(other).abs().clamp(0.0, 1.0).acos()
    }

    /// Component-wise lerp, renormalized
    pub fn nlerp(from: Quat, to: Quat, t: f32) -> Quat {
        Quat::new(
            lerp(from.x, to.x, t),
            lerp(from.y, to.y, t),
            lerp(from.z, to.z, t),
            lerp(from.w, to.w, t),
        )
        .normalize()
    }

    /// Spherical interpolation along the shorter arc
    pub fn slerp(from: Quat, to: Quat, t: f32) -> Quat {
        let to = shortest_hemisphere(from, to);
        let cos = from.dot(to).clamp(-1.0, 1.0);
        if cos > 0.9995 {
            return Quat::nlerp(from, to, t);
        }
        let theta = cos.acos();
        let sin = theta.sin();
        let wa = ((1.0 - t) * theta).sin() / sin;
        let wb = (t * theta).sin() / sin;
        Quat::new(
            from.x * wa + to.x * wb,
            from.y * wa + to.y * wb,
            from.z * wa + to.z * wb,
            from.w * wa + to.w * wb,
        )
    }
}

impl Neg for Quat {
    type Output = Quat;
    fn neg(self) -> Quat {
        Quat::new(-self.x, -self.y, -self.z, -self.w)
    }
}

/// `q` and `-q` are the same rotation; pick the one closer to `from`.
fn shortest_hemisphere(from: Quat, to: Quat) -> Quat {
    if from.dot(to) < 0.0 {
        -to
    } else {
        to
    }
}

impl Animatable for Quat {
    const SHAPE: ValueShape = ValueShape::Rotation;

    fn supports(_mode: LerpMode) -> bool {
        true
    }

    fn interpolate(from: Self, to: Self, t: f32, mode: LerpMode) -> Self {
        match mode {
            LerpMode::Linear => Quat::nlerp(from, to, t),
            LerpMode::ShortestAngle => Quat::nlerp(from, shortest_hemisphere(from, to), t),
            LerpMode::Slerp => Quat::slerp(from, to, t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_scalar_modes() {
        assert!(f32::supports(LerpMode::ShortestAngle));
        assert!(!f32::supports(LerpMode::Slerp));
        assert_eq!(f32::interpolate(2.0, 4.0, 0.5, LerpMode::Linear), 3.0);
    }

    #[test]
    fn test_angle_linear_spins_full_range() {
        let spun = Angle::interpolate(Angle::ZERO, Angle(4.0 * PI), 0.5, LerpMode::Linear);
        assert!(approx(spun.0, 2.0 * PI));

        let short = Angle::interpolate(
            Angle::from_degrees(350.0),
            Angle::from_degrees(10.0),
            0.5,
            LerpMode::ShortestAngle,
        );
        assert!(approx(short.to_degrees(), 360.0));
    }

    #[test]
    fn test_vec2_modes_differ() {
        let a = Vec2::new(1.0, 0.0);
        let b = Vec2::new(-1.0, 0.01);
        let linear = Vec2::interpolate(a, b, 0.5, LerpMode::Linear);
        let slerp = Vec2::interpolate(a, b, 0.5, LerpMode::Slerp);
        assert!(linear.length() < 0.1);
        // Arcs through +y instead of collapsing through the origin
        assert!(approx(slerp.length(), 1.0));
        assert!(slerp.y > 0.99);
    }

    #[test]
    fn test_vec3_shortest_angle_per_component() {
        let a = Vec3::new(350f32.to_radians(), 0.0, 0.0);
        let b = Vec3::new(10f32.to_radians(), 0.0, FRAC_PI_2);
        let mid = Vec3::interpolate(a, b, 0.5, LerpMode::ShortestAngle);
        assert!(approx(mid.x, 360f32.to_radians()));
        assert!(approx(mid.z, FRAC_PI_2 / 2.0));
    }

    #[test]
    fn test_quat_slerp_halfway() {
        let from = Quat::IDENTITY;
        let to = Quat::from_axis_angle(Vec3::new(0.0, 0.0, 1.0), FRAC_PI_2);
        let mid = Quat::interpolate(from, to, 0.5, LerpMode::Slerp);
        let expected = Quat::from_axis_angle(Vec3::new(0.0, 0.0, 1.0), FRAC_PI_2 / 2.0);
        assert!(mid.angle_between(expected) < 5e-3);
        assert!(approx(mid.length(), 1.0));
    }

    #[test]
    fn test_quat_shortest_hemisphere() {
        let from = Quat::IDENTITY;
        let to = -Quat::from_axis_angle(Vec3::new(0.0, 1.0, 0.0), 0.2);
        // Linear mode goes the long way through the flipped sign; shortest does not
        let short = Quat::interpolate(from, to, 0.5, LerpMode::ShortestAngle);
        let expected = Quat::from_axis_angle(Vec3::new(0.0, 1.0, 0.0), 0.1);
        assert!(short.angle_between(expected) < 5e-3);
    }
}
