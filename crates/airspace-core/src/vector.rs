//! 3D vector math used by every other module.
//!
//! Coordinates are local metres (positions) or metres per second (velocities).
//! All functions are pure and never panic on degenerate input.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

/// Ordered (x, y, z) triple.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const ZERO: Vector3 = Vector3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Vector3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    pub fn length(self) -> f64 {
        length(self)
    }

    pub fn normalize(self) -> Vector3 {
        normalize(self)
    }

    pub fn clamp_length(self, max: f64) -> Vector3 {
        clamp_length(self, max)
    }
}

pub fn add(a: Vector3, b: Vector3) -> Vector3 {
    Vector3::new(a.x + b.x, a.y + b.y, a.z + b.z)
}

pub fn sub(a: Vector3, b: Vector3) -> Vector3 {
    Vector3::new(a.x - b.x, a.y - b.y, a.z - b.z)
}

pub fn scale(v: Vector3, s: f64) -> Vector3 {
    Vector3::new(v.x * s, v.y * s, v.z * s)
}

/// Euclidean norm.
pub fn length(v: Vector3) -> f64 {
    v.x.hypot(v.y).hypot(v.z)
}

/// Unit vector in the direction of `v`, or the zero vector when `v` has no length.
pub fn normalize(v: Vector3) -> Vector3 {
    let len = length(v);
    if len == 0.0 {
        return Vector3::ZERO;
    }
    scale(v, 1.0 / len)
}

/// Returns `v` unchanged when `|v| <= max`, otherwise `v` rescaled to exactly `max`.
pub fn clamp_length(v: Vector3, max: f64) -> Vector3 {
    if length(v) <= max {
        return v;
    }
    scale(normalize(v), max)
}

impl Add for Vector3 {
    type Output = Vector3;

    fn add(self, rhs: Vector3) -> Vector3 {
        add(self, rhs)
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    fn sub(self, rhs: Vector3) -> Vector3 {
        sub(self, rhs)
    }
}

impl Mul<f64> for Vector3 {
    type Output = Vector3;

    fn mul(self, rhs: f64) -> Vector3 {
        scale(self, rhs)
    }
}

impl Neg for Vector3 {
    type Output = Vector3;

    fn neg(self) -> Vector3 {
        scale(self, -1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_is_euclidean() {
        assert!((length(Vector3::new(3.0, 4.0, 12.0)) - 13.0).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_zero_vector_returns_zero() {
        let n = normalize(Vector3::ZERO);
        assert_eq!(n, Vector3::ZERO);
        assert!(n.x.is_finite() && n.y.is_finite() && n.z.is_finite());
    }

    #[test]
    fn test_normalize_produces_unit_length() {
        let n = normalize(Vector3::new(10.0, -5.0, 2.0));
        assert!((n.length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_clamp_length_keeps_short_vectors() {
        let v = Vector3::new(1.0, 2.0, 2.0);
        assert_eq!(clamp_length(v, 3.0), v);
        assert_eq!(clamp_length(v, 10.0), v);
    }

    #[test]
    fn test_clamp_length_scales_long_vectors_to_max() {
        let v = Vector3::new(30.0, 40.0, 0.0);
        let clamped = clamp_length(v, 10.0);
        assert!((clamped.length() - 10.0).abs() < 1e-9);
        assert!((clamped.x - 6.0).abs() < 1e-9);
        assert!((clamped.y - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_operators_match_free_functions() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(-4.0, 0.5, 2.0);
        assert_eq!(a + b, add(a, b));
        assert_eq!(a - b, sub(a, b));
        assert_eq!(a * 2.5, scale(a, 2.5));
        assert_eq!(-a, Vector3::new(-1.0, -2.0, -3.0));
    }
}
