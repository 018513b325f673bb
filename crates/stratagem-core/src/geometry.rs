//! Plane geometry primitives.

use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// A 2D vector with double precision. All operations return a new value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Dot product; perpendicular vectors yield 0.
    pub fn dot(self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn length(self) -> f64 {
        self.length2().sqrt()
    }

    /// Squared length. Prefer it over [`Self::length`] for comparisons.
    pub fn length2(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Unit vector with the same direction, or zero for the zero vector.
    pub fn norm(self) -> Vec2 {
        let length = self.length();
        if length > 0.0 { Vec2::new(self.x / length, self.y / length) } else { Vec2::ZERO }
    }

    /// The perpendicular vector `(-y, x)`.
    pub fn ortho(self) -> Vec2 {
        Vec2::new(-self.y, self.x)
    }

    pub fn rotate_rad(self, radians: f64) -> Vec2 {
        let (sin, cos) = radians.sin_cos();
        Vec2::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    pub fn rotate_deg(self, degrees: f64) -> Vec2 {
        self.rotate_rad(degrees.to_radians())
    }

    /// Angle to the vector `(1, 0)`, in radians.
    pub fn angle_rad(self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Angle to the vector `(1, 0)`, in degrees.
    pub fn angle_deg(self) -> f64 {
        self.angle_rad().to_degrees()
    }

    /// Componentwise comparison within `tolerance`, for accumulated floating
    /// point error.
    pub fn approx_eq(self, other: Vec2, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, factor: f64) -> Vec2 {
        Vec2::new(self.x * factor, self.y * factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-7;

    #[test]
    fn basic_operations() {
        let vector = Vec2::new(1.0, -1.0);
        assert!((vector + Vec2::new(2.0, 1.0)).approx_eq(Vec2::new(3.0, 0.0), TOLERANCE));
        assert!((-vector).approx_eq(Vec2::new(-1.0, 1.0), TOLERANCE));
        assert!((vector * 2.0).approx_eq(Vec2::new(2.0, -2.0), TOLERANCE));
        assert!((vector - Vec2::new(2.0, 1.0)).approx_eq(Vec2::new(-1.0, -2.0), TOLERANCE));
        assert!((vector.length2() - 2.0).abs() < 1e-4);
        assert!((vector.length() - 2.0_f64.sqrt()).abs() < 1e-4);
        let half_sqrt2 = 2.0_f64.sqrt() / 2.0;
        assert!(vector.norm().approx_eq(Vec2::new(half_sqrt2, -half_sqrt2), TOLERANCE));
        assert!(vector.dot(Vec2::new(5.0, 5.0)).abs() < 1e-4);
        assert!((vector.angle_deg() - -45.0).abs() < 1e-4);
        assert!(vector.rotate_deg(90.0).approx_eq(Vec2::new(1.0, 1.0), TOLERANCE));
        assert!(Vec2::ZERO.norm().approx_eq(Vec2::ZERO, TOLERANCE));
    }

    #[test]
    fn ortho_is_perpendicular() {
        let vector = Vec2::new(3.0, 2.0);
        assert!(vector.dot(vector.ortho()).abs() < TOLERANCE);
    }
}
