use serde::{Deserialize, Serialize};
use std::ops::Mul;

use super::vec2::Vec2;

/// A 2D rotation stored as a unit complex number (cos, sin).
///
/// Avoids repeated trigonometric evaluation when rotating many points by
/// the same angle, and composes by complex multiplication.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rotation {
    /// Cosine of the rotation angle
    pub cos: f64,
    /// Sine of the rotation angle
    pub sin: f64,
}

impl Default for Rotation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Rotation {
    /// Identity rotation (angle = 0)
    pub const IDENTITY: Self = Self { cos: 1.0, sin: 0.0 };

    /// Creates a rotation from an angle in radians
    #[inline]
    pub fn from_angle(angle: f64) -> Self {
        Self {
            cos: angle.cos(),
            sin: angle.sin(),
        }
    }

    /// Creates a rotation from raw cosine/sine components.
    /// The pair must be unit length for the rotation to be rigid.
    #[inline]
    pub const fn from_cos_sin(cos: f64, sin: f64) -> Self {
        Self { cos, sin }
    }

    /// Returns the rotation angle in radians in (-PI, PI]
    #[inline]
    pub fn angle(self) -> f64 {
        self.sin.atan2(self.cos)
    }

    /// Rotates a vector by this rotation
    #[inline]
    pub fn rotate(self, v: Vec2) -> Vec2 {
        Vec2::new(
            self.cos * v.x - self.sin * v.y,
            self.sin * v.x + self.cos * v.y,
        )
    }

    /// Rotates a vector by the inverse of this rotation
    #[inline]
    pub fn inverse_rotate(self, v: Vec2) -> Vec2 {
        Vec2::new(
            self.cos * v.x + self.sin * v.y,
            -self.sin * v.x + self.cos * v.y,
        )
    }

    /// Returns the inverse rotation
    #[inline]
    pub fn inverse(self) -> Self {
        Self {
            cos: self.cos,
            sin: -self.sin,
        }
    }

    /// Returns the local X axis in world space
    #[inline]
    pub fn local_x(self) -> Vec2 {
        Vec2::new(self.cos, self.sin)
    }

    /// Returns the local Y axis in world space
    #[inline]
    pub fn local_y(self) -> Vec2 {
        Vec2::new(-self.sin, self.cos)
    }

    /// Renormalizes the (cos, sin) pair.
    /// Counters drift accumulated from repeated incremental composition.
    #[inline]
    pub fn renormalize(self) -> Self {
        let mag = (self.cos * self.cos + self.sin * self.sin).sqrt();
        if mag > 1e-20 {
            Self {
                cos: self.cos / mag,
                sin: self.sin / mag,
            }
        } else {
            Self::IDENTITY
        }
    }
}

impl Mul for Rotation {
    type Output = Self;

    /// Composes two rotations (complex multiplication)
    #[inline]
    fn mul(self, other: Self) -> Self {
        Self {
            cos: self.cos * other.cos - self.sin * other.sin,
            sin: self.sin * other.cos + self.cos * other.sin,
        }
    }
}
