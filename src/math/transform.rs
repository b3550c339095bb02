use serde::{Deserialize, Serialize};

use super::rotation::Rotation;
use super::vec2::Vec2;

/// A rigid body transformation combining position and rotation.
///
/// Represents a coordinate frame in 2D space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Position (translation)
    pub position: Vec2,
    /// Rotation
    pub rotation: Rotation,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// Identity transform (no translation or rotation)
    pub const IDENTITY: Self = Self {
        position: Vec2::ZERO,
        rotation: Rotation::IDENTITY,
    };

    /// Creates a new transform from position and rotation
    #[inline]
    pub const fn new(position: Vec2, rotation: Rotation) -> Self {
        Self { position, rotation }
    }

    /// Creates a transform with only translation
    #[inline]
    pub const fn from_position(position: Vec2) -> Self {
        Self {
            position,
            rotation: Rotation::IDENTITY,
        }
    }

    /// Creates a transform with only rotation
    #[inline]
    pub const fn from_rotation(rotation: Rotation) -> Self {
        Self {
            position: Vec2::ZERO,
            rotation,
        }
    }

    /// Creates a transform from a position and an angle in radians
    #[inline]
    pub fn from_position_angle(position: Vec2, angle: f64) -> Self {
        Self {
            position,
            rotation: Rotation::from_angle(angle),
        }
    }

    /// Transforms a point from local space to world space
    #[inline]
    pub fn transform_point(self, point: Vec2) -> Vec2 {
        self.rotation.rotate(point) + self.position
    }

    /// Transforms a vector (direction) from local space to world space
    /// Unlike points, vectors are not affected by translation
    #[inline]
    pub fn transform_vector(self, vector: Vec2) -> Vec2 {
        self.rotation.rotate(vector)
    }

    /// Inverse transforms a point from world space to local space
    #[inline]
    pub fn inverse_transform_point(self, point: Vec2) -> Vec2 {
        self.rotation.inverse_rotate(point - self.position)
    }

    /// Inverse transforms a vector from world space to local space
    #[inline]
    pub fn inverse_transform_vector(self, vector: Vec2) -> Vec2 {
        self.rotation.inverse_rotate(vector)
    }

    /// Returns the inverse of this transform
    #[inline]
    pub fn inverse(self) -> Self {
        let inv_rotation = self.rotation.inverse();
        let inv_position = inv_rotation.rotate(-self.position);
        Self {
            position: inv_position,
            rotation: inv_rotation,
        }
    }

    /// Combines two transforms: self * other
    /// The result transforms from other's local space through self's frame to world
    #[inline]
    pub fn compose(self, other: Self) -> Self {
        Self {
            position: self.transform_point(other.position),
            rotation: self.rotation * other.rotation,
        }
    }
}
