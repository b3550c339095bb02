use serde::Serialize;

use crate::error::ShapeError;
use crate::math::Vec2;

/// A ray with an origin and a unit-length direction.
///
/// Directions are normalized at construction so that hit distances are
/// in world units regardless of the caller-supplied direction length.
/// `Deserialize` is deliberately not derived: it would bypass the
/// normalization invariant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ray {
    /// Start point of the ray
    pub origin: Vec2,
    /// Unit-length direction
    pub direction: Vec2,
}

impl Ray {
    /// Creates a ray from an origin and a direction.
    ///
    /// The direction need not be unit length; it is normalized here.
    /// Fails with [`ShapeError::ZeroDirection`] for a zero direction.
    pub fn new(origin: Vec2, direction: Vec2) -> Result<Self, ShapeError> {
        match direction.try_normalize() {
            Some(direction) => Ok(Self { origin, direction }),
            None => Err(ShapeError::ZeroDirection),
        }
    }

    /// Creates a ray from an origin and an angle in radians
    pub fn from_angle(origin: Vec2, angle: f64) -> Self {
        Self {
            origin,
            direction: Vec2::from_angle(angle),
        }
    }

    /// Returns the point at parametric distance `t` along the ray
    #[inline]
    pub fn point_at(&self, t: f64) -> Vec2 {
        self.origin + self.direction * t
    }
}

/// A single ray-shape intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// World-space hit point
    pub point: Vec2,
    /// Outward surface normal at the hit point (unit length).
    /// For entry hits this faces back toward the ray origin side.
    pub normal: Vec2,
    /// Distance from the ray origin along the direction (>= 0)
    pub distance: f64,
}
