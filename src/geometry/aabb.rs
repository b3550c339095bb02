use serde::{Deserialize, Serialize};

use crate::math::Vec2;

/// An axis-aligned bounding box defined by minimum and maximum points.
///
/// Used for broad-phase collision detection and spatial queries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner (smallest x, y values)
    pub min: Vec2,
    /// Maximum corner (largest x, y values)
    pub max: Vec2,
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Aabb {
    /// An empty AABB that contains no points
    pub const EMPTY: Self = Self {
        min: Vec2::new(f64::INFINITY, f64::INFINITY),
        max: Vec2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
    };

    /// Creates an AABB from minimum and maximum points
    #[inline]
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Creates an AABB from center and half-extents
    #[inline]
    pub fn from_center_half_extents(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Creates an AABB that contains a single point
    #[inline]
    pub fn from_point(point: Vec2) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// Creates an AABB from a set of points
    #[inline]
    pub fn from_points(points: &[Vec2]) -> Self {
        let mut aabb = Self::EMPTY;
        for &point in points {
            aabb = aabb.expand_to_include(point);
        }
        aabb
    }

    /// Returns the center of the AABB
    #[inline]
    pub fn center(self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Returns the half-extents (half the size in each dimension)
    #[inline]
    pub fn half_extents(self) -> Vec2 {
        (self.max - self.min) * 0.5
    }

    /// Returns the full size (extents) of the AABB
    #[inline]
    pub fn size(self) -> Vec2 {
        self.max - self.min
    }

    /// Returns the area of the AABB
    #[inline]
    pub fn area(self) -> f64 {
        let size = self.size();
        size.x * size.y
    }

    /// Returns the perimeter of the AABB
    #[inline]
    pub fn perimeter(self) -> f64 {
        let size = self.size();
        2.0 * (size.x + size.y)
    }

    /// Returns true if this AABB is valid (min <= max in both dimensions)
    #[inline]
    pub fn is_valid(self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y
    }

    /// Returns true if this AABB contains the given point
    #[inline]
    pub fn contains_point(self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Returns true if this AABB fully contains another AABB
    #[inline]
    pub fn contains_aabb(self, other: Self) -> bool {
        self.min.x <= other.min.x
            && self.max.x >= other.max.x
            && self.min.y <= other.min.y
            && self.max.y >= other.max.y
    }

    /// Returns true if this AABB intersects another AABB
    #[inline]
    pub fn intersects(self, other: Self) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// Returns a new AABB that is the union of this and another AABB
    #[inline]
    pub fn union(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Returns a new AABB expanded to include a point
    #[inline]
    pub fn expand_to_include(self, point: Vec2) -> Self {
        Self {
            min: self.min.min(point),
            max: self.max.max(point),
        }
    }

    /// Returns a new AABB expanded by a margin in all directions
    #[inline]
    pub fn expand(self, margin: f64) -> Self {
        let m = Vec2::splat(margin);
        Self {
            min: self.min - m,
            max: self.max + m,
        }
    }

    /// Returns the closest point on the AABB to the given point
    #[inline]
    pub fn closest_point(self, point: Vec2) -> Vec2 {
        point.clamp(self.min, self.max)
    }

    /// Tests intersection with a ray.
    /// Returns Some((t_min, t_max)) if the ray intersects, where t_min and t_max
    /// are the entry and exit distances along the (unit) ray direction.
    #[inline]
    pub fn ray_intersection(self, origin: Vec2, direction: Vec2) -> Option<(f64, f64)> {
        let inv_dir = Vec2::new(1.0 / direction.x, 1.0 / direction.y);

        let t1 = (self.min.x - origin.x) * inv_dir.x;
        let t2 = (self.max.x - origin.x) * inv_dir.x;
        let t3 = (self.min.y - origin.y) * inv_dir.y;
        let t4 = (self.max.y - origin.y) * inv_dir.y;

        let t_min = t1.min(t2).max(t3.min(t4));
        let t_max = t1.max(t2).min(t3.max(t4));

        if t_max >= t_min && t_max >= 0.0 {
            Some((t_min.max(0.0), t_max))
        } else {
            None
        }
    }

    /// Returns the 4 corners of the AABB
    #[inline]
    pub fn corners(self) -> [Vec2; 4] {
        [
            Vec2::new(self.min.x, self.min.y),
            Vec2::new(self.max.x, self.min.y),
            Vec2::new(self.max.x, self.max.y),
            Vec2::new(self.min.x, self.max.y),
        ]
    }
}
