use crate::error::ShapeError;
use crate::math::{consts, Transform, Vec2};

use super::aabb::Aabb;
use super::ray::{Ray, RayHit};

/// The kind of collision shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeType {
    Circle,
    Polygon,
    Segment,
}

/// A convex collision shape that can be attached to body fixtures.
///
/// All variants are validated at construction; a `Shape` that exists is
/// guaranteed non-degenerate, so the intersection routines never produce
/// NaN results for well-formed rays.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// A circle defined by local center and radius
    Circle(Circle),
    /// A convex polygon with counter-clockwise winding
    Polygon(Polygon),
    /// A line segment between two local points
    Segment(Segment),
}

impl Shape {
    /// Creates a circle shape centered at the local origin
    pub fn circle(radius: f64) -> Result<Self, ShapeError> {
        Circle::new(radius).map(Self::Circle)
    }

    /// Creates an axis-aligned rectangle shape centered at the local origin
    pub fn rectangle(width: f64, height: f64) -> Result<Self, ShapeError> {
        Polygon::rectangle(width, height).map(Self::Polygon)
    }

    /// Creates a convex polygon shape from counter-clockwise vertices
    pub fn polygon(vertices: Vec<Vec2>) -> Result<Self, ShapeError> {
        Polygon::new(vertices).map(Self::Polygon)
    }

    /// Creates a segment shape between two local points
    pub fn segment(a: Vec2, b: Vec2) -> Result<Self, ShapeError> {
        Segment::new(a, b).map(Self::Segment)
    }

    /// Returns the shape type
    #[inline]
    pub fn shape_type(&self) -> ShapeType {
        match self {
            Shape::Circle(_) => ShapeType::Circle,
            Shape::Polygon(_) => ShapeType::Polygon,
            Shape::Segment(_) => ShapeType::Segment,
        }
    }

    /// Computes the AABB of this shape given a world transform
    #[inline]
    pub fn world_aabb(&self, transform: &Transform) -> Aabb {
        match self {
            Shape::Circle(c) => c.world_aabb(transform),
            Shape::Polygon(p) => p.world_aabb(transform),
            Shape::Segment(s) => s.world_aabb(transform),
        }
    }

    /// Returns the world-space support point: the point on the shape
    /// farthest along the given world-space direction
    #[inline]
    pub fn support(&self, direction: Vec2, transform: &Transform) -> Vec2 {
        let local_dir = transform.inverse_transform_vector(direction);
        let local_support = match self {
            Shape::Circle(c) => c.support(local_dir),
            Shape::Polygon(p) => p.support(local_dir),
            Shape::Segment(s) => s.support(local_dir),
        };
        transform.transform_point(local_support)
    }

    /// Casts a ray against this shape, returning the closest hit within
    /// `max_distance` (`max_distance <= 0` means unbounded).
    #[inline]
    pub fn raycast(&self, ray: &Ray, max_distance: f64, transform: &Transform) -> Option<RayHit> {
        match self {
            Shape::Circle(c) => c.raycast(ray, max_distance, transform),
            Shape::Polygon(p) => p.raycast(ray, max_distance, transform),
            Shape::Segment(s) => s.raycast(ray, max_distance, transform),
        }
    }

    /// Casts a ray against this shape, appending every boundary crossing
    /// within `max_distance` to `out`. Returns true if anything was hit.
    ///
    /// A circle or polygon contributes both its entry and exit crossings;
    /// a segment contributes at most one.
    pub fn raycast_all(
        &self,
        ray: &Ray,
        max_distance: f64,
        transform: &Transform,
        out: &mut Vec<RayHit>,
    ) -> bool {
        match self {
            Shape::Circle(c) => c.raycast_all(ray, max_distance, transform, out),
            Shape::Polygon(p) => p.raycast_all(ray, max_distance, transform, out),
            Shape::Segment(s) => {
                if let Some(hit) = s.raycast(ray, max_distance, transform) {
                    out.push(hit);
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Computes mass data (mass, local center of mass, inertia about the
    /// center of mass) for the given density
    #[inline]
    pub fn mass_data(&self, density: f64) -> MassData {
        match self {
            Shape::Circle(c) => c.mass_data(density),
            Shape::Polygon(p) => p.mass_data(density),
            Shape::Segment(s) => s.mass_data(density),
        }
    }
}

/// Mass data of a shape at a given density.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassData {
    /// Total mass
    pub mass: f64,
    /// Center of mass in shape-local coordinates
    pub center: Vec2,
    /// Rotational inertia about the center of mass
    pub inertia: f64,
}

impl MassData {
    /// Mass data with zero mass (for infinite-mass bodies)
    pub const ZERO: Self = Self {
        mass: 0.0,
        center: Vec2::ZERO,
        inertia: 0.0,
    };
}

fn effective_max(max_distance: f64) -> f64 {
    if max_distance <= 0.0 {
        f64::INFINITY
    } else {
        max_distance
    }
}

/// A circle collision shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    /// Center in shape-local coordinates
    pub center: Vec2,
    /// Radius (> 0)
    pub radius: f64,
}

impl Circle {
    /// Creates a circle centered at the local origin.
    /// Fails with [`ShapeError::InvalidRadius`] if `radius <= 0`.
    pub fn new(radius: f64) -> Result<Self, ShapeError> {
        Self::with_center(Vec2::ZERO, radius)
    }

    /// Creates a circle with a local center offset
    pub fn with_center(center: Vec2, radius: f64) -> Result<Self, ShapeError> {
        if radius > 0.0 && radius.is_finite() {
            Ok(Self { center, radius })
        } else {
            Err(ShapeError::InvalidRadius(radius))
        }
    }

    /// Returns the AABB of this circle given a world transform
    #[inline]
    pub fn world_aabb(&self, transform: &Transform) -> Aabb {
        let center = transform.transform_point(self.center);
        let r = Vec2::splat(self.radius);
        Aabb::new(center - r, center + r)
    }

    /// Returns the local-space support point in the given local direction
    #[inline]
    pub fn support(&self, direction: Vec2) -> Vec2 {
        self.center + direction.normalize() * self.radius
    }

    /// Casts a ray against the circle.
    ///
    /// Solves the line-circle quadratic and returns the smallest
    /// non-negative root within range, so a ray starting inside the
    /// circle reports the exit crossing.
    pub fn raycast(&self, ray: &Ray, max_distance: f64, transform: &Transform) -> Option<RayHit> {
        let max = effective_max(max_distance);
        let (t0, t1) = self.intersection_roots(ray, transform)?;

        let t = if t0 >= 0.0 {
            t0
        } else if t1 >= 0.0 {
            t1
        } else {
            return None;
        };

        if t > max {
            return None;
        }

        Some(self.hit_at(ray, t, transform))
    }

    /// Appends both circle boundary crossings within range to `out`
    pub fn raycast_all(
        &self,
        ray: &Ray,
        max_distance: f64,
        transform: &Transform,
        out: &mut Vec<RayHit>,
    ) -> bool {
        let max = effective_max(max_distance);
        let Some((t0, t1)) = self.intersection_roots(ray, transform) else {
            return false;
        };

        let mut any = false;
        for t in [t0, t1] {
            // A tangent ray has coincident roots; report it once
            if any && t == t0 {
                continue;
            }
            if t >= 0.0 && t <= max {
                out.push(self.hit_at(ray, t, transform));
                any = true;
            }
        }
        any
    }

    /// Solves the quadratic for the two parametric intersection roots,
    /// ordered ascending. None if the line misses the circle.
    fn intersection_roots(&self, ray: &Ray, transform: &Transform) -> Option<(f64, f64)> {
        let center = transform.transform_point(self.center);
        let to_origin = ray.origin - center;

        // Unit direction, so the quadratic coefficient a = 1
        let b = 2.0 * ray.direction.dot(to_origin);
        let c = to_origin.length_squared() - self.radius * self.radius;

        let discriminant = b * b - 4.0 * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_d = discriminant.sqrt();
        Some(((-b - sqrt_d) * 0.5, (-b + sqrt_d) * 0.5))
    }

    fn hit_at(&self, ray: &Ray, t: f64, transform: &Transform) -> RayHit {
        let center = transform.transform_point(self.center);
        let point = ray.point_at(t);
        RayHit {
            point,
            normal: (point - center).normalize(),
            distance: t,
        }
    }

    /// Computes mass data for the given density
    #[inline]
    pub fn mass_data(&self, density: f64) -> MassData {
        let r2 = self.radius * self.radius;
        let mass = density * consts::PI * r2;
        MassData {
            mass,
            center: self.center,
            inertia: 0.5 * mass * r2,
        }
    }
}

/// A convex polygon collision shape.
///
/// Vertices wind counter-clockwise; outward edge normals are precomputed
/// at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Vec2>,
    normals: Vec<Vec2>,
}

impl Polygon {
    /// Creates a convex polygon from counter-clockwise vertices.
    ///
    /// Validation rejects fewer than three vertices, coincident adjacent
    /// vertices, and any reflex or clockwise turn (which also rules out
    /// self-intersection).
    pub fn new(vertices: Vec<Vec2>) -> Result<Self, ShapeError> {
        let n = vertices.len();
        if n < 3 {
            return Err(ShapeError::InvalidVertexCount(n));
        }

        let mut normals = Vec::with_capacity(n);
        for i in 0..n {
            let a = vertices[i];
            let b = vertices[(i + 1) % n];
            let c = vertices[(i + 2) % n];

            let edge = b - a;
            if edge.length_squared() < consts::EPSILON * consts::EPSILON {
                return Err(ShapeError::DegenerateEdge(i));
            }

            // CCW winding and convexity: every consecutive turn is a left turn
            if edge.cross(c - b) <= 0.0 {
                return Err(ShapeError::NonConvexPolygon((i + 1) % n));
            }

            normals.push(edge.perp_right().normalize());
        }

        Ok(Self { vertices, normals })
    }

    /// Creates an axis-aligned rectangle centered at the local origin
    pub fn rectangle(width: f64, height: f64) -> Result<Self, ShapeError> {
        if width <= 0.0 || height <= 0.0 || !width.is_finite() || !height.is_finite() {
            return Err(ShapeError::InvalidDimensions { width, height });
        }
        let hw = width * 0.5;
        let hh = height * 0.5;
        Self::new(vec![
            Vec2::new(-hw, -hh),
            Vec2::new(hw, -hh),
            Vec2::new(hw, hh),
            Vec2::new(-hw, hh),
        ])
    }

    /// Local-space vertices (counter-clockwise)
    #[inline]
    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    /// Local-space outward edge normals; `normals()[i]` belongs to the
    /// edge from `vertices()[i]` to `vertices()[i + 1]`
    #[inline]
    pub fn normals(&self) -> &[Vec2] {
        &self.normals
    }

    /// Returns the AABB of this polygon given a world transform
    pub fn world_aabb(&self, transform: &Transform) -> Aabb {
        let mut aabb = Aabb::EMPTY;
        for &v in &self.vertices {
            aabb = aabb.expand_to_include(transform.transform_point(v));
        }
        aabb
    }

    /// Returns the local-space support point: the vertex farthest along
    /// the given local direction
    pub fn support(&self, direction: Vec2) -> Vec2 {
        let mut best = self.vertices[0];
        let mut best_dot = best.dot(direction);
        for &v in &self.vertices[1..] {
            let d = v.dot(direction);
            if d > best_dot {
                best_dot = d;
                best = v;
            }
        }
        best
    }

    /// Casts a ray against the polygon via half-plane clipping.
    ///
    /// Tracks the parametric entry/exit window across all edge
    /// half-planes; a hit requires `entry <= exit` with `entry >= 0`, so
    /// a ray starting inside the polygon reports no hit.
    pub fn raycast(&self, ray: &Ray, max_distance: f64, transform: &Transform) -> Option<RayHit> {
        let max = effective_max(max_distance);
        let (entry, _exit, entry_edge) = self.clip_ray(ray, transform)?;

        if entry > max {
            return None;
        }

        Some(RayHit {
            point: ray.point_at(entry),
            normal: transform.transform_vector(self.normals[entry_edge]),
            distance: entry,
        })
    }

    /// Appends the polygon's entry and exit crossings within range
    pub fn raycast_all(
        &self,
        ray: &Ray,
        max_distance: f64,
        transform: &Transform,
        out: &mut Vec<RayHit>,
    ) -> bool {
        let max = effective_max(max_distance);
        let Some((entry, exit, entry_edge)) = self.clip_ray(ray, transform) else {
            return false;
        };

        if entry > max {
            return false;
        }

        out.push(RayHit {
            point: ray.point_at(entry),
            normal: transform.transform_vector(self.normals[entry_edge]),
            distance: entry,
        });

        if exit > entry && exit <= max {
            if let Some(exit_edge) = self.edge_at(ray, exit, transform) {
                out.push(RayHit {
                    point: ray.point_at(exit),
                    normal: transform.transform_vector(self.normals[exit_edge]),
                    distance: exit,
                });
            }
        }
        true
    }

    /// Clips the ray against all edge half-planes in local space.
    /// Returns (entry, exit, entry edge index) or None for a miss.
    fn clip_ray(&self, ray: &Ray, transform: &Transform) -> Option<(f64, f64, usize)> {
        let origin = transform.inverse_transform_point(ray.origin);
        let direction = transform.inverse_transform_vector(ray.direction);

        let mut entry = f64::NEG_INFINITY;
        let mut exit = f64::INFINITY;
        let mut entry_edge = 0;

        for (i, (&v, &n)) in self.vertices.iter().zip(&self.normals).enumerate() {
            let denom = n.dot(direction);
            let dist = n.dot(origin - v);

            if denom.abs() < consts::EPSILON {
                // Parallel to this edge: outside its half-plane means no hit
                if dist > 0.0 {
                    return None;
                }
                continue;
            }

            let t = -dist / denom;
            if denom < 0.0 {
                // Entering the half-plane
                if t > entry {
                    entry = t;
                    entry_edge = i;
                }
            } else {
                // Leaving the half-plane
                exit = exit.min(t);
            }

            if entry > exit {
                return None;
            }
        }

        if entry >= 0.0 {
            Some((entry, exit, entry_edge))
        } else {
            None
        }
    }

    /// Finds the edge whose half-plane boundary contains the ray point at `t`
    fn edge_at(&self, ray: &Ray, t: f64, transform: &Transform) -> Option<usize> {
        let p = transform.inverse_transform_point(ray.point_at(t));
        let mut best = None;
        let mut best_dist = f64::INFINITY;
        for (i, (&v, &n)) in self.vertices.iter().zip(&self.normals).enumerate() {
            let dist = n.dot(p - v).abs();
            if dist < best_dist {
                best_dist = dist;
                best = Some(i);
            }
        }
        best
    }

    /// Computes mass data for the given density via the standard polygon
    /// area, centroid and second-moment integrals
    pub fn mass_data(&self, density: f64) -> MassData {
        let n = self.vertices.len();
        let mut area = 0.0;
        let mut centroid = Vec2::ZERO;
        let mut inertia_origin = 0.0;

        for i in 0..n {
            let p0 = self.vertices[i];
            let p1 = self.vertices[(i + 1) % n];
            let cross = p0.cross(p1);

            area += cross;
            centroid += (p0 + p1) * cross;
            inertia_origin += cross * (p0.dot(p0) + p0.dot(p1) + p1.dot(p1));
        }

        area *= 0.5;
        centroid /= 6.0 * area;
        let mass = density * area;

        // Second moment about the origin, then shift to the centroid
        let inertia = density * inertia_origin / 12.0 - mass * centroid.length_squared();

        MassData {
            mass,
            center: centroid,
            inertia,
        }
    }
}

/// A line segment collision shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// First endpoint in shape-local coordinates
    pub a: Vec2,
    /// Second endpoint in shape-local coordinates
    pub b: Vec2,
}

impl Segment {
    /// Creates a segment between two local points.
    /// Fails with [`ShapeError::DegenerateSegment`] for coincident endpoints.
    pub fn new(a: Vec2, b: Vec2) -> Result<Self, ShapeError> {
        if a.distance_squared(b) < consts::EPSILON * consts::EPSILON {
            Err(ShapeError::DegenerateSegment)
        } else {
            Ok(Self { a, b })
        }
    }

    /// Segment length
    #[inline]
    pub fn length(&self) -> f64 {
        self.a.distance(self.b)
    }

    /// Returns the AABB of this segment given a world transform
    #[inline]
    pub fn world_aabb(&self, transform: &Transform) -> Aabb {
        let a = transform.transform_point(self.a);
        let b = transform.transform_point(self.b);
        Aabb::new(a.min(b), a.max(b))
    }

    /// Returns the local-space support point: the endpoint farthest along
    /// the given local direction
    #[inline]
    pub fn support(&self, direction: Vec2) -> Vec2 {
        if self.a.dot(direction) >= self.b.dot(direction) {
            self.a
        } else {
            self.b
        }
    }

    /// Casts a ray against the segment via the parametric line-line test.
    ///
    /// A ray parallel to the segment (near-zero cross product) is a miss,
    /// not an error. The reported normal is the segment normal facing the
    /// ray origin side.
    pub fn raycast(&self, ray: &Ray, max_distance: f64, transform: &Transform) -> Option<RayHit> {
        let max = effective_max(max_distance);
        let a = transform.transform_point(self.a);
        let b = transform.transform_point(self.b);
        let edge = b - a;

        let denom = ray.direction.cross(edge);
        if denom.abs() < consts::EPSILON {
            return None;
        }

        let to_a = a - ray.origin;
        let t = to_a.cross(edge) / denom;
        let s = to_a.cross(ray.direction) / denom;

        if t < 0.0 || t > max || !(0.0..=1.0).contains(&s) {
            return None;
        }

        let mut normal = edge.perp().normalize();
        if normal.dot(ray.direction) > 0.0 {
            normal = -normal;
        }

        Some(RayHit {
            point: ray.point_at(t),
            normal,
            distance: t,
        })
    }

    /// Computes mass data for the given density (interpreted per unit length)
    #[inline]
    pub fn mass_data(&self, density: f64) -> MassData {
        let length = self.length();
        let mass = density * length;
        MassData {
            mass,
            center: (self.a + self.b) * 0.5,
            inertia: mass * length * length / 12.0,
        }
    }
}
