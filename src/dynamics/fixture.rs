use crate::geometry::{Aabb, MassData, Ray, RayHit, Shape};
use crate::math::Transform;

/// A shape attached to a body, with its material properties.
///
/// A fixture is owned by exactly one body. Material coefficients are
/// combined pairwise when two fixtures collide (see the solver).
#[derive(Debug, Clone)]
pub struct Fixture {
    /// The collision shape
    pub shape: Shape,
    /// Friction coefficient (>= 0)
    pub friction: f64,
    /// Restitution (bounciness) in [0, 1]
    pub restitution: f64,
    /// Density used when deriving the owning body's mass
    pub density: f64,
    /// Sensors detect overlap and raise contact events but produce no
    /// collision response, and raycasts can skip them
    pub sensor: bool,
}

impl Fixture {
    /// Creates a fixture with default material properties
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            friction: 0.6,
            restitution: 0.3,
            density: 1.0,
            sensor: false,
        }
    }

    /// Sets friction
    pub fn with_friction(mut self, friction: f64) -> Self {
        self.friction = friction.max(0.0);
        self
    }

    /// Sets restitution
    pub fn with_restitution(mut self, restitution: f64) -> Self {
        self.restitution = restitution.clamp(0.0, 1.0);
        self
    }

    /// Sets density
    pub fn with_density(mut self, density: f64) -> Self {
        self.density = density.max(0.0);
        self
    }

    /// Marks this fixture as a sensor
    pub fn with_sensor(mut self, sensor: bool) -> Self {
        self.sensor = sensor;
        self
    }

    /// Computes the fixture's AABB under the owning body's transform
    #[inline]
    pub fn world_aabb(&self, transform: &Transform) -> Aabb {
        self.shape.world_aabb(transform)
    }

    /// Casts a ray against the fixture's shape
    #[inline]
    pub fn raycast(&self, ray: &Ray, max_distance: f64, transform: &Transform) -> Option<RayHit> {
        self.shape.raycast(ray, max_distance, transform)
    }

    /// Computes the mass contribution of this fixture
    #[inline]
    pub fn mass_data(&self) -> MassData {
        self.shape.mass_data(self.density)
    }
}
