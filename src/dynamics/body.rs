use crate::collision::BodyHandle;
use crate::dynamics::fixture::Fixture;
use crate::dynamics::mass::{Mass, MassType};
use crate::error::MassError;
use crate::math::{Rotation, Transform, Vec2};

/// A rigid body in the physics simulation.
///
/// A body owns an ordered list of fixtures and a mass descriptor. It is
/// created by the caller, added to a [`World`](crate::World), and from
/// then on mutated by the integration step and the contact solver.
/// Bodies hold no reference back to their world; the world's handle is
/// the authoritative identity.
#[derive(Debug, Clone)]
pub struct Body {
    /// Handle assigned by the owning world (INVALID until added)
    pub(crate) handle: BodyHandle,

    // Pose
    /// Position of the body origin in world space
    pub position: Vec2,
    /// Orientation
    pub rotation: Rotation,

    // Velocities
    /// Linear velocity of the center of mass
    pub linear_velocity: Vec2,
    /// Angular velocity in radians per second
    pub angular_velocity: f64,

    // Accumulated loads (cleared each step)
    /// Accumulated force
    pub force: Vec2,
    /// Accumulated torque
    pub torque: f64,

    // Damping
    /// Linear damping (0-1)
    pub linear_damping: f64,
    /// Angular damping (0-1)
    pub angular_damping: f64,

    fixtures: Vec<Fixture>,
    mass: Mass,
}

impl Default for Body {
    fn default() -> Self {
        Self {
            handle: BodyHandle::INVALID,
            position: Vec2::ZERO,
            rotation: Rotation::IDENTITY,
            linear_velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            force: Vec2::ZERO,
            torque: 0.0,
            linear_damping: 0.0,
            angular_damping: 0.01,
            fixtures: Vec::new(),
            mass: Mass::infinite(),
        }
    }
}

impl Body {
    /// Creates a new body at the origin with infinite mass and no
    /// fixtures. Attach fixtures, then call [`set_mass`](Self::set_mass)
    /// to make it dynamic.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the position
    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    /// Sets the orientation from an angle in radians
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.rotation = Rotation::from_angle(angle);
        self
    }

    /// Sets the linear velocity
    pub fn with_linear_velocity(mut self, velocity: Vec2) -> Self {
        self.linear_velocity = velocity;
        self
    }

    /// Sets the angular velocity
    pub fn with_angular_velocity(mut self, velocity: f64) -> Self {
        self.angular_velocity = velocity;
        self
    }

    /// Sets linear damping
    pub fn with_linear_damping(mut self, damping: f64) -> Self {
        self.linear_damping = damping.clamp(0.0, 1.0);
        self
    }

    /// Sets angular damping
    pub fn with_angular_damping(mut self, damping: f64) -> Self {
        self.angular_damping = damping.clamp(0.0, 1.0);
        self
    }

    /// Attaches a fixture, returning its index within this body
    pub fn add_fixture(&mut self, fixture: Fixture) -> usize {
        self.fixtures.push(fixture);
        self.fixtures.len() - 1
    }

    /// Builder-style fixture attachment
    pub fn with_fixture(mut self, fixture: Fixture) -> Self {
        self.add_fixture(fixture);
        self
    }

    /// The fixtures attached to this body
    #[inline]
    pub fn fixtures(&self) -> &[Fixture] {
        &self.fixtures
    }

    /// A specific fixture by index
    #[inline]
    pub fn fixture(&self, index: usize) -> Option<&Fixture> {
        self.fixtures.get(index)
    }

    /// Recomputes this body's mass from its fixtures for the given mass
    /// type.
    ///
    /// Fails with [`MassError::InvalidMassConfiguration`] when a
    /// `Normal` body's fixtures yield zero total mass.
    pub fn set_mass(&mut self, mass_type: MassType) -> Result<(), MassError> {
        let parts: Vec<_> = self.fixtures.iter().map(Fixture::mass_data).collect();
        self.mass = Mass::from_fixtures(&parts, mass_type)?;
        Ok(())
    }

    /// Builder-style mass configuration
    pub fn with_mass(mut self, mass_type: MassType) -> Result<Self, MassError> {
        self.set_mass(mass_type)?;
        Ok(self)
    }

    /// The body's mass descriptor
    #[inline]
    pub fn mass(&self) -> &Mass {
        &self.mass
    }

    /// The handle assigned by the owning world
    #[inline]
    pub fn handle(&self) -> BodyHandle {
        self.handle
    }

    /// Returns the body's transform
    #[inline]
    pub fn transform(&self) -> Transform {
        Transform::new(self.position, self.rotation)
    }

    /// The center of mass in world coordinates
    #[inline]
    pub fn world_center(&self) -> Vec2 {
        self.transform().transform_point(self.mass.center)
    }

    /// Returns true if this body responds to any impulses
    #[inline]
    pub fn is_dynamic(&self) -> bool {
        self.mass.inv_mass > 0.0 || self.mass.inv_inertia > 0.0
    }

    /// Returns true if this body never changes velocity
    #[inline]
    pub fn is_infinite(&self) -> bool {
        self.mass.is_infinite()
    }

    /// Applies a force at the center of mass
    pub fn apply_force(&mut self, force: Vec2) {
        self.force += force;
    }

    /// Applies a force at a world point, inducing torque about the
    /// center of mass
    pub fn apply_force_at_point(&mut self, force: Vec2, point: Vec2) {
        self.force += force;
        self.torque += (point - self.world_center()).cross(force);
    }

    /// Applies a torque
    pub fn apply_torque(&mut self, torque: f64) {
        self.torque += torque;
    }

    /// Applies an impulse at the center of mass
    pub fn apply_impulse(&mut self, impulse: Vec2) {
        self.linear_velocity += impulse * self.mass.inv_mass;
    }

    /// Applies an impulse at a world point
    pub fn apply_impulse_at_point(&mut self, impulse: Vec2, point: Vec2) {
        self.linear_velocity += impulse * self.mass.inv_mass;
        let r = point - self.world_center();
        self.angular_velocity += self.mass.inv_inertia * r.cross(impulse);
    }

    /// Applies an angular impulse
    pub fn apply_angular_impulse(&mut self, impulse: f64) {
        self.angular_velocity += self.mass.inv_inertia * impulse;
    }

    /// Gets the velocity of the body material at a world point
    pub fn velocity_at_point(&self, point: Vec2) -> Vec2 {
        self.linear_velocity
            + Vec2::cross_scalar(self.angular_velocity, point - self.world_center())
    }

    /// Clears accumulated force and torque
    pub fn clear_forces(&mut self) {
        self.force = Vec2::ZERO;
        self.torque = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Shape;

    fn circle_body() -> Body {
        Body::new()
            .with_fixture(Fixture::new(Shape::circle(1.0).unwrap()))
            .with_mass(MassType::Normal)
            .unwrap()
    }

    #[test]
    fn test_default_is_infinite() {
        let body = Body::new();
        assert!(body.is_infinite());
        assert!(!body.is_dynamic());
    }

    #[test]
    fn test_set_mass_from_fixture() {
        let body = circle_body();
        // Unit circle at density 1: mass = pi
        assert!((body.mass().mass - std::f64::consts::PI).abs() < 1e-12);
        assert!(body.is_dynamic());
    }

    #[test]
    fn test_set_mass_zero_density_fails() {
        let mut body = Body::new()
            .with_fixture(Fixture::new(Shape::circle(1.0).unwrap()).with_density(0.0));
        assert_eq!(
            body.set_mass(MassType::Normal),
            Err(MassError::InvalidMassConfiguration)
        );
    }

    #[test]
    fn test_apply_impulse() {
        let mut body = circle_body();
        let inv_mass = body.mass().inv_mass;

        body.apply_impulse(Vec2::new(1.0, 0.0));
        assert!((body.linear_velocity.x - inv_mass).abs() < 1e-12);
    }

    #[test]
    fn test_infinite_ignores_impulse() {
        let mut body = Body::new()
            .with_fixture(Fixture::new(Shape::circle(1.0).unwrap()))
            .with_mass(MassType::Infinite)
            .unwrap();

        body.apply_impulse(Vec2::new(10.0, 0.0));
        body.apply_impulse_at_point(Vec2::new(10.0, 0.0), Vec2::new(0.0, 1.0));
        assert_eq!(body.linear_velocity, Vec2::ZERO);
        assert_eq!(body.angular_velocity, 0.0);
    }

    #[test]
    fn test_velocity_at_point() {
        let mut body = circle_body();
        body.linear_velocity = Vec2::new(1.0, 0.0);
        body.angular_velocity = 1.0;

        // Point above the center: rotation adds -x velocity
        let v = body.velocity_at_point(Vec2::new(0.0, 1.0));
        assert!((v.x - 0.0).abs() < 1e-12);
        assert!((v.y - 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_force_at_point_induces_torque() {
        let mut body = circle_body();
        body.apply_force_at_point(Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0));
        assert!(body.torque < 0.0);
        assert_eq!(body.force, Vec2::new(1.0, 0.0));
    }
}
