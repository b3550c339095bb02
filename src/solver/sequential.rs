use crate::collision::ContactManifold;
use crate::constraints::{warm_start, ContactVelocityConstraint};
use crate::dynamics::Body;

/// Configuration for the sequential impulse solver
#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    /// Number of velocity solver iterations
    pub velocity_iterations: usize,
    /// Number of position solver iterations
    pub position_iterations: usize,
    /// Warm starting coefficient (0-1); scales impulses carried over
    /// from the previous step
    pub warm_start_coefficient: f64,
    /// Baumgarte stabilization coefficient
    pub baumgarte: f64,
    /// Allowed penetration slop
    pub slop: f64,
    /// Minimum approach speed before restitution produces bounce
    pub restitution_threshold: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            velocity_iterations: 8,
            position_iterations: 3,
            warm_start_coefficient: 1.0,
            baumgarte: 0.2,
            slop: 0.005,
            restitution_threshold: 1.0,
        }
    }
}

/// Sequential impulse contact solver.
///
/// Consumes the step's manifolds, iteratively resolves the velocity
/// constraints (normal then friction per point), then runs a positional
/// correction pass over the remaining penetration.
pub struct ContactSolver {
    config: SolverConfig,
    constraints: Vec<ManifoldConstraints>,
}

struct ManifoldConstraints {
    /// Index of the source manifold in the step's manifold list
    manifold_index: usize,
    body_a: usize,
    body_b: usize,
    friction: f64,
    points: Vec<ContactVelocityConstraint>,
}

impl Default for ContactSolver {
    fn default() -> Self {
        Self::new(SolverConfig::default())
    }
}

impl ContactSolver {
    /// Creates a new solver with the given configuration
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            constraints: Vec::new(),
        }
    }

    /// Returns the solver configuration
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Sets the solver configuration
    pub fn set_config(&mut self, config: SolverConfig) {
        self.config = config;
    }

    /// Builds velocity constraints from the step's manifolds.
    ///
    /// Sensor manifolds and pairs of non-dynamic bodies are skipped:
    /// they produce contact events but no response.
    pub fn prepare(&mut self, manifolds: &[ContactManifold], bodies: &[Body], dt: f64) {
        self.constraints.clear();

        for (manifold_index, manifold) in manifolds.iter().enumerate() {
            if manifold.sensor {
                continue;
            }

            let body_a_idx = manifold.pair.a.body.index();
            let body_b_idx = manifold.pair.b.body.index();

            if body_a_idx >= bodies.len() || body_b_idx >= bodies.len() {
                continue;
            }

            let body_a = &bodies[body_a_idx];
            let body_b = &bodies[body_b_idx];

            if !body_a.is_dynamic() && !body_b.is_dynamic() {
                continue;
            }

            let points: Vec<_> = manifold
                .iter()
                .map(|contact| {
                    let mut c = ContactVelocityConstraint::new(
                        contact,
                        manifold.normal,
                        body_a,
                        body_b,
                        manifold.restitution,
                        self.config.restitution_threshold,
                        self.config.baumgarte,
                        self.config.slop,
                        dt,
                    );
                    c.normal_impulse *= self.config.warm_start_coefficient;
                    c.tangent_impulse *= self.config.warm_start_coefficient;
                    c
                })
                .collect();

            if !points.is_empty() {
                self.constraints.push(ManifoldConstraints {
                    manifold_index,
                    body_a: body_a_idx,
                    body_b: body_b_idx,
                    friction: manifold.friction,
                    points,
                });
            }
        }
    }

    /// Applies the carried-over impulses before iterating
    pub fn warm_start(&self, bodies: &mut [Body]) {
        for mc in &self.constraints {
            let (body_a, body_b) = get_two_mut(bodies, mc.body_a, mc.body_b);
            for constraint in &mc.points {
                warm_start(constraint, body_a, body_b);
            }
        }
    }

    /// Runs the velocity iterations
    pub fn solve_velocity(&mut self, bodies: &mut [Body]) {
        for _ in 0..self.config.velocity_iterations {
            for mc in &mut self.constraints {
                let (body_a, body_b) = get_two_mut(bodies, mc.body_a, mc.body_b);
                for constraint in &mut mc.points {
                    constraint.solve_normal(body_a, body_b);
                    constraint.solve_friction(body_a, body_b, mc.friction);
                }
            }
        }
    }

    /// Writes accumulated impulses back into the manifolds so the next
    /// step can warm start from them
    pub fn store_impulses(&self, manifolds: &mut [ContactManifold]) {
        for mc in &self.constraints {
            let Some(manifold) = manifolds.get_mut(mc.manifold_index) else {
                continue;
            };
            for (constraint, contact) in mc.points.iter().zip(manifold.iter_mut()) {
                constraint.store_impulses(contact);
            }
        }
    }
}

/// Gets mutable references to two distinct slice elements
fn get_two_mut(slice: &mut [Body], a: usize, b: usize) -> (&mut Body, &mut Body) {
    assert!(a != b);
    if a < b {
        let (left, right) = slice.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = slice.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}

/// Positional correction pass: directly shifts bodies out of remaining
/// penetration, scaled by the Baumgarte coefficient.
pub fn solve_position_constraints(
    manifolds: &[ContactManifold],
    bodies: &mut [Body],
    config: &SolverConfig,
) {
    for _ in 0..config.position_iterations {
        let mut max_penetration = 0.0f64;

        for manifold in manifolds {
            let body_a_idx = manifold.pair.a.body.index();
            let body_b_idx = manifold.pair.b.body.index();

            if body_a_idx >= bodies.len() || body_b_idx >= bodies.len() {
                continue;
            }
            if !bodies[body_a_idx].is_dynamic() && !bodies[body_b_idx].is_dynamic() {
                continue;
            }

            for contact in manifold.iter() {
                let penetration = -contact.separation - config.slop;
                max_penetration = max_penetration.max(penetration);

                if penetration <= 0.0 {
                    continue;
                }

                let (body_a, body_b) = get_two_mut(bodies, body_a_idx, body_b_idx);

                let inv_mass_a = body_a.mass().inv_mass;
                let inv_mass_b = body_b.mass().inv_mass;
                let k = inv_mass_a + inv_mass_b;
                if k <= 0.0 {
                    continue;
                }

                let correction = penetration * config.baumgarte / k;
                body_a.position -= manifold.normal * (correction * inv_mass_a);
                body_b.position += manifold.normal * (correction * inv_mass_b);
            }
        }

        if max_penetration < config.slop {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::{BodyHandle, ContactPair, ContactPoint, FeatureId, FixtureKey};
    use crate::dynamics::{Fixture, MassType};
    use crate::geometry::Shape;
    use crate::math::Vec2;

    fn dynamic_circle(at: Vec2) -> Body {
        Body::new()
            .with_position(at)
            .with_fixture(Fixture::new(Shape::circle(0.5).unwrap()))
            .with_mass(MassType::Normal)
            .unwrap()
    }

    fn manifold_between(a: u32, b: u32, normal: Vec2, point: Vec2, separation: f64) -> ContactManifold {
        let pair = ContactPair::new(
            FixtureKey::new(BodyHandle::new(a), 0),
            FixtureKey::new(BodyHandle::new(b), 0),
        );
        let mut m = ContactManifold::new(pair, normal);
        m.add_point(ContactPoint::new(point, separation, FeatureId::SINGLE));
        m.friction = 0.5;
        m.restitution = 0.0;
        m
    }

    #[test]
    fn test_solver_creation() {
        let solver = ContactSolver::default();
        assert_eq!(solver.config().velocity_iterations, 8);
    }

    #[test]
    fn test_prepare_skips_static_pairs() {
        let mut solver = ContactSolver::default();
        let bodies = vec![Body::new(), Body::new()];
        let manifolds = vec![manifold_between(0, 1, Vec2::X, Vec2::ZERO, -0.1)];

        solver.prepare(&manifolds, &bodies, 1.0 / 60.0);
        assert!(solver.constraints.is_empty());
    }

    #[test]
    fn test_head_on_collision_resolved() {
        let mut bodies = vec![
            dynamic_circle(Vec2::new(-0.45, 0.0)).with_linear_velocity(Vec2::new(2.0, 0.0)),
            dynamic_circle(Vec2::new(0.45, 0.0)).with_linear_velocity(Vec2::new(-2.0, 0.0)),
        ];
        let mut manifolds = vec![manifold_between(0, 1, Vec2::X, Vec2::ZERO, -0.1)];

        let mut solver = ContactSolver::default();
        solver.prepare(&manifolds, &bodies, 1.0 / 60.0);
        solver.warm_start(&mut bodies);
        solver.solve_velocity(&mut bodies);
        solver.store_impulses(&mut manifolds);

        // No longer approaching
        let rv = (bodies[1].linear_velocity - bodies[0].linear_velocity).dot(Vec2::X);
        assert!(rv >= -1e-9);

        // Impulses were stored for warm starting
        let stored = manifolds[0].iter().next().unwrap();
        assert!(stored.normal_impulse > 0.0);
    }

    #[test]
    fn test_elastic_collision_swaps_velocities() {
        // Equal masses, head-on, restitution 1: velocities exchange
        let mut bodies = vec![
            dynamic_circle(Vec2::new(-0.49, 0.0)).with_linear_velocity(Vec2::new(2.0, 0.0)),
            dynamic_circle(Vec2::new(0.49, 0.0)).with_linear_velocity(Vec2::new(-2.0, 0.0)),
        ];
        let mut manifold = manifold_between(0, 1, Vec2::X, Vec2::ZERO, -0.02);
        manifold.restitution = 1.0;
        let manifolds = vec![manifold];

        let mut solver = ContactSolver::default();
        solver.prepare(&manifolds, &bodies, 1.0 / 60.0);
        solver.warm_start(&mut bodies);
        solver.solve_velocity(&mut bodies);

        assert!((bodies[0].linear_velocity.x + 2.0).abs() < 1e-6);
        assert!((bodies[1].linear_velocity.x - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_infinite_body_unmoved_by_solver() {
        let ground = Body::new();
        let falling = dynamic_circle(Vec2::new(0.0, 0.45)).with_linear_velocity(Vec2::new(0.0, -3.0));
        let mut bodies = vec![ground, falling];

        let mut manifolds = vec![manifold_between(0, 1, Vec2::Y, Vec2::ZERO, -0.05)];

        let mut solver = ContactSolver::default();
        solver.prepare(&manifolds, &bodies, 1.0 / 60.0);
        solver.warm_start(&mut bodies);
        solver.solve_velocity(&mut bodies);
        solve_position_constraints(&manifolds, &mut bodies, solver.config());
        solver.store_impulses(&mut manifolds);

        assert_eq!(bodies[0].linear_velocity, Vec2::ZERO);
        assert_eq!(bodies[0].angular_velocity, 0.0);
        assert_eq!(bodies[0].position, Vec2::ZERO);

        // The dynamic body stopped falling
        assert!(bodies[1].linear_velocity.y >= -1e-9);
    }

    #[test]
    fn test_position_correction_reduces_penetration() {
        let ground = Body::new();
        let resting = dynamic_circle(Vec2::new(0.0, 0.4));
        let mut bodies = vec![ground, resting];

        let manifolds = vec![manifold_between(0, 1, Vec2::Y, Vec2::ZERO, -0.1)];
        let config = SolverConfig::default();

        let before = bodies[1].position.y;
        solve_position_constraints(&manifolds, &mut bodies, &config);
        assert!(bodies[1].position.y > before);
    }
}
