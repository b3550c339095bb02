use crate::collision::{ContactPoint, FeatureId};
use crate::dynamics::Body;
use crate::math::Vec2;

/// A velocity constraint for a single contact point.
///
/// The normal points from body A toward body B; a positive impulse
/// pushes the bodies apart.
#[derive(Debug, Clone, Copy)]
pub struct ContactVelocityConstraint {
    /// Contact point in world space
    pub point: Vec2,
    /// Contact normal (from A to B)
    pub normal: Vec2,
    /// Tangent direction (normal rotated 90 degrees)
    pub tangent: Vec2,
    /// Offset from body A's center of mass to the contact point
    pub r_a: Vec2,
    /// Offset from body B's center of mass to the contact point
    pub r_b: Vec2,
    /// Effective mass for the normal constraint
    pub normal_mass: f64,
    /// Effective mass for the tangent constraint
    pub tangent_mass: f64,
    /// Velocity bias: restitution plus Baumgarte positional correction
    pub velocity_bias: f64,
    /// Accumulated normal impulse
    pub normal_impulse: f64,
    /// Accumulated tangent impulse
    pub tangent_impulse: f64,
    /// Feature id of the source contact point (for impulse store-back)
    pub feature: FeatureId,
}

impl ContactVelocityConstraint {
    /// Builds a constraint from a contact point and the two bodies.
    ///
    /// `restitution` is the pair's combined coefficient; bounce is only
    /// requested when the approach speed exceeds `restitution_threshold`,
    /// which keeps slow resting contacts from jittering. `baumgarte` and
    /// `slop` feed the positional-correction bias.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        contact: &ContactPoint,
        normal: Vec2,
        body_a: &Body,
        body_b: &Body,
        restitution: f64,
        restitution_threshold: f64,
        baumgarte: f64,
        slop: f64,
        dt: f64,
    ) -> Self {
        let point = contact.position;
        let tangent = normal.perp();

        let r_a = point - body_a.world_center();
        let r_b = point - body_b.world_center();

        let normal_mass = effective_mass(body_a, body_b, r_a, r_b, normal);
        let tangent_mass = effective_mass(body_a, body_b, r_a, r_b, tangent);

        let normal_velocity = relative_velocity(body_a, body_b, r_a, r_b).dot(normal);

        let restitution_bias = if normal_velocity < -restitution_threshold {
            -restitution * normal_velocity
        } else {
            0.0
        };

        // Baumgarte: feed a fraction of the penetration beyond the slop
        // back as separating velocity
        let penetration = -contact.separation;
        let penetration_bias = if penetration > slop {
            baumgarte * (penetration - slop) / dt
        } else {
            0.0
        };

        Self {
            point,
            normal,
            tangent,
            r_a,
            r_b,
            normal_mass,
            tangent_mass,
            velocity_bias: restitution_bias.max(penetration_bias),
            normal_impulse: contact.normal_impulse,
            tangent_impulse: contact.tangent_impulse,
            feature: contact.feature,
        }
    }

    /// Solves the normal (non-penetration) constraint
    pub fn solve_normal(&mut self, body_a: &mut Body, body_b: &mut Body) {
        let normal_velocity = relative_velocity(body_a, body_b, self.r_a, self.r_b).dot(self.normal);

        let mut impulse = self.normal_mass * (-normal_velocity + self.velocity_bias);

        // Accumulate and clamp: contacts only push
        let old_impulse = self.normal_impulse;
        self.normal_impulse = (old_impulse + impulse).max(0.0);
        impulse = self.normal_impulse - old_impulse;

        apply_impulse(body_a, body_b, self.normal * impulse, self.r_a, self.r_b);
    }

    /// Solves the friction constraint, clamped to the Coulomb cone
    pub fn solve_friction(&mut self, body_a: &mut Body, body_b: &mut Body, friction: f64) {
        let max_friction = friction * self.normal_impulse;

        let tangent_velocity =
            relative_velocity(body_a, body_b, self.r_a, self.r_b).dot(self.tangent);

        let mut impulse = self.tangent_mass * (-tangent_velocity);

        let old_impulse = self.tangent_impulse;
        self.tangent_impulse = (old_impulse + impulse).clamp(-max_friction, max_friction);
        impulse = self.tangent_impulse - old_impulse;

        apply_impulse(body_a, body_b, self.tangent * impulse, self.r_a, self.r_b);
    }

    /// Stores accumulated impulses back to the contact point for the
    /// next step's warm start
    pub fn store_impulses(&self, contact: &mut ContactPoint) {
        contact.normal_impulse = self.normal_impulse;
        contact.tangent_impulse = self.tangent_impulse;
    }
}

/// Computes the effective mass seen by an impulse along `direction`
fn effective_mass(body_a: &Body, body_b: &Body, r_a: Vec2, r_b: Vec2, direction: Vec2) -> f64 {
    let mass_a = body_a.mass();
    let mass_b = body_b.mass();

    let rn_a = r_a.cross(direction);
    let rn_b = r_b.cross(direction);

    let k = mass_a.inv_mass
        + mass_b.inv_mass
        + mass_a.inv_inertia * rn_a * rn_a
        + mass_b.inv_inertia * rn_b * rn_b;

    if k > 0.0 {
        1.0 / k
    } else {
        0.0
    }
}

/// Relative velocity of B with respect to A at the contact point
fn relative_velocity(body_a: &Body, body_b: &Body, r_a: Vec2, r_b: Vec2) -> Vec2 {
    let vel_a = body_a.linear_velocity + Vec2::cross_scalar(body_a.angular_velocity, r_a);
    let vel_b = body_b.linear_velocity + Vec2::cross_scalar(body_b.angular_velocity, r_b);
    vel_b - vel_a
}

/// Applies an equal and opposite impulse pair.
/// `impulse` acts on B; A receives the negation.
fn apply_impulse(body_a: &mut Body, body_b: &mut Body, impulse: Vec2, r_a: Vec2, r_b: Vec2) {
    let inv_mass_a = body_a.mass().inv_mass;
    let inv_inertia_a = body_a.mass().inv_inertia;
    let inv_mass_b = body_b.mass().inv_mass;
    let inv_inertia_b = body_b.mass().inv_inertia;

    body_a.linear_velocity -= impulse * inv_mass_a;
    body_a.angular_velocity -= inv_inertia_a * r_a.cross(impulse);

    body_b.linear_velocity += impulse * inv_mass_b;
    body_b.angular_velocity += inv_inertia_b * r_b.cross(impulse);
}

/// Applies a constraint's accumulated impulses as the solver's starting
/// state (warm starting)
pub fn warm_start(constraint: &ContactVelocityConstraint, body_a: &mut Body, body_b: &mut Body) {
    let p = constraint.normal * constraint.normal_impulse
        + constraint.tangent * constraint.tangent_impulse;
    apply_impulse(body_a, body_b, p, constraint.r_a, constraint.r_b);
}
