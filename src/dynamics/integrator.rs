use crate::math::{Rotation, Vec2};

use super::body::Body;

/// Velocity clamps to prevent instability from pathological inputs
const MAX_LINEAR_VELOCITY: f64 = 1000.0;
const MAX_ANGULAR_VELOCITY: f64 = 500.0;

/// Integrates velocities: applies gravity, accumulated forces and
/// damping (semi-implicit Euler, velocity half).
///
/// Gravity and forces only act through the body's inverse mass/inertia,
/// so infinite and fixed-velocity bodies are naturally unaffected.
pub fn integrate_velocities(body: &mut Body, gravity: Vec2, dt: f64) {
    let mass = *body.mass();

    if mass.inv_mass > 0.0 {
        body.linear_velocity += (gravity + body.force * mass.inv_mass) * dt;
        body.linear_velocity *= (1.0 - body.linear_damping).powf(dt);
    }
    if mass.inv_inertia > 0.0 {
        body.angular_velocity += body.torque * mass.inv_inertia * dt;
        body.angular_velocity *= (1.0 - body.angular_damping).powf(dt);
    }

    // Clamp velocities to keep a runaway simulation bounded
    let linear_speed = body.linear_velocity.length();
    if linear_speed > MAX_LINEAR_VELOCITY {
        body.linear_velocity *= MAX_LINEAR_VELOCITY / linear_speed;
    }
    if body.angular_velocity.abs() > MAX_ANGULAR_VELOCITY {
        body.angular_velocity = body.angular_velocity.signum() * MAX_ANGULAR_VELOCITY;
    }
}

/// Integrates positions: applies velocities to the pose (semi-implicit
/// Euler, position half).
///
/// Rotation happens about the center of mass, so a body whose origin is
/// offset from its center of mass orbits correctly.
pub fn integrate_positions(body: &mut Body, dt: f64) {
    if !body.is_dynamic() {
        return;
    }

    let center = body.world_center();

    body.position += body.linear_velocity * dt;

    let dtheta = body.angular_velocity * dt;
    if dtheta != 0.0 {
        let delta = Rotation::from_angle(dtheta);
        // Rotate the origin about the (translated) center of mass
        let new_center = center + body.linear_velocity * dt;
        body.position = new_center + delta.rotate(body.position - new_center);
        body.rotation = (delta * body.rotation).renormalize();
    }
}
