//! # FlatPhy
//!
//! A deterministic 2D rigid body physics engine written in Rust.
//!
//! ## Features
//!
//! - **Rigid Body Dynamics**: 2D rigid bodies with linear and angular motion
//! - **Collision Shapes**: circle, convex polygon and segment primitives,
//!   validated at construction
//! - **Broad Phase**: sweep-and-prune over per-fixture fat AABBs
//! - **Narrow Phase**: separating-axis tests with reference/incident edge
//!   clipping for two-point manifolds
//! - **Contact Solver**: sequential impulses with accumulated clamping,
//!   Coulomb friction and warm starting
//! - **Raycasts**: closest-hit and all-hits queries with sensor exclusion
//!   and per-fixture filtering
//! - **Listeners**: synchronous contact (begin/persist/end) and per-step
//!   callbacks
//!
//! ## Quick Start
//!
//! ```rust
//! use flatphy::prelude::*;
//!
//! # fn main() -> Result<(), flatphy::ShapeError> {
//! // Create a physics world
//! let mut world = World::default();
//! world.set_gravity(Vec2::new(0.0, -9.81));
//!
//! // Create a static ground
//! let ground = Body::new()
//!     .with_position(Vec2::new(0.0, -0.5))
//!     .with_fixture(Fixture::new(Shape::rectangle(20.0, 1.0)?));
//! world.add_body(ground);
//!
//! // Create a dynamic ball
//! let ball = Body::new()
//!     .with_position(Vec2::new(0.0, 5.0))
//!     .with_fixture(Fixture::new(Shape::circle(0.5)?))
//!     .with_mass(MassType::Normal)
//!     .unwrap();
//! let ball = world.add_body(ball);
//!
//! // Simulation loop (fixed 60 Hz steps)
//! for _ in 0..600 {
//!     world.step(1.0 / 60.0);
//! }
//! let pos = world.body(ball).unwrap().position;
//! assert!(pos.y < 5.0);
//!
//! // Ray query against the scene
//! let ray = Ray::new(Vec2::new(-5.0, 0.25), Vec2::X)?;
//! let hit = world.raycast_closest(&ray, 0.0, true);
//! assert!(hit.is_some());
//! # Ok(())
//! # }
//! ```
//!
//! ## Numerical behavior
//!
//! The engine performs no I/O, never blocks, and runs `step`/`raycast`
//! to completion on the calling thread. It does not detect NaN or
//! infinite velocities arising from unbounded inputs; callers are
//! responsible for bounding forces and timesteps.

pub mod collision;
pub mod constraints;
pub mod dynamics;
pub mod error;
pub mod geometry;
pub mod math;
pub mod solver;
mod world;

pub use error::{MassError, ShapeError};
pub use world::{
    ContactEvent, ContactListener, RaycastFilter, RaycastResult, StepListener, World, WorldConfig,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::collision::{BodyHandle, ContactManifold, ContactPair, FixtureKey};
    pub use crate::dynamics::{Body, Fixture, Mass, MassType};
    pub use crate::error::{MassError, ShapeError};
    pub use crate::geometry::{Aabb, Circle, MassData, Polygon, Ray, RayHit, Segment, Shape};
    pub use crate::math::{Rotation, Transform, Vec2};
    pub use crate::solver::{ContactSolver, SolverConfig};
    pub use crate::world::{
        ContactEvent, ContactListener, RaycastFilter, RaycastResult, StepListener, World,
        WorldConfig,
    };
}
