mod body;
mod fixture;
mod integrator;
mod mass;

pub use body::Body;
pub use fixture::Fixture;
pub use integrator::{integrate_positions, integrate_velocities};
pub use mass::{Mass, MassType};
