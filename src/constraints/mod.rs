mod contact_constraint;

pub use contact_constraint::{warm_start, ContactVelocityConstraint};
