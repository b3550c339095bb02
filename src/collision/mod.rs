pub mod broad_phase;
mod contact;
pub mod narrow_phase;

pub use broad_phase::SweepAndPrune;
pub use contact::{
    BodyHandle, ContactManifold, ContactPair, ContactPoint, FeatureId, FixtureKey,
    MAX_CONTACT_POINTS,
};
pub use narrow_phase::{collide, RawContact, RawManifold};
