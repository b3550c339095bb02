mod sweep;

pub use sweep::SweepAndPrune;
