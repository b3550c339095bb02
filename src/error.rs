//! Error types for shape construction and mass configuration.

use thiserror::Error;

/// Errors raised when constructing geometry with degenerate parameters.
///
/// Construction fails fast: no shape object is produced and no engine
/// state is affected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    /// Circle radius must be strictly positive.
    #[error("invalid circle radius: {0} (must be > 0)")]
    InvalidRadius(f64),

    /// A polygon needs at least three vertices.
    #[error("invalid polygon vertex count: {0} (must be >= 3)")]
    InvalidVertexCount(usize),

    /// Polygon vertices must wind counter-clockwise and form a convex,
    /// non-self-intersecting boundary.
    #[error("polygon is non-convex or not counter-clockwise at vertex {0}")]
    NonConvexPolygon(usize),

    /// Polygon has two coincident adjacent vertices.
    #[error("polygon has a degenerate (zero-length) edge at vertex {0}")]
    DegenerateEdge(usize),

    /// Segment endpoints must not coincide.
    #[error("degenerate segment: endpoints coincide")]
    DegenerateSegment,

    /// Rectangle dimensions must be strictly positive.
    #[error("invalid rectangle dimensions: {width} x {height} (must be > 0)")]
    InvalidDimensions { width: f64, height: f64 },

    /// A ray direction must have nonzero length.
    #[error("ray direction has zero length")]
    ZeroDirection,
}

/// Errors raised when configuring a body's mass.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MassError {
    /// The fixtures attached to the body yield zero total mass, which is
    /// incompatible with a normal (finite-mass) body.
    #[error("invalid mass configuration: fixtures yield zero mass for a normal-mass body")]
    InvalidMassConfiguration,
}
