//! Exact pair tests and contact manifold generation.
//!
//! The broad-phase hands over candidate fixture pairs; this module
//! decides whether the shapes truly overlap and, if so, produces the
//! contact normal, penetration depths and up to two contact points.
//! Exactly-touching configurations (separation >= 0) are not contacts.

mod circle;
mod sat;

use crate::collision::contact::FeatureId;
use crate::geometry::Shape;
use crate::math::{Transform, Vec2};

/// A contact point produced by the narrow-phase, before it is attached
/// to a keyed manifold
#[derive(Debug, Clone, Copy)]
pub struct RawContact {
    /// World-space contact position
    pub position: Vec2,
    /// Signed separation along the manifold normal (always < 0 here)
    pub separation: f64,
    /// Stable structural identity for warm starting
    pub feature: FeatureId,
}

/// Narrow-phase output for one overlapping pair
#[derive(Debug, Clone)]
pub struct RawManifold {
    /// Contact normal in world space, pointing from shape A toward shape B
    pub normal: Vec2,
    /// Contact points (one or two)
    pub points: Vec<RawContact>,
}

impl RawManifold {
    fn single(normal: Vec2, position: Vec2, separation: f64) -> Self {
        Self {
            normal,
            points: vec![RawContact {
                position,
                separation,
                feature: FeatureId::SINGLE,
            }],
        }
    }

    /// Reverses the manifold's orientation (normal A->B becomes B->A)
    fn flipped(mut self) -> Self {
        self.normal = -self.normal;
        self
    }
}

/// Runs the exact intersection test for a shape pair.
///
/// Returns the manifold with the normal pointing from `a` toward `b`,
/// or None when the shapes are separated or merely touching.
pub fn collide(a: &Shape, ta: &Transform, b: &Shape, tb: &Transform) -> Option<RawManifold> {
    use Shape::*;

    match (a, b) {
        (Circle(ca), Circle(cb)) => circle::circle_circle(ca, ta, cb, tb),
        (Polygon(pa), Circle(cb)) => circle::polygon_circle(pa, ta, cb, tb),
        (Circle(ca), Polygon(pb)) => {
            circle::polygon_circle(pb, tb, ca, ta).map(RawManifold::flipped)
        }
        (Segment(sa), Circle(cb)) => circle::segment_circle(sa, ta, cb, tb),
        (Circle(ca), Segment(sb)) => {
            circle::segment_circle(sb, tb, ca, ta).map(RawManifold::flipped)
        }
        (Polygon(pa), Polygon(pb)) => {
            sat::collide(&sat::PolyView::polygon(pa, ta), &sat::PolyView::polygon(pb, tb))
        }
        (Polygon(pa), Segment(sb)) => {
            sat::collide(&sat::PolyView::polygon(pa, ta), &sat::PolyView::segment(sb, tb))
        }
        (Segment(sa), Polygon(pb)) => {
            sat::collide(&sat::PolyView::segment(sa, ta), &sat::PolyView::polygon(pb, tb))
        }
        (Segment(sa), Segment(sb)) => {
            sat::collide(&sat::PolyView::segment(sa, ta), &sat::PolyView::segment(sb, tb))
        }
    }
}
