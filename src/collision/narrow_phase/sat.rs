//! Separating-axis test with reference/incident edge clipping.
//!
//! Polygon-polygon, polygon-segment and segment-segment pairs all run
//! through this path. A segment participates as a degenerate two-vertex
//! polygon whose two half-edges carry opposite normals, which makes the
//! 2D SAT axis set (edge normals of both shapes) exact for every pair
//! handled here.

use crate::collision::contact::FeatureId;
use crate::geometry::{Polygon, Segment};
use crate::math::{Transform, Vec2};

use super::{RawContact, RawManifold};

/// Tolerances for preferring the first shape's axis when both
/// penetrations are nearly equal; keeps the reference edge choice stable
/// across steps
const RELATIVE_TOL: f64 = 0.98;
const ABSOLUTE_TOL: f64 = 0.001;

/// A world-space view of a convex vertex shape
pub struct PolyView {
    vertices: Vec<Vec2>,
    normals: Vec<Vec2>,
}

impl PolyView {
    /// Builds a world-space view of a polygon
    pub fn polygon(poly: &Polygon, transform: &Transform) -> Self {
        Self {
            vertices: poly
                .vertices()
                .iter()
                .map(|&v| transform.transform_point(v))
                .collect(),
            normals: poly
                .normals()
                .iter()
                .map(|&n| transform.transform_vector(n))
                .collect(),
        }
    }

    /// Builds a world-space view of a segment as a two-vertex shape
    pub fn segment(seg: &Segment, transform: &Transform) -> Self {
        let a = transform.transform_point(seg.a);
        let b = transform.transform_point(seg.b);
        let normal = (b - a).perp_right().normalize();
        Self {
            vertices: vec![a, b],
            normals: vec![normal, -normal],
        }
    }

    fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Farthest vertex along `direction`
    fn support(&self, direction: Vec2) -> Vec2 {
        let mut best = self.vertices[0];
        let mut best_dot = best.dot(direction);
        for &v in &self.vertices[1..] {
            let d = v.dot(direction);
            if d > best_dot {
                best_dot = d;
                best = v;
            }
        }
        best
    }
}

/// Finds the edge of `a` with the maximum separation against `b`.
/// Returns (edge index, separation); separation >= 0 means a separating
/// axis exists.
fn max_separation(a: &PolyView, b: &PolyView) -> (usize, f64) {
    let mut best_edge = 0;
    let mut best_sep = f64::NEG_INFINITY;

    for i in 0..a.len() {
        let n = a.normals[i];
        let v = a.vertices[i];
        let deepest = b.support(-n);
        let sep = n.dot(deepest - v);
        if sep > best_sep {
            best_sep = sep;
            best_edge = i;
        }
    }

    (best_edge, best_sep)
}

/// A clip point carrying the structural id of the feature it came from
#[derive(Debug, Clone, Copy)]
struct ClipVertex {
    point: Vec2,
    id: usize,
}

/// Clips a one-or-two point segment against the half-plane
/// `normal . x <= offset`, tagging any newly created point with `new_id`
fn clip_to_line(points: &[ClipVertex], normal: Vec2, offset: f64, new_id: usize) -> Vec<ClipVertex> {
    let mut out = Vec::with_capacity(2);
    if points.len() < 2 {
        return out;
    }

    let d0 = normal.dot(points[0].point) - offset;
    let d1 = normal.dot(points[1].point) - offset;

    if d0 <= 0.0 {
        out.push(points[0]);
    }
    if d1 <= 0.0 {
        out.push(points[1]);
    }

    // The segment crosses the plane: add the intersection point
    if d0 * d1 < 0.0 {
        let t = d0 / (d0 - d1);
        out.push(ClipVertex {
            point: points[0].point + (points[1].point - points[0].point) * t,
            id: new_id,
        });
    }

    out
}

/// SAT + clipping contact generation for two vertex shapes.
///
/// Returns a manifold whose normal points from `a` toward `b`, with up
/// to two contact points, or None when a separating axis exists
/// (touching counts as separated).
pub fn collide(a: &PolyView, b: &PolyView) -> Option<RawManifold> {
    let (edge_a, sep_a) = max_separation(a, b);
    if sep_a >= 0.0 {
        return None;
    }
    let (edge_b, sep_b) = max_separation(b, a);
    if sep_b >= 0.0 {
        return None;
    }

    // Reference shape: the one with the shallower penetration axis, with
    // a small bias toward `a` so the choice is stable across steps
    let (reference, incident, ref_edge, flip) = if sep_b > RELATIVE_TOL * sep_a + ABSOLUTE_TOL {
        (b, a, edge_b, true)
    } else {
        (a, b, edge_a, false)
    };

    let ref_normal = reference.normals[ref_edge];
    let v1 = reference.vertices[ref_edge];
    let v2 = reference.vertices[(ref_edge + 1) % reference.len()];

    // Incident edge: the one most anti-parallel to the reference normal
    let mut inc_edge = 0;
    let mut min_dot = f64::INFINITY;
    for (i, &n) in incident.normals.iter().enumerate() {
        let d = ref_normal.dot(n);
        if d < min_dot {
            min_dot = d;
            inc_edge = i;
        }
    }

    let i1 = inc_edge;
    let i2 = (inc_edge + 1) % incident.len();
    let initial = [
        ClipVertex {
            point: incident.vertices[i1],
            id: i1,
        },
        ClipVertex {
            point: incident.vertices[i2],
            id: i2,
        },
    ];

    // Clip the incident edge to the reference edge's side planes. Ids for
    // clip-generated points start past the incident vertex range.
    let tangent = (v2 - v1).normalize();
    let clipped = clip_to_line(&initial, -tangent, -tangent.dot(v1), incident.len());
    let clipped = clip_to_line(&clipped, tangent, tangent.dot(v2), incident.len() + 1);
    if clipped.len() < 2 {
        return None;
    }

    let mut points = Vec::with_capacity(2);
    for cv in &clipped {
        let separation = ref_normal.dot(cv.point - v1);
        if separation < 0.0 {
            points.push(RawContact {
                position: cv.point,
                separation,
                feature: FeatureId::clipped(ref_edge, cv.id, flip),
            });
        }
    }

    if points.is_empty() {
        return None;
    }

    // Manifold normal always points from a toward b
    let normal = if flip { -ref_normal } else { ref_normal };
    Some(RawManifold { normal, points })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Rotation;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn square(size: f64, at: Vec2) -> PolyView {
        PolyView::polygon(
            &Polygon::rectangle(size, size).unwrap(),
            &Transform::from_position(at),
        )
    }

    #[test]
    fn test_overlapping_squares() {
        // Unit squares offset 0.8 on x: 0.2 overlap
        let a = square(1.0, Vec2::ZERO);
        let b = square(1.0, Vec2::new(0.8, 0.0));

        let m = collide(&a, &b).unwrap();
        assert!(approx_eq(m.normal.x, 1.0));
        assert_eq!(m.points.len(), 2);
        for p in &m.points {
            assert!(approx_eq(p.separation, -0.2));
        }
    }

    #[test]
    fn test_touching_squares_no_contact() {
        let a = square(1.0, Vec2::ZERO);
        let b = square(1.0, Vec2::new(1.0, 0.0));
        assert!(collide(&a, &b).is_none());
    }

    #[test]
    fn test_separated_squares() {
        let a = square(1.0, Vec2::ZERO);
        let b = square(1.0, Vec2::new(3.0, 0.0));
        assert!(collide(&a, &b).is_none());
    }

    #[test]
    fn test_normal_points_a_to_b() {
        let a = square(1.0, Vec2::ZERO);
        let b = square(1.0, Vec2::new(0.0, 0.8));
        let m = collide(&a, &b).unwrap();
        assert!(approx_eq(m.normal.y, 1.0));

        // Swapped order flips the normal
        let m2 = collide(&b, &a).unwrap();
        assert!(approx_eq(m2.normal.y, -1.0));
    }

    #[test]
    fn test_stacked_squares_two_points() {
        // Box resting 0.1 deep into a wide platform below it
        let platform = square(4.0, Vec2::ZERO);
        let b = square(1.0, Vec2::new(0.0, 2.4));

        let m = collide(&platform, &b).unwrap();
        assert!(approx_eq(m.normal.y, 1.0));
        assert_eq!(m.points.len(), 2);
        let xs: Vec<f64> = m.points.iter().map(|p| p.position.x).collect();
        assert!(xs.contains(&-0.5) || xs.iter().any(|&x| approx_eq(x, -0.5)));
        assert!(xs.iter().any(|&x| approx_eq(x, 0.5)));
    }

    #[test]
    fn test_rotated_corner_contact() {
        // A 45-degree rotated square dipping a corner into a flat square
        let ground = square(4.0, Vec2::ZERO);
        let diamond = PolyView::polygon(
            &Polygon::rectangle(1.0, 1.0).unwrap(),
            &Transform::new(
                Vec2::new(0.0, 2.0 + std::f64::consts::SQRT_2 / 2.0 - 0.1),
                Rotation::from_angle(std::f64::consts::FRAC_PI_4),
            ),
        );

        let m = collide(&ground, &diamond).unwrap();
        assert!(approx_eq(m.normal.y, 1.0));
        assert!(!m.points.is_empty());
        for p in &m.points {
            assert!(p.separation < 0.0);
            assert!(p.separation > -0.11);
        }
    }

    #[test]
    fn test_polygon_on_segment() {
        // A box overlapping a horizontal ground segment
        let seg = Segment::new(Vec2::new(-5.0, 0.0), Vec2::new(5.0, 0.0)).unwrap();
        let ground = PolyView::segment(&seg, &Transform::IDENTITY);
        let b = square(1.0, Vec2::new(0.0, 0.45));

        let m = collide(&ground, &b).unwrap();
        assert!(approx_eq(m.normal.y, 1.0));
        assert_eq!(m.points.len(), 2);
        for p in &m.points {
            assert!(approx_eq(p.separation, -0.05));
        }
    }

    #[test]
    fn test_crossing_segments() {
        let s1 = Segment::new(Vec2::new(-1.0, 0.0), Vec2::new(1.0, 0.0)).unwrap();
        let s2 = Segment::new(Vec2::new(0.0, -1.0), Vec2::new(0.0, 1.0)).unwrap();
        let a = PolyView::segment(&s1, &Transform::IDENTITY);
        let b = PolyView::segment(&s2, &Transform::IDENTITY);

        let m = collide(&a, &b);
        assert!(m.is_some());
    }

    #[test]
    fn test_feature_ids_stable_under_slide() {
        // Sliding the upper box along x keeps the same contact features,
        // which is what warm starting relies on
        let ground = square(4.0, Vec2::ZERO);
        let b1 = square(1.0, Vec2::new(0.0, 2.4));
        let b2 = square(1.0, Vec2::new(0.05, 2.4));

        let m1 = collide(&ground, &b1).unwrap();
        let m2 = collide(&ground, &b2).unwrap();

        let f1: Vec<_> = m1.points.iter().map(|p| p.feature).collect();
        let f2: Vec<_> = m2.points.iter().map(|p| p.feature).collect();
        assert_eq!(f1, f2);
    }
}
