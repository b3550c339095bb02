//! Contact generation for pairs involving a circle.
//!
//! These are the single-point manifold cases: circle-circle,
//! polygon-circle (vertex and edge regions) and segment-circle.

use crate::geometry::{Circle, Polygon, Segment};
use crate::math::{consts, Transform, Vec2};

use super::RawManifold;

/// Circle vs circle
pub fn circle_circle(
    a: &Circle,
    ta: &Transform,
    b: &Circle,
    tb: &Transform,
) -> Option<RawManifold> {
    let ca = ta.transform_point(a.center);
    let cb = tb.transform_point(b.center);

    let d = cb - ca;
    let dist_sq = d.length_squared();
    let radii = a.radius + b.radius;

    if dist_sq >= radii * radii {
        return None;
    }

    let dist = dist_sq.sqrt();
    // Concentric circles: no meaningful normal direction, pick +X
    let normal = if dist > consts::EPSILON { d / dist } else { Vec2::X };

    let surface_a = ca + normal * a.radius;
    let surface_b = cb - normal * b.radius;

    Some(RawManifold::single(
        normal,
        (surface_a + surface_b) * 0.5,
        dist - radii,
    ))
}

/// Polygon vs circle.
///
/// Finds the polygon feature (edge or vertex) closest to the circle
/// center and generates one contact point against it.
pub fn polygon_circle(
    poly: &Polygon,
    tp: &Transform,
    circle: &Circle,
    tc: &Transform,
) -> Option<RawManifold> {
    // Work in the polygon's local frame
    let center = tp.inverse_transform_point(tc.transform_point(circle.center));
    let radius = circle.radius;

    let vertices = poly.vertices();
    let normals = poly.normals();
    let n = vertices.len();

    // Deepest edge: maximum signed distance of the center over all edge planes
    let mut best_edge = 0;
    let mut best_sep = f64::NEG_INFINITY;
    for i in 0..n {
        let sep = normals[i].dot(center - vertices[i]);
        if sep > best_sep {
            best_sep = sep;
            best_edge = i;
        }
    }

    if best_sep >= radius {
        return None;
    }

    let v1 = vertices[best_edge];
    let v2 = vertices[(best_edge + 1) % n];

    let (local_normal, separation, local_point) = if best_sep < consts::EPSILON {
        // Center inside the polygon: push out along the deepest edge normal
        let normal = normals[best_edge];
        (normal, best_sep - radius, center - normal * radius)
    } else {
        // Center outside: clamp to the edge to find the closest feature
        let edge = v2 - v1;
        let t = (center - v1).dot(edge) / edge.length_squared();

        let closest = if t <= 0.0 {
            v1
        } else if t >= 1.0 {
            v2
        } else {
            v1 + edge * t
        };

        let d = center - closest;
        let dist_sq = d.length_squared();
        if dist_sq >= radius * radius {
            return None;
        }

        let dist = dist_sq.sqrt();
        let normal = if dist > consts::EPSILON {
            d / dist
        } else {
            normals[best_edge]
        };
        (normal, dist - radius, center - normal * radius)
    };

    Some(RawManifold::single(
        tp.transform_vector(local_normal),
        tp.transform_point(local_point),
        separation,
    ))
}

/// Segment vs circle.
///
/// One contact against the point of the segment closest to the circle
/// center.
pub fn segment_circle(
    seg: &Segment,
    ts: &Transform,
    circle: &Circle,
    tc: &Transform,
) -> Option<RawManifold> {
    let a = ts.transform_point(seg.a);
    let b = ts.transform_point(seg.b);
    let center = tc.transform_point(circle.center);

    let edge = b - a;
    let t = (center - a).dot(edge) / edge.length_squared();
    let closest = if t <= 0.0 {
        a
    } else if t >= 1.0 {
        b
    } else {
        a + edge * t
    };

    let d = center - closest;
    let dist_sq = d.length_squared();
    let radius = circle.radius;
    if dist_sq >= radius * radius {
        return None;
    }

    let dist = dist_sq.sqrt();
    // Center exactly on the segment line: fall back to a side normal
    let normal = if dist > consts::EPSILON {
        d / dist
    } else {
        edge.perp().normalize()
    };

    let surface_b = center - normal * radius;
    Some(RawManifold::single(
        normal,
        (closest + surface_b) * 0.5,
        dist - radius,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_circle_circle_overlap() {
        let a = Circle::new(1.0).unwrap();
        let b = Circle::new(1.0).unwrap();
        let ta = Transform::IDENTITY;
        let tb = Transform::from_position(Vec2::new(1.5, 0.0));

        let m = circle_circle(&a, &ta, &b, &tb).unwrap();
        assert!(approx_eq(m.normal.x, 1.0));
        assert_eq!(m.points.len(), 1);
        assert!(approx_eq(m.points[0].separation, -0.5));
        assert!(approx_eq(m.points[0].position.x, 0.75));
    }

    #[test]
    fn test_circle_circle_touching_is_no_contact() {
        let a = Circle::new(1.0).unwrap();
        let b = Circle::new(1.0).unwrap();
        let tb = Transform::from_position(Vec2::new(2.0, 0.0));
        assert!(circle_circle(&a, &Transform::IDENTITY, &b, &tb).is_none());
    }

    #[test]
    fn test_circle_circle_separated() {
        let a = Circle::new(1.0).unwrap();
        let b = Circle::new(1.0).unwrap();
        let tb = Transform::from_position(Vec2::new(3.0, 0.0));
        assert!(circle_circle(&a, &Transform::IDENTITY, &b, &tb).is_none());
    }

    #[test]
    fn test_polygon_circle_edge_region() {
        let poly = Polygon::rectangle(2.0, 2.0).unwrap();
        let circle = Circle::new(0.5).unwrap();
        // Circle overlapping the right edge of the square
        let tc = Transform::from_position(Vec2::new(1.3, 0.0));

        let m = polygon_circle(&poly, &Transform::IDENTITY, &circle, &tc).unwrap();
        assert!(approx_eq(m.normal.x, 1.0));
        assert!(approx_eq(m.points[0].separation, -0.2));
    }

    #[test]
    fn test_polygon_circle_vertex_region() {
        let poly = Polygon::rectangle(2.0, 2.0).unwrap();
        let circle = Circle::new(0.5).unwrap();
        // Circle near the top-right corner, along the diagonal
        let offset = Vec2::new(1.0, 1.0) + Vec2::new(1.0, 1.0).normalize() * 0.3;
        let tc = Transform::from_position(offset);

        let m = polygon_circle(&poly, &Transform::IDENTITY, &circle, &tc).unwrap();
        let expected_n = Vec2::new(1.0, 1.0).normalize();
        assert!(approx_eq(m.normal.x, expected_n.x));
        assert!(approx_eq(m.normal.y, expected_n.y));
        assert!(approx_eq(m.points[0].separation, 0.3 - 0.5));
    }

    #[test]
    fn test_polygon_circle_center_inside() {
        let poly = Polygon::rectangle(2.0, 2.0).unwrap();
        let circle = Circle::new(0.5).unwrap();
        let tc = Transform::from_position(Vec2::new(0.8, 0.0));

        let m = polygon_circle(&poly, &Transform::IDENTITY, &circle, &tc).unwrap();
        assert!(approx_eq(m.normal.x, 1.0));
        // Deepest edge separation -0.2, minus the radius
        assert!(approx_eq(m.points[0].separation, -0.7));
    }

    #[test]
    fn test_polygon_circle_separated() {
        let poly = Polygon::rectangle(2.0, 2.0).unwrap();
        let circle = Circle::new(0.5).unwrap();
        let tc = Transform::from_position(Vec2::new(3.0, 0.0));
        assert!(polygon_circle(&poly, &Transform::IDENTITY, &circle, &tc).is_none());
    }

    #[test]
    fn test_segment_circle() {
        let seg = Segment::new(Vec2::new(-2.0, 0.0), Vec2::new(2.0, 0.0)).unwrap();
        let circle = Circle::new(1.0).unwrap();
        let tc = Transform::from_position(Vec2::new(0.5, 0.6));

        let m = segment_circle(&seg, &Transform::IDENTITY, &circle, &tc).unwrap();
        assert!(approx_eq(m.normal.y, 1.0));
        assert!(approx_eq(m.points[0].separation, -0.4));
    }

    #[test]
    fn test_segment_circle_past_endpoint() {
        let seg = Segment::new(Vec2::new(-2.0, 0.0), Vec2::new(2.0, 0.0)).unwrap();
        let circle = Circle::new(1.0).unwrap();
        // Closest feature is the endpoint at (2, 0)
        let tc = Transform::from_position(Vec2::new(2.6, 0.0));

        let m = segment_circle(&seg, &Transform::IDENTITY, &circle, &tc).unwrap();
        assert!(approx_eq(m.normal.x, 1.0));
        assert!(approx_eq(m.points[0].separation, -0.4));
    }
}
