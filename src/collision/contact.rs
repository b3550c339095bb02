use crate::math::Vec2;

/// Maximum number of contact points in a 2D manifold
pub const MAX_CONTACT_POINTS: usize = 2;

/// A handle to a body in the physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub u32);

impl BodyHandle {
    /// Invalid/null body handle
    pub const INVALID: Self = Self(u32::MAX);

    /// Creates a new body handle
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the index of this handle
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns true if this handle is valid
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

impl Default for BodyHandle {
    fn default() -> Self {
        Self::INVALID
    }
}

/// Identifies one fixture: a body handle plus the fixture's index within
/// that body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FixtureKey {
    /// Owning body
    pub body: BodyHandle,
    /// Index into the body's fixture list
    pub fixture: usize,
}

impl FixtureKey {
    /// Creates a new fixture key
    pub fn new(body: BodyHandle, fixture: usize) -> Self {
        Self { body, fixture }
    }
}

/// An ordered fixture-pair identifier used to key manifolds across steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContactPair {
    /// First fixture (always the smaller key)
    pub a: FixtureKey,
    /// Second fixture (always the larger key)
    pub b: FixtureKey,
}

impl ContactPair {
    /// Creates a new contact pair, ensuring consistent ordering
    pub fn new(a: FixtureKey, b: FixtureKey) -> Self {
        if a <= b {
            Self { a, b }
        } else {
            Self { a: b, b: a }
        }
    }
}

/// A stable structural identifier for a contact point.
///
/// Warm-start impulses are carried across steps by matching feature ids,
/// not point positions: the id encodes which shape features (reference
/// edge, incident vertex, clip side) generated the point, so it stays
/// stable while the bodies slide against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeatureId(u32);

impl FeatureId {
    /// The id used by single-point manifolds (circle contacts)
    pub const SINGLE: Self = Self(u32::MAX);

    /// Builds an id from a reference edge index, an incident vertex index
    /// and whether the reference shape is the pair's second fixture
    pub fn clipped(reference_edge: usize, incident_vertex: usize, flipped: bool) -> Self {
        let edge = (reference_edge as u32) & 0x7fff;
        let vertex = (incident_vertex as u32) & 0x7fff;
        let flip = u32::from(flipped);
        Self((flip << 30) | (edge << 15) | vertex)
    }

    /// Builds an id for a contact generated at a specific polygon vertex
    pub fn vertex(index: usize) -> Self {
        Self(0x8000_0000 | (index as u32))
    }
}

/// A single contact point between two fixtures
#[derive(Debug, Clone, Copy)]
pub struct ContactPoint {
    /// Contact position in world space
    pub position: Vec2,
    /// Signed separation along the manifold normal; negative when
    /// penetrating. Narrow-phase only emits penetrating points.
    pub separation: f64,
    /// Accumulated normal impulse (for warm starting)
    pub normal_impulse: f64,
    /// Accumulated tangent (friction) impulse (for warm starting)
    pub tangent_impulse: f64,
    /// Stable identity of this point across steps
    pub feature: FeatureId,
}

impl ContactPoint {
    /// Creates a new contact point with zeroed impulses
    pub fn new(position: Vec2, separation: f64, feature: FeatureId) -> Self {
        Self {
            position,
            separation,
            normal_impulse: 0.0,
            tangent_impulse: 0.0,
            feature,
        }
    }
}

/// A contact manifold storing up to two contact points between a fixture
/// pair, along with the shared contact normal and combined material
/// coefficients
#[derive(Debug, Clone)]
pub struct ContactManifold {
    /// The fixture pair this manifold belongs to
    pub pair: ContactPair,
    /// Shared contact normal, pointing from fixture `pair.a` toward
    /// fixture `pair.b`
    pub normal: Vec2,
    /// Contact points
    pub points: [Option<ContactPoint>; MAX_CONTACT_POINTS],
    /// Number of active contact points
    pub num_points: usize,
    /// Combined friction coefficient
    pub friction: f64,
    /// Combined restitution coefficient
    pub restitution: f64,
    /// True if either fixture is a sensor (no solver response)
    pub sensor: bool,
}

impl ContactManifold {
    /// Creates a new empty contact manifold
    pub fn new(pair: ContactPair, normal: Vec2) -> Self {
        Self {
            pair,
            normal,
            points: [None; MAX_CONTACT_POINTS],
            num_points: 0,
            friction: 0.0,
            restitution: 0.0,
            sensor: false,
        }
    }

    /// Adds a contact point to the manifold (ignored when full)
    pub fn add_point(&mut self, point: ContactPoint) {
        if self.num_points < MAX_CONTACT_POINTS {
            self.points[self.num_points] = Some(point);
            self.num_points += 1;
        }
    }

    /// Iterates over contact points
    pub fn iter(&self) -> impl Iterator<Item = &ContactPoint> {
        self.points.iter().flatten()
    }

    /// Iterates mutably over contact points
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ContactPoint> {
        self.points.iter_mut().flatten()
    }

    /// Returns the number of active contact points
    pub fn len(&self) -> usize {
        self.num_points
    }

    /// Returns true if the manifold has no points
    pub fn is_empty(&self) -> bool {
        self.num_points == 0
    }

    /// Carries accumulated impulses over from the previous step's
    /// manifold for points whose feature ids match
    pub fn warm_start(&mut self, old: &ContactManifold) {
        for point in self.points.iter_mut().flatten() {
            for old_point in old.points.iter().flatten() {
                if point.feature == old_point.feature {
                    point.normal_impulse = old_point.normal_impulse;
                    point.tangent_impulse = old_point.tangent_impulse;
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> ContactPair {
        ContactPair::new(
            FixtureKey::new(BodyHandle::new(0), 0),
            FixtureKey::new(BodyHandle::new(1), 0),
        )
    }

    #[test]
    fn test_pair_ordering() {
        let a = FixtureKey::new(BodyHandle::new(2), 0);
        let b = FixtureKey::new(BodyHandle::new(1), 3);

        let p1 = ContactPair::new(a, b);
        let p2 = ContactPair::new(b, a);
        assert_eq!(p1, p2);
        assert_eq!(p1.a.body, BodyHandle::new(1));
    }

    #[test]
    fn test_manifold_point_cap() {
        let mut manifold = ContactManifold::new(pair(), Vec2::X);
        for i in 0..4 {
            manifold.add_point(ContactPoint::new(Vec2::ZERO, -0.1, FeatureId::vertex(i)));
        }
        assert_eq!(manifold.len(), MAX_CONTACT_POINTS);
    }

    #[test]
    fn test_warm_start_matches_features() {
        let mut old = ContactManifold::new(pair(), Vec2::X);
        let mut p = ContactPoint::new(Vec2::ZERO, -0.1, FeatureId::clipped(1, 2, false));
        p.normal_impulse = 3.0;
        p.tangent_impulse = -0.5;
        old.add_point(p);

        let mut new = ContactManifold::new(pair(), Vec2::X);
        new.add_point(ContactPoint::new(
            Vec2::new(0.1, 0.0),
            -0.05,
            FeatureId::clipped(1, 2, false),
        ));
        new.add_point(ContactPoint::new(
            Vec2::new(0.2, 0.0),
            -0.05,
            FeatureId::clipped(1, 3, false),
        ));

        new.warm_start(&old);

        let points: Vec<_> = new.iter().collect();
        assert_eq!(points[0].normal_impulse, 3.0);
        assert_eq!(points[0].tangent_impulse, -0.5);
        // Unmatched point keeps zero impulses
        assert_eq!(points[1].normal_impulse, 0.0);
    }

    #[test]
    fn test_feature_id_distinct() {
        assert_ne!(
            FeatureId::clipped(0, 1, false),
            FeatureId::clipped(0, 1, true)
        );
        assert_ne!(FeatureId::clipped(0, 1, false), FeatureId::vertex(1));
        assert_ne!(FeatureId::vertex(0), FeatureId::SINGLE);
    }
}
