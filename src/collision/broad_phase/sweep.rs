use std::collections::HashMap;

use crate::collision::contact::FixtureKey;
use crate::geometry::Aabb;
use crate::math::Vec2;

/// A sweep-and-prune broad-phase over per-fixture AABBs.
///
/// Proxies carry fat AABBs (expanded by a margin) so slow-moving fixtures
/// do not need re-insertion every step. Candidate pairs come from sorting
/// proxies on the x axis and sweeping an active window; the y axis is
/// confirmed per candidate. The result is conservative: every truly
/// overlapping pair is reported, plus false positives the narrow-phase
/// discards.
#[derive(Debug)]
pub struct SweepAndPrune {
    /// Fat AABB per fixture
    proxies: HashMap<FixtureKey, Aabb>,
    /// Proxy keys in near-sorted x order; kept across steps so the sort
    /// in `query_pairs` benefits from temporal coherence
    order: Vec<FixtureKey>,
    /// AABB expansion margin
    margin: f64,
}

impl Default for SweepAndPrune {
    fn default() -> Self {
        Self::new()
    }
}

impl SweepAndPrune {
    /// Default fat-AABB margin in world units
    pub const DEFAULT_MARGIN: f64 = 0.1;

    /// Creates an empty broad-phase with the default margin
    pub fn new() -> Self {
        Self::with_margin(Self::DEFAULT_MARGIN)
    }

    /// Creates an empty broad-phase with a specific margin
    pub fn with_margin(margin: f64) -> Self {
        Self {
            proxies: HashMap::new(),
            order: Vec::new(),
            margin,
        }
    }

    /// Number of proxies currently tracked
    pub fn len(&self) -> usize {
        self.proxies.len()
    }

    /// Returns true if no proxies are tracked
    pub fn is_empty(&self) -> bool {
        self.proxies.is_empty()
    }

    /// Inserts a fixture with its tight AABB
    pub fn insert(&mut self, key: FixtureKey, aabb: Aabb) {
        if self.proxies.insert(key, aabb.expand(self.margin)).is_none() {
            self.order.push(key);
        }
    }

    /// Removes a fixture
    pub fn remove(&mut self, key: FixtureKey) {
        if self.proxies.remove(&key).is_some() {
            self.order.retain(|&k| k != key);
        }
    }

    /// Updates a fixture's AABB. The stored fat AABB is only replaced
    /// when the tight AABB has escaped it, which keeps update churn low
    /// for resting bodies.
    pub fn update(&mut self, key: FixtureKey, aabb: Aabb) {
        match self.proxies.get_mut(&key) {
            Some(fat) => {
                if !fat.contains_aabb(aabb) {
                    *fat = aabb.expand(self.margin);
                }
            }
            None => self.insert(key, aabb),
        }
    }

    /// Returns the stored fat AABB for a fixture, if tracked
    pub fn proxy_aabb(&self, key: FixtureKey) -> Option<Aabb> {
        self.proxies.get(&key).copied()
    }

    /// Produces the candidate pair set.
    ///
    /// Pairs whose fixtures belong to the same body are suppressed; the
    /// pipeline never collides a body with itself.
    pub fn query_pairs(&mut self) -> Vec<(FixtureKey, FixtureKey)> {
        let Self { proxies, order, .. } = self;

        // Adaptive sort: near-sorted from the previous step, so this is
        // close to a single linear pass
        order.sort_by(|a, b| {
            proxies[a]
                .min
                .x
                .partial_cmp(&proxies[b].min.x)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut pairs = Vec::new();
        for i in 0..order.len() {
            let key_a = order[i];
            let aabb_a = proxies[&key_a];

            for &key_b in &order[i + 1..] {
                let aabb_b = proxies[&key_b];

                // Past the end of A's x interval: nothing further overlaps
                if aabb_b.min.x > aabb_a.max.x {
                    break;
                }

                if key_a.body == key_b.body {
                    continue;
                }

                if aabb_a.min.y <= aabb_b.max.y && aabb_a.max.y >= aabb_b.min.y {
                    pairs.push((key_a, key_b));
                }
            }
        }
        pairs
    }

    /// Returns fixtures whose fat AABB the ray may pass through within
    /// `max_distance` (conservative; exact tests follow in the caller)
    pub fn query_ray(&self, origin: Vec2, direction: Vec2, max_distance: f64) -> Vec<FixtureKey> {
        let max = if max_distance <= 0.0 {
            f64::INFINITY
        } else {
            max_distance
        };

        self.proxies
            .iter()
            .filter(|(_, aabb)| {
                aabb.ray_intersection(origin, direction)
                    .is_some_and(|(t_min, _)| t_min <= max)
            })
            .map(|(&key, _)| key)
            .collect()
    }
}
