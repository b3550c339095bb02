use std::collections::HashMap;

use crate::collision::{
    collide, BodyHandle, ContactManifold, ContactPair, ContactPoint, FixtureKey, SweepAndPrune,
};
use crate::dynamics::{integrate_positions, integrate_velocities, Body, Fixture};
use crate::geometry::{Ray, RayHit};
use crate::math::Vec2;
use crate::solver::{solve_position_constraints, ContactSolver, SolverConfig};

/// Configuration for the physics world
#[derive(Debug, Clone)]
pub struct WorldConfig {
    /// Gravity vector
    pub gravity: Vec2,
    /// Solver configuration
    pub solver: SolverConfig,
    /// Fixed timestep used by [`World::update`]
    pub fixed_timestep: f64,
    /// Maximum fixed steps a single `update` call may take; excess
    /// elapsed time is dropped to avoid a catch-up spiral
    pub max_steps_per_update: usize,
    /// Fat-AABB margin for the broad-phase
    pub broad_phase_margin: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, -9.81),
            solver: SolverConfig::default(),
            fixed_timestep: 1.0 / 60.0,
            max_steps_per_update: 5,
            broad_phase_margin: SweepAndPrune::DEFAULT_MARGIN,
        }
    }
}

/// Data delivered to a [`ContactListener`] callback
#[derive(Debug, Clone, Copy)]
pub struct ContactEvent {
    /// The fixture pair in contact
    pub pair: ContactPair,
    /// Contact normal, pointing from `pair.a` toward `pair.b`
    pub normal: Vec2,
    /// True if either fixture is a sensor
    pub sensor: bool,
}

/// Receives contact lifecycle callbacks, synchronously during
/// [`World::step`].
///
/// Listeners get event data rather than world access, so a callback
/// cannot re-enter the stepping world.
pub trait ContactListener {
    /// A fixture pair started touching this step
    fn begin_contact(&mut self, event: &ContactEvent);
    /// A fixture pair kept touching this step
    fn persist_contact(&mut self, event: &ContactEvent);
    /// A fixture pair stopped touching this step
    fn end_contact(&mut self, event: &ContactEvent);
}

/// Receives one callback after each completed fixed step
pub trait StepListener {
    /// Invoked once per completed step with the step's dt
    fn post_step(&mut self, dt: f64);
}

/// Vetoes individual fixtures during a raycast before they are tested
pub trait RaycastFilter {
    /// Return false to skip this fixture
    fn allow(&self, body: BodyHandle, fixture_index: usize, fixture: &Fixture) -> bool;
}

/// One raycast intersection
#[derive(Debug, Clone, Copy)]
pub struct RaycastResult {
    /// The body that was hit
    pub body: BodyHandle,
    /// Index of the hit fixture within the body
    pub fixture: usize,
    /// World-space hit point
    pub point: Vec2,
    /// Unit surface normal at the hit point
    pub normal: Vec2,
    /// Distance from the ray origin (>= 0)
    pub distance: f64,
}

/// The simulation root: owns the body set, runs the per-step pipeline
/// (broad-phase, narrow-phase, listener dispatch, solve, integrate) and
/// answers raycast queries.
///
/// # Stepping contract
///
/// [`step`](Self::step) advances exactly one fixed increment of `dt`.
/// [`update`](Self::update) is the accumulator-driven variant: it takes
/// a variable elapsed time, steps internally in
/// [`WorldConfig::fixed_timestep`] increments and carries the remainder
/// to the next call.
///
/// Bodies may be added or removed between steps only; the world is not
/// safe for concurrent use without external serialization.
pub struct World {
    config: WorldConfig,
    bodies: Vec<Body>,
    free_bodies: Vec<usize>,
    broad_phase: SweepAndPrune,
    /// Manifolds from the previous step, keyed by fixture pair; the
    /// source of warm-start impulses and begin/persist/end transitions
    manifolds: HashMap<ContactPair, ContactManifold>,
    solver: ContactSolver,
    contact_listener: Option<Box<dyn ContactListener>>,
    step_listener: Option<Box<dyn StepListener>>,
    accumulator: f64,
    time: f64,
}

impl Default for World {
    fn default() -> Self {
        Self::new(WorldConfig::default())
    }
}

impl World {
    /// Creates a new physics world with the given configuration
    pub fn new(config: WorldConfig) -> Self {
        Self {
            solver: ContactSolver::new(config.solver),
            broad_phase: SweepAndPrune::with_margin(config.broad_phase_margin),
            config,
            bodies: Vec::new(),
            free_bodies: Vec::new(),
            manifolds: HashMap::new(),
            contact_listener: None,
            step_listener: None,
            accumulator: 0.0,
            time: 0.0,
        }
    }

    /// Adds a body and returns its handle
    pub fn add_body(&mut self, mut body: Body) -> BodyHandle {
        let index = match self.free_bodies.pop() {
            Some(index) => index,
            None => {
                self.bodies.push(Body::default());
                self.bodies.len() - 1
            }
        };

        let handle = BodyHandle::new(index as u32);
        body.handle = handle;

        let transform = body.transform();
        for (i, fixture) in body.fixtures().iter().enumerate() {
            self.broad_phase
                .insert(FixtureKey::new(handle, i), fixture.world_aabb(&transform));
        }

        self.bodies[index] = body;
        handle
    }

    /// Removes a body from the world.
    ///
    /// Outstanding manifolds involving the body are dropped; its handle
    /// becomes invalid and may later be reused.
    pub fn remove_body(&mut self, handle: BodyHandle) {
        let index = handle.index();
        if index >= self.bodies.len() || self.bodies[index].handle() != handle {
            return;
        }

        for i in 0..self.bodies[index].fixtures().len() {
            self.broad_phase.remove(FixtureKey::new(handle, i));
        }
        self.manifolds
            .retain(|pair, _| pair.a.body != handle && pair.b.body != handle);

        self.bodies[index] = Body::default();
        self.free_bodies.push(index);
    }

    /// Gets a reference to a body
    pub fn body(&self, handle: BodyHandle) -> Option<&Body> {
        self.bodies
            .get(handle.index())
            .filter(|b| b.handle() == handle)
    }

    /// Gets a mutable reference to a body.
    ///
    /// Pose and velocity edits take effect at the next step; fixture
    /// AABBs are refreshed at the start of collision detection.
    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        self.bodies
            .get_mut(handle.index())
            .filter(|b| b.handle() == handle)
    }

    /// Returns an iterator over all live body handles
    pub fn bodies(&self) -> impl Iterator<Item = BodyHandle> + '_ {
        self.bodies
            .iter()
            .filter(|b| b.handle().is_valid())
            .map(|b| b.handle())
    }

    /// Returns the number of bodies in the world
    pub fn num_bodies(&self) -> usize {
        self.bodies.len() - self.free_bodies.len()
    }

    /// Sets the gravity vector
    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.config.gravity = gravity;
    }

    /// Gets the gravity vector
    pub fn gravity(&self) -> Vec2 {
        self.config.gravity
    }

    /// Installs the contact listener, replacing any previous one
    pub fn set_contact_listener(&mut self, listener: Box<dyn ContactListener>) {
        self.contact_listener = Some(listener);
    }

    /// Installs the step listener, replacing any previous one
    pub fn set_step_listener(&mut self, listener: Box<dyn StepListener>) {
        self.step_listener = Some(listener);
    }

    /// Returns the accumulated simulation time
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Advances the simulation by a variable elapsed time using the
    /// fixed-timestep accumulator (see the type-level docs)
    pub fn update(&mut self, elapsed: f64) {
        if elapsed <= 0.0 {
            return;
        }

        let dt = self.config.fixed_timestep;
        let cap = dt * self.config.max_steps_per_update as f64;
        self.accumulator = (self.accumulator + elapsed).min(cap);

        while self.accumulator >= dt {
            self.step(dt);
            self.accumulator -= dt;
        }
    }

    /// Advances the simulation by exactly one step of `dt`.
    ///
    /// Pipeline: integrate velocities (gravity, forces, damping) ->
    /// broad-phase -> narrow-phase -> contact listener dispatch ->
    /// velocity solve -> integrate positions -> position correction ->
    /// step listener.
    pub fn step(&mut self, dt: f64) {
        if dt <= 0.0 {
            return;
        }

        for body in &mut self.bodies {
            if body.handle().is_valid() {
                integrate_velocities(body, self.config.gravity, dt);
            }
        }

        let mut active = self.detect_collisions();

        self.solver.prepare(&active, &self.bodies, dt);
        self.solver.warm_start(&mut self.bodies);
        self.solver.solve_velocity(&mut self.bodies);

        for body in &mut self.bodies {
            if body.handle().is_valid() {
                integrate_positions(body, dt);
                body.clear_forces();
            }
        }

        solve_position_constraints(&active, &mut self.bodies, self.solver.config());

        self.solver.store_impulses(&mut active);
        self.manifolds = active.into_iter().map(|m| (m.pair, m)).collect();

        self.time += dt;

        if let Some(listener) = self.step_listener.as_mut() {
            listener.post_step(dt);
        }
    }

    /// Runs broad- and narrow-phase, dispatches contact events, and
    /// returns this step's manifolds (warm-started from the previous
    /// step where feature ids match)
    fn detect_collisions(&mut self) -> Vec<ContactManifold> {
        // Refresh proxies: bodies may have moved by integration or by
        // direct mutation between steps
        for body in &self.bodies {
            let handle = body.handle();
            if !handle.is_valid() {
                continue;
            }
            let transform = body.transform();
            for (i, fixture) in body.fixtures().iter().enumerate() {
                self.broad_phase
                    .update(FixtureKey::new(handle, i), fixture.world_aabb(&transform));
            }
        }

        let mut active: Vec<ContactManifold> = Vec::new();
        let mut begin_events: Vec<ContactEvent> = Vec::new();
        let mut persist_events: Vec<ContactEvent> = Vec::new();

        for (key_a, key_b) in self.broad_phase.query_pairs() {
            let pair = ContactPair::new(key_a, key_b);

            let body_a = &self.bodies[pair.a.body.index()];
            let body_b = &self.bodies[pair.b.body.index()];
            if !body_a.handle().is_valid() || !body_b.handle().is_valid() {
                continue;
            }
            if !body_a.is_dynamic() && !body_b.is_dynamic() {
                continue;
            }

            let Some(fixture_a) = body_a.fixture(pair.a.fixture) else {
                continue;
            };
            let Some(fixture_b) = body_b.fixture(pair.b.fixture) else {
                continue;
            };

            let transform_a = body_a.transform();
            let transform_b = body_b.transform();

            let Some(raw) = collide(&fixture_a.shape, &transform_a, &fixture_b.shape, &transform_b)
            else {
                continue;
            };

            let mut manifold = ContactManifold::new(pair, raw.normal);
            manifold.friction = (fixture_a.friction * fixture_b.friction).sqrt();
            manifold.restitution = fixture_a.restitution.max(fixture_b.restitution);
            manifold.sensor = fixture_a.sensor || fixture_b.sensor;
            for point in &raw.points {
                manifold.add_point(ContactPoint::new(
                    point.position,
                    point.separation,
                    point.feature,
                ));
            }

            let event = ContactEvent {
                pair,
                normal: manifold.normal,
                sensor: manifold.sensor,
            };
            if let Some(old) = self.manifolds.get(&pair) {
                manifold.warm_start(old);
                persist_events.push(event);
            } else {
                begin_events.push(event);
            }

            active.push(manifold);
        }

        // End events: pairs that existed last step but produced no
        // manifold this step
        let mut end_events: Vec<ContactEvent> = Vec::new();
        for (pair, old) in &self.manifolds {
            if !active.iter().any(|m| m.pair == *pair) {
                end_events.push(ContactEvent {
                    pair: *pair,
                    normal: old.normal,
                    sensor: old.sensor,
                });
            }
        }

        if let Some(listener) = self.contact_listener.as_mut() {
            for event in &begin_events {
                listener.begin_contact(event);
            }
            for event in &persist_events {
                listener.persist_contact(event);
            }
            for event in &end_events {
                listener.end_contact(event);
            }
        }

        active
    }

    /// Casts a ray against every eligible fixture.
    ///
    /// With `want_all = false` the returned list holds at most the
    /// single minimum-distance hit; every fixture is still tested, so
    /// the result is the true closest. With `want_all = true` every
    /// boundary crossing within range is returned, unordered; sort by
    /// [`RaycastResult::distance`] if order matters.
    ///
    /// `max_length <= 0` means unbounded. An empty list means no hit.
    pub fn raycast(
        &self,
        ray: &Ray,
        max_length: f64,
        ignore_sensors: bool,
        want_all: bool,
    ) -> Vec<RaycastResult> {
        self.raycast_with_filter(ray, max_length, ignore_sensors, want_all, None)
    }

    /// [`raycast`](Self::raycast) with a per-fixture veto filter
    pub fn raycast_with_filter(
        &self,
        ray: &Ray,
        max_length: f64,
        ignore_sensors: bool,
        want_all: bool,
        filter: Option<&dyn RaycastFilter>,
    ) -> Vec<RaycastResult> {
        let mut results = Vec::new();
        let mut closest: Option<RaycastResult> = None;
        let mut hits = Vec::new();

        for body in &self.bodies {
            let handle = body.handle();
            if !handle.is_valid() {
                continue;
            }
            let transform = body.transform();

            for (i, fixture) in body.fixtures().iter().enumerate() {
                if ignore_sensors && fixture.sensor {
                    continue;
                }
                if let Some(filter) = filter {
                    if !filter.allow(handle, i, fixture) {
                        continue;
                    }
                }

                if want_all {
                    hits.clear();
                    fixture
                        .shape
                        .raycast_all(ray, max_length, &transform, &mut hits);
                    for hit in &hits {
                        results.push(to_result(handle, i, hit));
                    }
                } else if let Some(hit) = fixture.raycast(ray, max_length, &transform) {
                    // Keep scanning: only a full pass guarantees the
                    // true minimum-distance hit
                    if closest.is_none() || hit.distance < closest.unwrap().distance {
                        closest = Some(to_result(handle, i, &hit));
                    }
                }
            }
        }

        if !want_all {
            results.extend(closest);
        }
        results
    }

    /// Convenience closest-hit query
    pub fn raycast_closest(
        &self,
        ray: &Ray,
        max_length: f64,
        ignore_sensors: bool,
    ) -> Option<RaycastResult> {
        self.raycast(ray, max_length, ignore_sensors, false)
            .into_iter()
            .next()
    }
}

fn to_result(body: BodyHandle, fixture: usize, hit: &RayHit) -> RaycastResult {
    RaycastResult {
        body,
        fixture,
        point: hit.point,
        normal: hit.normal,
        distance: hit.distance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::MassType;
    use crate::geometry::Shape;
    use approx::assert_relative_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    const DT: f64 = 1.0 / 60.0;

    fn dynamic_circle(at: Vec2, radius: f64) -> Body {
        Body::new()
            .with_position(at)
            .with_fixture(Fixture::new(Shape::circle(radius).unwrap()))
            .with_mass(MassType::Normal)
            .unwrap()
    }

    fn static_rect(at: Vec2, w: f64, h: f64) -> Body {
        Body::new()
            .with_position(at)
            .with_fixture(Fixture::new(Shape::rectangle(w, h).unwrap()))
    }

    #[test]
    fn test_world_creation() {
        let world = World::default();
        assert_eq!(world.num_bodies(), 0);
        assert_relative_eq!(world.time(), 0.0);
    }

    #[test]
    fn test_add_remove_body() {
        let mut world = World::default();
        let handle = world.add_body(dynamic_circle(Vec2::new(0.0, 5.0), 1.0));

        assert_eq!(world.num_bodies(), 1);
        assert!(world.body(handle).is_some());

        world.remove_body(handle);
        assert_eq!(world.num_bodies(), 0);
        assert!(world.body(handle).is_none());
    }

    #[test]
    fn test_gravity_fall() {
        let mut world = World::default();
        world.set_gravity(Vec2::new(0.0, -10.0));
        let handle = world.add_body(dynamic_circle(Vec2::new(0.0, 10.0), 1.0));

        for _ in 0..60 {
            world.step(DT);
        }

        let body = world.body(handle).unwrap();
        assert!(body.position.y < 10.0);
        assert!(body.linear_velocity.y < 0.0);
    }

    #[test]
    fn test_infinite_body_velocity_invariant() {
        // An infinite-mass body never changes velocity, under gravity or
        // after being struck
        let mut world = World::default();
        world.set_gravity(Vec2::new(0.0, -10.0));

        let ground = world.add_body(static_rect(Vec2::ZERO, 4.0, 1.0));
        world.add_body(dynamic_circle(Vec2::new(0.0, 3.0), 0.5));

        for _ in 0..300 {
            world.step(DT);
        }

        let body = world.body(ground).unwrap();
        assert_eq!(body.linear_velocity, Vec2::ZERO);
        assert_eq!(body.angular_velocity, 0.0);
        assert_eq!(body.position, Vec2::ZERO);
    }

    #[test]
    fn test_falling_box_settles_on_ground() {
        let mut world = World::default();
        world.set_gravity(Vec2::new(0.0, -10.0));

        // 10x10 infinite-mass ground centered at the origin (top at y=5)
        world.add_body(Body::new().with_fixture(
            Fixture::new(Shape::rectangle(10.0, 10.0).unwrap()).with_restitution(0.0),
        ));

        // 1x1 box falling from above
        let falling = world.add_body(
            Body::new()
                .with_position(Vec2::new(0.0, 7.0))
                .with_fixture(
                    Fixture::new(Shape::rectangle(1.0, 1.0).unwrap()).with_restitution(0.0),
                )
                .with_mass(MassType::Normal)
                .unwrap(),
        );

        for _ in 0..600 {
            world.step(DT);
        }

        let body = world.body(falling).unwrap();
        let slop = world.solver.config().slop;

        // At rest on top of the ground (center at 5.5), not penetrating
        // beyond the solver slop
        assert!(body.linear_velocity.length() < 0.05);
        assert!(body.position.y > 5.5 - 2.0 * slop);
        assert!(body.position.y < 5.6);
    }

    #[test]
    fn test_elastic_circles_exchange_velocities() {
        let mut world = World::default();
        world.set_gravity(Vec2::ZERO);

        let make = |x: f64, vx: f64| {
            Body::new()
                .with_position(Vec2::new(x, 0.0))
                .with_linear_velocity(Vec2::new(vx, 0.0))
                .with_fixture(
                    Fixture::new(Shape::circle(0.5).unwrap()).with_restitution(1.0),
                )
                .with_mass(MassType::Normal)
                .unwrap()
        };
        let a = world.add_body(make(-2.0, 2.0));
        let b = world.add_body(make(2.0, -2.0));

        for _ in 0..120 {
            world.step(DT);
        }

        // Equal masses, head-on, e = 1: velocities swap
        let va = world.body(a).unwrap().linear_velocity.x;
        let vb = world.body(b).unwrap().linear_velocity.x;
        assert_relative_eq!(va, -2.0, epsilon = 0.1);
        assert_relative_eq!(vb, 2.0, epsilon = 0.1);
    }

    #[test]
    fn test_update_accumulates_fixed_steps() {
        let mut world = World::default();
        world.set_gravity(Vec2::new(0.0, -10.0));
        world.add_body(dynamic_circle(Vec2::new(0.0, 10.0), 1.0));

        // 2.5 fixed steps of elapsed time: two steps now, remainder kept
        world.update(DT * 2.5);
        assert_relative_eq!(world.time(), DT * 2.0, epsilon = 1e-9);

        // The carried remainder plus 0.6 more completes the third step
        world.update(DT * 0.6);
        assert_relative_eq!(world.time(), DT * 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_raycast_closest_and_all_agree() {
        let mut world = World::default();
        world.add_body(static_rect(Vec2::new(5.0, 0.0), 1.0, 4.0));
        world.add_body(static_rect(Vec2::new(9.0, 0.0), 1.0, 4.0));

        let ray = Ray::new(Vec2::ZERO, Vec2::X).unwrap();

        let closest = world.raycast(&ray, 0.0, false, false);
        assert_eq!(closest.len(), 1);
        assert_relative_eq!(closest[0].distance, 4.5, epsilon = 1e-9);

        let mut all = world.raycast(&ray, 0.0, false, true);
        assert_eq!(all.len(), 4); // entry and exit of both boxes

        // Sorting the "all" list ascending by distance yields the same
        // first element as the closest query
        all.sort_by(|x, y| x.distance.partial_cmp(&y.distance).unwrap());
        assert_relative_eq!(all[0].distance, closest[0].distance, epsilon = 1e-9);
        assert_eq!(all[0].body, closest[0].body);
    }

    #[test]
    fn test_raycast_max_length_and_miss() {
        let mut world = World::default();
        world.add_body(static_rect(Vec2::new(5.0, 0.0), 1.0, 4.0));

        let ray = Ray::new(Vec2::ZERO, Vec2::X).unwrap();
        assert!(world.raycast(&ray, 2.0, false, false).is_empty());

        let miss = Ray::new(Vec2::ZERO, Vec2::Y).unwrap();
        assert!(world.raycast(&miss, 0.0, false, true).is_empty());
    }

    #[test]
    fn test_raycast_sensor_exclusion() {
        let mut world = World::default();
        let sensor = world.add_body(
            Body::new().with_position(Vec2::new(3.0, 0.0)).with_fixture(
                Fixture::new(Shape::circle(1.0).unwrap()).with_sensor(true),
            ),
        );
        world.add_body(static_rect(Vec2::new(8.0, 0.0), 1.0, 4.0));

        let ray = Ray::new(Vec2::ZERO, Vec2::X).unwrap();

        // Sensors included: the sensor circle is the closest hit
        let with_sensors = world.raycast_closest(&ray, 0.0, false).unwrap();
        assert_eq!(with_sensors.body, sensor);

        // Sensors excluded: the wall behind it is hit instead
        let without = world.raycast_closest(&ray, 0.0, true).unwrap();
        assert_ne!(without.body, sensor);
        assert_relative_eq!(without.distance, 7.5, epsilon = 1e-9);
    }

    #[test]
    fn test_raycast_filter_veto() {
        struct SkipBody(BodyHandle);
        impl RaycastFilter for SkipBody {
            fn allow(&self, body: BodyHandle, _: usize, _: &Fixture) -> bool {
                body != self.0
            }
        }

        let mut world = World::default();
        let near = world.add_body(static_rect(Vec2::new(4.0, 0.0), 1.0, 4.0));
        let far = world.add_body(static_rect(Vec2::new(8.0, 0.0), 1.0, 4.0));

        let ray = Ray::new(Vec2::ZERO, Vec2::X).unwrap();
        let filter = SkipBody(near);

        let hit = world
            .raycast_with_filter(&ray, 0.0, false, false, Some(&filter))
            .into_iter()
            .next()
            .unwrap();
        assert_eq!(hit.body, far);
    }

    #[test]
    fn test_contact_listener_lifecycle() {
        #[derive(Default)]
        struct Counts {
            begin: usize,
            persist: usize,
            end: usize,
        }

        struct Recorder(Rc<RefCell<Counts>>);
        impl ContactListener for Recorder {
            fn begin_contact(&mut self, _: &ContactEvent) {
                self.0.borrow_mut().begin += 1;
            }
            fn persist_contact(&mut self, _: &ContactEvent) {
                self.0.borrow_mut().persist += 1;
            }
            fn end_contact(&mut self, _: &ContactEvent) {
                self.0.borrow_mut().end += 1;
            }
        }

        let counts = Rc::new(RefCell::new(Counts::default()));

        let mut world = World::default();
        world.set_gravity(Vec2::ZERO);
        world.set_contact_listener(Box::new(Recorder(Rc::clone(&counts))));

        // A ball passing through a sensor region
        world.add_body(
            Body::new().with_position(Vec2::new(3.0, 0.0)).with_fixture(
                Fixture::new(Shape::circle(1.0).unwrap()).with_sensor(true),
            ),
        );
        world.add_body(
            dynamic_circle(Vec2::ZERO, 0.5).with_linear_velocity(Vec2::new(4.0, 0.0)),
        );

        for _ in 0..120 {
            world.step(DT);
        }

        let counts = counts.borrow();
        assert_eq!(counts.begin, 1);
        assert!(counts.persist > 0);
        assert_eq!(counts.end, 1);
    }

    #[test]
    fn test_step_listener_invoked() {
        struct Counter(Rc<RefCell<usize>>);
        impl StepListener for Counter {
            fn post_step(&mut self, _: f64) {
                *self.0.borrow_mut() += 1;
            }
        }

        let count = Rc::new(RefCell::new(0));
        let mut world = World::default();
        world.set_step_listener(Box::new(Counter(Rc::clone(&count))));

        for _ in 0..10 {
            world.step(DT);
        }
        assert_eq!(*count.borrow(), 10);
    }

    #[test]
    fn test_sensor_produces_no_response() {
        let mut world = World::default();
        world.set_gravity(Vec2::ZERO);

        world.add_body(
            Body::new().with_position(Vec2::new(3.0, 0.0)).with_fixture(
                Fixture::new(Shape::circle(1.0).unwrap()).with_sensor(true),
            ),
        );
        let ball = world.add_body(
            dynamic_circle(Vec2::ZERO, 0.5).with_linear_velocity(Vec2::new(4.0, 0.0)),
        );

        for _ in 0..120 {
            world.step(DT);
        }

        // The ball sailed straight through the sensor
        let body = world.body(ball).unwrap();
        assert_relative_eq!(body.linear_velocity.x, 4.0, epsilon = 1e-9);
        assert!(body.position.x > 7.0);
    }
}
