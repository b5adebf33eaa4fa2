//! Sensor engine root: registration, throttling, per-cycle orchestration
//!
//! Based on Game Engine Architecture 3rd Edition, Section 13.3: the broad
//! phase (grid buckets) narrows the candidate set, the narrow phase confirms
//! pairs, and the double-buffered tracker turns per-cycle overlap into
//! begin/end notifications delivered to shape owners.
//!
//! Registrations live in a slotmap arena; categories, footprint override,
//! and cached boundary are fields of one record, so removing a record can
//! never leave a stale override or category entry behind.

use log::{debug, warn};
use rustc_hash::{FxHashMap, FxHashSet};
use slotmap::{new_key_type, SlotMap};

use crate::config::SensorConfig;
use crate::scene::{Boundary, BoundarySource, EntityId};
use crate::spatial::SpatialIndex;

use super::hit_test::hit_test;
use super::probe::Probe;
use super::shape::Footprint;
use super::throttle::FrequencyThrottle;
use super::tracker::CollisionTracker;

new_key_type! {
    /// Arena handle for a passive registration record
    pub struct PassiveKey;
    /// Arena handle for an active registration record
    pub struct ActiveKey;
}

/// One begin or end notification delivered to a query shape's owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorHit {
    /// Entity of the query shape the notification belongs to
    pub query: EntityId,
    /// Passive entity whose overlap state changed
    pub target: EntityId,
}

/// Callback invoked on a begin or end transition.
///
/// The second argument records engine mutations to apply once the cycle's
/// dispatch finishes; see [`SensorOps`].
pub type HitCallback = Box<dyn FnMut(SensorHit, &mut SensorOps)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TransitionKind {
    Begin,
    End,
}

enum Command {
    AddPassive {
        entity: EntityId,
        categories: String,
        footprint: Option<Footprint>,
    },
    RemovePassive {
        entity: EntityId,
        category: Option<String>,
    },
    AddActive(ActiveShape),
    RemoveActive {
        entity: EntityId,
    },
}

/// Deferred engine mutations recorded by callbacks during a cycle.
///
/// Callbacks run while the cycle's snapshots are being dispatched, so they
/// cannot mutate the engine directly; operations recorded here are applied
/// as a batch once dispatch finishes. A callback-triggered add or remove can
/// therefore never invalidate the list being iterated.
#[derive(Default)]
pub struct SensorOps {
    commands: Vec<Command>,
}

impl SensorOps {
    /// Queue a passive registration
    pub fn add_passive(&mut self, entity: EntityId, categories: &str) {
        self.commands.push(Command::AddPassive {
            entity,
            categories: categories.to_owned(),
            footprint: None,
        });
    }

    /// Queue a passive registration with an explicit footprint
    pub fn add_passive_with(&mut self, entity: EntityId, categories: &str, footprint: Footprint) {
        self.commands.push(Command::AddPassive {
            entity,
            categories: categories.to_owned(),
            footprint: Some(footprint),
        });
    }

    /// Queue an active registration
    pub fn add_active(&mut self, shape: ActiveShape) {
        self.commands.push(Command::AddActive(shape));
    }

    /// Queue a passive removal; `None` removes every category membership
    pub fn remove_passive(&mut self, entity: EntityId, category: Option<&str>) {
        self.commands.push(Command::RemovePassive {
            entity,
            category: category.map(str::to_owned),
        });
    }

    /// Queue an active removal
    pub fn remove_active(&mut self, entity: EntityId) {
        self.commands.push(Command::RemoveActive { entity });
    }
}

/// Active (query) shape registration, built fluently and handed to
/// [`SensorEngine::add_active`].
pub struct ActiveShape {
    entity: EntityId,
    categories: Vec<String>,
    footprint: Footprint,
    on_begin: HitCallback,
    on_end: HitCallback,
}

impl ActiveShape {
    /// Register `entity` as a query shape against a comma-delimited
    /// category list
    pub fn new(
        entity: EntityId,
        categories: &str,
        on_begin: impl FnMut(SensorHit, &mut SensorOps) + 'static,
        on_end: impl FnMut(SensorHit, &mut SensorOps) + 'static,
    ) -> Self {
        Self {
            entity,
            categories: split_categories(categories),
            footprint: Footprint::Bounds,
            on_begin: Box::new(on_begin),
            on_end: Box::new(on_end),
        }
    }

    /// Override the footprint with a box margin of `sqrt(w² + h²)`
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.footprint = Footprint::from_size(Some(width), Some(height));
        self
    }

    /// Override the footprint with a circle of `radius`
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.footprint = Footprint::from_size(Some(radius), None);
        self
    }

    /// Override the footprint explicitly
    pub fn with_footprint(mut self, footprint: Footprint) -> Self {
        self.footprint = footprint;
        self
    }
}

struct PassiveRecord {
    entity: EntityId,
    categories: FxHashSet<String>,
    footprint: Footprint,
    last_boundary: Option<Boundary>,
}

struct ActiveRecord {
    entity: EntityId,
    categories: Vec<String>,
    footprint: Footprint,
    on_begin: HitCallback,
    on_end: HitCallback,
    last_boundary: Option<Boundary>,
}

/// Proximity sensing engine.
///
/// The root object: hosts registrations, throttles check cycles against the
/// scheduler's frame counter, and orchestrates each cycle as index rebuild,
/// buffer swap, broad-phase query, narrow-phase test, transition diff, and
/// callback dispatch. Everything runs synchronously inside one
/// [`update`](SensorEngine::update) call; no partial state is observable
/// across calls.
pub struct SensorEngine {
    config: SensorConfig,
    throttle: FrequencyThrottle,
    running: bool,
    passives: SlotMap<PassiveKey, PassiveRecord>,
    passive_index: FxHashMap<EntityId, PassiveKey>,
    actives: SlotMap<ActiveKey, ActiveRecord>,
    active_index: FxHashMap<EntityId, ActiveKey>,
    index: SpatialIndex<PassiveKey>,
    tracker: CollisionTracker,
}

impl SensorEngine {
    /// Create an engine with the given configuration
    pub fn new(config: SensorConfig) -> Self {
        let throttle = FrequencyThrottle::new(config.frequency);
        let index = SpatialIndex::new(config.cell_size);
        Self {
            config,
            throttle,
            running: false,
            passives: SlotMap::with_key(),
            passive_index: FxHashMap::default(),
            actives: SlotMap::with_key(),
            active_index: FxHashMap::default(),
            index,
            tracker: CollisionTracker::new(),
        }
    }

    /// Subscribe to scheduler ticks: [`update`](SensorEngine::update) calls
    /// are processed from now on
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Unsubscribe from scheduler ticks and reset the throttle state.
    /// Registrations and in-progress collision state are untouched.
    pub fn stop(&mut self) {
        self.running = false;
        self.throttle.reset();
    }

    /// Whether the engine is currently subscribed to ticks
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Engine configuration
    pub fn config(&self) -> &SensorConfig {
        &self.config
    }

    /// Register `entity` as a passive shape in each listed category.
    ///
    /// Idempotent: re-registration merges category memberships and keeps the
    /// existing footprint. An empty category list is a no-op.
    pub fn add_passive(&mut self, entity: EntityId, categories: &str) {
        self.register_passive(entity, categories, None);
    }

    /// Register `entity` as a passive shape with an explicit footprint
    pub fn add_passive_with(&mut self, entity: EntityId, categories: &str, footprint: Footprint) {
        self.register_passive(entity, categories, Some(footprint));
    }

    fn register_passive(
        &mut self,
        entity: EntityId,
        categories: &str,
        footprint: Option<Footprint>,
    ) {
        let categories = split_categories(categories);
        if categories.is_empty() {
            return;
        }
        let key = *self.passive_index.entry(entity).or_insert_with(|| {
            self.passives.insert(PassiveRecord {
                entity,
                categories: FxHashSet::default(),
                footprint: Footprint::Bounds,
                last_boundary: None,
            })
        });
        if let Some(record) = self.passives.get_mut(key) {
            for category in categories {
                record.categories.insert(category);
            }
            if let Some(footprint) = footprint {
                record.footprint = footprint;
            }
        }
    }

    /// Remove `entity` from `category`, or from every category when `None`.
    ///
    /// Dropping the last category deletes the record, footprint included.
    /// An in-progress collision involving the removed shape is not
    /// force-ended here; the next cycle's diff delivers the `end`.
    pub fn remove_passive(&mut self, entity: EntityId, category: Option<&str>) {
        let Some(&key) = self.passive_index.get(&entity) else {
            return;
        };
        let drop_record = match category {
            Some(category) => self.passives.get_mut(key).is_some_and(|record| {
                record.categories.remove(category);
                record.categories.is_empty()
            }),
            None => true,
        };
        if drop_record {
            self.passives.remove(key);
            self.passive_index.remove(&entity);
        }
    }

    /// Register an active query shape.
    ///
    /// Re-registering an entity merges category memberships; the latest
    /// callbacks and footprint win. A registration with no valid categories
    /// is a no-op.
    pub fn add_active(&mut self, shape: ActiveShape) {
        if shape.categories.is_empty() {
            return;
        }
        if let Some(&key) = self.active_index.get(&shape.entity) {
            if let Some(record) = self.actives.get_mut(key) {
                for category in shape.categories {
                    if !record.categories.contains(&category) {
                        record.categories.push(category);
                    }
                }
                record.footprint = shape.footprint;
                record.on_begin = shape.on_begin;
                record.on_end = shape.on_end;
            }
            return;
        }
        let entity = shape.entity;
        let key = self.actives.insert(ActiveRecord {
            entity,
            categories: shape.categories,
            footprint: shape.footprint,
            on_begin: shape.on_begin,
            on_end: shape.on_end,
            last_boundary: None,
        });
        self.active_index.insert(entity, key);
    }

    /// Remove an active query shape and drop its transition state so the
    /// tracker cannot accumulate pairs for dead queries. No `end` fires.
    pub fn remove_active(&mut self, entity: EntityId) {
        if let Some(key) = self.active_index.remove(&entity) {
            self.actives.remove(key);
            self.tracker.forget_query(entity);
        }
    }

    /// Number of registered passive shapes
    pub fn passive_count(&self) -> usize {
        self.passives.len()
    }

    /// Number of registered active query shapes
    pub fn active_count(&self) -> usize {
        self.actives.len()
    }

    /// Whether `query` and `target` were overlapping at the last completed
    /// check cycle
    pub fn is_overlapping(&self, query: EntityId, target: EntityId) -> bool {
        self.tracker.confirmed(query, target)
    }

    /// Scheduler tick entry point.
    ///
    /// A no-op unless [`start`](SensorEngine::start) has been called and the
    /// throttle elects this frame; otherwise runs one full check cycle
    /// synchronously.
    pub fn update(&mut self, frame: u64, scene: &dyn BoundarySource) {
        if !self.running {
            return;
        }
        if !self.throttle.should_run(frame) {
            return;
        }
        self.run_cycle(scene);
    }

    fn run_cycle(&mut self, scene: &dyn BoundarySource) {
        // Broad phase: probe every passive once, cache the probe for the
        // narrow phase, and rebuild the buckets from scratch.
        let mut probes: FxHashMap<PassiveKey, Probe> = FxHashMap::default();
        self.index.clear();
        for (key, record) in &mut self.passives {
            let Some(boundary) = scene.boundary(record.entity) else {
                warn!(
                    "skipping passive {:?}: owner reported no boundary",
                    record.entity
                );
                record.last_boundary = None;
                continue;
            };
            let probe = Probe::compute(&boundary, record.last_boundary.as_ref(), record.footprint);
            for category in &record.categories {
                self.index.insert(category, key, probe.rect());
            }
            record.last_boundary = Some(boundary);
            probes.insert(key, probe);
        }

        self.tracker.begin_cycle();

        // Narrow phase over a snapshot of the active set; begin transitions
        // queue in scan order.
        let active_keys: Vec<ActiveKey> = self.actives.keys().collect();
        let mut transitions: Vec<(TransitionKind, SensorHit)> = Vec::new();
        let mut candidates: Vec<PassiveKey> = Vec::new();
        let mut tested = 0usize;

        for &key in &active_keys {
            let Some(record) = self.actives.get_mut(key) else {
                continue;
            };
            let query = record.entity;
            let Some(boundary) = scene.boundary(query) else {
                warn!("skipping query {:?}: owner reported no boundary", query);
                record.last_boundary = None;
                continue;
            };
            let probe = Probe::compute(&boundary, record.last_boundary.as_ref(), record.footprint);
            record.last_boundary = Some(boundary);
            let categories = record.categories.clone();

            for category in &categories {
                self.index.query_into(category, probe.rect(), &mut candidates);
                for &passive_key in &candidates {
                    let Some(target) = self.passives.get(passive_key).map(|p| p.entity) else {
                        continue;
                    };
                    if target == query || self.tracker.confirmed(query, target) {
                        continue;
                    }
                    let Some(target_probe) = probes.get(&passive_key) else {
                        continue;
                    };
                    tested += 1;
                    if hit_test(&probe, target_probe) {
                        self.tracker.confirm(query, target);
                        if !self.tracker.was_overlapping(query, target) {
                            transitions
                                .push((TransitionKind::Begin, SensorHit { query, target }));
                        }
                    }
                }
            }
        }

        // Exit diff: every previously overlapping target not confirmed this
        // cycle, regardless of its current category membership.
        for &key in &active_keys {
            let Some(query) = self.actives.get(key).map(|r| r.entity) else {
                continue;
            };
            for target in self.tracker.ended(query) {
                transitions.push((TransitionKind::End, SensorHit { query, target }));
            }
        }

        let begins = transitions
            .iter()
            .filter(|(kind, _)| *kind == TransitionKind::Begin)
            .count();
        let ends = transitions.len() - begins;

        // Dispatch over the snapshot; callback mutations are deferred.
        let mut ops = SensorOps::default();
        for (kind, hit) in transitions {
            let Some(&key) = self.active_index.get(&hit.query) else {
                continue;
            };
            let Some(record) = self.actives.get_mut(key) else {
                continue;
            };
            match kind {
                TransitionKind::Begin => (record.on_begin)(hit, &mut ops),
                TransitionKind::End => (record.on_end)(hit, &mut ops),
            }
        }

        if self.config.use_debug {
            debug!(
                "check cycle: {} queries, {} pairs tested, {} overlapping, {} begins, {} ends",
                active_keys.len(),
                tested,
                self.tracker.confirmed_count(),
                begins,
                ends
            );
        }

        self.apply(ops);
    }

    fn apply(&mut self, ops: SensorOps) {
        for command in ops.commands {
            match command {
                Command::AddPassive {
                    entity,
                    categories,
                    footprint,
                } => self.register_passive(entity, &categories, footprint),
                Command::RemovePassive { entity, category } => {
                    self.remove_passive(entity, category.as_deref());
                }
                Command::AddActive(shape) => self.add_active(shape),
                Command::RemoveActive { entity } => self.remove_active(entity),
            }
        }
    }
}

/// Split a comma-delimited category list, trimming whitespace and skipping
/// empty fragments
fn split_categories(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|category| !category.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Rect;
    use std::cell::RefCell;
    use std::rc::Rc;

    type EventLog = Rc<RefCell<Vec<(&'static str, u64)>>>;

    #[derive(Default)]
    struct TestScene {
        rects: FxHashMap<EntityId, Rect>,
    }

    impl TestScene {
        fn place(&mut self, entity: EntityId, left: f32, top: f32, size: f32) {
            self.rects
                .insert(entity, Rect::new(left, left + size, top, top + size));
        }

        fn remove(&mut self, entity: EntityId) {
            self.rects.remove(&entity);
        }
    }

    impl BoundarySource for TestScene {
        fn boundary(&self, entity: EntityId) -> Option<Boundary> {
            self.rects.get(&entity).map(|rect| Boundary::axis_aligned(*rect))
        }
    }

    fn every_tick_config() -> SensorConfig {
        SensorConfig {
            frequency: 1,
            ..SensorConfig::default()
        }
    }

    fn recorder(
        log: &EventLog,
        kind: &'static str,
    ) -> impl FnMut(SensorHit, &mut SensorOps) + 'static {
        let log = Rc::clone(log);
        move |hit, _ops| log.borrow_mut().push((kind, hit.target.id()))
    }

    fn id(raw: u64) -> EntityId {
        EntityId::new(raw)
    }

    #[test]
    fn test_begin_end_pairing() {
        let log: EventLog = EventLog::default();
        let mut engine = SensorEngine::new(every_tick_config());
        let mut scene = TestScene::default();

        scene.place(id(1), 0.0, 0.0, 10.0);
        scene.place(id(2), 30.0, 0.0, 10.0);
        engine.add_passive(id(1), "wall");
        engine.add_active(ActiveShape::new(
            id(2),
            "wall",
            recorder(&log, "begin"),
            recorder(&log, "end"),
        ));
        engine.start();

        // Approach in sub-threshold steps so no expansion kicks in
        engine.update(1, &scene);
        scene.place(id(2), 21.0, 0.0, 10.0);
        engine.update(2, &scene);
        scene.place(id(2), 12.0, 0.0, 10.0);
        engine.update(3, &scene);
        assert!(log.borrow().is_empty());

        // Overlap
        scene.place(id(2), 5.0, 0.0, 10.0);
        engine.update(4, &scene);
        assert_eq!(*log.borrow(), vec![("begin", 1)]);
        assert!(engine.is_overlapping(id(2), id(1)));

        // Still overlapping: no duplicate begin
        engine.update(5, &scene);
        assert_eq!(log.borrow().len(), 1);

        // Separate
        scene.place(id(2), 14.0, 0.0, 10.0);
        engine.update(6, &scene);
        assert_eq!(*log.borrow(), vec![("begin", 1), ("end", 1)]);
        assert!(!engine.is_overlapping(id(2), id(1)));
    }

    #[test]
    fn test_no_duplicate_begin_across_categories() {
        let log: EventLog = EventLog::default();
        let mut engine = SensorEngine::new(every_tick_config());
        let mut scene = TestScene::default();

        scene.place(id(1), 0.0, 0.0, 10.0);
        scene.place(id(2), 5.0, 5.0, 10.0);
        engine.add_passive(id(1), "enemy, hazard");
        engine.add_active(ActiveShape::new(
            id(2),
            "enemy, hazard",
            recorder(&log, "begin"),
            recorder(&log, "end"),
        ));
        engine.start();

        engine.update(1, &scene);
        assert_eq!(*log.borrow(), vec![("begin", 1)]);
    }

    #[test]
    fn test_frequency_gates_cycles() {
        let log: EventLog = EventLog::default();
        let mut engine = SensorEngine::new(SensorConfig::default()); // frequency 3
        let mut scene = TestScene::default();

        scene.place(id(1), 0.0, 0.0, 10.0);
        scene.place(id(2), 5.0, 0.0, 10.0);
        engine.add_passive(id(1), "wall");
        engine.add_active(ActiveShape::new(
            id(2),
            "wall",
            recorder(&log, "begin"),
            recorder(&log, "end"),
        ));
        engine.start();

        engine.update(1, &scene);
        engine.update(2, &scene);
        assert!(log.borrow().is_empty());
        engine.update(3, &scene);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn test_update_before_start_is_inert() {
        let log: EventLog = EventLog::default();
        let mut engine = SensorEngine::new(every_tick_config());
        let mut scene = TestScene::default();

        scene.place(id(1), 0.0, 0.0, 10.0);
        scene.place(id(2), 5.0, 0.0, 10.0);
        engine.add_passive(id(1), "wall");
        engine.add_active(ActiveShape::new(
            id(2),
            "wall",
            recorder(&log, "begin"),
            recorder(&log, "end"),
        ));

        engine.update(1, &scene);
        assert!(log.borrow().is_empty());

        engine.start();
        engine.update(2, &scene);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn test_stop_keeps_registrations_and_pair_state() {
        let log: EventLog = EventLog::default();
        let mut engine = SensorEngine::new(every_tick_config());
        let mut scene = TestScene::default();

        scene.place(id(1), 0.0, 0.0, 10.0);
        scene.place(id(2), 5.0, 0.0, 10.0);
        engine.add_passive(id(1), "wall");
        engine.add_active(ActiveShape::new(
            id(2),
            "wall",
            recorder(&log, "begin"),
            recorder(&log, "end"),
        ));
        engine.start();
        engine.update(1, &scene);
        assert_eq!(log.borrow().len(), 1);

        engine.stop();
        engine.update(2, &scene);
        assert_eq!(log.borrow().len(), 1);
        assert_eq!(engine.passive_count(), 1);

        // Restart: the pair is still known, so no second begin fires
        engine.start();
        engine.update(1, &scene);
        assert_eq!(*log.borrow(), vec![("begin", 1)]);
    }

    #[test]
    fn test_tunneling_detected_above_threshold() {
        let log: EventLog = EventLog::default();
        let mut engine = SensorEngine::new(every_tick_config());
        let mut scene = TestScene::default();

        // Thin wall between the two sampled positions
        scene.place(id(1), 50.0, 0.0, 2.0);
        scene.place(id(2), 0.0, 0.0, 10.0);
        engine.add_passive(id(1), "wall");
        engine.add_active(ActiveShape::new(
            id(2),
            "wall",
            recorder(&log, "begin"),
            recorder(&log, "end"),
        ));
        engine.start();

        engine.update(1, &scene);
        assert!(log.borrow().is_empty());

        // Teleport past the wall; the swept union must still report the hit
        scene.place(id(2), 100.0, 0.0, 10.0);
        engine.update(2, &scene);
        assert_eq!(*log.borrow(), vec![("begin", 1)]);
    }

    #[test]
    fn test_tunneling_not_guaranteed_below_threshold() {
        // Documents the approximation's limit: a sub-threshold step across a
        // thin shape produces no expansion and no detection.
        let log: EventLog = EventLog::default();
        let mut engine = SensorEngine::new(every_tick_config());
        let mut scene = TestScene::default();

        scene.place(id(1), 50.0, 0.0, 1.0);
        scene.place(id(2), 44.0, 0.0, 4.0);
        engine.add_passive(id(1), "wall");
        engine.add_active(ActiveShape::new(
            id(2),
            "wall",
            recorder(&log, "begin"),
            recorder(&log, "end"),
        ));
        engine.start();

        engine.update(1, &scene);
        scene.place(id(2), 53.0, 0.0, 4.0);
        engine.update(2, &scene);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_removal_hygiene() {
        let log: EventLog = EventLog::default();
        let mut engine = SensorEngine::new(every_tick_config());
        let mut scene = TestScene::default();

        scene.place(id(1), 0.0, 0.0, 10.0);
        scene.place(id(2), 5.0, 0.0, 10.0);
        engine.add_passive(id(1), "wall");
        engine.add_active(ActiveShape::new(
            id(2),
            "wall",
            recorder(&log, "begin"),
            recorder(&log, "end"),
        ));
        engine.start();

        engine.update(1, &scene);
        assert_eq!(*log.borrow(), vec![("begin", 1)]);

        // Removal does not force-end the in-progress collision...
        engine.remove_passive(id(1), None);
        assert_eq!(log.borrow().len(), 1);
        assert_eq!(engine.passive_count(), 0);

        // ...the next cycle's diff delivers the end, and the id never
        // resurfaces as a candidate even though the shapes still overlap.
        engine.update(2, &scene);
        assert_eq!(*log.borrow(), vec![("begin", 1), ("end", 1)]);
        engine.update(3, &scene);
        engine.update(4, &scene);
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn test_remove_single_category_keeps_record() {
        let mut engine = SensorEngine::new(every_tick_config());
        engine.add_passive(id(1), "enemy, hazard");
        engine.remove_passive(id(1), Some("enemy"));
        assert_eq!(engine.passive_count(), 1);
        engine.remove_passive(id(1), Some("hazard"));
        assert_eq!(engine.passive_count(), 0);
    }

    #[test]
    fn test_reentrant_removal_from_begin_callback() {
        let log: EventLog = EventLog::default();
        let mut engine = SensorEngine::new(every_tick_config());
        let mut scene = TestScene::default();

        scene.place(id(1), 0.0, 0.0, 10.0);
        scene.place(id(2), 5.0, 0.0, 10.0);
        engine.add_passive(id(1), "pickup");

        let begin_log = Rc::clone(&log);
        engine.add_active(ActiveShape::new(
            id(2),
            "pickup",
            move |hit, ops| {
                begin_log.borrow_mut().push(("begin", hit.target.id()));
                // Consume the pickup from inside the notification
                ops.remove_passive(hit.target, None);
            },
            recorder(&log, "end"),
        ));
        engine.start();

        engine.update(1, &scene);
        assert_eq!(*log.borrow(), vec![("begin", 1)]);
        assert_eq!(engine.passive_count(), 0);

        // The deferred removal behaves like any other: end on the next cycle
        engine.update(2, &scene);
        assert_eq!(*log.borrow(), vec![("begin", 1), ("end", 1)]);
    }

    #[test]
    fn test_stale_entity_skipped_without_aborting_pass() {
        let log: EventLog = EventLog::default();
        let mut engine = SensorEngine::new(every_tick_config());
        let mut scene = TestScene::default();

        // Entity 3 is registered but its owner never reports a boundary
        scene.place(id(1), 0.0, 0.0, 10.0);
        scene.place(id(2), 5.0, 0.0, 10.0);
        engine.add_passive(id(1), "wall");
        engine.add_passive(id(3), "wall");
        engine.add_active(ActiveShape::new(
            id(2),
            "wall",
            recorder(&log, "begin"),
            recorder(&log, "end"),
        ));
        engine.start();

        engine.update(1, &scene);
        assert_eq!(*log.borrow(), vec![("begin", 1)]);

        // A query losing its boundary mid-overlap ends the pair naturally
        scene.remove(id(2));
        engine.update(2, &scene);
        assert_eq!(*log.borrow(), vec![("begin", 1), ("end", 1)]);
    }

    #[test]
    fn test_shape_both_active_and_passive_skips_itself() {
        let log: EventLog = EventLog::default();
        let mut engine = SensorEngine::new(every_tick_config());
        let mut scene = TestScene::default();

        scene.place(id(1), 0.0, 0.0, 10.0);
        engine.add_passive(id(1), "body");
        engine.add_active(ActiveShape::new(
            id(1),
            "body",
            recorder(&log, "begin"),
            recorder(&log, "end"),
        ));
        engine.start();

        engine.update(1, &scene);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_circle_footprints_collide_by_radius() {
        let log: EventLog = EventLog::default();
        let mut engine = SensorEngine::new(every_tick_config());
        let mut scene = TestScene::default();

        // Boundary rects overlap throughout; only the radii decide
        scene.place(id(1), 0.0, 0.0, 40.0); // center (20, 20)
        scene.place(id(2), 6.0, 0.0, 40.0); // center (26, 20), distance 6
        engine.add_passive_with(id(1), "orb", Footprint::Circle { radius: 3.0 });
        engine.add_active(
            ActiveShape::new(id(2), "orb", recorder(&log, "begin"), recorder(&log, "end"))
                .with_radius(2.0),
        );
        engine.start();

        // 6 > 3 + 2: apart
        engine.update(1, &scene);
        assert!(log.borrow().is_empty());

        // Move centers to distance 5 == 3 + 2: touching counts (step < 10
        // keeps expansion out of the test)
        scene.place(id(2), 5.0, 0.0, 40.0);
        engine.update(2, &scene);
        assert_eq!(*log.borrow(), vec![("begin", 1)]);
    }

    #[test]
    fn test_empty_categories_are_noop() {
        let log: EventLog = EventLog::default();
        let mut engine = SensorEngine::new(every_tick_config());

        engine.add_passive(id(1), " , ,");
        engine.add_active(ActiveShape::new(
            id(2),
            "",
            recorder(&log, "begin"),
            recorder(&log, "end"),
        ));
        assert_eq!(engine.passive_count(), 0);
        assert_eq!(engine.active_count(), 0);
    }
}
