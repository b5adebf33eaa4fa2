//! Begin/end transition tracking
//!
//! Double-buffered pair state: the narrow phase confirms pairs into the
//! current buffer, and the diff against the previous buffer turns a per-cycle
//! overlap boolean into discrete enter/exit transitions. The buffers swap by
//! pointer at cycle start, so no per-pair state is copied.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::scene::EntityId;

/// Double-buffered query-to-targets overlap state.
#[derive(Debug, Default)]
pub struct CollisionTracker {
    previous: FxHashMap<EntityId, FxHashSet<EntityId>>,
    current: FxHashMap<EntityId, FxHashSet<EntityId>>,
}

impl CollisionTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a cycle: current becomes previous, the new current starts empty
    pub fn begin_cycle(&mut self) {
        std::mem::swap(&mut self.previous, &mut self.current);
        self.current.clear();
    }

    /// Record a confirmed pair for this cycle.
    ///
    /// Returns `false` when the pair was already confirmed this cycle, which
    /// de-duplicates a pair reached through two overlapping categories.
    pub fn confirm(&mut self, query: EntityId, target: EntityId) -> bool {
        self.current.entry(query).or_default().insert(target)
    }

    /// Whether the pair was already confirmed earlier in the current cycle
    pub fn confirmed(&self, query: EntityId, target: EntityId) -> bool {
        self.current.get(&query).is_some_and(|s| s.contains(&target))
    }

    /// Whether the pair was overlapping in the previous cycle
    pub fn was_overlapping(&self, query: EntityId, target: EntityId) -> bool {
        self.previous
            .get(&query)
            .is_some_and(|s| s.contains(&target))
    }

    /// Targets overlapping `query` last cycle that were not confirmed this
    /// cycle, regardless of their current category membership
    pub fn ended(&self, query: EntityId) -> Vec<EntityId> {
        let Some(prev) = self.previous.get(&query) else {
            return Vec::new();
        };
        match self.current.get(&query) {
            Some(cur) => prev.difference(cur).copied().collect(),
            None => prev.iter().copied().collect(),
        }
    }

    /// Drop all state for a query shape, in both buffers
    pub fn forget_query(&mut self, query: EntityId) {
        self.previous.remove(&query);
        self.current.remove(&query);
    }

    /// Number of pairs confirmed this cycle
    pub fn confirmed_count(&self) -> usize {
        self.current.values().map(FxHashSet::len).sum()
    }
}
