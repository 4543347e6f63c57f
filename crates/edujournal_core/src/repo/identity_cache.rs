//! Per-kind identity map.
//!
//! # Responsibility
//! - Route "construct with id X" to creation on first sight and to an
//!   in-place update on every later sight.
//! - Resolve identifiers to canonical handles for relationship wiring.
//!
//! # Invariants
//! - At most one live instance exists per identifier.
//! - Entries are never evicted for the lifetime of the cache.
//! - No internal locking: callers serialize access (handles are `!Send`).

use crate::model::entity::{Entity, EntityId, Shared};
use crate::repo::{RepoError, RepoResult};
use std::collections::HashMap;
use std::rc::Rc;

/// Identity map for one entity kind.
pub struct IdentityCache<T: Entity> {
    entries: HashMap<EntityId, Shared<T>>,
}

impl<T: Entity> Default for IdentityCache<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<T: Entity> IdentityCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the canonical instance for `id`, creating or updating it.
    ///
    /// The identifier itself is never rewritten on update.
    pub fn obtain(&mut self, id: EntityId, fields: T::Fields) -> Shared<T> {
        if let Some(existing) = self.entries.get(&id) {
            T::update(existing, fields);
            return Rc::clone(existing);
        }

        let created = T::create(id, fields);
        self.entries.insert(id, Rc::clone(&created));
        created
    }

    /// Looks up a cached instance without touching it.
    pub fn get(&self, id: EntityId) -> Option<Shared<T>> {
        self.entries.get(&id).cloned()
    }

    /// Like [`IdentityCache::get`], but a miss is a dangling reference.
    pub fn require(&self, id: EntityId) -> RepoResult<Shared<T>> {
        self.get(id)
            .ok_or(RepoError::DanglingReference { kind: T::KIND, id })
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates cached handles in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &Shared<T>> {
        self.entries.values()
    }
}
