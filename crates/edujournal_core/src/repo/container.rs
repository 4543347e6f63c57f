//! Ordered, identifier-keyed collection of one entity kind.
//!
//! # Responsibility
//! - Hold shared handles of exactly one declared kind, keyed by identifier.
//! - Provide first-match lookup and filtering over statically typed
//!   predicates.
//!
//! # Invariants
//! - Iteration order is insertion order.
//! - Re-adding an identifier that is already present replaces the handle in
//!   place and keeps its original position.
//! - Removal keeps the relative order of the remaining members.

use crate::model::entity::{Entity, EntityId, EntityKind, Shared};
use crate::repo::{RepoError, RepoResult};
use indexmap::IndexMap;
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

/// Keyed collection of shared entities of kind `T`.
///
/// The declared kind is enforced by the type parameter, so adding a record of
/// another kind is rejected at compile time instead of being ignored.
pub struct Container<T: Entity> {
    members: IndexMap<EntityId, Shared<T>>,
}

impl<T: Entity> Default for Container<T> {
    fn default() -> Self {
        Self {
            members: IndexMap::new(),
        }
    }
}

impl<T: Entity> Debug for Container<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("kind", &T::KIND)
            .field("ids", &self.ids())
            .finish()
    }
}

impl<T: Entity> Container<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declared kind of every member.
    pub fn kind(&self) -> EntityKind {
        T::KIND
    }

    /// Inserts `entity`, overwriting the slot of an equal identifier.
    pub fn add(&mut self, entity: Shared<T>) {
        let id = entity.borrow().id();
        self.members.insert(id, entity);
    }

    /// Removes `entity` by identifier. Absent identifiers are a no-op.
    pub fn remove(&mut self, entity: &Shared<T>) -> bool {
        let id = entity.borrow().id();
        self.remove_id(id)
    }

    /// Removes the member stored under `id`, if any.
    pub fn remove_id(&mut self, id: EntityId) -> bool {
        self.members.shift_remove(&id).is_some()
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }

    /// Removes every member and returns them in iteration order.
    pub(crate) fn drain(&mut self) -> Vec<Shared<T>> {
        self.members.drain(..).map(|(_, entity)| entity).collect()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns whether `entity` itself (not just its identifier) is a member.
    pub fn contains(&self, entity: &Shared<T>) -> bool {
        let id = entity.borrow().id();
        self.members
            .get(&id)
            .is_some_and(|member| Rc::ptr_eq(member, entity))
    }

    pub fn contains_id(&self, id: EntityId) -> bool {
        self.members.contains_key(&id)
    }

    /// Direct identifier lookup.
    pub fn get_by_id(&self, id: EntityId) -> Option<Shared<T>> {
        self.members.get(&id).cloned()
    }

    /// Returns the first member, in iteration order, matching `predicate`.
    pub fn get(&self, predicate: impl Fn(&T) -> bool) -> Option<Shared<T>> {
        self.members
            .values()
            .find(|member| predicate(&member.borrow()))
            .cloned()
    }

    /// Like [`Container::get`], but a missing match is `RepoError::NotFound`.
    pub fn require(&self, predicate: impl Fn(&T) -> bool) -> RepoResult<Shared<T>> {
        self.get(predicate)
            .ok_or(RepoError::NotFound { kind: T::KIND })
    }

    /// Returns every member matching `predicate`, in iteration order.
    pub fn filter(&self, predicate: impl Fn(&T) -> bool) -> Vec<Shared<T>> {
        self.members
            .values()
            .filter(|member| predicate(&member.borrow()))
            .cloned()
            .collect()
    }

    /// Iterates member handles in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Shared<T>> {
        self.members.values()
    }

    /// Member identifiers in insertion order.
    pub fn ids(&self) -> Vec<EntityId> {
        self.members.keys().copied().collect()
    }
}

impl<'a, T: Entity> IntoIterator for &'a Container<T> {
    type Item = &'a Shared<T>;
    type IntoIter = indexmap::map::Values<'a, EntityId, Shared<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.values()
    }
}
