//! Parent/child relationship maintenance.
//!
//! # Responsibility
//! - Keep a child's back-reference and its parent's container in agreement
//!   whenever the child is (re)attached or a parent scope is cleared.
//!
//! # Invariants
//! - A child is a member of `children(parent)` iff its back-reference
//!   upgrades to `parent`.
//! - Relinking follows retract-old, set-reference, insert-new ordering.
//! - Relinking to the current parent leaves exactly one membership and keeps
//!   the child's position in the parent container.
//! - Members dropped from a container always have their back-reference reset.

use crate::model::entity::{Entity, EntityId, Shared};
use crate::repo::container::Container;
use log::debug;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Weak back-reference from a child to the parent that owns it.
pub type ParentRef<P> = Weak<RefCell<P>>;

/// Moves `child` under `parent`, retracting any previous membership first.
///
/// A dangling or never-set back-reference is the initial-construction case
/// and skips the retraction step.
pub(crate) fn relink<C, P>(
    child: &Shared<C>,
    parent: &Shared<P>,
    back_ref: fn(&mut C) -> &mut ParentRef<P>,
    children: fn(&mut P) -> &mut Container<C>,
) where
    C: Entity,
    P: Entity,
{
    let previous = back_ref(&mut *child.borrow_mut()).upgrade();
    if let Some(previous) = previous.filter(|previous| !Rc::ptr_eq(previous, parent)) {
        children(&mut *previous.borrow_mut()).remove(child);
        debug!(
            "event=relink module=repo kind={} id={} parent_kind={} from={} to={}",
            C::KIND,
            child.borrow().id(),
            P::KIND,
            previous.borrow().id(),
            parent.borrow().id()
        );
    }

    *back_ref(&mut *child.borrow_mut()) = Rc::downgrade(parent);
    children(&mut *parent.borrow_mut()).add(Rc::clone(child));
}

/// Empties `container` and resets the back-reference of every former member.
pub(crate) fn detach_all<C, P>(container: &mut Container<C>, back_ref: fn(&mut C) -> &mut ParentRef<P>)
where
    C: Entity,
{
    for child in container.drain() {
        *back_ref(&mut *child.borrow_mut()) = Weak::new();
    }
}

/// Drops every member whose identifier `keep` rejects and resets its
/// back-reference. Kept members stay in place.
pub(crate) fn retain_listed<C, P>(
    container: &mut Container<C>,
    back_ref: fn(&mut C) -> &mut ParentRef<P>,
    keep: impl Fn(EntityId) -> bool,
) where
    C: Entity,
    P: Entity,
{
    let stale = container.filter(|child| !keep(child.id()));
    for child in stale {
        container.remove(&child);
        *back_ref(&mut *child.borrow_mut()) = Weak::new();
        debug!(
            "event=detach module=repo kind={} id={} parent_kind={}",
            C::KIND,
            child.borrow().id(),
            P::KIND
        );
    }
}
