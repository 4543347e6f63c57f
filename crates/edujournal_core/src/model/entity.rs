//! Entity identity primitives shared by every school record kind.
//!
//! # Responsibility
//! - Define the shared handle type through which all holders observe one
//!   canonical instance per identifier.
//! - Define the construct/update contract used by identity caches.
//!
//! # Invariants
//! - `Entity::id` is fixed at construction and never changes.
//! - `Entity::update` overwrites attributes and relationships in place; it
//!   never allocates a replacement instance.

use std::cell::RefCell;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

/// Upstream identifier. Opaque, comparable, unique within one kind.
pub type EntityId = i64;

/// Shared handle to one canonical entity instance.
///
/// Cloning the handle never clones the entity; every clone observes updates
/// applied through the identity cache.
pub type Shared<T> = Rc<RefCell<T>>;

/// Declared kind of an entity, used in containers, errors and log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Section,
    Subject,
    Group,
    Journal,
    Student,
    LessonType,
    Lesson,
    ControlType,
    Control,
    Period,
    MarkTypeSection,
    MarkType,
    Mark,
}

impl EntityKind {
    /// Stable snake_case name used in log events and error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Section => "section",
            Self::Subject => "subject",
            Self::Group => "group",
            Self::Journal => "journal",
            Self::Student => "student",
            Self::LessonType => "lesson_type",
            Self::Lesson => "lesson",
            Self::ControlType => "control_type",
            Self::Control => "control",
            Self::Period => "period",
            Self::MarkTypeSection => "mark_type_section",
            Self::MarkType => "mark_type",
            Self::Mark => "mark",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Construct/update contract for identity-mapped records.
///
/// Both operations take the field set by value so relationship handles move
/// into the entity without extra reference counting.
pub trait Entity: Sized {
    /// Constructor and update arguments, identifier excluded.
    type Fields;

    /// Declared kind for containers and diagnostics.
    const KIND: EntityKind;

    /// Returns the immutable identifier.
    fn id(&self) -> EntityId;

    /// Builds a fresh shared instance on first sight of `id`.
    ///
    /// Kinds with a parent back-reference also register themselves in the
    /// parent's container here.
    fn create(id: EntityId, fields: Self::Fields) -> Shared<Self>;

    /// Applies `fields` to an already cached instance.
    ///
    /// Kinds with a parent back-reference retract membership from the old
    /// parent before joining the new one.
    fn update(this: &Shared<Self>, fields: Self::Fields);
}

/// Wraps a freshly built record into a shared handle.
pub(crate) fn share<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}
