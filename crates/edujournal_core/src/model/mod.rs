//! School organisation domain model.
//!
//! # Responsibility
//! - Define the thirteen identity-mapped record kinds and their
//!   construct/update behaviour.
//! - Expose derived attributes as accessors over the referenced record.
//!
//! # Invariants
//! - Every record is identified by a stable `EntityId` within its kind.
//! - Parent back-references are weak and maintained only through
//!   `repo::links`, never assigned directly.

pub mod catalog;
pub mod entity;
pub mod grading;
pub mod lessons;

pub use catalog::{
    Group, GroupFields, GroupId, Journal, JournalFields, JournalId, Section, SectionFields,
    SectionId, Subject, SubjectFields, SubjectId,
};
pub use entity::{Entity, EntityId, EntityKind, Shared};
pub use grading::{
    Mark, MarkFields, MarkId, MarkScale, MarkType, MarkTypeFields, MarkTypeId, MarkTypeRef,
    MarkTypeSection, MarkTypeSectionFields, MarkTypeSectionId,
};
pub use lessons::{
    Control, ControlFields, ControlId, ControlType, ControlTypeFields, ControlTypeId, Lesson,
    LessonFields, LessonId, LessonType, LessonTypeFields, LessonTypeId, Period, PeriodFields,
    PeriodId, Student, StudentFields, StudentId,
};
