//! Explicitly owned set of identity caches, one per entity kind.
//!
//! # Responsibility
//! - Own every per-kind cache for one school graph.
//! - Report cache sizes for diagnostics.
//!
//! # Invariants
//! - Two registries never share instances; tests build isolated graphs by
//!   creating a new registry.

use crate::model::{
    Control, ControlType, Group, Journal, Lesson, LessonType, Mark, MarkType, MarkTypeSection,
    Period, Section, Student, Subject,
};
use crate::repo::identity_cache::IdentityCache;

/// Identity caches for all record kinds.
#[derive(Default)]
pub struct Registry {
    pub sections: IdentityCache<Section>,
    pub subjects: IdentityCache<Subject>,
    pub groups: IdentityCache<Group>,
    pub journals: IdentityCache<Journal>,
    pub students: IdentityCache<Student>,
    pub lesson_types: IdentityCache<LessonType>,
    pub lessons: IdentityCache<Lesson>,
    pub control_types: IdentityCache<ControlType>,
    pub controls: IdentityCache<Control>,
    pub periods: IdentityCache<Period>,
    pub mark_type_sections: IdentityCache<MarkTypeSection>,
    pub mark_types: IdentityCache<MarkType>,
    pub marks: IdentityCache<Mark>,
}

/// Number of cached instances per kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistryCounts {
    pub sections: usize,
    pub subjects: usize,
    pub groups: usize,
    pub journals: usize,
    pub students: usize,
    pub lesson_types: usize,
    pub lessons: usize,
    pub control_types: usize,
    pub controls: usize,
    pub periods: usize,
    pub mark_type_sections: usize,
    pub mark_types: usize,
    pub marks: usize,
}

impl RegistryCounts {
    pub fn total(&self) -> usize {
        self.sections
            + self.subjects
            + self.groups
            + self.journals
            + self.students
            + self.lesson_types
            + self.lessons
            + self.control_types
            + self.controls
            + self.periods
            + self.mark_type_sections
            + self.mark_types
            + self.marks
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counts(&self) -> RegistryCounts {
        RegistryCounts {
            sections: self.sections.len(),
            subjects: self.subjects.len(),
            groups: self.groups.len(),
            journals: self.journals.len(),
            students: self.students.len(),
            lesson_types: self.lesson_types.len(),
            lessons: self.lessons.len(),
            control_types: self.control_types.len(),
            controls: self.controls.len(),
            periods: self.periods.len(),
            mark_type_sections: self.mark_type_sections.len(),
            mark_types: self.mark_types.len(),
            marks: self.marks.len(),
        }
    }
}
