//! Mark scales and marks.
//!
//! # Responsibility
//! - Model the two granularities of mark scale (section and individual
//!   mark type) as independent records sharing the `MarkScale` capability.
//! - Model marks with a weak back-reference to their journal.
//!
//! # Invariants
//! - A `Mark` is a member of `journal.marks()` iff `mark.journal()` is that
//!   journal.
//! - `Mark::name` and `Mark::mask` always reflect the current scale target.

use crate::model::catalog::Journal;
use crate::model::entity::{share, Entity, EntityId, EntityKind, Shared};
use crate::model::lessons::{Control, Student};
use crate::repo::links::{relink, ParentRef};
use std::rc::{Rc, Weak};

pub type MarkTypeSectionId = EntityId;
pub type MarkTypeId = EntityId;
pub type MarkId = EntityId;

/// Shared read capability of mark scales.
pub trait MarkScale {
    fn scale_name(&self) -> &str;
    /// Bit mask of the grading values this scale admits.
    fn mask(&self) -> i64;
}

/// Group of related mark types (e.g. "five-point scale").
#[derive(Debug)]
pub struct MarkTypeSection {
    id: MarkTypeSectionId,
    pub name: String,
    pub mask: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkTypeSectionFields {
    pub name: String,
    pub mask: i64,
}

impl MarkScale for MarkTypeSection {
    fn scale_name(&self) -> &str {
        &self.name
    }

    fn mask(&self) -> i64 {
        self.mask
    }
}

impl Entity for MarkTypeSection {
    type Fields = MarkTypeSectionFields;
    const KIND: EntityKind = EntityKind::MarkTypeSection;

    fn id(&self) -> EntityId {
        self.id
    }

    fn create(id: EntityId, fields: MarkTypeSectionFields) -> Shared<Self> {
        share(Self {
            id,
            name: fields.name,
            mask: fields.mask,
        })
    }

    fn update(this: &Shared<Self>, fields: MarkTypeSectionFields) {
        let mut section = this.borrow_mut();
        section.name = fields.name;
        section.mask = fields.mask;
    }
}

/// Individual mark value within a section (e.g. "5", "absent").
#[derive(Debug)]
pub struct MarkType {
    id: MarkTypeId,
    pub name: String,
    pub shortname: String,
    pub mask: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkTypeFields {
    pub name: String,
    pub shortname: String,
    pub mask: i64,
}

impl MarkScale for MarkType {
    fn scale_name(&self) -> &str {
        &self.name
    }

    fn mask(&self) -> i64 {
        self.mask
    }
}

impl Entity for MarkType {
    type Fields = MarkTypeFields;
    const KIND: EntityKind = EntityKind::MarkType;

    fn id(&self) -> EntityId {
        self.id
    }

    fn create(id: EntityId, fields: MarkTypeFields) -> Shared<Self> {
        share(Self {
            id,
            name: fields.name,
            shortname: fields.shortname,
            mask: fields.mask,
        })
    }

    fn update(this: &Shared<Self>, fields: MarkTypeFields) {
        let mut mark_type = this.borrow_mut();
        mark_type.name = fields.name;
        mark_type.shortname = fields.shortname;
        mark_type.mask = fields.mask;
    }
}

/// Scale a mark is graded on, at whichever granularity resolved.
#[derive(Debug, Clone)]
pub enum MarkTypeRef {
    Type(Shared<MarkType>),
    /// Fallback when no individual mark type carries the referenced id.
    Section(Shared<MarkTypeSection>),
}

impl MarkTypeRef {
    pub fn id(&self) -> EntityId {
        match self {
            Self::Type(mark_type) => mark_type.borrow().id(),
            Self::Section(section) => section.borrow().id(),
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Type(_) => EntityKind::MarkType,
            Self::Section(_) => EntityKind::MarkTypeSection,
        }
    }

    pub fn name(&self) -> String {
        match self {
            Self::Type(mark_type) => mark_type.borrow().scale_name().to_string(),
            Self::Section(section) => section.borrow().scale_name().to_string(),
        }
    }

    pub fn mask(&self) -> i64 {
        match self {
            Self::Type(mark_type) => mark_type.borrow().mask(),
            Self::Section(section) => section.borrow().mask(),
        }
    }

    /// Whether both references point at the same cached instance.
    pub fn same_target(&self, other: &MarkTypeRef) -> bool {
        match (self, other) {
            (Self::Type(left), Self::Type(right)) => Rc::ptr_eq(left, right),
            (Self::Section(left), Self::Section(right)) => Rc::ptr_eq(left, right),
            _ => false,
        }
    }
}

/// One grade given to a student for a control.
#[derive(Debug)]
pub struct Mark {
    id: MarkId,
    mark_type: MarkTypeRef,
    journal: ParentRef<Journal>,
    student: Shared<Student>,
    control: Shared<Control>,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct MarkFields {
    pub mark_type: MarkTypeRef,
    pub journal: Shared<Journal>,
    pub student: Shared<Student>,
    pub control: Shared<Control>,
    pub text: String,
}

impl Mark {
    pub fn mark_type(&self) -> MarkTypeRef {
        self.mark_type.clone()
    }

    /// Journal currently listing this mark; `None` once its scope was cleared.
    pub fn journal(&self) -> Option<Shared<Journal>> {
        self.journal.upgrade()
    }

    pub fn student(&self) -> Shared<Student> {
        self.student.clone()
    }

    pub fn control(&self) -> Shared<Control> {
        self.control.clone()
    }

    pub fn name(&self) -> String {
        self.mark_type.name()
    }

    pub fn mask(&self) -> i64 {
        self.mark_type.mask()
    }

    pub(crate) fn journal_mut(&mut self) -> &mut ParentRef<Journal> {
        &mut self.journal
    }
}

impl Entity for Mark {
    type Fields = MarkFields;
    const KIND: EntityKind = EntityKind::Mark;

    fn id(&self) -> EntityId {
        self.id
    }

    fn create(id: EntityId, fields: MarkFields) -> Shared<Self> {
        let mark = share(Self {
            id,
            mark_type: fields.mark_type,
            journal: Weak::new(),
            student: fields.student,
            control: fields.control,
            text: fields.text,
        });
        relink(&mark, &fields.journal, Mark::journal_mut, Journal::marks_mut);
        mark
    }

    fn update(this: &Shared<Self>, fields: MarkFields) {
        {
            let mut mark = this.borrow_mut();
            mark.mark_type = fields.mark_type;
            mark.student = fields.student;
            mark.control = fields.control;
            mark.text = fields.text;
        }
        relink(this, &fields.journal, Mark::journal_mut, Journal::marks_mut);
    }
}
