//! School catalogue records: sections, subjects, groups and journals.
//!
//! # Invariants
//! - `Group` is a member of `section.groups` iff `group.section()` is that
//!   section; likewise for `Journal` and `group.journals`.
//! - Back-references are weak; ownership flows parent → child only.

use crate::model::entity::{share, Entity, EntityId, EntityKind, Shared};
use crate::model::grading::{Mark, MarkType, MarkTypeSection};
use crate::model::lessons::{Control, ControlType, Lesson, LessonType, Period, Student};
use crate::repo::container::Container;
use crate::repo::links::{relink, retain_listed, ParentRef};
use std::rc::Weak;

pub type SectionId = EntityId;
pub type SubjectId = EntityId;
pub type GroupId = EntityId;
pub type JournalId = EntityId;

/// Top-level school division owning its groups.
#[derive(Debug)]
pub struct Section {
    id: SectionId,
    pub name: String,
    groups: Container<Group>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionFields {
    pub name: String,
}

impl Section {
    pub fn groups(&self) -> &Container<Group> {
        &self.groups
    }

    fn groups_mut(&mut self) -> &mut Container<Group> {
        &mut self.groups
    }

    /// Detaches every group `keep` rejects.
    pub(crate) fn retain_groups(&mut self, keep: impl Fn(GroupId) -> bool) {
        retain_listed(&mut self.groups, Group::section_mut, keep);
    }
}

impl Entity for Section {
    type Fields = SectionFields;
    const KIND: EntityKind = EntityKind::Section;

    fn id(&self) -> EntityId {
        self.id
    }

    fn create(id: EntityId, fields: SectionFields) -> Shared<Self> {
        share(Self {
            id,
            name: fields.name,
            groups: Container::new(),
        })
    }

    fn update(this: &Shared<Self>, fields: SectionFields) {
        this.borrow_mut().name = fields.name;
    }
}

#[derive(Debug)]
pub struct Subject {
    id: SubjectId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectFields {
    pub name: String,
}

impl Entity for Subject {
    type Fields = SubjectFields;
    const KIND: EntityKind = EntityKind::Subject;

    fn id(&self) -> EntityId {
        self.id
    }

    fn create(id: EntityId, fields: SubjectFields) -> Shared<Self> {
        share(Self {
            id,
            name: fields.name,
        })
    }

    fn update(this: &Shared<Self>, fields: SubjectFields) {
        this.borrow_mut().name = fields.name;
    }
}

/// Class group (upstream "grade"), listed under exactly one section.
#[derive(Debug)]
pub struct Group {
    id: GroupId,
    pub name: String,
    section: ParentRef<Section>,
    journals: Container<Journal>,
}

#[derive(Debug, Clone)]
pub struct GroupFields {
    pub name: String,
    pub section: Shared<Section>,
}

impl Group {
    /// Section currently listing this group.
    pub fn section(&self) -> Option<Shared<Section>> {
        self.section.upgrade()
    }

    pub fn journals(&self) -> &Container<Journal> {
        &self.journals
    }

    fn section_mut(&mut self) -> &mut ParentRef<Section> {
        &mut self.section
    }

    fn journals_mut(&mut self) -> &mut Container<Journal> {
        &mut self.journals
    }

    /// Detaches every journal `keep` rejects.
    pub(crate) fn retain_journals(&mut self, keep: impl Fn(JournalId) -> bool) {
        retain_listed(&mut self.journals, Journal::group_mut, keep);
    }
}

impl Entity for Group {
    type Fields = GroupFields;
    const KIND: EntityKind = EntityKind::Group;

    fn id(&self) -> EntityId {
        self.id
    }

    fn create(id: EntityId, fields: GroupFields) -> Shared<Self> {
        let group = share(Self {
            id,
            name: fields.name,
            section: Weak::new(),
            journals: Container::new(),
        });
        relink(&group, &fields.section, Group::section_mut, Section::groups_mut);
        group
    }

    fn update(this: &Shared<Self>, fields: GroupFields) {
        this.borrow_mut().name = fields.name;
        relink(this, &fields.section, Group::section_mut, Section::groups_mut);
    }
}

/// Grade book of one subject taught to one group.
#[derive(Debug)]
pub struct Journal {
    id: JournalId,
    group: ParentRef<Group>,
    subject: Shared<Subject>,
    pub(crate) students: Container<Student>,
    pub(crate) lesson_types: Container<LessonType>,
    pub(crate) lessons: Container<Lesson>,
    pub(crate) control_types: Container<ControlType>,
    pub(crate) controls: Container<Control>,
    pub(crate) periods: Container<Period>,
    pub(crate) mark_type_sections: Container<MarkTypeSection>,
    pub(crate) mark_types: Container<MarkType>,
    marks: Container<Mark>,
}

#[derive(Debug, Clone)]
pub struct JournalFields {
    pub group: Shared<Group>,
    pub subject: Shared<Subject>,
}

impl Journal {
    /// Group currently listing this journal.
    pub fn group(&self) -> Option<Shared<Group>> {
        self.group.upgrade()
    }

    pub fn subject(&self) -> Shared<Subject> {
        self.subject.clone()
    }

    pub fn students(&self) -> &Container<Student> {
        &self.students
    }

    pub fn lesson_types(&self) -> &Container<LessonType> {
        &self.lesson_types
    }

    pub fn lessons(&self) -> &Container<Lesson> {
        &self.lessons
    }

    pub fn control_types(&self) -> &Container<ControlType> {
        &self.control_types
    }

    pub fn controls(&self) -> &Container<Control> {
        &self.controls
    }

    pub fn periods(&self) -> &Container<Period> {
        &self.periods
    }

    pub fn mark_type_sections(&self) -> &Container<MarkTypeSection> {
        &self.mark_type_sections
    }

    pub fn mark_types(&self) -> &Container<MarkType> {
        &self.mark_types
    }

    pub fn marks(&self) -> &Container<Mark> {
        &self.marks
    }

    fn group_mut(&mut self) -> &mut ParentRef<Group> {
        &mut self.group
    }

    pub(crate) fn marks_mut(&mut self) -> &mut Container<Mark> {
        &mut self.marks
    }
}

impl Entity for Journal {
    type Fields = JournalFields;
    const KIND: EntityKind = EntityKind::Journal;

    fn id(&self) -> EntityId {
        self.id
    }

    fn create(id: EntityId, fields: JournalFields) -> Shared<Self> {
        let journal = share(Self {
            id,
            group: Weak::new(),
            subject: fields.subject,
            students: Container::new(),
            lesson_types: Container::new(),
            lessons: Container::new(),
            control_types: Container::new(),
            controls: Container::new(),
            periods: Container::new(),
            mark_type_sections: Container::new(),
            mark_types: Container::new(),
            marks: Container::new(),
        });
        relink(&journal, &fields.group, Journal::group_mut, Group::journals_mut);
        journal
    }

    fn update(this: &Shared<Self>, fields: JournalFields) {
        this.borrow_mut().subject = fields.subject;
        relink(this, &fields.group, Journal::group_mut, Group::journals_mut);
    }
}
