//! Per-journal records: students, lessons, controls and periods.
//!
//! These kinds carry no parent back-reference; journal containers list them
//! by direct insertion during scope replacement.

use crate::model::entity::{share, Entity, EntityId, EntityKind, Shared};
use chrono::NaiveDate;

pub type StudentId = EntityId;
pub type LessonTypeId = EntityId;
pub type LessonId = EntityId;
pub type ControlTypeId = EntityId;
pub type ControlId = EntityId;
pub type PeriodId = EntityId;

#[derive(Debug)]
pub struct Student {
    id: StudentId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentFields {
    pub name: String,
}

impl Entity for Student {
    type Fields = StudentFields;
    const KIND: EntityKind = EntityKind::Student;

    fn id(&self) -> EntityId {
        self.id
    }

    fn create(id: EntityId, fields: StudentFields) -> Shared<Self> {
        share(Self {
            id,
            name: fields.name,
        })
    }

    fn update(this: &Shared<Self>, fields: StudentFields) {
        this.borrow_mut().name = fields.name;
    }
}

#[derive(Debug)]
pub struct LessonType {
    id: LessonTypeId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonTypeFields {
    pub name: String,
}

impl Entity for LessonType {
    type Fields = LessonTypeFields;
    const KIND: EntityKind = EntityKind::LessonType;

    fn id(&self) -> EntityId {
        self.id
    }

    fn create(id: EntityId, fields: LessonTypeFields) -> Shared<Self> {
        share(Self {
            id,
            name: fields.name,
        })
    }

    fn update(this: &Shared<Self>, fields: LessonTypeFields) {
        this.borrow_mut().name = fields.name;
    }
}

/// One scheduled lesson of a journal.
#[derive(Debug)]
pub struct Lesson {
    id: LessonId,
    /// Ordinal within the journal.
    pub number: i64,
    pub theme: Option<String>,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonFields {
    pub number: i64,
    pub theme: Option<String>,
    pub date: NaiveDate,
}

impl Entity for Lesson {
    type Fields = LessonFields;
    const KIND: EntityKind = EntityKind::Lesson;

    fn id(&self) -> EntityId {
        self.id
    }

    fn create(id: EntityId, fields: LessonFields) -> Shared<Self> {
        share(Self {
            id,
            number: fields.number,
            theme: fields.theme,
            date: fields.date,
        })
    }

    fn update(this: &Shared<Self>, fields: LessonFields) {
        let mut lesson = this.borrow_mut();
        lesson.number = fields.number;
        // Absent theme clears the previous one.
        lesson.theme = fields.theme;
        lesson.date = fields.date;
    }
}

/// Kind of graded activity (test, homework, ...).
#[derive(Debug)]
pub struct ControlType {
    id: ControlTypeId,
    pub name: String,
    pub shortname: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlTypeFields {
    pub name: String,
    pub shortname: String,
    pub description: String,
}

impl Entity for ControlType {
    type Fields = ControlTypeFields;
    const KIND: EntityKind = EntityKind::ControlType;

    fn id(&self) -> EntityId {
        self.id
    }

    fn create(id: EntityId, fields: ControlTypeFields) -> Shared<Self> {
        share(Self {
            id,
            name: fields.name,
            shortname: fields.shortname,
            description: fields.description,
        })
    }

    fn update(this: &Shared<Self>, fields: ControlTypeFields) {
        let mut control_type = this.borrow_mut();
        control_type.name = fields.name;
        control_type.shortname = fields.shortname;
        control_type.description = fields.description;
    }
}

/// One graded activity held during a lesson.
///
/// `name`, `shortname` and `description` are read through the current
/// control type on every call.
#[derive(Debug)]
pub struct Control {
    id: ControlId,
    control_type: Shared<ControlType>,
    lesson: Shared<Lesson>,
    pub text: String,
    pub short: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ControlFields {
    pub control_type: Shared<ControlType>,
    pub lesson: Shared<Lesson>,
    pub text: String,
    pub short: Option<String>,
}

impl Control {
    pub fn control_type(&self) -> Shared<ControlType> {
        self.control_type.clone()
    }

    pub fn lesson(&self) -> Shared<Lesson> {
        self.lesson.clone()
    }

    pub fn name(&self) -> String {
        self.control_type.borrow().name.clone()
    }

    pub fn shortname(&self) -> String {
        self.control_type.borrow().shortname.clone()
    }

    pub fn description(&self) -> String {
        self.control_type.borrow().description.clone()
    }
}

impl Entity for Control {
    type Fields = ControlFields;
    const KIND: EntityKind = EntityKind::Control;

    fn id(&self) -> EntityId {
        self.id
    }

    fn create(id: EntityId, fields: ControlFields) -> Shared<Self> {
        share(Self {
            id,
            control_type: fields.control_type,
            lesson: fields.lesson,
            text: fields.text,
            short: fields.short,
        })
    }

    fn update(this: &Shared<Self>, fields: ControlFields) {
        let mut control = this.borrow_mut();
        control.control_type = fields.control_type;
        control.lesson = fields.lesson;
        control.text = fields.text;
        control.short = fields.short;
    }
}

/// Grading period; its identifier is the upstream period type.
#[derive(Debug)]
pub struct Period {
    id: PeriodId,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodFields {
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
}

impl Period {
    /// Whether `date` falls inside the period, both ends inclusive.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.date_from <= date && date <= self.date_to
    }
}

impl Entity for Period {
    type Fields = PeriodFields;
    const KIND: EntityKind = EntityKind::Period;

    fn id(&self) -> EntityId {
        self.id
    }

    fn create(id: EntityId, fields: PeriodFields) -> Shared<Self> {
        share(Self {
            id,
            date_from: fields.date_from,
            date_to: fields.date_to,
        })
    }

    fn update(this: &Shared<Self>, fields: PeriodFields) {
        let mut period = this.borrow_mut();
        period.date_from = fields.date_from;
        period.date_to = fields.date_to;
    }
}
