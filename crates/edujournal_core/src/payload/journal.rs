//! Per-journal detail payload.

use crate::model::{
    ControlId, ControlTypeId, GroupId, LessonId, MarkId, MarkTypeId, MarkTypeSectionId, PeriodId,
    StudentId, SubjectId,
};
use crate::payload::date::deserialize_iso_date;
use crate::payload::{decode, PayloadResult};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

/// Full detail of one journal, in upstream key order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JournalDetail {
    pub journal: JournalHeader,
    pub members: Vec<NamedRecord>,
    pub lesson_types: Vec<NamedRecord>,
    pub lessons: Vec<LessonRecord>,
    pub control_types: Vec<ControlTypeRecord>,
    pub controls: Vec<ControlRecord>,
    pub periods: Vec<PeriodRecord>,
    pub mark_types: Vec<MarkTypeSectionRecord>,
    pub marks: Vec<MarkRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct JournalHeader {
    pub grade_id: GroupId,
    pub subject_id: SubjectId,
}

/// `{id, name}` record shared by members and lesson types.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamedRecord {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LessonRecord {
    pub id: LessonId,
    #[serde(rename = "num")]
    pub number: i64,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(deserialize_with = "deserialize_iso_date")]
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ControlTypeRecord {
    pub id: ControlTypeId,
    pub name: String,
    pub shortname: String,
    #[serde(rename = "desc")]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ControlRecord {
    pub id: ControlId,
    pub type_id: ControlTypeId,
    pub lesson_id: LessonId,
    pub text: String,
    #[serde(default)]
    pub short: Option<String>,
}

/// Period keyed by its upstream `type_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PeriodRecord {
    pub type_id: PeriodId,
    #[serde(deserialize_with = "deserialize_iso_date")]
    pub date_from: NaiveDate,
    #[serde(deserialize_with = "deserialize_iso_date")]
    pub date_to: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MarkTypeSectionRecord {
    pub id: MarkTypeSectionId,
    pub name: String,
    pub mask: i64,
    pub marks: Vec<MarkTypeRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MarkTypeRecord {
    pub id: MarkTypeId,
    pub name: String,
    pub shortname: String,
    pub mask: i64,
}

/// Mark; `type_id` names a mark type or, failing that, a mark type section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MarkRecord {
    pub id: MarkId,
    pub type_id: i64,
    pub student_id: StudentId,
    pub control_id: ControlId,
    pub text: String,
}

pub fn decode_journal_detail(value: &Value) -> PayloadResult<JournalDetail> {
    decode("journal detail", value)
}
