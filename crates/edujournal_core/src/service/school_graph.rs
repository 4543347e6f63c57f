//! School graph: identity caches plus top-level catalogue and the two
//! scope-replacement ingestion use-cases.
//!
//! # Responsibility
//! - Replace the catalogue (sections, subjects, groups, journals) from a
//!   menu payload.
//! - Replace every per-journal container from a journal detail payload.
//!
//! # Invariants
//! - A scope is decoded and all of its cross-references are checked before
//!   any container or cached entity is touched; a failing scope leaves the
//!   graph unchanged.
//! - Within a journal scope, kinds are applied in dependency order: lessons
//!   before controls; students, controls and mark scales before marks.
//! - Each scope's containers are cleared, then repopulated from the payload.
//! - After a menu ingestion, `section.groups` and `group.journals` hold only
//!   the pairs the latest listing names; delisted children lose their
//!   back-reference.

use crate::model::{
    ControlFields, ControlTypeFields, Entity, EntityKind, Group, GroupFields, Journal,
    JournalFields, JournalId, LessonFields, LessonTypeFields, Mark, MarkFields, MarkTypeFields,
    MarkTypeRef, MarkTypeSectionFields, PeriodFields, Section, SectionFields, Shared,
    StudentFields, Subject, SubjectFields,
};
use crate::payload::{decode_journal_detail, decode_menu, JournalDetail, MarkRecord, MenuSection};
use crate::repo::links::detach_all;
use crate::repo::{Container, Registry, RegistryCounts};
use crate::service::error::{IngestError, IngestResult, Scope};
use log::{error, info, warn};
use serde_json::Value;
use std::collections::HashSet;
use std::time::Instant;

/// Sizes of the catalogue after a menu ingestion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuSummary {
    pub sections: usize,
    pub subjects: usize,
    pub groups: usize,
    pub journals: usize,
}

/// Identity-mapped, cross-referenced school organisation graph.
///
/// Handles are `Rc`-based, so a graph is confined to one thread; hosts that
/// ingest from several contexts must funnel calls through one owner.
#[derive(Default)]
pub struct SchoolGraph {
    registry: Registry,
    sections: Container<Section>,
    subjects: Container<Subject>,
    groups: Container<Group>,
    journals: Container<Journal>,
}

impl SchoolGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Direct cache access for callers wiring entities outside a payload.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub fn counts(&self) -> RegistryCounts {
        self.registry.counts()
    }

    pub fn sections(&self) -> &Container<Section> {
        &self.sections
    }

    pub fn subjects(&self) -> &Container<Subject> {
        &self.subjects
    }

    pub fn groups(&self) -> &Container<Group> {
        &self.groups
    }

    pub fn journals(&self) -> &Container<Journal> {
        &self.journals
    }

    /// Looks up a journal listed by the latest menu, failing with `NotFound`
    /// otherwise. Delisted journals stay cached but are not returned.
    pub fn journal(&self, journal_id: JournalId) -> IngestResult<Shared<Journal>> {
        self.journals
            .get_by_id(journal_id)
            .ok_or(IngestError::NotFound {
                kind: EntityKind::Journal,
                id: Some(journal_id),
            })
    }

    /// Replaces the catalogue from a top-level listing payload.
    ///
    /// # Errors
    /// - `MalformedPayload` when any record lacks a required field.
    pub fn ingest_menu(&mut self, payload: &Value) -> IngestResult<MenuSummary> {
        let started_at = Instant::now();
        info!("event=ingest module=service status=start scope=menu");

        let result = self.apply_menu(payload);
        match &result {
            Ok(summary) => info!(
                "event=ingest module=service status=ok scope=menu duration_ms={} sections={} subjects={} groups={} journals={}",
                started_at.elapsed().as_millis(),
                summary.sections,
                summary.subjects,
                summary.groups,
                summary.journals
            ),
            Err(err) => log_failure(Scope::Menu, started_at, err),
        }
        result
    }

    /// Replaces every container of `journal_id` from its detail payload.
    ///
    /// The journal must already be known from a menu ingestion.
    ///
    /// # Errors
    /// - `NotFound` when `journal_id` was never listed.
    /// - `MalformedPayload` when any record lacks a required field.
    /// - `DanglingReference` when a record points at an unknown group,
    ///   subject, or a sibling record absent from the same payload.
    pub fn ingest_journal(
        &mut self,
        journal_id: JournalId,
        payload: &Value,
    ) -> IngestResult<Shared<Journal>> {
        let scope = Scope::Journal(journal_id);
        let started_at = Instant::now();
        info!("event=ingest module=service status=start scope=journal journal_id={journal_id}");

        let result = self.apply_journal(journal_id, payload);
        match &result {
            Ok(journal) => {
                let journal = journal.borrow();
                info!(
                    "event=ingest module=service status=ok scope=journal journal_id={} duration_ms={} students={} lessons={} controls={} marks={}",
                    journal_id,
                    started_at.elapsed().as_millis(),
                    journal.students().len(),
                    journal.lessons().len(),
                    journal.controls().len(),
                    journal.marks().len()
                );
            }
            Err(err) => log_failure(scope, started_at, err),
        }
        result
    }

    fn apply_menu(&mut self, payload: &Value) -> IngestResult<MenuSummary> {
        let listing =
            decode_menu(payload).map_err(|err| IngestError::malformed(Scope::Menu, err))?;

        self.detach_unlisted(&listing);
        self.sections.clear();
        self.subjects.clear();
        self.groups.clear();
        self.journals.clear();

        for section_record in listing {
            let section = self.registry.sections.obtain(
                section_record.id,
                SectionFields {
                    name: section_record.name,
                },
            );
            self.sections.add(section.clone());

            for subject_record in section_record.items {
                let subject = self.registry.subjects.obtain(
                    subject_record.id,
                    SubjectFields {
                        name: subject_record.name,
                    },
                );
                self.subjects.add(subject.clone());

                for stub in subject_record.items {
                    let group = self.registry.groups.obtain(
                        stub.grade_id,
                        GroupFields {
                            name: stub.name,
                            section: section.clone(),
                        },
                    );
                    self.groups.add(group.clone());

                    let journal = self.registry.journals.obtain(
                        stub.id,
                        JournalFields {
                            group,
                            subject: subject.clone(),
                        },
                    );
                    self.journals.add(journal);
                }
            }
        }

        Ok(MenuSummary {
            sections: self.sections.len(),
            subjects: self.subjects.len(),
            groups: self.groups.len(),
            journals: self.journals.len(),
        })
    }

    /// Retracts every group and journal the new listing no longer places
    /// under its current parent.
    fn detach_unlisted(&self, listing: &[MenuSection]) {
        let mut section_groups = HashSet::new();
        let mut group_journals = HashSet::new();
        for section in listing {
            for stub in section.items.iter().flat_map(|subject| &subject.items) {
                section_groups.insert((section.id, stub.grade_id));
                group_journals.insert((stub.grade_id, stub.id));
            }
        }

        for section in self.registry.sections.iter() {
            let section_id = section.borrow().id();
            section
                .borrow_mut()
                .retain_groups(|group_id| section_groups.contains(&(section_id, group_id)));
        }
        for group in self.registry.groups.iter() {
            let group_id = group.borrow().id();
            group
                .borrow_mut()
                .retain_journals(|journal_id| group_journals.contains(&(group_id, journal_id)));
        }
    }

    fn apply_journal(
        &mut self,
        journal_id: JournalId,
        payload: &Value,
    ) -> IngestResult<Shared<Journal>> {
        let scope = Scope::Journal(journal_id);
        self.journal(journal_id)?;
        let detail =
            decode_journal_detail(payload).map_err(|err| IngestError::malformed(scope, err))?;

        let group = self
            .registry
            .groups
            .require(detail.journal.grade_id)
            .map_err(|err| IngestError::from_repo(scope, err))?;
        let subject = self
            .registry
            .subjects
            .require(detail.journal.subject_id)
            .map_err(|err| IngestError::from_repo(scope, err))?;
        check_sibling_references(scope, &detail)?;

        // Validated; from here on the scope is applied in full.
        let journal = self
            .registry
            .journals
            .obtain(journal_id, JournalFields { group, subject });
        replace_journal_contents(&mut self.registry, scope, &journal, detail)?;
        Ok(journal)
    }
}

/// Verifies that every in-payload reference names a record of the same payload.
fn check_sibling_references(scope: Scope, detail: &JournalDetail) -> IngestResult<()> {
    let lesson_ids: HashSet<_> = detail.lessons.iter().map(|lesson| lesson.id).collect();
    let control_type_ids: HashSet<_> = detail.control_types.iter().map(|ct| ct.id).collect();
    let student_ids: HashSet<_> = detail.members.iter().map(|member| member.id).collect();
    let control_ids: HashSet<_> = detail.controls.iter().map(|control| control.id).collect();
    let scale_ids: HashSet<_> = detail
        .mark_types
        .iter()
        .flat_map(|section| {
            std::iter::once(section.id).chain(section.marks.iter().map(|mark_type| mark_type.id))
        })
        .collect();

    for control in &detail.controls {
        if !control_type_ids.contains(&control.type_id) {
            return Err(IngestError::dangling(
                scope,
                EntityKind::ControlType,
                control.type_id,
            ));
        }
        if !lesson_ids.contains(&control.lesson_id) {
            return Err(IngestError::dangling(
                scope,
                EntityKind::Lesson,
                control.lesson_id,
            ));
        }
    }

    for mark in &detail.marks {
        if !scale_ids.contains(&mark.type_id) {
            return Err(IngestError::dangling(scope, EntityKind::MarkType, mark.type_id));
        }
        if !student_ids.contains(&mark.student_id) {
            return Err(IngestError::dangling(
                scope,
                EntityKind::Student,
                mark.student_id,
            ));
        }
        if !control_ids.contains(&mark.control_id) {
            return Err(IngestError::dangling(
                scope,
                EntityKind::Control,
                mark.control_id,
            ));
        }
    }

    Ok(())
}

fn replace_journal_contents(
    registry: &mut Registry,
    scope: Scope,
    journal: &Shared<Journal>,
    detail: JournalDetail,
) -> IngestResult<()> {
    {
        let mut target = journal.borrow_mut();

        target.students.clear();
        for record in detail.members {
            let student = registry
                .students
                .obtain(record.id, StudentFields { name: record.name });
            target.students.add(student);
        }

        target.lesson_types.clear();
        for record in detail.lesson_types {
            let lesson_type = registry
                .lesson_types
                .obtain(record.id, LessonTypeFields { name: record.name });
            target.lesson_types.add(lesson_type);
        }

        target.lessons.clear();
        for record in detail.lessons {
            let lesson = registry.lessons.obtain(
                record.id,
                LessonFields {
                    number: record.number,
                    theme: record.theme,
                    date: record.date,
                },
            );
            target.lessons.add(lesson);
        }

        target.control_types.clear();
        for record in detail.control_types {
            let control_type = registry.control_types.obtain(
                record.id,
                ControlTypeFields {
                    name: record.name,
                    shortname: record.shortname,
                    description: record.description,
                },
            );
            target.control_types.add(control_type);
        }

        target.controls.clear();
        for record in detail.controls {
            let control_type = target
                .control_types
                .get_by_id(record.type_id)
                .ok_or_else(|| {
                    IngestError::dangling(scope, EntityKind::ControlType, record.type_id)
                })?;
            let lesson = target
                .lessons
                .get_by_id(record.lesson_id)
                .ok_or_else(|| IngestError::dangling(scope, EntityKind::Lesson, record.lesson_id))?;
            let control = registry.controls.obtain(
                record.id,
                ControlFields {
                    control_type,
                    lesson,
                    text: record.text,
                    short: record.short,
                },
            );
            target.controls.add(control);
        }

        target.periods.clear();
        for record in detail.periods {
            let period = registry.periods.obtain(
                record.type_id,
                PeriodFields {
                    date_from: record.date_from,
                    date_to: record.date_to,
                },
            );
            target.periods.add(period);
        }

        target.mark_type_sections.clear();
        target.mark_types.clear();
        for section_record in detail.mark_types {
            let section = registry.mark_type_sections.obtain(
                section_record.id,
                MarkTypeSectionFields {
                    name: section_record.name,
                    mask: section_record.mask,
                },
            );
            target.mark_type_sections.add(section);

            for record in section_record.marks {
                let mark_type = registry.mark_types.obtain(
                    record.id,
                    MarkTypeFields {
                        name: record.name,
                        shortname: record.shortname,
                        mask: record.mask,
                    },
                );
                target.mark_types.add(mark_type);
            }
        }

        detach_all(target.marks_mut(), Mark::journal_mut);
    }

    // Marks relink into `journal.marks`, so no borrow of the journal may be
    // held while they are obtained.
    for record in detail.marks {
        let mark_id = record.id;
        let fields = resolve_mark(scope, journal, record)?;
        registry.marks.obtain(mark_id, fields);
    }

    Ok(())
}

fn resolve_mark(
    scope: Scope,
    journal: &Shared<Journal>,
    record: MarkRecord,
) -> IngestResult<MarkFields> {
    let source = journal.borrow();

    let mark_type = match source.mark_types().get_by_id(record.type_id) {
        Some(mark_type) => MarkTypeRef::Type(mark_type),
        None => match source.mark_type_sections().get_by_id(record.type_id) {
            Some(section) => {
                warn!(
                    "event=mark_type_fallback module=service scope={} mark_id={} type_id={}",
                    scope, record.id, record.type_id
                );
                MarkTypeRef::Section(section)
            }
            None => {
                return Err(IngestError::dangling(
                    scope,
                    EntityKind::MarkType,
                    record.type_id,
                ))
            }
        },
    };
    let student = source
        .students()
        .get_by_id(record.student_id)
        .ok_or_else(|| IngestError::dangling(scope, EntityKind::Student, record.student_id))?;
    let control = source
        .controls()
        .get_by_id(record.control_id)
        .ok_or_else(|| IngestError::dangling(scope, EntityKind::Control, record.control_id))?;

    Ok(MarkFields {
        mark_type,
        journal: journal.clone(),
        student,
        control,
        text: record.text,
    })
}

fn log_failure(scope: Scope, started_at: Instant, err: &IngestError) {
    error!(
        "event=ingest module=service status=error scope={} duration_ms={} error_code={} error={}",
        scope,
        started_at.elapsed().as_millis(),
        err.code(),
        err
    );
}
