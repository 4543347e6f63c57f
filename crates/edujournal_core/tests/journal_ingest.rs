mod common;

use chrono::NaiveDate;
use common::{assert_consistent, graph_with_menu, ids, journal_payload};
use edujournal_core::{Entity, EntityKind, IngestError, MarkTypeRef, Scope};
use serde_json::json;
use std::rc::Rc;

#[test]
fn journal_detail_populates_every_container() {
    let mut graph = graph_with_menu();

    let journal = graph.ingest_journal(100, &journal_payload()).unwrap();
    let journal = journal.borrow();

    assert_eq!(ids(journal.students()), vec![1, 2]);
    assert_eq!(ids(journal.lesson_types()), vec![1]);
    assert_eq!(ids(journal.lessons()), vec![501, 502]);
    assert_eq!(ids(journal.control_types()), vec![31, 32]);
    assert_eq!(ids(journal.controls()), vec![701, 702]);
    assert_eq!(ids(journal.periods()), vec![1]);
    assert_eq!(ids(journal.mark_type_sections()), vec![40]);
    assert_eq!(ids(journal.mark_types()), vec![41, 42]);
    assert_eq!(ids(journal.marks()), vec![901, 902]);

    let lesson = journal.lessons().get_by_id(502).unwrap();
    assert_eq!(lesson.borrow().theme, None);
    assert_eq!(
        lesson.borrow().date,
        NaiveDate::from_ymd_opt(2024, 9, 4).unwrap()
    );

    let period = journal.periods().get_by_id(1).unwrap();
    assert!(period.borrow().contains(lesson.borrow().date));
}

#[test]
fn control_derives_descriptive_attributes_from_its_type() {
    let mut graph = graph_with_menu();
    let journal = graph.ingest_journal(100, &journal_payload()).unwrap();

    let control = journal.borrow().controls().get_by_id(702).unwrap();
    let control = control.borrow();
    assert_eq!(control.name(), "Homework");
    assert_eq!(control.shortname(), "HW");
    assert_eq!(control.description(), "Take-home work");
    assert_eq!(control.short.as_deref(), Some("Ex"));
    assert_eq!(control.lesson().borrow().id(), 502);
}

#[test]
fn mark_resolves_student_control_and_journal() {
    let mut graph = graph_with_menu();
    let journal = graph.ingest_journal(100, &journal_payload()).unwrap();

    let mark = graph.registry().marks.get(902).unwrap();
    let mark = mark.borrow();
    assert_eq!(mark.student().borrow().name, "Bob");
    assert_eq!(mark.control().borrow().id(), 702);
    assert!(Rc::ptr_eq(&mark.journal().unwrap(), &journal));
    assert_eq!(mark.name(), "Four");
    assert_eq!(mark.mask(), 8);
    assert_consistent(&graph);
}

#[test]
fn ingesting_same_detail_twice_is_idempotent() {
    let mut graph = graph_with_menu();
    let journal = graph.ingest_journal(100, &journal_payload()).unwrap();
    let student = journal.borrow().students().get_by_id(1).unwrap();
    let counts_before = graph.counts();

    let again = graph.ingest_journal(100, &journal_payload()).unwrap();

    assert!(Rc::ptr_eq(&journal, &again));
    assert_eq!(graph.counts(), counts_before);
    assert!(Rc::ptr_eq(
        &student,
        &journal.borrow().students().get_by_id(1).unwrap()
    ));
    assert_eq!(ids(journal.borrow().marks()), vec![901, 902]);
    assert_eq!(ids(journal.borrow().students()), vec![1, 2]);
    assert_consistent(&graph);
}

#[test]
fn removed_student_and_mark_do_not_survive_re_ingestion() {
    let mut graph = graph_with_menu();
    let journal = graph.ingest_journal(100, &journal_payload()).unwrap();
    let dropped_mark = graph.registry().marks.get(902).unwrap();

    let mut payload = journal_payload();
    payload["members"] = json!([{"id": 1, "name": "Ann"}]);
    payload["marks"] = json!([
        {"id": 901, "type_id": 41, "student_id": 1, "control_id": 701, "text": "5"}
    ]);
    graph.ingest_journal(100, &payload).unwrap();

    assert_eq!(ids(journal.borrow().students()), vec![1]);
    assert_eq!(ids(journal.borrow().marks()), vec![901]);
    assert!(dropped_mark.borrow().journal().is_none());
    assert_consistent(&graph);
}

#[test]
fn changing_mark_type_updates_derived_attributes() {
    let mut graph = graph_with_menu();
    graph.ingest_journal(100, &journal_payload()).unwrap();
    let mark = graph.registry().marks.get(901).unwrap();
    assert_eq!(mark.borrow().name(), "Five");

    let mut payload = journal_payload();
    payload["marks"][0]["type_id"] = json!(42);
    graph.ingest_journal(100, &payload).unwrap();

    assert_eq!(mark.borrow().name(), "Four");
    assert_eq!(mark.borrow().mask(), 8);
}

#[test]
fn mark_type_falls_back_to_mark_type_section() {
    // Upstream sometimes grades against a whole section; whether that is a
    // deliberate granularity or missing data is not known.
    let mut graph = graph_with_menu();
    let mut payload = journal_payload();
    payload["marks"][0]["type_id"] = json!(40);

    graph.ingest_journal(100, &payload).unwrap();

    let mark = graph.registry().marks.get(901).unwrap();
    let scale = mark.borrow().mark_type();
    assert!(matches!(scale, MarkTypeRef::Section(_)));
    assert_eq!(scale.kind(), EntityKind::MarkTypeSection);
    assert_eq!(mark.borrow().name(), "Five-point");
    assert_eq!(mark.borrow().mask(), 31);
}

#[test]
fn dangling_control_reference_fails_without_partial_application() {
    let mut graph = graph_with_menu();
    let journal = graph.ingest_journal(100, &journal_payload()).unwrap();

    let mut payload = journal_payload();
    payload["members"] = json!([{"id": 1, "name": "Renamed"}]);
    payload["marks"][0]["control_id"] = json!(799);
    let err = graph.ingest_journal(100, &payload).unwrap_err();

    match err {
        IngestError::DanglingReference { scope, kind, id } => {
            assert_eq!(scope, Scope::Journal(100));
            assert_eq!(kind, EntityKind::Control);
            assert_eq!(id, 799);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(ids(journal.borrow().students()), vec![1, 2]);
    assert_eq!(
        journal.borrow().students().get_by_id(1).unwrap().borrow().name,
        "Ann"
    );
    assert_eq!(ids(journal.borrow().marks()), vec![901, 902]);
    assert_consistent(&graph);
}

#[test]
fn control_with_unknown_lesson_is_dangling() {
    let mut graph = graph_with_menu();
    let mut payload = journal_payload();
    payload["controls"][1]["lesson_id"] = json!(599);

    let err = graph.ingest_journal(100, &payload).unwrap_err();
    assert!(matches!(
        err,
        IngestError::DanglingReference {
            kind: EntityKind::Lesson,
            id: 599,
            ..
        }
    ));
    assert!(graph.registry().controls.is_empty());
}

#[test]
fn unknown_group_in_header_is_dangling() {
    let mut graph = graph_with_menu();
    let mut payload = journal_payload();
    payload["journal"]["grade_id"] = json!(9999);

    let err = graph.ingest_journal(100, &payload).unwrap_err();
    assert!(matches!(
        err,
        IngestError::DanglingReference {
            scope: Scope::Journal(100),
            kind: EntityKind::Group,
            id: 9999
        }
    ));
    assert_eq!(err.code(), "dangling_reference");
}

#[test]
fn header_relinks_journal_to_new_group() {
    let mut graph = graph_with_menu();
    let old_group = graph.registry().groups.get(1000).unwrap();
    let new_group = graph.registry().groups.get(2000).unwrap();

    let mut payload = journal_payload();
    payload["journal"]["grade_id"] = json!(2000);
    let journal = graph.ingest_journal(100, &payload).unwrap();

    assert!(!old_group.borrow().journals().contains(&journal));
    assert_eq!(new_group.borrow().journals().ids(), vec![200, 100]);
    assert_consistent(&graph);
}

#[test]
fn mark_moves_between_journals() {
    let mut graph = graph_with_menu();
    let first = graph.ingest_journal(100, &journal_payload()).unwrap();

    let mut payload = journal_payload();
    payload["journal"]["grade_id"] = json!(2000);
    payload["marks"] = json!([
        {"id": 901, "type_id": 41, "student_id": 1, "control_id": 701, "text": "5"}
    ]);
    let second = graph.ingest_journal(200, &payload).unwrap();

    let mark = graph.registry().marks.get(901).unwrap();
    assert!(Rc::ptr_eq(&mark.borrow().journal().unwrap(), &second));
    assert_eq!(ids(first.borrow().marks()), vec![902]);
    assert_eq!(ids(second.borrow().marks()), vec![901]);
    assert_consistent(&graph);
}

#[test]
fn unknown_journal_is_not_found() {
    let mut graph = graph_with_menu();
    let err = graph.ingest_journal(999, &journal_payload()).unwrap_err();
    assert!(matches!(
        err,
        IngestError::NotFound {
            kind: EntityKind::Journal,
            id: Some(999)
        }
    ));
    assert_eq!(err.scope(), None);
}

#[test]
fn malformed_detail_reports_scope() {
    let mut graph = graph_with_menu();
    let mut payload = journal_payload();
    payload["periods"][0]["date_to"] = json!("31.10.2024");

    let err = graph.ingest_journal(100, &payload).unwrap_err();
    assert_eq!(err.scope(), Some(Scope::Journal(100)));
    assert_eq!(err.code(), "malformed_payload");
    assert!(err.to_string().contains("journal 100"), "unexpected: {err}");
}

#[test]
fn absent_optional_fields_clear_stored_values() {
    let mut graph = graph_with_menu();
    graph.ingest_journal(100, &journal_payload()).unwrap();
    let lesson = graph.registry().lessons.get(501).unwrap();
    let control = graph.registry().controls.get(702).unwrap();
    assert_eq!(lesson.borrow().theme.as_deref(), Some("Fractions"));
    assert_eq!(control.borrow().short.as_deref(), Some("Ex"));

    let mut payload = journal_payload();
    payload["lessons"][0] = json!({"id": 501, "num": 1, "date": "2024-09-02"});
    payload["controls"][1] =
        json!({"id": 702, "type_id": 32, "lesson_id": 502, "text": "Exercises"});
    graph.ingest_journal(100, &payload).unwrap();

    assert_eq!(lesson.borrow().theme, None);
    assert_eq!(control.borrow().short, None);
    assert_eq!(control.borrow().text, "Exercises");
}
