mod common;

use common::{assert_consistent, graph_with_menu, ids, journal_payload, menu_payload};
use edujournal_core::{Entity, EntityKind, IngestError, PayloadError, SchoolGraph, Scope};
use serde_json::json;
use std::rc::Rc;

#[test]
fn menu_builds_catalogue_and_links() {
    let graph = graph_with_menu();

    assert_eq!(ids(graph.sections()), vec![1, 2]);
    assert_eq!(ids(graph.subjects()), vec![10]);
    assert_eq!(ids(graph.journals()), vec![100, 200]);
    assert_eq!(ids(graph.groups()), vec![1000, 2000]);

    let group = graph.groups().get(|g| g.id() == 1000).unwrap();
    assert_eq!(group.borrow().section().unwrap().borrow().id(), 1);
    assert_eq!(group.borrow().name, "7A");

    let journal = graph.journal(200).unwrap();
    assert_eq!(journal.borrow().group().unwrap().borrow().id(), 2000);
    assert_eq!(journal.borrow().subject().borrow().name, "Math");
    assert_consistent(&graph);
}

#[test]
fn ingesting_same_menu_twice_is_idempotent() {
    let mut graph = graph_with_menu();
    let section = graph.sections().get_by_id(1).unwrap();
    let journal = graph.journal(100).unwrap();
    let counts_before = graph.counts();

    let summary = graph.ingest_menu(&menu_payload()).unwrap();

    assert_eq!(summary.sections, 2);
    assert_eq!(summary.journals, 2);
    assert_eq!(graph.counts(), counts_before);
    assert!(Rc::ptr_eq(&section, &graph.sections().get_by_id(1).unwrap()));
    assert!(Rc::ptr_eq(&journal, &graph.journal(100).unwrap()));
    assert_eq!(section.borrow().groups().ids(), vec![1000]);
    assert_consistent(&graph);
}

#[test]
fn menu_moves_group_to_new_section() {
    let mut graph = graph_with_menu();
    let a = graph.sections().get_by_id(1).unwrap();
    let b = graph.sections().get_by_id(2).unwrap();

    graph
        .ingest_menu(&json!([
            {"id": 1, "name": "A", "items": []},
            {"id": 2, "name": "B", "items": [
                {"id": 10, "name": "Math", "items": [
                    {"id": 100, "grade_id": 1000, "name": "7A"},
                    {"id": 200, "grade_id": 2000, "name": "8B"}
                ]}
            ]}
        ]))
        .unwrap();

    assert!(a.borrow().groups().is_empty());
    assert_eq!(b.borrow().groups().ids(), vec![2000, 1000]);
    assert_consistent(&graph);
}

#[test]
fn menu_replacement_drops_stale_catalogue_entries() {
    let mut graph = graph_with_menu();

    graph
        .ingest_menu(&json!([
            {"id": 2, "name": "B", "items": [
                {"id": 11, "name": "Physics", "items": [
                    {"id": 300, "grade_id": 2000, "name": "8B"}
                ]}
            ]}
        ]))
        .unwrap();

    assert_eq!(ids(graph.sections()), vec![2]);
    assert_eq!(ids(graph.subjects()), vec![11]);
    assert_eq!(ids(graph.journals()), vec![300]);
    // Still cached, just no longer listed.
    assert!(graph.registry().journals.contains(100));
}

#[test]
fn menu_replacement_detaches_delisted_groups_and_journals() {
    let mut graph = graph_with_menu();
    let section_a = graph.sections().get_by_id(1).unwrap();
    let group_1000 = graph.groups().get_by_id(1000).unwrap();
    let group_2000 = graph.groups().get_by_id(2000).unwrap();
    let journal_100 = graph.journal(100).unwrap();
    let journal_200 = graph.journal(200).unwrap();

    graph
        .ingest_menu(&json!([
            {"id": 1, "name": "A", "items": []},
            {"id": 2, "name": "B", "items": [
                {"id": 10, "name": "Math", "items": [
                    {"id": 300, "grade_id": 2000, "name": "8B"}
                ]}
            ]}
        ]))
        .unwrap();

    assert_eq!(ids(graph.groups()), vec![2000]);
    assert_eq!(ids(graph.journals()), vec![300]);
    assert!(section_a.borrow().groups().is_empty());
    assert!(group_1000.borrow().section().is_none());
    assert_eq!(group_2000.borrow().journals().ids(), vec![300]);
    assert!(journal_100.borrow().group().is_none());
    assert!(journal_200.borrow().group().is_none());
    assert_consistent(&graph);
}

#[test]
fn delisted_journal_is_no_longer_ingestible() {
    let mut graph = graph_with_menu();
    graph
        .ingest_menu(&json!([
            {"id": 2, "name": "B", "items": [
                {"id": 10, "name": "Math", "items": [
                    {"id": 200, "grade_id": 2000, "name": "8B"}
                ]}
            ]}
        ]))
        .unwrap();

    let err = graph.ingest_journal(100, &journal_payload()).unwrap_err();

    assert!(matches!(
        err,
        IngestError::NotFound {
            kind: EntityKind::Journal,
            id: Some(100)
        }
    ));
    let group_1000 = graph.registry().groups.get(1000).unwrap();
    assert!(group_1000.borrow().journals().is_empty());
    assert_consistent(&graph);
}

#[test]
fn malformed_menu_leaves_graph_untouched() {
    let mut graph = graph_with_menu();

    let err = graph
        .ingest_menu(&json!([
            {"id": 3, "name": "C", "items": [
                {"id": 12, "items": []}
            ]}
        ]))
        .unwrap_err();

    match err {
        IngestError::MalformedPayload {
            scope: Scope::Menu,
            source: PayloadError::Malformed { message, .. },
        } => assert!(message.contains("name"), "unexpected message: {message}"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(ids(graph.sections()), vec![1, 2]);
    assert!(!graph.registry().sections.contains(3));
}

#[test]
fn empty_graph_has_no_journals() {
    let graph = SchoolGraph::new();
    assert!(graph.journals().is_empty());
    assert_eq!(graph.counts().total(), 0);
}
