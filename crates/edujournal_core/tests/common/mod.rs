#![allow(dead_code)]

use edujournal_core::{Entity, SchoolGraph};
use serde_json::{json, Value};
use std::rc::Rc;

/// Two sections sharing subject 10, one journal stub each.
pub fn menu_payload() -> Value {
    json!([
        {"id": 1, "name": "A", "items": [
            {"id": 10, "name": "Math", "items": [
                {"id": 100, "grade_id": 1000, "name": "7A"}
            ]}
        ]},
        {"id": 2, "name": "B", "items": [
            {"id": 10, "name": "Math", "items": [
                {"id": 200, "grade_id": 2000, "name": "8B"}
            ]}
        ]}
    ])
}

/// Detail for journal 100 (group 1000, subject 10).
pub fn journal_payload() -> Value {
    json!({
        "journal": {"grade_id": 1000, "subject_id": 10},
        "members": [
            {"id": 1, "name": "Ann"},
            {"id": 2, "name": "Bob"}
        ],
        "lesson_types": [{"id": 1, "name": "Regular"}],
        "lessons": [
            {"id": 501, "num": 1, "theme": "Fractions", "date": "2024-09-02"},
            {"id": 502, "num": 2, "date": "2024-09-04"}
        ],
        "control_types": [
            {"id": 31, "name": "Test", "shortname": "T", "desc": "Written test"},
            {"id": 32, "name": "Homework", "shortname": "HW", "desc": "Take-home work"}
        ],
        "controls": [
            {"id": 701, "type_id": 31, "lesson_id": 501, "text": "Quiz 1"},
            {"id": 702, "type_id": 32, "lesson_id": 502, "text": "Exercises", "short": "Ex"}
        ],
        "periods": [
            {"type_id": 1, "date_from": "2024-09-01", "date_to": "2024-10-31"}
        ],
        "mark_types": [
            {"id": 40, "name": "Five-point", "mask": 31, "marks": [
                {"id": 41, "name": "Five", "shortname": "5", "mask": 16},
                {"id": 42, "name": "Four", "shortname": "4", "mask": 8}
            ]}
        ],
        "marks": [
            {"id": 901, "type_id": 41, "student_id": 1, "control_id": 701, "text": "5"},
            {"id": 902, "type_id": 42, "student_id": 2, "control_id": 702, "text": "4"}
        ]
    })
}

pub fn graph_with_menu() -> SchoolGraph {
    let mut graph = SchoolGraph::new();
    graph.ingest_menu(&menu_payload()).unwrap();
    graph
}

pub fn ids<T: Entity>(container: &edujournal_core::Container<T>) -> Vec<i64> {
    container.ids()
}

/// Checks `child ∈ parent.children ⇔ child.parent == parent` for every
/// back-referenced kind in the graph.
pub fn assert_consistent(graph: &SchoolGraph) {
    let registry = graph.registry();

    for group in registry.groups.iter() {
        if let Some(section) = group.borrow().section() {
            assert!(section.borrow().groups().contains(group));
        }
    }
    for section in registry.sections.iter() {
        for group in section.borrow().groups() {
            let parent = group.borrow().section().expect("listed group has a section");
            assert!(Rc::ptr_eq(&parent, section));
        }
    }

    for journal in registry.journals.iter() {
        if let Some(group) = journal.borrow().group() {
            assert!(group.borrow().journals().contains(journal));
        }
    }
    for group in registry.groups.iter() {
        for journal in group.borrow().journals() {
            let parent = journal.borrow().group().expect("listed journal has a group");
            assert!(Rc::ptr_eq(&parent, group));
        }
    }

    for mark in registry.marks.iter() {
        if let Some(journal) = mark.borrow().journal() {
            assert!(journal.borrow().marks().contains(mark));
        }
    }
    for journal in registry.journals.iter() {
        for mark in journal.borrow().marks() {
            let parent = mark.borrow().journal().expect("listed mark has a journal");
            assert!(Rc::ptr_eq(&parent, journal));
        }
    }
}
