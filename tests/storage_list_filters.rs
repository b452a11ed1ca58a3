//! Storage list filter integration tests with real `SQLite` (no mocks).
//!
//! Tests `list_issues` with filter combinations:
//! - Status filters (single and multiple)
//! - Assignee/unassigned filters
//! - Label filter
//! - Title contains filter
//! - Limit, sort and reverse
#![allow(clippy::similar_names)]

mod common;

use common::test_db;
use docket::model::Status;
use docket::storage::{ListFilters, NewIssue, SqliteStorage};

fn seed(storage: &mut SqliteStorage, title: &str, status: Status) -> i64 {
    storage
        .create_issue(&NewIssue {
            title: title.to_string(),
            status,
            ..Default::default()
        })
        .unwrap()
        .id
}

// ============================================================================
// STATUS FILTER TESTS
// ============================================================================

#[test]
fn filter_by_single_status_open() {
    let mut storage = test_db();

    let open_id = seed(&mut storage, "open issue", Status::Open);
    seed(&mut storage, "busy issue", Status::InProgress);
    seed(&mut storage, "done issue", Status::Closed);

    let filters = ListFilters {
        statuses: Some(vec![Status::Open]),
        ..Default::default()
    };

    let results = storage.list_issues(&filters).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, open_id);
    assert_eq!(results[0].status, Status::Open);
}

#[test]
fn filter_by_multiple_statuses() {
    let mut storage = test_db();

    let open_id = seed(&mut storage, "still open", Status::Open);
    let busy_id = seed(&mut storage, "in flight", Status::InProgress);
    let closed_id = seed(&mut storage, "wrapped up", Status::Closed);

    let filters = ListFilters {
        statuses: Some(vec![Status::Open, Status::InProgress]),
        ..Default::default()
    };

    let results = storage.list_issues(&filters).unwrap();
    let ids: Vec<_> = results.iter().map(|i| i.id).collect();
    assert_eq!(results.len(), 2);
    assert!(ids.contains(&open_id));
    assert!(ids.contains(&busy_id));
    assert!(!ids.contains(&closed_id));
}

#[test]
fn filter_by_custom_status() {
    let mut storage = test_db();

    seed(&mut storage, "plain", Status::Open);
    let triage_id = seed(
        &mut storage,
        "needs triage",
        Status::Custom("triage".to_string()),
    );

    let filters = ListFilters {
        statuses: Some(vec![Status::Custom("triage".to_string())]),
        ..Default::default()
    };

    let results = storage.list_issues(&filters).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, triage_id);
}

// ============================================================================
// ASSIGNEE FILTER TESTS
// ============================================================================

#[test]
fn filter_by_assignee() {
    let mut storage = test_db();
    let alice = storage.create_user("alice", "alice@example.com").unwrap();
    let bob = storage.create_user("bob", "bob@example.com").unwrap();

    let alice_issue = storage
        .create_issue(&NewIssue {
            title: "for alice".to_string(),
            assignee_id: Some(alice.id),
            ..Default::default()
        })
        .unwrap();
    storage
        .create_issue(&NewIssue {
            title: "for bob".to_string(),
            assignee_id: Some(bob.id),
            ..Default::default()
        })
        .unwrap();

    let filters = ListFilters {
        assignee_id: Some(alice.id),
        ..Default::default()
    };

    let results = storage.list_issues(&filters).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, alice_issue.id);
}

#[test]
fn filter_unassigned_only() {
    let mut storage = test_db();
    let alice = storage.create_user("alice", "alice@example.com").unwrap();

    storage
        .create_issue(&NewIssue {
            title: "taken".to_string(),
            assignee_id: Some(alice.id),
            ..Default::default()
        })
        .unwrap();
    let free_id = seed(&mut storage, "up for grabs", Status::Open);

    let filters = ListFilters {
        unassigned: true,
        ..Default::default()
    };

    let results = storage.list_issues(&filters).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, free_id);
    assert!(results[0].assignee_id.is_none());
}

// ============================================================================
// LABEL FILTER TESTS
// ============================================================================

#[test]
fn filter_by_label() {
    let mut storage = test_db();

    let tagged_id = seed(&mut storage, "tagged", Status::Open);
    let other_id = seed(&mut storage, "other", Status::Open);
    storage
        .replace_labels(tagged_id, &["backend".to_string(), "urgent".to_string()])
        .unwrap();
    storage
        .replace_labels(other_id, &["frontend".to_string()])
        .unwrap();

    let filters = ListFilters {
        label: Some("backend".to_string()),
        ..Default::default()
    };

    let results = storage.list_issues(&filters).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, tagged_id);
}

#[test]
fn filter_by_unknown_label_matches_nothing() {
    let mut storage = test_db();

    let id = seed(&mut storage, "labelled", Status::Open);
    storage.replace_labels(id, &["known".to_string()]).unwrap();

    let filters = ListFilters {
        label: Some("missing".to_string()),
        ..Default::default()
    };

    let results = storage.list_issues(&filters).unwrap();
    assert!(results.is_empty());
}

// ============================================================================
// TITLE / LIMIT TESTS
// ============================================================================

#[test]
fn filter_by_title_contains_is_case_insensitive() {
    let mut storage = test_db();

    let hit_id = seed(&mut storage, "Fix the Login flow", Status::Open);
    seed(&mut storage, "unrelated work", Status::Open);

    let filters = ListFilters {
        title_contains: Some("login".to_string()),
        ..Default::default()
    };

    let results = storage.list_issues(&filters).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, hit_id);
}

#[test]
fn limit_caps_result_count() {
    let mut storage = test_db();

    for n in 0..5 {
        seed(&mut storage, &format!("issue {n}"), Status::Open);
    }

    let filters = ListFilters {
        limit: Some(3),
        ..Default::default()
    };

    let results = storage.list_issues(&filters).unwrap();
    assert_eq!(results.len(), 3);
}

// ============================================================================
// SORT TESTS
// ============================================================================

#[test]
fn default_order_is_creation_order() {
    let mut storage = test_db();

    let first = seed(&mut storage, "first", Status::Open);
    let second = seed(&mut storage, "second", Status::Open);
    let third = seed(&mut storage, "third", Status::Open);

    let results = storage.list_issues(&ListFilters::default()).unwrap();
    let ids: Vec<_> = results.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![first, second, third]);
}

#[test]
fn sort_by_title_and_reverse() {
    let mut storage = test_db();

    seed(&mut storage, "banana", Status::Open);
    seed(&mut storage, "apple", Status::Open);
    seed(&mut storage, "cherry", Status::Open);

    let sorted = storage
        .list_issues(&ListFilters {
            sort: Some("title".to_string()),
            ..Default::default()
        })
        .unwrap();
    let titles: Vec<_> = sorted.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["apple", "banana", "cherry"]);

    let reversed = storage
        .list_issues(&ListFilters {
            sort: Some("title".to_string()),
            reverse: true,
            ..Default::default()
        })
        .unwrap();
    let titles: Vec<_> = reversed.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["cherry", "banana", "apple"]);
}

// ============================================================================
// COMBINED FILTER TESTS
// ============================================================================

#[test]
fn combined_status_and_label_filters() {
    let mut storage = test_db();

    let match_id = seed(&mut storage, "open and tagged", Status::Open);
    let closed_id = seed(&mut storage, "closed but tagged", Status::Closed);
    let untagged_id = seed(&mut storage, "open untagged", Status::Open);

    storage
        .replace_labels(match_id, &["infra".to_string()])
        .unwrap();
    storage
        .replace_labels(closed_id, &["infra".to_string()])
        .unwrap();
    let _ = untagged_id;

    let filters = ListFilters {
        statuses: Some(vec![Status::Open]),
        label: Some("infra".to_string()),
        ..Default::default()
    };

    let results = storage.list_issues(&filters).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, match_id);
}
