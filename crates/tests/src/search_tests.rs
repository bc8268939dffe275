use chrono::Utc;
use uuid::Uuid;

use atelier_models::{ProjectScope, Task, TaskStatus};
use atelier_portal::SearchKind;
use atelier_portal::search::MAX_RESULTS;

use crate::fixtures::seed::{CLIENT_EMAIL, GUEST_EMAIL, MANAGER_EMAIL, OWNER_EMAIL};
use crate::fixtures::test_portal::TestPortal;

#[tokio::test]
async fn blank_queries_match_nothing() {
    let app = TestPortal::signed_in(OWNER_EMAIL).await;

    assert!(app.portal.search("").is_empty());
    assert!(app.portal.search("   \t ").is_empty());
}

#[tokio::test]
async fn matching_is_case_insensitive() {
    let app = TestPortal::signed_in(OWNER_EMAIL).await;

    let results = app.portal.search("ALPHA");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].kind, SearchKind::Project);
    assert_eq!(results[0].label, "Alpha");
}

#[tokio::test]
async fn owner_finds_matches_across_entity_kinds() {
    let app = TestPortal::signed_in(OWNER_EMAIL).await;

    let results = app.portal.search("beta");
    let kinds: Vec<SearchKind> = results.iter().map(|r| r.kind).collect();
    assert_eq!(
        kinds,
        [
            SearchKind::Project,
            SearchKind::Task,
            SearchKind::File,
            SearchKind::Message,
            SearchKind::Event,
        ]
    );
}

#[tokio::test]
async fn manager_search_respects_project_assignment() {
    let app = TestPortal::signed_in(MANAGER_EMAIL).await;

    assert!(app.portal.search("beta").is_empty());
}

#[tokio::test]
async fn project_names_are_staff_only_territory() {
    let app = TestPortal::signed_in(CLIENT_EMAIL).await;

    assert!(app.portal.search("alpha").is_empty());
}

#[tokio::test]
async fn guest_search_honors_the_channel_allow_list() {
    let restricted = TestPortal::signed_in(GUEST_EMAIL).await;
    assert!(restricted.portal.search("secret-word").is_empty());

    let full_member = TestPortal::signed_in(CLIENT_EMAIL).await;
    let results = full_member.portal.search("secret-word");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].kind, SearchKind::Message);
}

#[tokio::test]
async fn results_cap_at_the_limit() {
    let mut app = TestPortal::signed_in(OWNER_EMAIL).await;
    let alpha = app.world.alpha_id;

    let now = Utc::now();
    let extra: Vec<Task> = (0..15)
        .map(|n| Task {
            id: Uuid::new_v4(),
            scope: ProjectScope::Project(alpha),
            title: format!("Sprint item {n:02}"),
            status: TaskStatus::Todo,
            assignee_id: None,
            due_date: None,
            subtasks: vec![],
            created_at: now,
            updated_at: now,
        })
        .collect();
    app.provider.seed_rows(Task::TABLE, &extra);
    app.portal.refresh().await.unwrap();

    let results = app.portal.search("sprint item");
    assert_eq!(results.len(), MAX_RESULTS);
    assert!(results.iter().all(|r| r.kind == SearchKind::Task));
}
