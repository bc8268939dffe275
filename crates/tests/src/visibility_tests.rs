use atelier_portal::ClientWorkspace;

use crate::fixtures::seed::{CLIENT_EMAIL, GUEST_EMAIL, MANAGER_EMAIL, OWNER_EMAIL};
use crate::fixtures::test_portal::TestPortal;

#[tokio::test]
async fn owner_sees_every_scope() {
    let app = TestPortal::signed_in(OWNER_EMAIL).await;

    assert_eq!(app.portal.visible_projects().len(), 2);
    assert_eq!(app.portal.visible_channels().len(), 4);
    assert_eq!(app.portal.visible_tasks().len(), 4);
    assert_eq!(app.portal.visible_messages().len(), 4);
    assert_eq!(app.portal.visible_users().len(), 5);
}

#[tokio::test]
async fn manager_sees_internal_and_assigned_projects_only() {
    let app = TestPortal::signed_in(MANAGER_EMAIL).await;
    let world = &app.world;

    let projects = app.portal.visible_projects();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].id, world.alpha_id);

    let channel_names: Vec<&str> = app
        .portal
        .visible_channels()
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(channel_names, ["alpha-general", "alpha-private", "hq"]);

    // Internal and alpha tasks, never beta.
    let tasks = app.portal.visible_tasks();
    assert_eq!(tasks.len(), 3);
    assert!(tasks.iter().all(|t| t.id != world.task_beta));
}

#[tokio::test]
async fn client_is_scoped_to_own_project() {
    let app = TestPortal::signed_in(CLIENT_EMAIL).await;
    let world = &app.world;

    let projects = app.portal.visible_projects();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].id, world.alpha_id);

    let channels = app.portal.visible_channels();
    assert_eq!(channels.len(), 2);
    assert!(channels.iter().all(|c| c.id != world.ch_internal));

    let messages = app.portal.visible_messages();
    assert_eq!(messages.len(), 3);
    assert!(messages.iter().all(|m| m.id != world.msg_beta));

    // Staff plus alpha members; the unassigned client stays hidden.
    let users = app.portal.visible_users();
    assert_eq!(users.len(), 4);
    assert!(users.iter().all(|u| u.id != world.incomplete_id));
}

#[tokio::test]
async fn guest_allow_list_narrows_channels_and_messages() {
    let app = TestPortal::signed_in(GUEST_EMAIL).await;
    let world = &app.world;

    let channels = app.portal.visible_channels();
    assert_eq!(channels.len(), 1);
    assert_eq!(channels[0].id, world.ch_alpha_general);

    // Messages inherit the allow-list: alpha-private stays hidden even
    // though its project is the guest's own.
    let messages = app.portal.visible_messages();
    assert_eq!(messages.len(), 2);
    assert!(messages.iter().all(|m| m.id != world.msg_private_alpha));
}

#[tokio::test]
async fn broadcasts_reach_everyone_signed_in() {
    let app = TestPortal::signed_in(GUEST_EMAIL).await;

    assert_eq!(app.portal.visible_broadcasts().len(), 1);
}

#[tokio::test]
async fn client_workspace_is_ready_with_assigned_project() {
    let app = TestPortal::signed_in(CLIENT_EMAIL).await;
    let world = &app.world;

    match app.portal.client_workspace().unwrap() {
        ClientWorkspace::Ready {
            project,
            tasks,
            channels,
            stats,
            ..
        } => {
            assert_eq!(project.id, world.alpha_id);
            assert_eq!(tasks.len(), 2);
            assert_eq!(channels.len(), 2);
            assert!(stats.is_some());
        }
        ClientWorkspace::IncompleteProfile => panic!("expected a ready workspace"),
    }
}

#[tokio::test]
async fn signed_out_portal_sees_nothing() {
    let app = TestPortal::spawn();

    assert!(app.portal.visible_projects().is_empty());
    assert!(app.portal.visible_messages().is_empty());
    assert!(app.portal.visible_broadcasts().is_empty());
    assert!(app.portal.search("alpha").is_empty());
}
