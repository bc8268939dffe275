use chrono::Utc;
use uuid::Uuid;

use atelier_models::{Broadcast, ChatMessage, NotificationKind, ProjectScope};

use crate::fixtures::seed::{CLIENT_EMAIL, GUEST_EMAIL};
use crate::fixtures::test_portal::TestPortal;

fn message_from(sender_id: Uuid, channel_id: Uuid, project_id: Uuid, content: &str) -> ChatMessage {
    ChatMessage {
        id: Uuid::new_v4(),
        sender_id,
        sender_name: "Olivia".to_string(),
        content: content.to_string(),
        channel_id,
        scope: ProjectScope::Project(project_id),
        attachment: None,
        sent_at: Utc::now(),
    }
}

#[tokio::test]
async fn foreign_message_in_another_channel_notifies() {
    let mut app = TestPortal::signed_in(CLIENT_EMAIL).await;
    let world = &app.world;
    app.portal.set_active_channel(Some(world.ch_alpha_general));

    let incoming = message_from(
        world.owner_id,
        world.ch_alpha_private,
        world.alpha_id,
        "Budget update",
    );
    app.portal.note_incoming_message(incoming);

    let notifications = app.portal.notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::Message);
    assert_eq!(notifications[0].link_to, Some(world.ch_alpha_private));
}

#[tokio::test]
async fn active_channel_and_own_messages_stay_silent() {
    let mut app = TestPortal::signed_in(CLIENT_EMAIL).await;
    let world = &app.world;
    app.portal.set_active_channel(Some(world.ch_alpha_general));

    // Watching the channel the message lands in.
    app.portal.note_incoming_message(message_from(
        world.owner_id,
        world.ch_alpha_general,
        world.alpha_id,
        "seen live",
    ));
    // The viewer's own message echoed back.
    app.portal.note_incoming_message(message_from(
        world.client_id,
        world.ch_alpha_private,
        world.alpha_id,
        "my own words",
    ));

    assert!(app.portal.notifications().is_empty());
    // Both messages still folded into the store.
    assert_eq!(app.portal.stores().messages.len(), 6);
}

#[tokio::test]
async fn invisible_channel_folds_without_notifying() {
    let mut app = TestPortal::signed_in(GUEST_EMAIL).await;
    let world = &app.world;

    app.portal.note_incoming_message(message_from(
        world.owner_id,
        world.ch_alpha_private,
        world.alpha_id,
        "not for guests",
    ));

    assert!(app.portal.notifications().is_empty());
}

#[tokio::test]
async fn newly_assigned_task_notifies_once() {
    let mut app = TestPortal::signed_in(CLIENT_EMAIL).await;
    let world = &app.world;

    let mut task = app.portal.stores().tasks[&world.task_alpha_open].clone();
    task.assignee_id = Some(world.client_id);
    app.portal.note_incoming_task(task.clone());

    let notifications = app.portal.notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::TaskAssigned);

    // A second push of the already-mine task is not news.
    app.portal.note_incoming_task(task);
    assert_eq!(app.portal.notifications().len(), 1);
}

#[tokio::test]
async fn broadcast_notifies_everyone_but_the_author() {
    let mut app = TestPortal::signed_in(CLIENT_EMAIL).await;
    let world = &app.world;

    app.portal.note_incoming_broadcast(Broadcast {
        id: Uuid::new_v4(),
        title: "Tour dates".to_string(),
        body: "On sale Friday".to_string(),
        author_id: world.owner_id,
        sent_at: Utc::now(),
    });
    app.portal.note_incoming_broadcast(Broadcast {
        id: Uuid::new_v4(),
        title: "My own news".to_string(),
        body: "".to_string(),
        author_id: world.client_id,
        sent_at: Utc::now(),
    });

    let notifications = app.portal.notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::Broadcast);
    assert_eq!(notifications[0].title, "Tour dates");
}

#[tokio::test]
async fn unread_counts_foreign_messages_since_last_seen() {
    let app = TestPortal::signed_in(CLIENT_EMAIL).await;
    let world = &app.world;

    // Seeded: one message older than last-seen, two newer, beta hidden.
    let unread = app.portal.unread_messages();
    assert_eq!(unread.len(), 2);
    assert!(unread.iter().all(|m| m.id != world.msg_old_alpha));
}

#[tokio::test]
async fn mark_all_seen_persists_and_empties_the_ledger() {
    let mut app = TestPortal::signed_in(CLIENT_EMAIL).await;
    let world = &app.world;

    app.portal.note_incoming_message(message_from(
        world.owner_id,
        world.ch_alpha_private,
        world.alpha_id,
        "ping",
    ));
    assert!(!app.portal.notifications().is_empty());

    app.portal.mark_all_seen().await.unwrap();

    assert!(app.portal.notifications().is_empty());
    assert!(app.portal.unread_messages().is_empty());
    // last_seen_at went through the profile update path.
    assert!(app.provider.calls().iter().any(|c| c == "update:profiles"));
    let profile = &app.portal.session().unwrap().profile;
    assert!(profile.last_seen_at > Utc::now() - chrono::Duration::minutes(1));
}

#[tokio::test]
async fn clearing_one_channel_keeps_the_rest() {
    let mut app = TestPortal::signed_in(CLIENT_EMAIL).await;
    let world = &app.world;

    app.portal.note_incoming_message(message_from(
        world.owner_id,
        world.ch_alpha_general,
        world.alpha_id,
        "general ping",
    ));
    app.portal.note_incoming_message(message_from(
        world.owner_id,
        world.ch_alpha_private,
        world.alpha_id,
        "private ping",
    ));
    assert_eq!(app.portal.notifications().len(), 2);

    app.portal.clear_channel_notifications(world.ch_alpha_general);

    let notifications = app.portal.notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].link_to, Some(world.ch_alpha_private));
}
