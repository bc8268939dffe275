use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use atelier_models::{Broadcast, ChatMessage, Notification, NotificationKind, Task};

use crate::error::PortalResult;
use crate::{Portal, visibility};

/// Notification ledger: derives badges from incoming entities and the
/// profile's last-seen timestamp. Entries live only for the session;
/// the sole persisted piece is `last_seen_at`, written back through the
/// profile table on mark-all-seen.
impl Portal {
    pub fn set_active_channel(&mut self, channel: Option<Uuid>) {
        self.active_channel = channel;
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.stores.notifications
    }

    /// Fold a message pushed from the provider. Notifies when the
    /// message is visible, from someone else, and lands in a channel the
    /// viewer is not currently looking at.
    pub fn note_incoming_message(&mut self, message: ChatMessage) {
        let Ok(profile) = self.profile() else {
            return;
        };
        let visible = visibility::visible_channels(profile, &self.stores)
            .iter()
            .any(|c| c.id == message.channel_id);
        let foreign = message.sender_id != profile.id;
        let elsewhere = self.active_channel != Some(message.channel_id);
        if visible && foreign && elsewhere {
            self.stores.notifications.push(Notification {
                id: Uuid::new_v4(),
                kind: NotificationKind::Message,
                title: message.sender_name.clone(),
                body: message.content.clone(),
                link_to: Some(message.channel_id),
                created_at: Utc::now(),
            });
        }
        self.stores.messages.insert(message.id, message);
    }

    /// Fold a task pushed from the provider; notify when it is newly
    /// assigned to the current identity.
    pub fn note_incoming_task(&mut self, task: Task) {
        let Ok(profile) = self.profile() else {
            return;
        };
        let was_mine = self
            .stores
            .tasks
            .get(&task.id)
            .is_some_and(|t| t.is_assigned_to(profile.id));
        if task.is_assigned_to(profile.id) && !was_mine {
            self.stores.notifications.push(Notification {
                id: Uuid::new_v4(),
                kind: NotificationKind::TaskAssigned,
                title: "Task assigned".to_string(),
                body: task.title.clone(),
                link_to: Some(task.id),
                created_at: Utc::now(),
            });
        }
        self.stores.tasks.insert(task.id, task);
    }

    pub fn note_incoming_broadcast(&mut self, broadcast: Broadcast) {
        let Ok(profile) = self.profile() else {
            return;
        };
        if broadcast.author_id != profile.id {
            self.stores.notifications.push(Notification {
                id: Uuid::new_v4(),
                kind: NotificationKind::Broadcast,
                title: broadcast.title.clone(),
                body: broadcast.body.clone(),
                link_to: None,
                created_at: Utc::now(),
            });
        }
        self.stores.broadcasts.insert(broadcast.id, broadcast);
    }

    /// The catch-up view: visible messages from others newer than the
    /// profile's last-seen timestamp.
    pub fn unread_messages(&self) -> Vec<&ChatMessage> {
        let Ok(profile) = self.profile() else {
            return Vec::new();
        };
        visibility::visible_messages(profile, &self.stores)
            .into_iter()
            .filter(|m| m.sender_id != profile.id && m.sent_at > profile.last_seen_at)
            .collect()
    }

    /// Advance last-seen to now, persist it through the profile update
    /// path, and drop the whole ledger. The fold happens only after the
    /// provider accepted the write.
    pub async fn mark_all_seen(&mut self) -> PortalResult<()> {
        let profile = self.profile()?.clone();
        let now = Utc::now();
        let updated = self
            .tables
            .profiles
            .update(profile.id, json!({ "last_seen_at": now }))
            .await?;
        self.stores.users.insert(updated.id, updated.clone());
        if let Some(session) = self.session.as_mut() {
            session.profile = updated;
        }
        self.stores.notifications.clear();
        Ok(())
    }

    /// Drop only the entries linked to one channel; everything else
    /// stays.
    pub fn clear_channel_notifications(&mut self, channel_id: Uuid) {
        self.stores
            .notifications
            .retain(|n| n.link_to != Some(channel_id));
    }
}
