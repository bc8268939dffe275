use std::collections::HashMap;

use atelier_models::{
    Broadcast, CalendarEvent, Channel, ChatMessage, Notification, Project, ProjectStats,
    StoredFile, Task, UserProfile,
};
use uuid::Uuid;

/// In-memory entity collections, refreshed wholesale from the provider.
/// The provider remains the source of truth; these are the session's
/// working copies.
#[derive(Debug, Default)]
pub struct Stores {
    pub users: HashMap<Uuid, UserProfile>,
    pub projects: HashMap<Uuid, Project>,
    pub tasks: HashMap<Uuid, Task>,
    /// Keyed by project id, one record per project.
    pub stats: HashMap<Uuid, ProjectStats>,
    pub events: HashMap<Uuid, CalendarEvent>,
    pub messages: HashMap<Uuid, ChatMessage>,
    pub broadcasts: HashMap<Uuid, Broadcast>,
    pub channels: HashMap<Uuid, Channel>,
    pub files: HashMap<Uuid, StoredFile>,
    /// Session-local ledger; never loaded from the provider.
    pub notifications: Vec<Notification>,
}

impl Stores {
    /// Sign-out teardown: every derived collection goes away with the
    /// session.
    pub fn clear(&mut self) {
        self.users.clear();
        self.projects.clear();
        self.tasks.clear();
        self.stats.clear();
        self.events.clear();
        self.messages.clear();
        self.broadcasts.clear();
        self.channels.clear();
        self.files.clear();
        self.notifications.clear();
    }

    /// Drop a project and everything scoped to it. Stats are one-to-one
    /// with the project, so they go too.
    pub fn remove_project_cascade(&mut self, project_id: Uuid) {
        self.projects.remove(&project_id);
        self.stats.remove(&project_id);
        self.tasks
            .retain(|_, t| t.scope.project_id() != Some(project_id));
        self.files
            .retain(|_, f| f.scope.project_id() != Some(project_id));
        self.events
            .retain(|_, e| e.scope.project_id() != Some(project_id));
        let removed_channels: Vec<Uuid> = self
            .channels
            .values()
            .filter(|c| c.scope.project_id() == Some(project_id))
            .map(|c| c.id)
            .collect();
        self.channels
            .retain(|_, c| c.scope.project_id() != Some(project_id));
        self.messages
            .retain(|_, m| !removed_channels.contains(&m.channel_id));
    }
}
