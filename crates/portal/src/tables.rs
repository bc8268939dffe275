use std::sync::Arc;

use atelier_models::{
    Broadcast, CalendarEvent, Channel, ChatMessage, Project, ProjectStats, StoredFile, Task,
    UserProfile,
};
use atelier_provider::{Provider, Table};

/// Typed handles to every provider table the portal reads or writes.
pub struct Tables {
    pub profiles: Table<UserProfile>,
    pub projects: Table<Project>,
    pub tasks: Table<Task>,
    pub stats: Table<ProjectStats>,
    pub events: Table<CalendarEvent>,
    pub messages: Table<ChatMessage>,
    pub broadcasts: Table<Broadcast>,
    pub channels: Table<Channel>,
    pub files: Table<StoredFile>,
}

impl Tables {
    pub fn new(provider: &Arc<dyn Provider>) -> Self {
        Self {
            profiles: Table::new(Arc::clone(provider), UserProfile::TABLE),
            projects: Table::new(Arc::clone(provider), Project::TABLE),
            tasks: Table::new(Arc::clone(provider), Task::TABLE),
            stats: Table::new(Arc::clone(provider), ProjectStats::TABLE),
            events: Table::new(Arc::clone(provider), CalendarEvent::TABLE),
            messages: Table::new(Arc::clone(provider), ChatMessage::TABLE),
            broadcasts: Table::new(Arc::clone(provider), Broadcast::TABLE),
            channels: Table::new(Arc::clone(provider), Channel::TABLE),
            files: Table::new(Arc::clone(provider), StoredFile::TABLE),
        }
    }
}
