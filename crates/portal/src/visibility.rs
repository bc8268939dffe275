use std::collections::HashSet;

use atelier_models::{
    Broadcast, CalendarEvent, Channel, ChatMessage, Project, ProjectScope, ProjectStats, Role,
    StoredFile, Task, UserProfile,
};
use uuid::Uuid;

use crate::store::Stores;

/// Core scope rule. Everything below derives from it:
/// owners see everything, managers see internal plus assigned projects,
/// clients see only their own project.
pub fn scope_visible(profile: &UserProfile, scope: ProjectScope) -> bool {
    match profile.role {
        Role::Owner => true,
        Role::Manager => match scope {
            ProjectScope::Internal => true,
            ProjectScope::Project(id) => profile.assigned_projects.contains(&id),
        },
        Role::Client => match scope {
            ProjectScope::Internal => false,
            ProjectScope::Project(id) => profile.project_id == Some(id),
        },
    }
}

pub fn visible_projects<'a>(profile: &UserProfile, stores: &'a Stores) -> Vec<&'a Project> {
    let mut projects: Vec<&Project> = stores
        .projects
        .values()
        .filter(|p| scope_visible(profile, ProjectScope::Project(p.id)))
        .collect();
    projects.sort_by(|a, b| a.name.cmp(&b.name));
    projects
}

pub fn visible_tasks<'a>(profile: &UserProfile, stores: &'a Stores) -> Vec<&'a Task> {
    let mut tasks: Vec<&Task> = stores
        .tasks
        .values()
        .filter(|t| scope_visible(profile, t.scope))
        .collect();
    tasks.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));
    tasks
}

pub fn visible_stats<'a>(profile: &UserProfile, stores: &'a Stores) -> Vec<&'a ProjectStats> {
    let mut stats: Vec<&ProjectStats> = stores
        .stats
        .values()
        .filter(|s| scope_visible(profile, ProjectScope::Project(s.project_id)))
        .collect();
    stats.sort_by_key(|s| s.project_id);
    stats
}

pub fn visible_files<'a>(profile: &UserProfile, stores: &'a Stores) -> Vec<&'a StoredFile> {
    let mut files: Vec<&StoredFile> = stores
        .files
        .values()
        .filter(|f| scope_visible(profile, f.scope))
        .collect();
    files.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
    files
}

pub fn visible_events<'a>(profile: &UserProfile, stores: &'a Stores) -> Vec<&'a CalendarEvent> {
    let mut events: Vec<&CalendarEvent> = stores
        .events
        .values()
        .filter(|e| scope_visible(profile, e.scope))
        .collect();
    events.sort_by(|a, b| a.date.cmp(&b.date).then(a.title.cmp(&b.title)));
    events
}

/// Guest sub-role narrows chat further: only channels on the explicit
/// allow-list, which keeps visible channels a subset of the project's
/// channels intersected with the allow-list.
pub fn visible_channels<'a>(profile: &UserProfile, stores: &'a Stores) -> Vec<&'a Channel> {
    let mut channels: Vec<&Channel> = stores
        .channels
        .values()
        .filter(|c| scope_visible(profile, c.scope))
        .filter(|c| !profile.is_guest() || profile.allowed_channels.contains(&c.id))
        .collect();
    channels.sort_by(|a, b| a.name.cmp(&b.name));
    channels
}

/// Messages inherit visibility from their channel, so the guest
/// allow-list applies here too.
pub fn visible_messages<'a>(profile: &UserProfile, stores: &'a Stores) -> Vec<&'a ChatMessage> {
    let channel_ids: HashSet<Uuid> = visible_channels(profile, stores)
        .iter()
        .map(|c| c.id)
        .collect();
    let mut messages: Vec<&ChatMessage> = stores
        .messages
        .values()
        .filter(|m| channel_ids.contains(&m.channel_id))
        .collect();
    messages.sort_by(|a, b| a.sent_at.cmp(&b.sent_at).then(a.id.cmp(&b.id)));
    messages
}

pub fn visible_users<'a>(profile: &UserProfile, stores: &'a Stores) -> Vec<&'a UserProfile> {
    let mut users: Vec<&UserProfile> = stores
        .users
        .values()
        .filter(|u| match profile.role {
            Role::Owner => true,
            Role::Manager => {
                u.role.is_staff()
                    || u.project_id
                        .is_some_and(|p| profile.assigned_projects.contains(&p))
            }
            Role::Client => {
                u.role.is_staff() || (u.project_id.is_some() && u.project_id == profile.project_id)
            }
        })
        .collect();
    users.sort_by(|a, b| a.name.cmp(&b.name));
    users
}

/// Broadcasts go to everyone signed in, newest first.
pub fn visible_broadcasts(stores: &Stores) -> Vec<&Broadcast> {
    let mut broadcasts: Vec<&Broadcast> = stores.broadcasts.values().collect();
    broadcasts.sort_by(|a, b| b.sent_at.cmp(&a.sent_at));
    broadcasts
}
