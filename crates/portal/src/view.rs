use atelier_models::{
    CalendarEvent, Channel, Project, ProjectStats, Role, StoredFile, Task, UserProfile,
};

use crate::store::Stores;
use crate::visibility;

/// View-state for the client home screen. A client whose profile has no
/// project, or whose project id no longer resolves, gets an explicit
/// incomplete-profile state instead of a failed lookup.
#[derive(Debug, Clone)]
pub enum ClientWorkspace {
    IncompleteProfile,
    Ready {
        project: Project,
        tasks: Vec<Task>,
        files: Vec<StoredFile>,
        events: Vec<CalendarEvent>,
        channels: Vec<Channel>,
        stats: Option<ProjectStats>,
    },
}

pub fn client_workspace(profile: &UserProfile, stores: &Stores) -> ClientWorkspace {
    debug_assert_eq!(profile.role, Role::Client);
    let Some(project_id) = profile.project_id else {
        return ClientWorkspace::IncompleteProfile;
    };
    let Some(project) = stores.projects.get(&project_id) else {
        // Dangling assignment: treated the same as no assignment.
        return ClientWorkspace::IncompleteProfile;
    };
    ClientWorkspace::Ready {
        project: project.clone(),
        tasks: visibility::visible_tasks(profile, stores)
            .into_iter()
            .cloned()
            .collect(),
        files: visibility::visible_files(profile, stores)
            .into_iter()
            .cloned()
            .collect(),
        events: visibility::visible_events(profile, stores)
            .into_iter()
            .cloned()
            .collect(),
        channels: visibility::visible_channels(profile, stores)
            .into_iter()
            .cloned()
            .collect(),
        stats: stores.stats.get(&project_id).cloned(),
    }
}
