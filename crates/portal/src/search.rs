use atelier_models::UserProfile;
use uuid::Uuid;

use crate::store::Stores;
use crate::visibility;

/// Hard cap on matches; results keep natural collection order, there is
/// no relevance ranking.
pub const MAX_RESULTS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Project,
    Task,
    File,
    Message,
    Event,
}

#[derive(Debug, Clone)]
pub struct SearchResult {
    pub kind: SearchKind,
    pub id: Uuid,
    pub label: String,
}

/// Case-insensitive substring search across the identity's visible
/// entities. Candidate sets are visibility-filtered before matching, so
/// guest chat restrictions carry over for free. Empty or whitespace-only
/// queries match nothing.
pub fn search(profile: &UserProfile, stores: &Stores, query: &str) -> Vec<SearchResult> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut results = Vec::new();
    let matches = |haystack: &str| haystack.to_lowercase().contains(&needle);
    let full = |results: &Vec<SearchResult>| results.len() >= MAX_RESULTS;

    // Project names are staff-only search territory.
    if profile.role.is_staff() {
        for project in visibility::visible_projects(profile, stores) {
            if full(&results) {
                return results;
            }
            if matches(&project.name) {
                results.push(SearchResult {
                    kind: SearchKind::Project,
                    id: project.id,
                    label: project.name.clone(),
                });
            }
        }
    }

    for task in visibility::visible_tasks(profile, stores) {
        if full(&results) {
            return results;
        }
        if matches(&task.title) {
            results.push(SearchResult {
                kind: SearchKind::Task,
                id: task.id,
                label: task.title.clone(),
            });
        }
    }

    for file in visibility::visible_files(profile, stores) {
        if full(&results) {
            return results;
        }
        if matches(&file.name) {
            results.push(SearchResult {
                kind: SearchKind::File,
                id: file.id,
                label: file.name.clone(),
            });
        }
    }

    for message in visibility::visible_messages(profile, stores) {
        if full(&results) {
            return results;
        }
        if matches(&message.content) {
            results.push(SearchResult {
                kind: SearchKind::Message,
                id: message.id,
                label: message.content.clone(),
            });
        }
    }

    for event in visibility::visible_events(profile, stores) {
        if full(&results) {
            return results;
        }
        if matches(&event.title) {
            results.push(SearchResult {
                kind: SearchKind::Event,
                id: event.id,
                label: event.title.clone(),
            });
        }
    }

    results
}
