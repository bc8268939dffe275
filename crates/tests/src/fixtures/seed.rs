use chrono::{Duration, Utc};
use uuid::Uuid;

use atelier_models::{
    Broadcast, CalendarEvent, Channel, ChatMessage, Project, ProjectScope, ProjectStats, Role,
    SeriesPoint, StoredFile, SubRole, Task, TaskStatus, UserProfile,
};
use atelier_provider::MockProvider;

pub const PASSWORD: &str = "pw";
pub const OWNER_EMAIL: &str = "olivia@atelier.test";
pub const MANAGER_EMAIL: &str = "marcus@atelier.test";
pub const CLIENT_EMAIL: &str = "chloe@atelier.test";
pub const GUEST_EMAIL: &str = "gina@atelier.test";
pub const INCOMPLETE_EMAIL: &str = "ivan@atelier.test";

/// Ids of everything the standard world contains. Two projects: the
/// manager and both clients sit on "Alpha", nobody but the owner can see
/// "Beta".
pub struct SeededWorld {
    pub owner_id: Uuid,
    pub manager_id: Uuid,
    pub client_id: Uuid,
    pub guest_id: Uuid,
    pub incomplete_id: Uuid,

    pub alpha_id: Uuid,
    pub beta_id: Uuid,

    pub ch_internal: Uuid,
    pub ch_alpha_general: Uuid,
    pub ch_alpha_private: Uuid,
    pub ch_beta: Uuid,

    pub task_client: Uuid,
    pub task_alpha_open: Uuid,
    pub task_internal: Uuid,
    pub task_beta: Uuid,

    pub file_client: Uuid,
    pub file_alpha_owner: Uuid,

    pub msg_old_alpha: Uuid,
    pub msg_new_alpha: Uuid,
    pub msg_private_alpha: Uuid,
    pub msg_beta: Uuid,
}

/// Seed the mock provider with the standard world and register auth
/// accounts for every profile.
pub fn seed_world(provider: &MockProvider) -> SeededWorld {
    let now = Utc::now();
    let last_seen = now - Duration::hours(1);

    let owner_id = Uuid::new_v4();
    let manager_id = Uuid::new_v4();
    let client_id = Uuid::new_v4();
    let guest_id = Uuid::new_v4();
    let incomplete_id = Uuid::new_v4();

    let alpha_id = Uuid::new_v4();
    let beta_id = Uuid::new_v4();

    let ch_internal = Uuid::new_v4();
    let ch_alpha_general = Uuid::new_v4();
    let ch_alpha_private = Uuid::new_v4();
    let ch_beta = Uuid::new_v4();

    let profile = |id, name: &str, email: &str, role, sub_role, project_id, assigned, allowed| {
        UserProfile {
            id,
            name: name.to_string(),
            email: email.to_string(),
            role,
            sub_role,
            project_id,
            assigned_projects: assigned,
            allowed_channels: allowed,
            last_seen_at: last_seen,
            created_at: now,
            updated_at: now,
        }
    };

    let profiles = vec![
        profile(
            owner_id,
            "Olivia",
            OWNER_EMAIL,
            Role::Owner,
            SubRole::TeamLeader,
            None,
            vec![],
            vec![],
        ),
        profile(
            manager_id,
            "Marcus",
            MANAGER_EMAIL,
            Role::Manager,
            SubRole::User,
            None,
            vec![alpha_id],
            vec![],
        ),
        profile(
            client_id,
            "Chloe",
            CLIENT_EMAIL,
            Role::Client,
            SubRole::User,
            Some(alpha_id),
            vec![],
            vec![],
        ),
        profile(
            guest_id,
            "Gina",
            GUEST_EMAIL,
            Role::Client,
            SubRole::Guest,
            Some(alpha_id),
            vec![],
            vec![ch_alpha_general],
        ),
        profile(
            incomplete_id,
            "Ivan",
            INCOMPLETE_EMAIL,
            Role::Client,
            SubRole::User,
            None,
            vec![],
            vec![],
        ),
    ];
    for p in &profiles {
        provider.register_account(&p.email, PASSWORD, p.id);
    }
    provider.seed_rows(UserProfile::TABLE, &profiles);

    provider.seed_rows(
        Project::TABLE,
        &[
            Project {
                id: alpha_id,
                name: "Alpha".to_string(),
                member_ids: vec![manager_id, client_id, guest_id],
                created_at: now,
                updated_at: now,
            },
            Project {
                id: beta_id,
                name: "Beta".to_string(),
                member_ids: vec![],
                created_at: now,
                updated_at: now,
            },
        ],
    );

    let channel = |id, name: &str, scope, member_ids: Vec<Uuid>| Channel {
        id,
        name: name.to_string(),
        scope,
        member_ids,
        created_at: now,
    };
    provider.seed_rows(
        Channel::TABLE,
        &[
            channel(
                ch_internal,
                "hq",
                ProjectScope::Internal,
                vec![owner_id, manager_id],
            ),
            channel(
                ch_alpha_general,
                "alpha-general",
                ProjectScope::Project(alpha_id),
                vec![manager_id, client_id, guest_id],
            ),
            channel(
                ch_alpha_private,
                "alpha-private",
                ProjectScope::Project(alpha_id),
                vec![manager_id, client_id],
            ),
            channel(
                ch_beta,
                "beta-general",
                ProjectScope::Project(beta_id),
                vec![],
            ),
        ],
    );

    let task_client = Uuid::new_v4();
    let task_alpha_open = Uuid::new_v4();
    let task_internal = Uuid::new_v4();
    let task_beta = Uuid::new_v4();
    let task = |id, scope, title: &str, assignee_id| Task {
        id,
        scope,
        title: title.to_string(),
        status: TaskStatus::Todo,
        assignee_id,
        due_date: None,
        subtasks: vec![],
        created_at: now,
        updated_at: now,
    };
    provider.seed_rows(
        Task::TABLE,
        &[
            task(
                task_client,
                ProjectScope::Project(alpha_id),
                "Master the single",
                Some(client_id),
            ),
            task(
                task_alpha_open,
                ProjectScope::Project(alpha_id),
                "Update press kit",
                None,
            ),
            task(
                task_internal,
                ProjectScope::Internal,
                "Quarterly report",
                Some(manager_id),
            ),
            task(task_beta, ProjectScope::Project(beta_id), "Plan beta launch", None),
        ],
    );

    provider.seed_rows(
        ProjectStats::TABLE,
        &[ProjectStats {
            project_id: alpha_id,
            streams: vec![SeriesPoint {
                label: "Spotify".to_string(),
                value: 50_000.0,
            }],
            revenue: vec![SeriesPoint {
                label: "January".to_string(),
                value: 1200.0,
            }],
            followers: vec![],
            media_mentions: vec![],
            updated_at: now,
        }],
    );

    let file_client = Uuid::new_v4();
    let file_alpha_owner = Uuid::new_v4();
    let file = |id, name: &str, uploader_id, scope| StoredFile {
        id,
        name: name.to_string(),
        content_type: "application/octet-stream".to_string(),
        url: format!("mock://atelier-files/{id}"),
        size: 64,
        uploader_id,
        scope,
        uploaded_at: now,
    };
    provider.seed_rows(
        StoredFile::TABLE,
        &[
            file(
                file_client,
                "chloe-demo.wav",
                client_id,
                ProjectScope::Project(alpha_id),
            ),
            file(
                file_alpha_owner,
                "contract.pdf",
                owner_id,
                ProjectScope::Project(alpha_id),
            ),
            file(Uuid::new_v4(), "handbook.pdf", owner_id, ProjectScope::Internal),
            file(
                Uuid::new_v4(),
                "beta-artwork.png",
                owner_id,
                ProjectScope::Project(beta_id),
            ),
        ],
    );

    provider.seed_rows(
        CalendarEvent::TABLE,
        &[
            CalendarEvent {
                id: Uuid::new_v4(),
                title: "Album release".to_string(),
                date: now.date_naive(),
                scope: ProjectScope::Project(alpha_id),
                created_at: now,
            },
            CalendarEvent {
                id: Uuid::new_v4(),
                title: "Beta kickoff".to_string(),
                date: now.date_naive(),
                scope: ProjectScope::Project(beta_id),
                created_at: now,
            },
            CalendarEvent {
                id: Uuid::new_v4(),
                title: "Team offsite".to_string(),
                date: now.date_naive(),
                scope: ProjectScope::Internal,
                created_at: now,
            },
        ],
    );

    let msg_old_alpha = Uuid::new_v4();
    let msg_new_alpha = Uuid::new_v4();
    let msg_private_alpha = Uuid::new_v4();
    let msg_beta = Uuid::new_v4();
    let message = |id, channel_id, scope, content: &str, sent_at| ChatMessage {
        id,
        sender_id: owner_id,
        sender_name: "Olivia".to_string(),
        content: content.to_string(),
        channel_id,
        scope,
        attachment: None,
        sent_at,
    };
    provider.seed_rows(
        ChatMessage::TABLE,
        &[
            message(
                msg_old_alpha,
                ch_alpha_general,
                ProjectScope::Project(alpha_id),
                "Kickoff notes",
                now - Duration::hours(2),
            ),
            message(
                msg_new_alpha,
                ch_alpha_general,
                ProjectScope::Project(alpha_id),
                "New mix is up",
                now - Duration::minutes(10),
            ),
            message(
                msg_private_alpha,
                ch_alpha_private,
                ProjectScope::Project(alpha_id),
                "Budget secret-word update",
                now - Duration::minutes(5),
            ),
            message(
                msg_beta,
                ch_beta,
                ProjectScope::Project(beta_id),
                "Beta scoping",
                now - Duration::minutes(5),
            ),
        ],
    );

    provider.seed_rows(
        Broadcast::TABLE,
        &[Broadcast {
            id: Uuid::new_v4(),
            title: "Welcome".to_string(),
            body: "New portal is live".to_string(),
            author_id: owner_id,
            sent_at: now,
        }],
    );

    SeededWorld {
        owner_id,
        manager_id,
        client_id,
        guest_id,
        incomplete_id,
        alpha_id,
        beta_id,
        ch_internal,
        ch_alpha_general,
        ch_alpha_private,
        ch_beta,
        task_client,
        task_alpha_open,
        task_internal,
        task_beta,
        file_client,
        file_alpha_owner,
        msg_old_alpha,
        msg_new_alpha,
        msg_private_alpha,
        msg_beta,
    }
}
