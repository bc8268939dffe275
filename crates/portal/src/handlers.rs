use chrono::Utc;
use serde_json::json;
use tracing::warn;
use uuid::Uuid;

use atelier_models::{
    Broadcast, CalendarEvent, Channel, ChatMessage, Project, ProjectScope, ProjectStats,
    StoredFile, Subtask, Task, TaskStatus, UserProfile,
};

use crate::command::{
    Command, CompleteTask, CreateChannel, CreateEvent, CreateProject, CreateTask, CreateUser,
    DeleteChannel, DeleteEvent, DeleteFile, DeleteProject, DeleteTask, DeleteUser, RenameChannel,
    SendBroadcast, SendMessage, UpdateProject, UpdateTask, UpdateUser, UploadFile, UpsertStat,
};
use crate::error::{PortalError, PortalResult};
use crate::{Portal, permissions, visibility};

/// What a successful command produced: the folded entity, or the id of a
/// removed one.
#[derive(Debug, Clone)]
pub enum Outcome {
    Project(Project),
    Task(Task),
    Stats(ProjectStats),
    User(UserProfile),
    Channel(Channel),
    Message(ChatMessage),
    File(StoredFile),
    Event(CalendarEvent),
    Broadcast(Broadcast),
    Removed(Uuid),
}

impl Portal {
    /// Single entry point for mutation. Validation and the permission
    /// gate run before any provider traffic; each handler then makes its
    /// provider call and folds the result into the stores only on
    /// success. A failed call leaves local state untouched; there are no
    /// retries and no partial applies.
    pub async fn dispatch(&mut self, command: Command) -> PortalResult<Outcome> {
        command.validate()?;
        self.require(command.required_permission(), command.name())?;
        match command {
            Command::CreateProject(p) => self.create_project(p).await,
            Command::UpdateProject(p) => self.update_project(p).await,
            Command::DeleteProject(p) => self.delete_project(p).await,
            Command::CreateTask(p) => self.create_task(p).await,
            Command::UpdateTask(p) => self.update_task(p).await,
            Command::CompleteTask(p) => self.complete_task(p).await,
            Command::DeleteTask(p) => self.delete_task(p).await,
            Command::UpsertStat(p) => self.upsert_stat(p).await,
            Command::CreateUser(p) => self.create_user(p).await,
            Command::UpdateUser(p) => self.update_user(p).await,
            Command::DeleteUser(p) => self.delete_user(p).await,
            Command::CreateChannel(p) => self.create_channel(p).await,
            Command::RenameChannel(p) => self.rename_channel(p).await,
            Command::DeleteChannel(p) => self.delete_channel(p).await,
            Command::SendMessage(p) => self.send_message(p).await,
            Command::UploadFile(p) => self.upload_file(p).await,
            Command::DeleteFile(p) => self.delete_file(p).await,
            Command::CreateEvent(p) => self.create_event(p).await,
            Command::DeleteEvent(p) => self.delete_event(p).await,
            Command::SendBroadcast(p) => self.send_broadcast(p).await,
        }
    }

    /// Scope gate shared by the creating handlers: nobody writes into a
    /// scope they cannot see.
    fn require_scope(&self, scope: ProjectScope, action: &'static str) -> PortalResult<()> {
        let profile = self.profile()?;
        if !visibility::scope_visible(profile, scope) {
            return Err(PortalError::Forbidden(action));
        }
        Ok(())
    }

    async fn create_project(&mut self, payload: CreateProject) -> PortalResult<Outcome> {
        let now = Utc::now();
        let project = Project {
            id: Uuid::new_v4(),
            name: payload.name,
            member_ids: payload.member_ids,
            created_at: now,
            updated_at: now,
        };
        let created = self.tables.projects.insert(&project).await?;
        self.stores.projects.insert(created.id, created.clone());
        Ok(Outcome::Project(created))
    }

    async fn update_project(&mut self, payload: UpdateProject) -> PortalResult<Outcome> {
        self.require_scope(ProjectScope::Project(payload.id), "update_project")?;
        let mut patch = json!({ "updated_at": Utc::now() });
        if let Some(name) = payload.name {
            patch["name"] = json!(name);
        }
        if let Some(member_ids) = payload.member_ids {
            patch["member_ids"] = json!(member_ids);
        }
        let updated = self.tables.projects.update(payload.id, patch).await?;
        self.stores.projects.insert(updated.id, updated.clone());
        Ok(Outcome::Project(updated))
    }

    async fn delete_project(&mut self, payload: DeleteProject) -> PortalResult<Outcome> {
        self.tables.projects.delete(payload.id).await?;
        self.stores.remove_project_cascade(payload.id);
        Ok(Outcome::Removed(payload.id))
    }

    async fn create_task(&mut self, payload: CreateTask) -> PortalResult<Outcome> {
        self.require_scope(payload.scope, "create_task")?;
        let now = Utc::now();
        let task = Task {
            id: Uuid::new_v4(),
            scope: payload.scope,
            title: payload.title,
            status: TaskStatus::Todo,
            assignee_id: payload.assignee_id,
            due_date: payload.due_date,
            subtasks: payload
                .subtasks
                .into_iter()
                .map(|title| Subtask {
                    id: Uuid::new_v4(),
                    title,
                    done: false,
                })
                .collect(),
            created_at: now,
            updated_at: now,
        };
        let created = self.tables.tasks.insert(&task).await?;
        self.stores.tasks.insert(created.id, created.clone());
        Ok(Outcome::Task(created))
    }

    async fn update_task(&mut self, payload: UpdateTask) -> PortalResult<Outcome> {
        let task = self
            .stores
            .tasks
            .get(&payload.id)
            .ok_or(PortalError::NotFound)?;
        self.require_scope(task.scope, "update_task")?;
        let mut patch = json!({ "updated_at": Utc::now() });
        if let Some(title) = payload.title {
            patch["title"] = json!(title);
        }
        if let Some(status) = payload.status {
            patch["status"] = serde_json::to_value(status)?;
        }
        if let Some(assignee_id) = payload.assignee_id {
            patch["assignee_id"] = json!(assignee_id);
        }
        if let Some(due_date) = payload.due_date {
            patch["due_date"] = json!(due_date);
        }
        let updated = self.tables.tasks.update(payload.id, patch).await?;
        self.stores.tasks.insert(updated.id, updated.clone());
        Ok(Outcome::Task(updated))
    }

    /// Clients may complete only tasks assigned to them; staff with the
    /// task-management bit may complete any visible task.
    async fn complete_task(&mut self, payload: CompleteTask) -> PortalResult<Outcome> {
        let profile = self.profile()?.clone();
        let task = self
            .stores
            .tasks
            .get(&payload.id)
            .ok_or(PortalError::NotFound)?;
        let manages = permissions::has(permissions::for_role(profile.role), permissions::MANAGE_TASKS);
        if !task.is_assigned_to(profile.id) && !manages {
            return Err(PortalError::Forbidden("complete_task"));
        }
        let patch = json!({
            "status": serde_json::to_value(TaskStatus::Done)?,
            "updated_at": Utc::now(),
        });
        let updated = self.tables.tasks.update(payload.id, patch).await?;
        self.stores.tasks.insert(updated.id, updated.clone());
        Ok(Outcome::Task(updated))
    }

    async fn delete_task(&mut self, payload: DeleteTask) -> PortalResult<Outcome> {
        let task = self
            .stores
            .tasks
            .get(&payload.id)
            .ok_or(PortalError::NotFound)?;
        self.require_scope(task.scope, "delete_task")?;
        self.tables.tasks.delete(payload.id).await?;
        self.stores.tasks.remove(&payload.id);
        Ok(Outcome::Removed(payload.id))
    }

    /// Upsert-by-label: an existing series point with the same label is
    /// replaced, otherwise a new point is appended. The whole record is
    /// then upserted keyed on `project_id`.
    async fn upsert_stat(&mut self, payload: UpsertStat) -> PortalResult<Outcome> {
        if !self.stores.projects.contains_key(&payload.project_id) {
            return Err(PortalError::NotFound);
        }
        self.require_scope(ProjectScope::Project(payload.project_id), "upsert_stat")?;
        let mut stats = self
            .stores
            .stats
            .get(&payload.project_id)
            .cloned()
            .unwrap_or_else(|| ProjectStats::empty(payload.project_id));
        stats.upsert_point(payload.metric, &payload.label, payload.value);
        let saved = self.tables.stats.upsert("project_id", &stats).await?;
        self.stores.stats.insert(saved.project_id, saved.clone());
        Ok(Outcome::Stats(saved))
    }

    async fn create_user(&mut self, payload: CreateUser) -> PortalResult<Outcome> {
        let now = Utc::now();
        let profile = UserProfile {
            id: Uuid::new_v4(),
            name: payload.name,
            email: payload.email,
            role: payload.role,
            sub_role: payload.sub_role,
            project_id: payload.project_id,
            assigned_projects: payload.assigned_projects,
            allowed_channels: payload.allowed_channels,
            last_seen_at: now,
            created_at: now,
            updated_at: now,
        };
        let created = self.tables.profiles.insert(&profile).await?;
        self.stores.users.insert(created.id, created.clone());
        Ok(Outcome::User(created))
    }

    async fn update_user(&mut self, payload: UpdateUser) -> PortalResult<Outcome> {
        let mut patch = json!({ "updated_at": Utc::now() });
        if let Some(name) = payload.name {
            patch["name"] = json!(name);
        }
        if let Some(role) = payload.role {
            patch["role"] = serde_json::to_value(role)?;
        }
        if let Some(sub_role) = payload.sub_role {
            patch["sub_role"] = serde_json::to_value(sub_role)?;
        }
        if let Some(project_id) = payload.project_id {
            patch["project_id"] = json!(project_id);
        }
        if let Some(assigned) = payload.assigned_projects {
            patch["assigned_projects"] = json!(assigned);
        }
        if let Some(allowed) = payload.allowed_channels {
            patch["allowed_channels"] = json!(allowed);
        }
        let updated = self.tables.profiles.update(payload.id, patch).await?;
        self.stores.users.insert(updated.id, updated.clone());
        if let Some(session) = self.session.as_mut() {
            if session.profile.id == updated.id {
                session.profile = updated.clone();
            }
        }
        Ok(Outcome::User(updated))
    }

    async fn delete_user(&mut self, payload: DeleteUser) -> PortalResult<Outcome> {
        self.tables.profiles.delete(payload.id).await?;
        self.stores.users.remove(&payload.id);
        Ok(Outcome::Removed(payload.id))
    }

    async fn create_channel(&mut self, payload: CreateChannel) -> PortalResult<Outcome> {
        self.require_scope(payload.scope, "create_channel")?;
        let channel = Channel {
            id: Uuid::new_v4(),
            name: payload.name,
            scope: payload.scope,
            member_ids: payload.member_ids,
            created_at: Utc::now(),
        };
        let created = self.tables.channels.insert(&channel).await?;
        self.stores.channels.insert(created.id, created.clone());
        Ok(Outcome::Channel(created))
    }

    async fn rename_channel(&mut self, payload: RenameChannel) -> PortalResult<Outcome> {
        let channel = self
            .stores
            .channels
            .get(&payload.id)
            .ok_or(PortalError::NotFound)?;
        self.require_scope(channel.scope, "rename_channel")?;
        let patch = json!({ "name": payload.name });
        let updated = self.tables.channels.update(payload.id, patch).await?;
        self.stores.channels.insert(updated.id, updated.clone());
        Ok(Outcome::Channel(updated))
    }

    async fn delete_channel(&mut self, payload: DeleteChannel) -> PortalResult<Outcome> {
        let channel = self
            .stores
            .channels
            .get(&payload.id)
            .ok_or(PortalError::NotFound)?;
        self.require_scope(channel.scope, "delete_channel")?;
        self.tables.channels.delete(payload.id).await?;
        self.stores.channels.remove(&payload.id);
        self.stores.messages.retain(|_, m| m.channel_id != payload.id);
        self.clear_channel_notifications(payload.id);
        Ok(Outcome::Removed(payload.id))
    }

    async fn send_message(&mut self, payload: SendMessage) -> PortalResult<Outcome> {
        let profile = self.profile()?.clone();
        let channel = self
            .stores
            .channels
            .get(&payload.channel_id)
            .ok_or(PortalError::NotFound)?;
        // Guests may only write where their allow-list lets them read.
        let readable = visibility::scope_visible(&profile, channel.scope)
            && (!profile.is_guest() || profile.allowed_channels.contains(&channel.id));
        if !readable {
            return Err(PortalError::Forbidden("send_message"));
        }
        let message = ChatMessage {
            id: Uuid::new_v4(),
            sender_id: profile.id,
            sender_name: profile.name.clone(),
            content: payload.content,
            channel_id: channel.id,
            scope: channel.scope,
            attachment: payload.attachment,
            sent_at: Utc::now(),
        };
        let created = self.tables.messages.insert(&message).await?;
        self.stores.messages.insert(created.id, created.clone());
        Ok(Outcome::Message(created))
    }

    async fn upload_file(&mut self, payload: UploadFile) -> PortalResult<Outcome> {
        self.require_scope(payload.scope, "upload_file")?;
        let profile = self.profile()?.clone();
        let file_id = Uuid::new_v4();
        let size = payload.bytes.len() as u64;
        let path = object_path(payload.scope, file_id, &payload.name);
        let url = self
            .provider
            .upload_object(&self.bucket, &path, payload.bytes, &payload.content_type)
            .await?;
        let file = StoredFile {
            id: file_id,
            name: payload.name,
            content_type: payload.content_type,
            url,
            size,
            uploader_id: profile.id,
            scope: payload.scope,
            uploaded_at: Utc::now(),
        };
        let created = match self.tables.files.insert(&file).await {
            Ok(created) => created,
            Err(err) => {
                // Row insert failed: take the uploaded object back out so
                // it does not linger orphaned in the bucket.
                if let Err(cleanup) = self.provider.remove_object(&self.bucket, &path).await {
                    warn!(%cleanup, file = %file_id, "orphaned object cleanup failed");
                }
                return Err(err.into());
            }
        };
        self.stores.files.insert(created.id, created.clone());
        Ok(Outcome::File(created))
    }

    /// Uploader or anyone with the delete-any-file bit.
    async fn delete_file(&mut self, payload: DeleteFile) -> PortalResult<Outcome> {
        let profile = self.profile()?.clone();
        let file = self
            .stores
            .files
            .get(&payload.id)
            .cloned()
            .ok_or(PortalError::NotFound)?;
        let deletes_any =
            permissions::has(permissions::for_role(profile.role), permissions::DELETE_ANY_FILE);
        if file.uploader_id != profile.id && !deletes_any {
            return Err(PortalError::Forbidden("delete_file"));
        }
        self.tables.files.delete(file.id).await?;
        self.stores.files.remove(&file.id);
        // Object removal is best-effort; the row is already gone.
        let path = object_path(file.scope, file.id, &file.name);
        if let Err(err) = self.provider.remove_object(&self.bucket, &path).await {
            warn!(%err, file = %file.id, "stored object removal failed");
        }
        Ok(Outcome::Removed(file.id))
    }

    async fn create_event(&mut self, payload: CreateEvent) -> PortalResult<Outcome> {
        self.require_scope(payload.scope, "create_event")?;
        let event = CalendarEvent {
            id: Uuid::new_v4(),
            title: payload.title,
            date: payload.date,
            scope: payload.scope,
            created_at: Utc::now(),
        };
        let created = self.tables.events.insert(&event).await?;
        self.stores.events.insert(created.id, created.clone());
        Ok(Outcome::Event(created))
    }

    async fn delete_event(&mut self, payload: DeleteEvent) -> PortalResult<Outcome> {
        let event = self
            .stores
            .events
            .get(&payload.id)
            .ok_or(PortalError::NotFound)?;
        self.require_scope(event.scope, "delete_event")?;
        self.tables.events.delete(payload.id).await?;
        self.stores.events.remove(&payload.id);
        Ok(Outcome::Removed(payload.id))
    }

    async fn send_broadcast(&mut self, payload: SendBroadcast) -> PortalResult<Outcome> {
        let profile = self.profile()?.clone();
        let broadcast = Broadcast {
            id: Uuid::new_v4(),
            title: payload.title,
            body: payload.body,
            author_id: profile.id,
            sent_at: Utc::now(),
        };
        let created = self.tables.broadcasts.insert(&broadcast).await?;
        self.stores.broadcasts.insert(created.id, created.clone());
        Ok(Outcome::Broadcast(created))
    }
}

fn object_path(scope: ProjectScope, file_id: Uuid, name: &str) -> String {
    format!("{scope}/{file_id}-{name}")
}
