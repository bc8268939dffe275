use atelier_models::{Attachment, Metric, ProjectScope, Role, SubRole, TaskStatus};
use chrono::NaiveDate;
use uuid::Uuid;
use validator::Validate;

use crate::error::{PortalError, PortalResult};
use crate::permissions;

/// The closed set of mutating actions. Each variant names its required
/// permission bit; the dispatcher checks it before any provider call.
#[derive(Debug, Clone)]
pub enum Command {
    CreateProject(CreateProject),
    UpdateProject(UpdateProject),
    DeleteProject(DeleteProject),
    CreateTask(CreateTask),
    UpdateTask(UpdateTask),
    CompleteTask(CompleteTask),
    DeleteTask(DeleteTask),
    UpsertStat(UpsertStat),
    CreateUser(CreateUser),
    UpdateUser(UpdateUser),
    DeleteUser(DeleteUser),
    CreateChannel(CreateChannel),
    RenameChannel(RenameChannel),
    DeleteChannel(DeleteChannel),
    SendMessage(SendMessage),
    UploadFile(UploadFile),
    DeleteFile(DeleteFile),
    CreateEvent(CreateEvent),
    DeleteEvent(DeleteEvent),
    SendBroadcast(SendBroadcast),
}

#[derive(Debug, Clone, Validate)]
pub struct CreateProject {
    #[validate(length(min = 1))]
    pub name: String,
    pub member_ids: Vec<Uuid>,
}

#[derive(Debug, Clone)]
pub struct UpdateProject {
    pub id: Uuid,
    pub name: Option<String>,
    pub member_ids: Option<Vec<Uuid>>,
}

#[derive(Debug, Clone)]
pub struct DeleteProject {
    pub id: Uuid,
}

#[derive(Debug, Clone, Validate)]
pub struct CreateTask {
    pub scope: ProjectScope,
    #[validate(length(min = 1))]
    pub title: String,
    pub assignee_id: Option<Uuid>,
    pub due_date: Option<NaiveDate>,
    pub subtasks: Vec<String>,
}

/// Nullable columns use a double option: the outer `None` leaves the
/// field alone, `Some(None)` clears it.
#[derive(Debug, Clone)]
pub struct UpdateTask {
    pub id: Uuid,
    pub title: Option<String>,
    pub status: Option<TaskStatus>,
    pub assignee_id: Option<Option<Uuid>>,
    pub due_date: Option<Option<NaiveDate>>,
}

#[derive(Debug, Clone)]
pub struct CompleteTask {
    pub id: Uuid,
}

#[derive(Debug, Clone)]
pub struct DeleteTask {
    pub id: Uuid,
}

#[derive(Debug, Clone, Validate)]
pub struct UpsertStat {
    pub project_id: Uuid,
    pub metric: Metric,
    #[validate(length(min = 1))]
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, Validate)]
pub struct CreateUser {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub role: Role,
    pub sub_role: SubRole,
    pub project_id: Option<Uuid>,
    pub assigned_projects: Vec<Uuid>,
    pub allowed_channels: Vec<Uuid>,
}

/// `project_id` follows the double-option rule from [`UpdateTask`]:
/// `Some(None)` takes the client off their project.
#[derive(Debug, Clone)]
pub struct UpdateUser {
    pub id: Uuid,
    pub name: Option<String>,
    pub role: Option<Role>,
    pub sub_role: Option<SubRole>,
    pub project_id: Option<Option<Uuid>>,
    pub assigned_projects: Option<Vec<Uuid>>,
    pub allowed_channels: Option<Vec<Uuid>>,
}

#[derive(Debug, Clone)]
pub struct DeleteUser {
    pub id: Uuid,
}

#[derive(Debug, Clone, Validate)]
pub struct CreateChannel {
    #[validate(length(min = 1))]
    pub name: String,
    pub scope: ProjectScope,
    pub member_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Validate)]
pub struct RenameChannel {
    pub id: Uuid,
    #[validate(length(min = 1))]
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct DeleteChannel {
    pub id: Uuid,
}

#[derive(Debug, Clone, Validate)]
pub struct SendMessage {
    pub channel_id: Uuid,
    #[validate(length(min = 1))]
    pub content: String,
    pub attachment: Option<Attachment>,
}

#[derive(Debug, Clone, Validate)]
pub struct UploadFile {
    #[validate(length(min = 1))]
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    pub scope: ProjectScope,
}

#[derive(Debug, Clone)]
pub struct DeleteFile {
    pub id: Uuid,
}

#[derive(Debug, Clone, Validate)]
pub struct CreateEvent {
    #[validate(length(min = 1))]
    pub title: String,
    pub date: NaiveDate,
    pub scope: ProjectScope,
}

#[derive(Debug, Clone)]
pub struct DeleteEvent {
    pub id: Uuid,
}

#[derive(Debug, Clone, Validate)]
pub struct SendBroadcast {
    #[validate(length(min = 1))]
    pub title: String,
    pub body: String,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::CreateProject(_) => "create_project",
            Command::UpdateProject(_) => "update_project",
            Command::DeleteProject(_) => "delete_project",
            Command::CreateTask(_) => "create_task",
            Command::UpdateTask(_) => "update_task",
            Command::CompleteTask(_) => "complete_task",
            Command::DeleteTask(_) => "delete_task",
            Command::UpsertStat(_) => "upsert_stat",
            Command::CreateUser(_) => "create_user",
            Command::UpdateUser(_) => "update_user",
            Command::DeleteUser(_) => "delete_user",
            Command::CreateChannel(_) => "create_channel",
            Command::RenameChannel(_) => "rename_channel",
            Command::DeleteChannel(_) => "delete_channel",
            Command::SendMessage(_) => "send_message",
            Command::UploadFile(_) => "upload_file",
            Command::DeleteFile(_) => "delete_file",
            Command::CreateEvent(_) => "create_event",
            Command::DeleteEvent(_) => "delete_event",
            Command::SendBroadcast(_) => "send_broadcast",
        }
    }

    /// The single permission bit the dispatcher checks up front.
    /// Ownership-sensitive commands (complete task, delete file) get a
    /// second check inside their handler.
    pub fn required_permission(&self) -> u64 {
        match self {
            Command::CreateProject(_) | Command::UpdateProject(_) => permissions::MANAGE_PROJECTS,
            Command::DeleteProject(_) => permissions::DELETE_PROJECT,
            Command::CreateTask(_) | Command::UpdateTask(_) | Command::DeleteTask(_) => {
                permissions::MANAGE_TASKS
            }
            Command::CompleteTask(_) => permissions::COMPLETE_OWN_TASK,
            Command::UpsertStat(_) => permissions::MANAGE_STATS,
            Command::CreateUser(_) | Command::UpdateUser(_) | Command::DeleteUser(_) => {
                permissions::MANAGE_USERS
            }
            Command::CreateChannel(_) | Command::RenameChannel(_) | Command::DeleteChannel(_) => {
                permissions::MANAGE_CHANNELS
            }
            Command::SendMessage(_) => permissions::SEND_MESSAGES,
            Command::UploadFile(_) | Command::DeleteFile(_) => permissions::UPLOAD_FILES,
            Command::CreateEvent(_) | Command::DeleteEvent(_) => permissions::MANAGE_EVENTS,
            Command::SendBroadcast(_) => permissions::SEND_BROADCASTS,
        }
    }

    pub fn validate(&self) -> PortalResult<()> {
        let result = match self {
            Command::CreateProject(p) => p.validate(),
            Command::CreateTask(p) => p.validate(),
            Command::UpsertStat(p) => p.validate(),
            Command::CreateUser(p) => p.validate(),
            Command::CreateChannel(p) => p.validate(),
            Command::RenameChannel(p) => p.validate(),
            Command::SendMessage(p) => p.validate(),
            Command::UploadFile(p) => p.validate(),
            Command::CreateEvent(p) => p.validate(),
            Command::SendBroadcast(p) => p.validate(),
            _ => Ok(()),
        };
        result.map_err(|e| PortalError::Validation(e.to_string()))
    }
}
