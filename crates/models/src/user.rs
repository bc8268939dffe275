use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub sub_role: SubRole,
    /// A client's single assigned project. `None` is a valid but
    /// incomplete profile; lookups must tolerate it.
    pub project_id: Option<Uuid>,
    /// Projects a manager is assigned to.
    #[serde(default)]
    pub assigned_projects: Vec<Uuid>,
    /// Channel allow-list for guest sub-role clients.
    #[serde(default)]
    pub allowed_channels: Vec<Uuid>,
    pub last_seen_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Owner,
    Manager,
    Client,
}

impl Role {
    /// Owners and managers form the staff side of the portal.
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Owner | Role::Manager)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SubRole {
    TeamLeader,
    #[default]
    User,
    Guest,
}

impl UserProfile {
    pub const TABLE: &'static str = "profiles";

    pub fn is_guest(&self) -> bool {
        self.role == Role::Client && self.sub_role == SubRole::Guest
    }
}
