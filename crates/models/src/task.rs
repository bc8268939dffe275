use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::scope::ProjectScope;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub scope: ProjectScope,
    pub title: String,
    #[serde(default)]
    pub status: TaskStatus,
    pub assignee_id: Option<Uuid>,
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subtask {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub done: bool,
}

impl Task {
    pub const TABLE: &'static str = "tasks";

    pub fn is_assigned_to(&self, user_id: Uuid) -> bool {
        self.assignee_id == Some(user_id)
    }
}
