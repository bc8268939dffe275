use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A chat channel: internal (staff) channels carry an explicit member
/// set, client channels belong to one project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Channel {
    pub id: Uuid,
    pub name: String,
    pub scope: crate::ProjectScope,
    #[serde(default)]
    pub member_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Channel {
    pub const TABLE: &'static str = "channels";
}
