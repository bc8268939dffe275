use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::scope::ProjectScope;

/// Append-only chat message. Messages are never edited or deleted by the
/// portal; history is the provider's source of truth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub sender_name: String,
    pub content: String,
    pub channel_id: Uuid,
    pub scope: ProjectScope,
    pub attachment: Option<Attachment>,
    pub sent_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    pub file_id: Uuid,
    pub name: String,
    pub url: String,
    pub content_type: String,
}

impl ChatMessage {
    pub const TABLE: &'static str = "messages";
}
