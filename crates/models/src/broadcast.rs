use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Owner announcement, visible to everyone signed in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Broadcast {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub author_id: Uuid,
    pub sent_at: DateTime<Utc>,
}

impl Broadcast {
    pub const TABLE: &'static str = "broadcasts";
}
