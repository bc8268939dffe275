use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredFile {
    pub id: Uuid,
    pub name: String,
    pub content_type: String,
    pub url: String,
    pub size: u64,
    pub uploader_id: Uuid,
    pub scope: crate::ProjectScope,
    pub uploaded_at: DateTime<Utc>,
}

impl StoredFile {
    pub const TABLE: &'static str = "files";
}
