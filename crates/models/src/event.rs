use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: Uuid,
    pub title: String,
    pub date: NaiveDate,
    pub scope: crate::ProjectScope,
    pub created_at: DateTime<Utc>,
}

impl CalendarEvent {
    pub const TABLE: &'static str = "events";
}
