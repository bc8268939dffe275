pub mod broadcast;
pub mod channel;
pub mod event;
pub mod file;
pub mod message;
pub mod notification;
pub mod project;
pub mod scope;
pub mod stats;
pub mod task;
pub mod user;

pub use broadcast::Broadcast;
pub use channel::Channel;
pub use event::CalendarEvent;
pub use file::StoredFile;
pub use message::{Attachment, ChatMessage};
pub use notification::{Notification, NotificationKind};
pub use project::Project;
pub use scope::ProjectScope;
pub use stats::{Metric, ProjectStats, SeriesPoint};
pub use task::{Subtask, Task, TaskStatus};
pub use user::{Role, SubRole, UserProfile};
