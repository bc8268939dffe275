use atelier_models::Role;

/// Permission bits (u64 bitfield). The role masks below are the static
/// permission table: a handler checks exactly one flag before touching
/// the provider.
pub const VIEW_ALL_PROJECTS: u64 = 1 << 0;
pub const MANAGE_PROJECTS: u64 = 1 << 1;
pub const DELETE_PROJECT: u64 = 1 << 2;
pub const MANAGE_TASKS: u64 = 1 << 3;
pub const COMPLETE_OWN_TASK: u64 = 1 << 4;
pub const MANAGE_STATS: u64 = 1 << 5;
pub const MANAGE_USERS: u64 = 1 << 6;
pub const MANAGE_CHANNELS: u64 = 1 << 7;
pub const SEND_MESSAGES: u64 = 1 << 8;
pub const UPLOAD_FILES: u64 = 1 << 9;
pub const DELETE_ANY_FILE: u64 = 1 << 10;
pub const MANAGE_EVENTS: u64 = 1 << 11;
pub const SEND_BROADCASTS: u64 = 1 << 12;

/// Clients act on their own work only.
pub const CLIENT: u64 = COMPLETE_OWN_TASK | SEND_MESSAGES | UPLOAD_FILES;

/// Managers run their assigned projects.
pub const MANAGER: u64 = CLIENT
    | MANAGE_PROJECTS
    | MANAGE_TASKS
    | MANAGE_STATS
    | MANAGE_USERS
    | MANAGE_CHANNELS
    | DELETE_ANY_FILE
    | MANAGE_EVENTS;

/// Owners hold everything, including the destructive bits.
pub const OWNER: u64 = MANAGER | VIEW_ALL_PROJECTS | DELETE_PROJECT | SEND_BROADCASTS;

pub fn for_role(role: Role) -> u64 {
    match role {
        Role::Owner => OWNER,
        Role::Manager => MANAGER,
        Role::Client => CLIENT,
    }
}

pub fn has(mask: u64, flag: u64) -> bool {
    mask & flag == flag
}
