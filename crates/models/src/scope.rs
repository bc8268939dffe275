use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use uuid::Uuid;

/// Where an entity lives: the internal (staff-only) space or a single
/// project. Serialized as the string `"internal"` or the project UUID,
/// matching the provider's row format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectScope {
    Internal,
    Project(Uuid),
}

impl ProjectScope {
    pub fn project_id(&self) -> Option<Uuid> {
        match self {
            ProjectScope::Internal => None,
            ProjectScope::Project(id) => Some(*id),
        }
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, ProjectScope::Internal)
    }
}

impl fmt::Display for ProjectScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectScope::Internal => f.write_str("internal"),
            ProjectScope::Project(id) => write!(f, "{id}"),
        }
    }
}

impl Serialize for ProjectScope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ProjectScope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw == "internal" {
            return Ok(ProjectScope::Internal);
        }
        Uuid::parse_str(&raw)
            .map(ProjectScope::Project)
            .map_err(|_| de::Error::custom(format!("invalid scope: {raw}")))
    }
}
