use atelier_provider::ProviderError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PortalError {
    #[error("Not signed in")]
    NotSignedIn,
    #[error("Forbidden: {0}")]
    Forbidden(&'static str),
    #[error("Validation: {0}")]
    Validation(String),
    #[error("No profile row for the signed-in account")]
    ProfileMissing,
    #[error("Entity not found")]
    NotFound,
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type PortalResult<T> = Result<T, PortalError>;
