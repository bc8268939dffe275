use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider not configured")]
    Unconfigured,
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Provider API error {status}: {message}")]
    Api { status: u16, message: String },
    #[error("Row decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Authentication failed: {0}")]
    Auth(String),
    #[error("Entity not found")]
    NotFound,
}

pub type ProviderResult<T> = Result<T, ProviderError>;
