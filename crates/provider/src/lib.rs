pub mod error;
pub mod http;
pub mod insight;
pub mod mock;
pub mod provider;
pub mod table;

pub use error::{ProviderError, ProviderResult};
pub use http::HttpProvider;
pub use insight::{InsightClient, InsightKind, InsightRequest, InsightResult};
pub use mock::MockProvider;
pub use provider::{AuthSession, Provider};
pub use table::Table;
