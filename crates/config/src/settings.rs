use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub app: AppSettings,
    pub provider: ProviderSettings,
    pub storage: StorageSettings,
    pub insight: InsightSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
}

/// Connection details for the hosted persistence provider.
///
/// Both values are optional on purpose: a missing URL or key selects
/// degraded (in-memory) mode instead of failing startup.
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderSettings {
    pub url: Option<String>,
    pub anon_key: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    pub bucket: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InsightSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderMode {
    Connected,
    Degraded,
}

impl ProviderSettings {
    pub fn is_configured(&self) -> bool {
        self.url.is_some() && self.anon_key.is_some()
    }
}

impl Settings {
    pub fn provider_mode(&self) -> ProviderMode {
        if self.provider.is_configured() {
            ProviderMode::Connected
        } else {
            ProviderMode::Degraded
        }
    }

    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::default()
                    .separator("__")
                    .prefix("ATELIER"),
            )
            .set_default("app.host", "0.0.0.0")?
            .set_default("app.port", 8787)?
            .set_default("app.cors_origins", Vec::<String>::new())?
            .set_default("provider.url", None::<String>)?
            .set_default("provider.anon_key", None::<String>)?
            .set_default("storage.bucket", "atelier-files")?
            .set_default("insight.api_key", None::<String>)?
            .set_default("insight.model", "claude-sonnet-4-5-20250929")?
            .set_default("insight.max_tokens", 1024)?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::load().expect("Failed to load default settings")
    }
}
