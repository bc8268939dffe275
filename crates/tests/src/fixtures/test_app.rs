use atelier_config::{AppSettings, InsightSettings, ProviderSettings, Settings, StorageSettings};
use atelier_proxy::{build_router, state::AppState};

/// Insight proxy bound to an ephemeral port, driven over real HTTP.
pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> anyhow::Result<Self> {
        Self::spawn_with(test_settings()).await
    }

    pub async fn spawn_with(settings: Settings) -> anyhow::Result<Self> {
        let state = AppState::new(settings);
        let app = build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let address = format!("http://{}", listener.local_addr()?);
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("proxy server failed");
        });

        Ok(Self {
            address,
            client: reqwest::Client::new(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }
}

/// Settings with no insight credential, so the proxy runs but reports
/// itself unavailable. Built by hand to stay independent of the host
/// environment.
pub fn test_settings() -> Settings {
    Settings {
        app: AppSettings {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: Vec::new(),
        },
        provider: ProviderSettings {
            url: None,
            anon_key: None,
        },
        storage: StorageSettings {
            bucket: "atelier-files".to_string(),
        },
        insight: InsightSettings {
            api_key: None,
            model: "claude-sonnet-4-5-20250929".to_string(),
            max_tokens: 1024,
        },
    }
}
