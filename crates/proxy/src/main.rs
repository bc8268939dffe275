use atelier_config::Settings;
use atelier_proxy::{build_router, state::AppState};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file (silently ignore if missing)
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "atelier_proxy=debug,tower_http=debug".into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::load()?;
    if settings.insight.api_key.is_none() {
        warn!("no insight API key configured, /api/insight will return 503");
    }

    let app_state = AppState::new(settings.clone());
    let app = build_router(app_state);

    let addr = format!("{}:{}", settings.app.host, settings.app.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Insight proxy listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
