pub mod command;
pub mod error;
mod handlers;
pub mod notifications;
pub mod permissions;
pub mod search;
pub mod session;
pub mod store;
pub mod tables;
pub mod view;
pub mod visibility;

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use atelier_config::{ProviderMode, Settings};
use atelier_models::{
    Broadcast, CalendarEvent, Channel, ChatMessage, Project, ProjectStats, StoredFile, Task,
    UserProfile,
};
use atelier_provider::{HttpProvider, MockProvider, Provider};

pub use command::Command;
pub use error::{PortalError, PortalResult};
pub use handlers::Outcome;
pub use search::{SearchKind, SearchResult};
pub use session::Session;
pub use store::Stores;
pub use view::ClientWorkspace;

use tables::Tables;

/// The state-owning controller behind the portal UI. Owns the session,
/// the entity stores and the notification ledger; all mutation flows
/// through [`Portal::dispatch`].
pub struct Portal {
    provider: Arc<dyn Provider>,
    tables: Tables,
    bucket: String,
    session: Option<Session>,
    stores: Stores,
    active_channel: Option<Uuid>,
}

impl Portal {
    pub fn new(provider: Arc<dyn Provider>, bucket: impl Into<String>) -> Self {
        let tables = Tables::new(&provider);
        Self {
            provider,
            tables,
            bucket: bucket.into(),
            session: None,
            stores: Stores::default(),
            active_channel: None,
        }
    }

    /// Connected mode when provider credentials are present, otherwise a
    /// degraded in-memory portal. Missing configuration is a warning,
    /// never a startup failure.
    pub fn from_settings(settings: &Settings) -> Self {
        match settings.provider_mode() {
            ProviderMode::Connected => match HttpProvider::from_settings(&settings.provider) {
                Ok(http) => Self::new(Arc::new(http), settings.storage.bucket.clone()),
                Err(err) => {
                    warn!(%err, "provider misconfigured, falling back to in-memory mode");
                    Self::new(Arc::new(MockProvider::new()), settings.storage.bucket.clone())
                }
            },
            ProviderMode::Degraded => {
                warn!("provider not configured, running in degraded in-memory mode");
                Self::new(Arc::new(MockProvider::new()), settings.storage.bucket.clone())
            }
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.is_some()
    }

    pub fn stores(&self) -> &Stores {
        &self.stores
    }

    pub fn active_channel(&self) -> Option<Uuid> {
        self.active_channel
    }

    pub(crate) fn profile(&self) -> PortalResult<&UserProfile> {
        self.session
            .as_ref()
            .map(|s| &s.profile)
            .ok_or(PortalError::NotSignedIn)
    }

    /// Permission gate: deny returns before any provider traffic.
    pub(crate) fn require(&self, flag: u64, action: &'static str) -> PortalResult<UserProfile> {
        let profile = self.profile()?;
        if !permissions::has(permissions::for_role(profile.role), flag) {
            tracing::debug!(action, role = ?profile.role, "permission denied");
            return Err(PortalError::Forbidden(action));
        }
        Ok(profile.clone())
    }

    pub async fn sign_in(&mut self, email: &str, password: &str) -> PortalResult<()> {
        let auth = self.provider.sign_in(email, password).await?;
        let profile = self
            .tables
            .profiles
            .find_one_eq("id", &auth.user_id.to_string())
            .await?
            .ok_or(PortalError::ProfileMissing)?;
        info!(user = %profile.id, role = ?profile.role, "signed in");
        self.session = Some(Session {
            profile,
            access_token: auth.access_token,
        });
        self.refresh().await
    }

    /// Self-service sign-up creates a client profile with no project
    /// assignment; the profile stays incomplete until staff assign one.
    pub async fn sign_up(&mut self, name: &str, email: &str, password: &str) -> PortalResult<()> {
        let auth = self.provider.sign_up(email, password).await?;
        let now = chrono::Utc::now();
        let profile = UserProfile {
            id: auth.user_id,
            name: name.to_string(),
            email: email.to_string(),
            role: atelier_models::Role::Client,
            sub_role: atelier_models::SubRole::User,
            project_id: None,
            assigned_projects: Vec::new(),
            allowed_channels: Vec::new(),
            last_seen_at: now,
            created_at: now,
            updated_at: now,
        };
        let created = self.tables.profiles.insert(&profile).await?;
        self.session = Some(Session {
            profile: created,
            access_token: auth.access_token,
        });
        self.refresh().await
    }

    /// Teardown: the provider call is best-effort; local state is always
    /// cleared so no stale data survives the session.
    pub async fn sign_out(&mut self) {
        if let Some(session) = self.session.take() {
            if let Err(err) = self.provider.sign_out(&session.access_token).await {
                warn!(%err, "provider sign-out failed");
            }
        }
        self.stores.clear();
        self.active_channel = None;
    }

    /// Wholesale reload of every collection from the provider. The
    /// notification ledger is session-local and survives a refresh.
    pub async fn refresh(&mut self) -> PortalResult<()> {
        self.profile()?;

        let users = self.tables.profiles.find_all().await?;
        let projects = self.tables.projects.find_all().await?;
        let tasks = self.tables.tasks.find_all().await?;
        let stats = self.tables.stats.find_all().await?;
        let events = self.tables.events.find_all().await?;
        let messages = self.tables.messages.find_all().await?;
        let broadcasts = self.tables.broadcasts.find_all().await?;
        let channels = self.tables.channels.find_all().await?;
        let files = self.tables.files.find_all().await?;

        let stores = &mut self.stores;
        stores.users = users.into_iter().map(|u| (u.id, u)).collect();
        stores.projects = projects.into_iter().map(|p| (p.id, p)).collect();
        stores.tasks = tasks.into_iter().map(|t| (t.id, t)).collect();
        stores.stats = stats.into_iter().map(|s| (s.project_id, s)).collect();
        stores.events = events.into_iter().map(|e| (e.id, e)).collect();
        stores.messages = messages.into_iter().map(|m| (m.id, m)).collect();
        stores.broadcasts = broadcasts.into_iter().map(|b| (b.id, b)).collect();
        stores.channels = channels.into_iter().map(|c| (c.id, c)).collect();
        stores.files = files.into_iter().map(|f| (f.id, f)).collect();
        Ok(())
    }

    // Read-side API: visibility-filtered views for the current identity.
    // All of these are empty when signed out.

    pub fn visible_projects(&self) -> Vec<&Project> {
        self.profile()
            .map(|p| visibility::visible_projects(p, &self.stores))
            .unwrap_or_default()
    }

    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.profile()
            .map(|p| visibility::visible_tasks(p, &self.stores))
            .unwrap_or_default()
    }

    pub fn visible_stats(&self) -> Vec<&ProjectStats> {
        self.profile()
            .map(|p| visibility::visible_stats(p, &self.stores))
            .unwrap_or_default()
    }

    pub fn visible_files(&self) -> Vec<&StoredFile> {
        self.profile()
            .map(|p| visibility::visible_files(p, &self.stores))
            .unwrap_or_default()
    }

    pub fn visible_events(&self) -> Vec<&CalendarEvent> {
        self.profile()
            .map(|p| visibility::visible_events(p, &self.stores))
            .unwrap_or_default()
    }

    pub fn visible_channels(&self) -> Vec<&Channel> {
        self.profile()
            .map(|p| visibility::visible_channels(p, &self.stores))
            .unwrap_or_default()
    }

    pub fn visible_messages(&self) -> Vec<&ChatMessage> {
        self.profile()
            .map(|p| visibility::visible_messages(p, &self.stores))
            .unwrap_or_default()
    }

    pub fn visible_users(&self) -> Vec<&UserProfile> {
        self.profile()
            .map(|p| visibility::visible_users(p, &self.stores))
            .unwrap_or_default()
    }

    pub fn visible_broadcasts(&self) -> Vec<&Broadcast> {
        if self.is_signed_in() {
            visibility::visible_broadcasts(&self.stores)
        } else {
            Vec::new()
        }
    }

    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        self.profile()
            .map(|p| search::search(p, &self.stores, query))
            .unwrap_or_default()
    }

    pub fn client_workspace(&self) -> PortalResult<ClientWorkspace> {
        let profile = self.profile()?;
        Ok(view::client_workspace(profile, &self.stores))
    }
}
