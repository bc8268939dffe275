use std::sync::Arc;

use atelier_portal::Portal;
use atelier_provider::{MockProvider, Provider};

use super::seed::{self, SeededWorld};

pub const BUCKET: &str = "atelier-files";

/// A portal wired to a seeded mock provider. The provider handle stays
/// shared so tests can inspect the call log, inject failures, or open a
/// second portal against the same data.
pub struct TestPortal {
    pub portal: Portal,
    pub provider: Arc<MockProvider>,
    pub world: SeededWorld,
}

impl TestPortal {
    pub fn spawn() -> Self {
        let provider = Arc::new(MockProvider::new());
        let world = seed::seed_world(&provider);
        let portal = Portal::new(provider.clone() as Arc<dyn Provider>, BUCKET);
        Self {
            portal,
            provider,
            world,
        }
    }

    pub async fn signed_in(email: &str) -> Self {
        let mut app = Self::spawn();
        app.portal
            .sign_in(email, seed::PASSWORD)
            .await
            .expect("fixture sign-in failed");
        app
    }

    /// A second portal over the same provider, for scenarios where one
    /// identity writes and another refreshes and looks.
    pub async fn portal_as(&self, email: &str) -> Portal {
        let mut portal = Portal::new(self.provider.clone() as Arc<dyn Provider>, BUCKET);
        portal
            .sign_in(email, seed::PASSWORD)
            .await
            .expect("fixture sign-in failed");
        portal
    }
}
