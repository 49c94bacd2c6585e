use std::sync::Arc;

use anyhow::{Context, Result, bail};
use ownabee_application::{InitializeOutcome, SessionStore};
use ownabee_client::{ApiClient, PortalApi};
use ownabee_core::config::PortalConfig;
use ownabee_core::session::RouteGuard;
use ownabee_infrastructure::JsonSessionStorage;

/// Session store wired to the configured API and the on-disk session blob.
pub struct PortalContext {
    pub store: SessionStore,
}

impl PortalContext {
    pub async fn open(config: &PortalConfig) -> Result<Self> {
        let client = ApiClient::from_config(config).context("Failed to create HTTP client")?;
        let storage = JsonSessionStorage::new(&config.session_namespace)
            .context("Failed to locate session storage")?;
        tracing::debug!("[cli] Session file: {}", storage.path().display());

        let store = SessionStore::new(PortalApi::new(Arc::new(client)), Arc::new(storage)).await;
        store.hydrate().await;
        Ok(Self { store })
    }

    pub fn api(&self) -> &PortalApi {
        self.store.api()
    }

    /// Validates the stored session and fails unless a user is signed in.
    pub async fn require_session(&self) -> Result<()> {
        if let InitializeOutcome::LoggedOut { reason } = self.store.initialize().await {
            bail!("{}", reason.user_message());
        }
        match self.store.route_guard().await {
            RouteGuard::Render => Ok(()),
            _ => bail!("Not signed in. Run `ownabee login` first."),
        }
    }
}
