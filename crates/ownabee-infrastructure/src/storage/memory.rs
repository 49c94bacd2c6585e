//! In-memory session storage for tests and ephemeral clients.

use async_trait::async_trait;
use ownabee_core::error::Result;
use ownabee_core::session::{PersistedSession, SessionStorage};
use tokio::sync::Mutex;

#[derive(Default)]
pub struct InMemorySessionStorage {
    blob: Mutex<Option<PersistedSession>>,
}

impl InMemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with a blob, as if written by an earlier run.
    pub fn with_session(session: PersistedSession) -> Self {
        Self {
            blob: Mutex::new(Some(session)),
        }
    }

    pub async fn snapshot(&self) -> Option<PersistedSession> {
        self.blob.lock().await.clone()
    }
}

#[async_trait]
impl SessionStorage for InMemorySessionStorage {
    async fn load(&self) -> Result<Option<PersistedSession>> {
        Ok(self.blob.lock().await.clone())
    }

    async fn save(&self, session: &PersistedSession) -> Result<()> {
        *self.blob.lock().await = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.blob.lock().await = None;
        Ok(())
    }
}
