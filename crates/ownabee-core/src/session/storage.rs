//! Durable session storage trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::session::model::PersistedSession;

/// Durable client storage holding a single persisted session blob.
#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Reads the stored blob. `Ok(None)` when nothing has been stored yet.
    async fn load(&self) -> Result<Option<PersistedSession>>;

    /// Replaces the stored blob.
    async fn save(&self, session: &PersistedSession) -> Result<()>;

    /// Removes the stored blob.
    async fn clear(&self) -> Result<()>;
}
