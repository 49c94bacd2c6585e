//! File-backed session storage: one namespaced JSON blob per client.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use ownabee_core::error::{PortalError, Result};
use ownabee_core::session::{PersistedSession, SessionStorage};

use super::atomic_json::AtomicJsonFile;
use crate::paths::OwnabeePaths;

/// Persists `{ user, accessToken, refreshToken }` to
/// `~/.config/ownabee/<namespace>.json`.
///
/// File I/O runs on the blocking pool so callers on the async runtime are
/// never stalled by disk access.
#[derive(Clone)]
pub struct JsonSessionStorage {
    file: Arc<AtomicJsonFile<PersistedSession>>,
}

impl JsonSessionStorage {
    /// Storage for `namespace` under the default config directory.
    pub fn new(namespace: &str) -> Result<Self> {
        let path = OwnabeePaths::session_file(namespace)?;
        Ok(Self::with_path(path))
    }

    /// Storage at an explicit path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicJsonFile::new(path)),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.file.path().to_path_buf()
    }

    async fn run_blocking<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&AtomicJsonFile<PersistedSession>) -> Result<T> + Send + 'static,
    {
        let file = self.file.clone();
        tokio::task::spawn_blocking(move || op(file.as_ref()))
            .await
            .map_err(|e| PortalError::internal(format!("Failed to join task: {}", e)))?
    }
}

#[async_trait]
impl SessionStorage for JsonSessionStorage {
    async fn load(&self) -> Result<Option<PersistedSession>> {
        self.run_blocking(|file| Ok(file.load()?)).await
    }

    async fn save(&self, session: &PersistedSession) -> Result<()> {
        let session = session.clone();
        self.run_blocking(move |file| Ok(file.save(&session)?))
            .await?;
        tracing::debug!("[SessionStorage] Saved session to {}", self.file.path().display());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.run_blocking(|file| Ok(file.remove()?)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ownabee_core::auth::{AuthTokens, User};
    use tempfile::TempDir;

    fn user() -> User {
        User {
            id: "u-1".to_string(),
            email: "a@b.com".to_string(),
            name: Some("Ada".to_string()),
            profile_image_url: None,
            role: None,
        }
    }

    #[tokio::test]
    async fn test_load_without_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = JsonSessionStorage::with_path(temp_dir.path().join("auth.json"));
        assert!(storage.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let storage = JsonSessionStorage::with_path(temp_dir.path().join("auth.json"));
        let session = PersistedSession::new(Some(user()), Some(&AuthTokens::new("a1", "r1")));

        storage.save(&session).await.unwrap();

        let loaded = storage.load().await.unwrap().unwrap();
        assert_eq!(loaded, session);
        assert_eq!(loaded.tokens(), Some(AuthTokens::new("a1", "r1")));
    }

    #[tokio::test]
    async fn test_blob_uses_camel_case_keys() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("auth.json");
        let storage = JsonSessionStorage::with_path(path.clone());
        storage
            .save(&PersistedSession::new(None, Some(&AuthTokens::new("a1", "r1"))))
            .await
            .unwrap();

        let raw = std::fs::read_to_string(path).unwrap();
        assert!(raw.contains("\"accessToken\""));
        assert!(raw.contains("\"refreshToken\""));
    }

    #[tokio::test]
    async fn test_clear_removes_blob() {
        let temp_dir = TempDir::new().unwrap();
        let storage = JsonSessionStorage::with_path(temp_dir.path().join("auth.json"));
        storage
            .save(&PersistedSession::new(Some(user()), None))
            .await
            .unwrap();

        storage.clear().await.unwrap();
        assert!(storage.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_blob_is_serialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("auth.json");
        std::fs::write(&path, "not json").unwrap();

        let storage = JsonSessionStorage::with_path(path);
        assert!(matches!(
            storage.load().await,
            Err(PortalError::Serialization { .. })
        ));
    }
}
