//! Unified path management for Ownabee client files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/ownabee/                 # Config directory
//! ├── config.toml                    # Client configuration
//! └── <session_namespace>.json       # Persisted session blob
//! ```

use std::path::PathBuf;

const APP_DIR_NAME: &str = "ownabee";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for ownabee_core::PortalError {
    fn from(err: PathError) -> Self {
        ownabee_core::PortalError::config(err.to_string())
    }
}

pub struct OwnabeePaths;

impl OwnabeePaths {
    /// Returns the Ownabee configuration directory (e.g. `~/.config/ownabee/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to `config.toml`.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path of the persisted session blob for a namespace.
    ///
    /// # Security Note
    ///
    /// The file holds bearer tokens; it is written with mode 600 on Unix.
    pub fn session_file(namespace: &str) -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join(format!("{}.json", sanitize_namespace(namespace))))
    }
}

/// Keeps namespaces usable as file names.
fn sanitize_namespace(namespace: &str) -> String {
    let cleaned: String = namespace
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "session".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file() {
        let config_file = OwnabeePaths::config_file().unwrap();
        assert!(config_file.ends_with("config.toml"));
        let config_dir = OwnabeePaths::config_dir().unwrap();
        assert!(config_file.starts_with(&config_dir));
        assert!(config_dir.ends_with("ownabee"));
    }

    #[test]
    fn test_session_file_sanitizes_namespace() {
        let path = OwnabeePaths::session_file("../portal auth").unwrap();
        assert!(path.ends_with("___portal_auth.json"));
        let config_dir = OwnabeePaths::config_dir().unwrap();
        assert!(path.starts_with(&config_dir));
    }

    #[test]
    fn test_empty_namespace_falls_back() {
        assert_eq!(sanitize_namespace(""), "session");
    }
}
