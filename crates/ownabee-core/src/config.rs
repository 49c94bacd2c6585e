//! Portal client configuration model.

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE_URL: &str = "https://api.ownabee.com";
pub const DEFAULT_SESSION_NAMESPACE: &str = "ownabee-portal-auth";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Root configuration for the portal client (`config.toml`).
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PortalConfig {
    /// Base URL of the remote REST API, without trailing slash.
    pub api_base_url: String,
    /// Per-request timeout applied by the HTTP transport.
    pub request_timeout_secs: u64,
    /// Namespace of the persisted session blob.
    pub session_namespace: String,
    /// Default tracing filter when `RUST_LOG` is not set.
    pub log_level: String,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            session_namespace: DEFAULT_SESSION_NAMESPACE.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl PortalConfig {
    /// Base URL with any trailing slashes removed.
    pub fn normalized_base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config: PortalConfig =
            toml::from_str("api_base_url = \"http://localhost:8080/\"").unwrap();
        assert_eq!(config.normalized_base_url(), "http://localhost:8080");
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
        assert_eq!(config.session_namespace, DEFAULT_SESSION_NAMESPACE);
    }
}
