//! Session snapshot and its persisted subset.

use serde::{Deserialize, Serialize};

use crate::auth::{AuthTokens, User};
use crate::portal::PortalInfo;

/// The subset of the session written to durable storage.
///
/// Serialized as `{ user, accessToken, refreshToken }`. Tokens are stored
/// flat for compatibility with existing blobs, but a blob holding only one
/// of the two tokens is read back as holding none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSession {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl PersistedSession {
    pub fn new(user: Option<User>, tokens: Option<&AuthTokens>) -> Self {
        Self {
            user,
            access_token: tokens.map(|t| t.access_token.clone()),
            refresh_token: tokens.map(|t| t.refresh_token.clone()),
        }
    }

    pub fn tokens(&self) -> Option<AuthTokens> {
        match (&self.access_token, &self.refresh_token) {
            (Some(access), Some(refresh)) => Some(AuthTokens::new(access, refresh)),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.user.is_none() && self.tokens().is_none()
    }
}

/// Immutable snapshot of the client session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub user: Option<User>,
    pub tokens: Option<AuthTokens>,
    pub portal_info: Option<PortalInfo>,
    /// Durable storage has been read.
    pub is_hydrated: bool,
    /// The server round-trip validating the session has been attempted.
    pub is_initialized: bool,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn to_persisted(&self) -> PersistedSession {
        PersistedSession::new(self.user.clone(), self.tokens.as_ref())
    }

    /// Drops identity, tokens and portal info. Lifecycle flags are kept.
    pub fn clear_identity(&mut self) {
        self.user = None;
        self.tokens = None;
        self.portal_info = None;
    }
}
