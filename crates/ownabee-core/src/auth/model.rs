//! Authentication models exchanged with the login and refresh endpoints.

use serde::{Deserialize, Serialize};

use crate::error::{PortalError, Result};

/// Access/refresh token pair.
///
/// The pair is always replaced as a unit; holding one without the other
/// is not representable.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
}

impl AuthTokens {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

impl std::fmt::Debug for AuthTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthTokens")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

/// Authenticated user identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
    /// Global platform role (e.g. `OPERATOR`), if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Response body of every login exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub tokens: AuthTokens,
    pub user: User,
}

/// Email + numeric PIN login.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PinLoginRequest {
    pub email: String,
    pub pin: String,
}

impl PinLoginRequest {
    /// Builds a request after local validation.
    ///
    /// The email must look like an address and the PIN must be 4-8 ASCII digits.
    pub fn new(email: impl Into<String>, pin: impl Into<String>) -> Result<Self> {
        let email = email.into().trim().to_string();
        let pin = pin.into();

        let (local, domain) = email
            .split_once('@')
            .ok_or_else(|| PortalError::validation("Please enter a valid email address"))?;
        if local.is_empty() || domain.is_empty() {
            return Err(PortalError::validation("Please enter a valid email address"));
        }

        if !(4..=8).contains(&pin.len()) || !pin.chars().all(|c| c.is_ascii_digit()) {
            return Err(PortalError::validation("PIN must be 4 to 8 digits"));
        }

        Ok(Self { email, pin })
    }
}

/// Identity-provider credential exchange.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleLoginRequest {
    pub credential: String,
}

/// Body of the token refresh call.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}
