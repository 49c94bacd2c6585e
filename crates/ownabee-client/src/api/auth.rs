use ownabee_core::auth::{GoogleLoginRequest, LoginResponse, PinLoginRequest};
use ownabee_core::error::Result;

use super::PortalApi;
use crate::api_client::RequestOptions;

pub const PIN_LOGIN_ENDPOINT: &str = "/auth/login/pin";
pub const GOOGLE_LOGIN_ENDPOINT: &str = "/auth/login/google";

impl PortalApi {
    /// Exchanges email + PIN for session tokens.
    pub async fn login_with_pin(&self, request: &PinLoginRequest) -> Result<LoginResponse> {
        self.request(PIN_LOGIN_ENDPOINT, RequestOptions::post_json(request)?).await
    }

    /// Exchanges an identity-provider credential for session tokens.
    pub async fn login_with_google(&self, credential: &str) -> Result<LoginResponse> {
        let body = GoogleLoginRequest {
            credential: credential.to_string(),
        };
        self.request(GOOGLE_LOGIN_ENDPOINT, RequestOptions::post_json(&body)?).await
    }
}
