use ownabee_core::error::Result;
use ownabee_core::portal::PortalMe;

use super::PortalApi;
use crate::api_client::RequestOptions;

pub const PORTAL_ME_ENDPOINT: &str = "/portal/me";

impl PortalApi {
    /// Current user and role memberships.
    pub async fn me(&self) -> Result<PortalMe> {
        self.request(PORTAL_ME_ENDPOINT, RequestOptions::get()).await
    }
}
