use ownabee_core::entity::UserSummary;
use ownabee_core::error::{PortalError, Result};

use super::PortalApi;
use crate::api_client::RequestOptions;

impl PortalApi {
    /// Looks up users by (partial) email, for adding members.
    pub async fn search_users_by_email(&self, email: &str) -> Result<Vec<UserSummary>> {
        let email = email.trim();
        if email.is_empty() {
            return Err(PortalError::validation("Enter an email to search"));
        }
        self.request(
            "/portal/users/search",
            RequestOptions::get().with_query("email", email),
        )
        .await
    }
}
