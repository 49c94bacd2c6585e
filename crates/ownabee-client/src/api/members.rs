use ownabee_core::entity::{AddMemberRequest, Member, UpdateMemberRoleRequest};
use ownabee_core::error::Result;
use ownabee_core::portal::InstitutionRole;

use super::{PortalApi, segment};
use crate::api_client::RequestOptions;

impl PortalApi {
    pub async fn list_members(&self, institution_id: &str) -> Result<Vec<Member>> {
        let endpoint = format!("/portal/institutions/{}/members", segment(institution_id)?);
        self.request(&endpoint, RequestOptions::get()).await
    }

    /// Adds an existing user (found via email search) as a member.
    pub async fn add_member(
        &self,
        institution_id: &str,
        user_id: &str,
        role: InstitutionRole,
    ) -> Result<Member> {
        let endpoint = format!("/portal/institutions/{}/members", segment(institution_id)?);
        let body = AddMemberRequest {
            user_id: user_id.to_string(),
            role,
        };
        self.request(&endpoint, RequestOptions::post_json(&body)?).await
    }

    pub async fn update_member_role(&self, member_id: &str, role: InstitutionRole) -> Result<Member> {
        let endpoint = format!("/portal/members/{}", segment(member_id)?);
        self.request(
            &endpoint,
            RequestOptions::put_json(&UpdateMemberRoleRequest { role })?,
        )
        .await
    }

    pub async fn remove_member(&self, member_id: &str) -> Result<()> {
        let endpoint = format!("/portal/members/{}", segment(member_id)?);
        self.request(&endpoint, RequestOptions::delete()).await
    }
}
