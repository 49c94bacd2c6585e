use ownabee_core::entity::{InstitutionParent, InviteParentRequest};
use ownabee_core::error::Result;

use super::{PortalApi, segment};
use crate::api_client::RequestOptions;

impl PortalApi {
    pub async fn list_parents(&self, institution_id: &str) -> Result<Vec<InstitutionParent>> {
        let endpoint = format!("/portal/institutions/{}/parents", segment(institution_id)?);
        self.request(&endpoint, RequestOptions::get()).await
    }

    /// Invites a parent by email. The link stays `REGISTERED` until the
    /// parent accepts.
    pub async fn invite_parent(
        &self,
        institution_id: &str,
        request: &InviteParentRequest,
    ) -> Result<InstitutionParent> {
        let endpoint = format!("/portal/institutions/{}/parents", segment(institution_id)?);
        self.request(&endpoint, RequestOptions::post_json(request)?).await
    }

    pub async fn remove_parent(&self, institution_parent_id: &str) -> Result<()> {
        let endpoint = format!(
            "/portal/institution-parents/{}",
            segment(institution_parent_id)?
        );
        self.request(&endpoint, RequestOptions::delete()).await
    }
}
