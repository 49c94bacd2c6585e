use ownabee_core::entity::{Institution, InstitutionInput};
use ownabee_core::error::Result;

use super::{PortalApi, segment};
use crate::api_client::RequestOptions;

impl PortalApi {
    pub async fn list_institutions(&self) -> Result<Vec<Institution>> {
        self.request("/portal/institutions", RequestOptions::get()).await
    }

    pub async fn get_institution(&self, institution_id: &str) -> Result<Institution> {
        let endpoint = format!("/portal/institutions/{}", segment(institution_id)?);
        self.request(&endpoint, RequestOptions::get()).await
    }

    pub async fn create_institution(&self, input: &InstitutionInput) -> Result<Institution> {
        self.request("/portal/institutions", RequestOptions::post_json(input)?).await
    }

    pub async fn update_institution(
        &self,
        institution_id: &str,
        input: &InstitutionInput,
    ) -> Result<Institution> {
        let endpoint = format!("/portal/institutions/{}", segment(institution_id)?);
        self.request(&endpoint, RequestOptions::put_json(input)?).await
    }

    pub async fn delete_institution(&self, institution_id: &str) -> Result<()> {
        let endpoint = format!("/portal/institutions/{}", segment(institution_id)?);
        self.request(&endpoint, RequestOptions::delete()).await
    }
}
