use ownabee_core::entity::{AssignClassRequest, SharedTablet, SharedTabletInput};
use ownabee_core::error::Result;

use super::{PortalApi, segment};
use crate::api_client::RequestOptions;

impl PortalApi {
    pub async fn list_shared_tablets(&self, institution_id: &str) -> Result<Vec<SharedTablet>> {
        let endpoint = format!(
            "/portal/institutions/{}/shared-tablets",
            segment(institution_id)?
        );
        self.request(&endpoint, RequestOptions::get()).await
    }

    pub async fn create_shared_tablet(
        &self,
        institution_id: &str,
        input: &SharedTabletInput,
    ) -> Result<SharedTablet> {
        let endpoint = format!(
            "/portal/institutions/{}/shared-tablets",
            segment(institution_id)?
        );
        self.request(&endpoint, RequestOptions::post_json(input)?).await
    }

    pub async fn assign_tablet_class(&self, tablet_id: &str, class_id: &str) -> Result<SharedTablet> {
        self.put_tablet_class(tablet_id, Some(class_id.to_string()))
            .await
    }

    pub async fn unassign_tablet_class(&self, tablet_id: &str) -> Result<SharedTablet> {
        self.put_tablet_class(tablet_id, None).await
    }

    pub async fn delete_shared_tablet(&self, tablet_id: &str) -> Result<()> {
        let endpoint = format!("/portal/shared-tablets/{}", segment(tablet_id)?);
        self.request(&endpoint, RequestOptions::delete()).await
    }

    async fn put_tablet_class(
        &self,
        tablet_id: &str,
        class_id: Option<String>,
    ) -> Result<SharedTablet> {
        let endpoint = format!("/portal/shared-tablets/{}/class", segment(tablet_id)?);
        self.request(
            &endpoint,
            RequestOptions::put_json(&AssignClassRequest { class_id })?,
        )
        .await
    }
}
