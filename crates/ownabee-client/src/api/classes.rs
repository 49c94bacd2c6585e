use ownabee_core::entity::{Class, ClassInput};
use ownabee_core::error::Result;

use super::{PortalApi, segment};
use crate::api_client::RequestOptions;

impl PortalApi {
    pub async fn list_classes(&self, institution_id: &str) -> Result<Vec<Class>> {
        let endpoint = format!("/portal/institutions/{}/classes", segment(institution_id)?);
        self.request(&endpoint, RequestOptions::get()).await
    }

    pub async fn create_class(&self, institution_id: &str, input: &ClassInput) -> Result<Class> {
        let endpoint = format!("/portal/institutions/{}/classes", segment(institution_id)?);
        self.request(&endpoint, RequestOptions::post_json(input)?).await
    }

    pub async fn update_class(&self, class_id: &str, input: &ClassInput) -> Result<Class> {
        let endpoint = format!("/portal/classes/{}", segment(class_id)?);
        self.request(&endpoint, RequestOptions::put_json(input)?).await
    }

    pub async fn delete_class(&self, class_id: &str) -> Result<()> {
        let endpoint = format!("/portal/classes/{}", segment(class_id)?);
        self.request(&endpoint, RequestOptions::delete()).await
    }
}
