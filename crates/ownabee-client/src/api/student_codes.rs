use ownabee_core::entity::{GenerateStudentCodesRequest, StudentCode};
use ownabee_core::error::Result;

use super::{PortalApi, segment};
use crate::api_client::RequestOptions;

impl PortalApi {
    pub async fn list_student_codes(&self, class_id: &str) -> Result<Vec<StudentCode>> {
        let endpoint = format!("/portal/classes/{}/student-codes", segment(class_id)?);
        self.request(&endpoint, RequestOptions::get()).await
    }

    pub async fn generate_student_codes(
        &self,
        class_id: &str,
        request: &GenerateStudentCodesRequest,
    ) -> Result<Vec<StudentCode>> {
        let endpoint = format!("/portal/classes/{}/student-codes", segment(class_id)?);
        self.request(&endpoint, RequestOptions::post_json(request)?).await
    }

    pub async fn revoke_student_code(&self, code_id: &str) -> Result<()> {
        let endpoint = format!("/portal/student-codes/{}", segment(code_id)?);
        self.request(&endpoint, RequestOptions::delete()).await
    }
}
