use ownabee_core::entity::{Student, StudentInput};
use ownabee_core::error::Result;

use super::{PortalApi, segment};
use crate::api_client::RequestOptions;

impl PortalApi {
    pub async fn list_students(&self, class_id: &str) -> Result<Vec<Student>> {
        let endpoint = format!("/portal/classes/{}/students", segment(class_id)?);
        self.request(&endpoint, RequestOptions::get()).await
    }

    pub async fn create_student(&self, class_id: &str, input: &StudentInput) -> Result<Student> {
        let endpoint = format!("/portal/classes/{}/students", segment(class_id)?);
        self.request(&endpoint, RequestOptions::post_json(input)?).await
    }

    pub async fn update_student(&self, student_id: &str, input: &StudentInput) -> Result<Student> {
        let endpoint = format!("/portal/students/{}", segment(student_id)?);
        self.request(&endpoint, RequestOptions::put_json(input)?).await
    }

    pub async fn delete_student(&self, student_id: &str) -> Result<()> {
        let endpoint = format!("/portal/students/{}", segment(student_id)?);
        self.request(&endpoint, RequestOptions::delete()).await
    }
}
