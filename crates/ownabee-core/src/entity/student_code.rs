use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One-time code a student uses to link a personal device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentCode {
    pub id: String,
    pub class_id: String,
    #[serde(default)]
    pub student_id: Option<String>,
    pub code: String,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl StudentCode {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires| expires <= now)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateStudentCodesRequest {
    pub student_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in_days: Option<u32>,
}
