use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;

/// Lifecycle of a parent link.
///
/// A parent becomes `Active` only through the registration-acceptance flow
/// on the parent side; the portal can only invite (`Registered`) or remove.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ParentStatus {
    Registered,
    Active,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstitutionParent {
    pub id: String,
    pub institution_id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    pub status: ParentStatus,
    /// Profile that receives transferred portfolios; set once active.
    #[serde(default)]
    pub profile_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl InstitutionParent {
    pub fn is_active(&self) -> bool {
        self.status == ParentStatus::Active
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteParentRequest {
    pub email: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub student_ids: Vec<String>,
}
