use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub class_id: String,
    pub name: String,
    #[serde(default)]
    pub student_number: Option<String>,
    /// Portfolio profile owned by the student, once created.
    #[serde(default)]
    pub profile_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_number: Option<String>,
}
