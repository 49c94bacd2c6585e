use serde::{Deserialize, Serialize};

/// A device-level account used collectively by a class.
///
/// Every shared tablet owns exactly one portfolio profile, which is the
/// source profile of a portfolio transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedTablet {
    pub id: String,
    pub institution_id: String,
    #[serde(default)]
    pub class_id: Option<String>,
    pub name: String,
    pub profile_id: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedTabletInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_id: Option<String>,
}

/// `None` unassigns the tablet from its class.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignClassRequest {
    pub class_id: Option<String>,
}
