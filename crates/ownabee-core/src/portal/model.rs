//! Portal info returned by the self-info endpoint.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::auth::User;

/// Role a user holds inside one institution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum InstitutionRole {
    Admin,
    Teacher,
}

/// A single institution membership of the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstitutionMembership {
    pub institution_id: String,
    #[serde(default)]
    pub institution_name: Option<String>,
    pub role: InstitutionRole,
}

/// The caller's role memberships.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalInfo {
    #[serde(default)]
    pub is_operator: bool,
    #[serde(default)]
    pub institutions: Vec<InstitutionMembership>,
}

impl PortalInfo {
    pub fn membership(&self, institution_id: &str) -> Option<&InstitutionMembership> {
        self.institutions
            .iter()
            .find(|m| m.institution_id == institution_id)
    }
}

/// Response of `GET /portal/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalMe {
    pub user: User,
    #[serde(default)]
    pub portal_info: PortalInfo,
}
