use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// What happens to the source portfolios after a successful transfer.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum SourceAction {
    /// Copy: source portfolios remain untouched.
    #[default]
    Keep,
    /// Move: source portfolios are removed.
    Delete,
}

/// Body of `POST /portal/portfolio-transfers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferPortfoliosRequest {
    pub institution_parent_id: String,
    pub source_profile_id: String,
    pub portfolio_ids: Vec<String>,
    pub source_action: SourceAction,
}

/// Immutable history record created by the transfer endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioTransfer {
    pub id: String,
    pub source_profile_id: String,
    #[serde(default)]
    pub target_profile_id: Option<String>,
    pub institution_parent_id: String,
    pub portfolio_ids: Vec<String>,
    pub source_action: SourceAction,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_by: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_format() {
        let request = TransferPortfoliosRequest {
            institution_parent_id: "ip-1".to_string(),
            source_profile_id: "prof-1".to_string(),
            portfolio_ids: vec!["p-1".to_string(), "p-2".to_string()],
            source_action: SourceAction::Delete,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "institutionParentId": "ip-1",
                "sourceProfileId": "prof-1",
                "portfolioIds": ["p-1", "p-2"],
                "sourceAction": "DELETE"
            })
        );
    }

    #[test]
    fn test_source_action_parse() {
        assert_eq!("keep".parse::<SourceAction>().unwrap(), SourceAction::Keep);
        assert_eq!("DELETE".parse::<SourceAction>().unwrap(), SourceAction::Delete);
        assert!("move".parse::<SourceAction>().is_err());
        assert_eq!(SourceAction::default(), SourceAction::Keep);
    }
}
