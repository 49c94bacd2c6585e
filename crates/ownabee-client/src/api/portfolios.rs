use ownabee_core::entity::{Portfolio, PortfolioDraft};
use ownabee_core::error::Result;
use ownabee_core::http::HttpMethod;

use super::{PortalApi, segment};
use crate::api_client::RequestOptions;
use crate::multipart::encode_portfolio_draft;

impl PortalApi {
    pub async fn list_portfolios(&self, profile_id: &str) -> Result<Vec<Portfolio>> {
        let endpoint = format!("/portal/profiles/{}/portfolios", segment(profile_id)?);
        self.request(&endpoint, RequestOptions::get()).await
    }

    pub async fn get_portfolio(&self, portfolio_id: &str) -> Result<Portfolio> {
        let endpoint = format!("/portal/portfolios/{}", segment(portfolio_id)?);
        self.request(&endpoint, RequestOptions::get()).await
    }

    pub async fn create_portfolio(
        &self,
        profile_id: &str,
        draft: &PortfolioDraft,
    ) -> Result<Portfolio> {
        let endpoint = format!("/portal/profiles/{}/portfolios", segment(profile_id)?);
        let form = encode_portfolio_draft(draft)?;
        self.request(&endpoint, RequestOptions::multipart(HttpMethod::Post, form)).await
    }

    pub async fn update_portfolio(
        &self,
        portfolio_id: &str,
        draft: &PortfolioDraft,
    ) -> Result<Portfolio> {
        let endpoint = format!("/portal/portfolios/{}", segment(portfolio_id)?);
        let form = encode_portfolio_draft(draft)?;
        self.request(&endpoint, RequestOptions::multipart(HttpMethod::Put, form)).await
    }

    pub async fn delete_portfolio(&self, portfolio_id: &str) -> Result<()> {
        let endpoint = format!("/portal/portfolios/{}", segment(portfolio_id)?);
        self.request(&endpoint, RequestOptions::delete()).await
    }
}
