use ownabee_core::error::Result;
use ownabee_core::transfer::{PortfolioTransfer, TransferPortfoliosRequest};

use super::{PortalApi, segment};
use crate::api_client::RequestOptions;

pub const TRANSFER_ENDPOINT: &str = "/portal/portfolio-transfers";

impl PortalApi {
    /// Copies or moves portfolios from a tablet profile to a parent.
    ///
    /// The call is treated as one atomic remote operation.
    pub async fn transfer_portfolios(
        &self,
        request: &TransferPortfoliosRequest,
    ) -> Result<PortfolioTransfer> {
        self.request(TRANSFER_ENDPOINT, RequestOptions::post_json(request)?).await
    }

    pub async fn list_portfolio_transfers(
        &self,
        institution_id: &str,
    ) -> Result<Vec<PortfolioTransfer>> {
        let endpoint = format!(
            "/portal/institutions/{}/portfolio-transfers",
            segment(institution_id)?
        );
        self.request(&endpoint, RequestOptions::get()).await
    }
}
