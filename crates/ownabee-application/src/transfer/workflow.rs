use std::collections::HashSet;

use ownabee_client::PortalApi;
use ownabee_core::entity::{InstitutionParent, Portfolio, SharedTablet};
use ownabee_core::error::{PortalError, Result};
use ownabee_core::transfer::{PortfolioTransfer, SourceAction, TransferSelection};
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::submit_guard::SubmitGuard;

/// Everything the wizard shows: selections, loaded lists and the result of
/// the last commit.
#[derive(Debug, Clone, Default)]
pub struct TransferState {
    pub selection: TransferSelection,
    pub tablets: Vec<SharedTablet>,
    pub parents: Vec<InstitutionParent>,
    /// Portfolios of the selected tablet's profile.
    pub portfolios: Vec<Portfolio>,
    pub last_transfer: Option<PortfolioTransfer>,
    pub error: Option<String>,
    /// Institution whose tablets and parents are currently loaded.
    loaded_institution: Option<String>,
    /// Tablet whose portfolios are currently loaded.
    loaded_tablet: Option<String>,
}

impl TransferState {
    /// Parents that can receive content. A `REGISTERED` parent has no
    /// profile yet.
    pub fn selectable_parents(&self) -> impl Iterator<Item = &InstitutionParent> {
        self.parents.iter().filter(|p| p.is_active())
    }

    pub fn can_submit(&self) -> bool {
        self.selection.can_submit()
    }
}

/// Result of a successful commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferOutcome {
    pub transfer: PortfolioTransfer,
    /// Ids sent with `DELETE` that still show up on the source profile.
    pub unreconciled_ids: Vec<String>,
}

/// Drives the institution → tablet → portfolios → parent → commit flow.
///
/// Calls go through an API handle scoped to a cancellation token owned by
/// the workflow; after [`close`](Self::close) every pending or future load
/// resolves to [`PortalError::Cancelled`] and leaves the state untouched.
/// A session refresh already under way still completes.
pub struct TransferWorkflow {
    api: PortalApi,
    state: RwLock<TransferState>,
    submit: SubmitGuard,
    cancel: CancellationToken,
}

impl TransferWorkflow {
    pub fn new(api: PortalApi) -> Self {
        let cancel = CancellationToken::new();
        Self {
            api: api.with_cancellation(cancel.clone()),
            state: RwLock::new(TransferState::default()),
            submit: SubmitGuard::new(),
            cancel,
        }
    }

    pub async fn snapshot(&self) -> TransferState {
        self.state.read().await.clone()
    }

    pub async fn can_submit(&self) -> bool {
        self.state.read().await.can_submit()
    }

    pub fn is_submitting(&self) -> bool {
        self.submit.is_submitting()
    }

    /// Selects the institution and loads its tablets and parents together.
    ///
    /// Re-selecting the current institution reloads only if its lists are
    /// not loaded yet, e.g. after a failed load.
    pub async fn select_institution(&self, institution_id: &str) -> Result<()> {
        self.ensure_open()?;
        {
            let mut state = self.state.write().await;
            let changed = state.selection.select_institution(institution_id);
            if !changed && state.loaded_institution.as_deref() == Some(institution_id) {
                return Ok(());
            }
            state.tablets.clear();
            state.parents.clear();
            state.portfolios.clear();
            state.loaded_institution = None;
            state.loaded_tablet = None;
            state.error = None;
        }

        let loaded = futures::try_join!(
            self.api.list_shared_tablets(institution_id),
            self.api.list_parents(institution_id),
        );

        let mut state = self.state.write().await;
        if self.is_closed() {
            return Err(PortalError::Cancelled);
        }
        if state.selection.institution_id() != Some(institution_id) {
            // A newer selection won; drop this result.
            return Ok(());
        }
        match loaded {
            Ok((tablets, parents)) => {
                tracing::debug!(
                    "[Transfer] Institution {}: {} tablets, {} parents",
                    institution_id,
                    tablets.len(),
                    parents.len()
                );
                state.tablets = tablets;
                state.parents = parents;
                state.loaded_institution = Some(institution_id.to_string());
                Ok(())
            }
            Err(e) => Err(record_error(&mut state, e)),
        }
    }

    /// Selects a loaded tablet and loads its profile's portfolios. As with
    /// institutions, re-selecting the current tablet retries a failed load.
    pub async fn select_tablet(&self, tablet_id: &str) -> Result<()> {
        self.ensure_open()?;
        let profile_id = {
            let mut state = self.state.write().await;
            let tablet = state
                .tablets
                .iter()
                .find(|t| t.id == tablet_id)
                .cloned()
                .ok_or_else(|| PortalError::not_found("shared tablet", tablet_id))?;
            let profile_id = tablet.profile_id.clone();
            let changed = state.selection.select_tablet(tablet)?;
            if !changed && state.loaded_tablet.as_deref() == Some(tablet_id) {
                return Ok(());
            }
            state.portfolios.clear();
            state.loaded_tablet = None;
            state.error = None;
            profile_id
        };

        let loaded = self.api.list_portfolios(&profile_id).await;

        let mut state = self.state.write().await;
        if self.is_closed() {
            return Err(PortalError::Cancelled);
        }
        if state.selection.tablet().map(|t| t.id.as_str()) != Some(tablet_id) {
            return Ok(());
        }
        match loaded {
            Ok(portfolios) => {
                state.portfolios = portfolios;
                state.loaded_tablet = Some(tablet_id.to_string());
                Ok(())
            }
            Err(e) => Err(record_error(&mut state, e)),
        }
    }

    /// Flips one loaded portfolio in or out of the selection and returns
    /// whether it is now selected.
    pub async fn toggle_portfolio(&self, portfolio_id: &str) -> Result<bool> {
        let mut state = self.state.write().await;
        if !state.portfolios.iter().any(|p| p.id == portfolio_id) {
            return Err(PortalError::not_found("portfolio", portfolio_id));
        }
        Ok(state.selection.toggle_portfolio(portfolio_id))
    }

    /// Select-all over the loaded portfolios, or clear when all are selected.
    pub async fn toggle_all(&self) {
        let mut state = self.state.write().await;
        let TransferState {
            selection,
            portfolios,
            ..
        } = &mut *state;
        selection.toggle_all(portfolios.iter().map(|p| p.id.clone()));
    }

    pub async fn clear_portfolios(&self) {
        self.state.write().await.selection.clear_portfolios();
    }

    /// Selects the receiving parent. Only active parents of the selected
    /// institution are accepted.
    pub async fn select_parent(&self, parent_id: &str) -> Result<()> {
        let mut state = self.state.write().await;
        let parent = state
            .parents
            .iter()
            .find(|p| p.id == parent_id)
            .ok_or_else(|| PortalError::not_found("institution parent", parent_id))?;
        if !parent.is_active() {
            return Err(PortalError::validation(
                "This parent has not activated their account yet",
            ));
        }
        state.selection.select_parent(parent_id)
    }

    pub async fn set_source_action(&self, action: SourceAction) {
        self.state.write().await.selection.set_source_action(action);
    }

    /// Submits the transfer.
    ///
    /// On success the source portfolios are refetched, the portfolio
    /// selection is cleared and the transfer record is kept as
    /// `last_transfer`. On failure only `error` changes. If the workflow is
    /// closed after the transfer went through, the outcome is still returned
    /// but the state is left as it was.
    pub async fn commit(&self) -> Result<TransferOutcome> {
        self.ensure_open()?;
        let _permit = self.submit.try_begin()?;

        let request = {
            let mut state = self.state.write().await;
            match state.selection.to_request() {
                Ok(request) => {
                    state.error = None;
                    request
                }
                Err(e) => return Err(record_error(&mut state, e)),
            }
        };

        tracing::info!(
            "[Transfer] Transferring {} portfolios from profile {} ({})",
            request.portfolio_ids.len(),
            request.source_profile_id,
            request.source_action
        );

        let transfer = match self.api.transfer_portfolios(&request).await {
            Ok(transfer) => transfer,
            Err(e) => {
                if !e.is_cancelled() {
                    tracing::warn!("[Transfer] Transfer failed: {}", e);
                    record_error(&mut *self.state.write().await, e.clone());
                }
                return Err(e);
            }
        };

        let refetched = self.api.list_portfolios(&request.source_profile_id).await;

        let mut state = self.state.write().await;
        if self.is_closed() {
            tracing::debug!(
                "[Transfer] Transfer {} completed after close; state left as is",
                transfer.id
            );
            return Ok(TransferOutcome {
                transfer,
                unreconciled_ids: Vec::new(),
            });
        }
        let mut unreconciled_ids = Vec::new();
        match refetched {
            Ok(portfolios) => {
                if request.source_action == SourceAction::Delete {
                    let remaining: HashSet<&str> =
                        portfolios.iter().map(|p| p.id.as_str()).collect();
                    unreconciled_ids = request
                        .portfolio_ids
                        .iter()
                        .filter(|id| remaining.contains(id.as_str()))
                        .cloned()
                        .collect();
                    if !unreconciled_ids.is_empty() {
                        tracing::warn!(
                            "[Transfer] {} moved portfolios still listed on source profile {}",
                            unreconciled_ids.len(),
                            request.source_profile_id
                        );
                    }
                }
                if state.selection.source_profile_id() == Some(request.source_profile_id.as_str()) {
                    state.portfolios = portfolios;
                }
            }
            Err(e) => {
                tracing::warn!("[Transfer] Could not reload source portfolios: {}", e);
            }
        }

        state.selection.clear_portfolios();
        state.last_transfer = Some(transfer.clone());
        tracing::info!("[Transfer] Transfer {} completed", transfer.id);

        Ok(TransferOutcome {
            transfer,
            unreconciled_ids,
        })
    }

    /// Past transfers of the selected institution.
    pub async fn history(&self) -> Result<Vec<PortfolioTransfer>> {
        let institution_id = self
            .state
            .read()
            .await
            .selection
            .institution_id()
            .map(str::to_string)
            .ok_or_else(|| PortalError::validation("Select an institution first"))?;
        self.api.list_portfolio_transfers(&institution_id).await
    }

    /// Cancels pending loads and rejects new ones.
    pub fn close(&self) {
        tracing::debug!("[Transfer] Workflow closed");
        self.cancel.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }

    fn ensure_open(&self) -> Result<()> {
        if self.cancel.is_cancelled() {
            return Err(PortalError::Cancelled);
        }
        Ok(())
    }
}

fn record_error(state: &mut TransferState, error: PortalError) -> PortalError {
    if !error.is_cancelled() {
        state.error = Some(error.user_message());
    }
    error
}
