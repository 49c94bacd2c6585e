//! Selection state of the transfer wizard.
//!
//! Selections are ordered institution → shared tablet → portfolios → parent,
//! and each one constrains the next. Re-selecting an upstream step with a
//! different value invalidates everything downstream so that a selection made
//! under another institution can never be submitted.

use std::collections::BTreeSet;

use super::model::{SourceAction, TransferPortfoliosRequest};
use crate::entity::SharedTablet;
use crate::error::{PortalError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferSelection {
    institution_id: Option<String>,
    tablet: Option<SharedTablet>,
    portfolio_ids: BTreeSet<String>,
    parent_id: Option<String>,
    source_action: SourceAction,
}

impl TransferSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn institution_id(&self) -> Option<&str> {
        self.institution_id.as_deref()
    }

    pub fn tablet(&self) -> Option<&SharedTablet> {
        self.tablet.as_ref()
    }

    pub fn source_profile_id(&self) -> Option<&str> {
        self.tablet.as_ref().map(|t| t.profile_id.as_str())
    }

    pub fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref()
    }

    pub fn source_action(&self) -> SourceAction {
        self.source_action
    }

    pub fn portfolio_ids(&self) -> impl Iterator<Item = &str> {
        self.portfolio_ids.iter().map(String::as_str)
    }

    pub fn selected_count(&self) -> usize {
        self.portfolio_ids.len()
    }

    pub fn is_portfolio_selected(&self, portfolio_id: &str) -> bool {
        self.portfolio_ids.contains(portfolio_id)
    }

    /// Selects an institution. A different institution resets the tablet,
    /// parent and portfolio selections; the same one is a no-op.
    ///
    /// Returns `true` when the selection changed.
    pub fn select_institution(&mut self, institution_id: impl Into<String>) -> bool {
        let institution_id = institution_id.into();
        if self.institution_id.as_deref() == Some(institution_id.as_str()) {
            return false;
        }
        self.institution_id = Some(institution_id);
        self.tablet = None;
        self.parent_id = None;
        self.portfolio_ids.clear();
        true
    }

    /// Selects the source tablet. A different tablet resets the portfolio
    /// selection. The tablet must belong to the selected institution.
    pub fn select_tablet(&mut self, tablet: SharedTablet) -> Result<bool> {
        let institution_id = self
            .institution_id
            .as_deref()
            .ok_or_else(|| PortalError::validation("Select an institution first"))?;
        if tablet.institution_id != institution_id {
            return Err(PortalError::validation(
                "Shared tablet does not belong to the selected institution",
            ));
        }
        if self.tablet.as_ref().map(|t| t.id.as_str()) == Some(tablet.id.as_str()) {
            return Ok(false);
        }
        self.tablet = Some(tablet);
        self.portfolio_ids.clear();
        Ok(true)
    }

    /// Flips one portfolio in or out of the selection.
    ///
    /// Returns whether the portfolio is selected afterwards.
    pub fn toggle_portfolio(&mut self, portfolio_id: impl Into<String>) -> bool {
        let portfolio_id = portfolio_id.into();
        if self.portfolio_ids.remove(&portfolio_id) {
            false
        } else {
            self.portfolio_ids.insert(portfolio_id);
            true
        }
    }

    /// Select-all over the currently loaded list: when every id is already
    /// selected the selection is cleared, otherwise all are selected.
    pub fn toggle_all<I, S>(&mut self, available: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let available: BTreeSet<String> = available.into_iter().map(Into::into).collect();
        if !available.is_empty() && available.is_subset(&self.portfolio_ids) {
            self.portfolio_ids.clear();
        } else {
            self.portfolio_ids = available;
        }
    }

    pub fn clear_portfolios(&mut self) {
        self.portfolio_ids.clear();
    }

    /// Drops selected ids that are not in `available` (after a refetch).
    pub fn retain_portfolios<'a, I>(&mut self, available: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let available: BTreeSet<&str> = available.into_iter().collect();
        self.portfolio_ids.retain(|id| available.contains(id.as_str()));
    }

    pub fn select_parent(&mut self, parent_id: impl Into<String>) -> Result<()> {
        if self.institution_id.is_none() {
            return Err(PortalError::validation("Select an institution first"));
        }
        self.parent_id = Some(parent_id.into());
        Ok(())
    }

    pub fn set_source_action(&mut self, action: SourceAction) {
        self.source_action = action;
    }

    /// Commit is enabled only with a parent and at least one portfolio.
    pub fn can_submit(&self) -> bool {
        self.institution_id.is_some()
            && self.tablet.is_some()
            && self.parent_id.is_some()
            && !self.portfolio_ids.is_empty()
    }

    pub fn to_request(&self) -> Result<TransferPortfoliosRequest> {
        let source_profile_id = self
            .source_profile_id()
            .ok_or_else(|| PortalError::validation("Select a shared tablet"))?;
        let institution_parent_id = self
            .parent_id
            .as_deref()
            .ok_or_else(|| PortalError::validation("Select a parent to receive the portfolios"))?;
        if self.portfolio_ids.is_empty() {
            return Err(PortalError::validation("Select at least one portfolio"));
        }

        Ok(TransferPortfoliosRequest {
            institution_parent_id: institution_parent_id.to_string(),
            source_profile_id: source_profile_id.to_string(),
            portfolio_ids: self.portfolio_ids.iter().cloned().collect(),
            source_action: self.source_action,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tablet(id: &str, institution_id: &str) -> SharedTablet {
        SharedTablet {
            id: id.to_string(),
            institution_id: institution_id.to_string(),
            class_id: None,
            name: format!("Tablet {id}"),
            profile_id: format!("profile-{id}"),
        }
    }

    fn ready_selection() -> TransferSelection {
        let mut selection = TransferSelection::new();
        selection.select_institution("i-1");
        selection.select_tablet(tablet("t-1", "i-1")).unwrap();
        selection.toggle_portfolio("p-1");
        selection.select_parent("ip-1").unwrap();
        selection
    }

    #[test]
    fn test_changing_institution_resets_downstream() {
        let mut selection = ready_selection();
        assert!(selection.can_submit());

        assert!(selection.select_institution("i-2"));
        assert!(selection.tablet().is_none());
        assert!(selection.parent_id().is_none());
        assert_eq!(selection.selected_count(), 0);
        assert!(!selection.can_submit());
        assert!(selection.to_request().is_err());
    }

    #[test]
    fn test_reselecting_same_institution_keeps_state() {
        let mut selection = ready_selection();
        assert!(!selection.select_institution("i-1"));
        assert!(selection.can_submit());
    }

    #[test]
    fn test_commit_disabled_until_parent_and_portfolio_reselected() {
        let mut selection = ready_selection();
        selection.select_institution("i-2");
        selection.select_tablet(tablet("t-9", "i-2")).unwrap();
        assert!(!selection.can_submit());

        selection.toggle_portfolio("p-9");
        assert!(!selection.can_submit());

        selection.select_parent("ip-9").unwrap();
        assert!(selection.can_submit());
    }

    #[test]
    fn test_changing_tablet_resets_portfolios_only() {
        let mut selection = ready_selection();
        assert!(selection.select_tablet(tablet("t-2", "i-1")).unwrap());
        assert_eq!(selection.selected_count(), 0);
        assert_eq!(selection.parent_id(), Some("ip-1"));
    }

    #[test]
    fn test_tablet_from_other_institution_rejected() {
        let mut selection = TransferSelection::new();
        assert!(selection.select_tablet(tablet("t-1", "i-1")).is_err());
        selection.select_institution("i-1");
        assert!(selection.select_tablet(tablet("t-2", "i-2")).is_err());
    }

    #[test]
    fn test_toggle_and_select_all() {
        let mut selection = ready_selection();
        assert!(!selection.toggle_portfolio("p-1"));
        assert_eq!(selection.selected_count(), 0);

        selection.toggle_all(["p-1", "p-2", "p-3"]);
        assert_eq!(selection.selected_count(), 3);

        selection.toggle_all(["p-1", "p-2", "p-3"]);
        assert_eq!(selection.selected_count(), 0);

        selection.toggle_portfolio("p-2");
        selection.toggle_all(["p-1", "p-2"]);
        assert_eq!(selection.selected_count(), 2);
    }

    #[test]
    fn test_retain_drops_missing_ids() {
        let mut selection = ready_selection();
        selection.toggle_portfolio("p-2");
        selection.retain_portfolios(["p-2", "p-3"]);
        assert!(!selection.is_portfolio_selected("p-1"));
        assert!(selection.is_portfolio_selected("p-2"));
    }

    #[test]
    fn test_to_request() {
        let mut selection = ready_selection();
        selection.toggle_portfolio("p-0");
        selection.set_source_action(SourceAction::Delete);

        let request = selection.to_request().unwrap();
        assert_eq!(request.institution_parent_id, "ip-1");
        assert_eq!(request.source_profile_id, "profile-t-1");
        assert_eq!(request.portfolio_ids, vec!["p-0", "p-1"]);
        assert_eq!(request.source_action, SourceAction::Delete);
    }
}
