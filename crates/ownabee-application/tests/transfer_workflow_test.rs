mod common;

use std::sync::Arc;

use common::FakePortal;
use ownabee_application::TransferWorkflow;
use ownabee_core::PortalError;
use ownabee_core::transfer::SourceAction;

async fn signed_in_workflow() -> (Arc<FakePortal>, TransferWorkflow) {
    let portal = FakePortal::new();
    let api = portal.api();
    api.client().set_tokens(Some(portal.issue_tokens())).await;
    (portal, TransferWorkflow::new(api))
}

/// Institution 1, tablet 1, active parent 1.
async fn ready_workflow() -> (Arc<FakePortal>, TransferWorkflow) {
    let (portal, workflow) = signed_in_workflow().await;
    workflow.select_institution("inst-1").await.unwrap();
    workflow.select_tablet("t-1").await.unwrap();
    workflow.select_parent("ip-1").await.unwrap();
    (portal, workflow)
}

#[tokio::test]
async fn test_institution_selection_loads_tablets_and_parents() {
    let (portal, workflow) = signed_in_workflow().await;

    workflow.select_institution("inst-1").await.unwrap();

    let state = workflow.snapshot().await;
    let tablet_ids: Vec<&str> = state.tablets.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(tablet_ids, vec!["t-1", "t-2"]);
    assert_eq!(state.parents.len(), 2);
    let selectable: Vec<&str> = state.selectable_parents().map(|p| p.id.as_str()).collect();
    assert_eq!(selectable, vec!["ip-1"]);

    // Re-selecting the loaded institution does not reload.
    workflow.select_institution("inst-1").await.unwrap();
    assert_eq!(
        portal
            .requests_to("/portal/institutions/inst-1/shared-tablets")
            .len(),
        1
    );
}

#[tokio::test]
async fn test_keep_copies_and_leaves_source() {
    let (portal, workflow) = ready_workflow().await;
    workflow.toggle_portfolio("pf-1").await.unwrap();
    workflow.toggle_portfolio("pf-2").await.unwrap();
    assert!(workflow.can_submit().await);

    let outcome = workflow.commit().await.unwrap();

    assert_eq!(outcome.transfer.source_action, SourceAction::Keep);
    assert!(outcome.unreconciled_ids.is_empty());
    let state = workflow.snapshot().await;
    let remaining: Vec<&str> = state.portfolios.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(remaining, vec!["pf-1", "pf-2", "pf-3"]);
    assert_eq!(state.selection.selected_count(), 0);
    assert_eq!(state.last_transfer, Some(outcome.transfer));
    assert!(state.error.is_none());
    assert_eq!(portal.portfolio_ids("prof-p1"), vec!["pf-1-copy", "pf-2-copy"]);
}

#[tokio::test]
async fn test_delete_moves_and_refetch_drops_source() {
    let (portal, workflow) = ready_workflow().await;
    workflow.toggle_portfolio("pf-2").await.unwrap();
    workflow.set_source_action(SourceAction::Delete).await;

    let outcome = workflow.commit().await.unwrap();

    assert_eq!(outcome.transfer.source_action, SourceAction::Delete);
    assert!(outcome.unreconciled_ids.is_empty());
    let state = workflow.snapshot().await;
    let remaining: Vec<&str> = state.portfolios.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(remaining, vec!["pf-1", "pf-3"]);
    assert_eq!(portal.portfolio_ids("prof-t1"), vec!["pf-1", "pf-3"]);
    assert_eq!(portal.requests_to("/portal/profiles/prof-t1/portfolios").len(), 2);
}

#[tokio::test]
async fn test_changing_institution_resets_downstream() {
    let (_portal, workflow) = ready_workflow().await;
    workflow.toggle_all().await;
    assert_eq!(workflow.snapshot().await.selection.selected_count(), 3);
    assert!(workflow.can_submit().await);

    workflow.select_institution("inst-2").await.unwrap();

    let state = workflow.snapshot().await;
    assert!(state.selection.tablet().is_none());
    assert!(state.selection.parent_id().is_none());
    assert_eq!(state.selection.selected_count(), 0);
    assert!(state.portfolios.is_empty());
    assert!(!workflow.can_submit().await);
    assert!(matches!(
        workflow.commit().await.unwrap_err(),
        PortalError::Validation(_)
    ));

    workflow.select_tablet("t-9").await.unwrap();
    workflow.select_parent("ip-9").await.unwrap();
    assert!(!workflow.can_submit().await);
}

#[tokio::test]
async fn test_changing_tablet_clears_portfolios() {
    let (_portal, workflow) = ready_workflow().await;
    workflow.toggle_portfolio("pf-1").await.unwrap();

    workflow.select_tablet("t-2").await.unwrap();

    let state = workflow.snapshot().await;
    assert_eq!(state.selection.selected_count(), 0);
    assert_eq!(state.selection.parent_id(), Some("ip-1"));
    let loaded: Vec<&str> = state.portfolios.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(loaded, vec!["pf-4"]);
}

#[tokio::test]
async fn test_toggle_all_twice_clears() {
    let (_portal, workflow) = ready_workflow().await;
    workflow.toggle_all().await;
    workflow.toggle_all().await;
    assert_eq!(workflow.snapshot().await.selection.selected_count(), 0);
}

#[tokio::test]
async fn test_registered_parent_is_not_selectable() {
    let (_portal, workflow) = signed_in_workflow().await;
    workflow.select_institution("inst-1").await.unwrap();

    let err = workflow.select_parent("ip-2").await.unwrap_err();
    assert!(matches!(err, PortalError::Validation(_)));
    let err = workflow.select_parent("ip-9").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_failed_commit_only_records_error() {
    let (portal, workflow) = ready_workflow().await;
    workflow.toggle_portfolio("pf-3").await.unwrap();
    portal.fail_transfers(true);
    let before = workflow.snapshot().await;

    let err = workflow.commit().await.unwrap_err();

    assert_eq!(err, PortalError::api(500, "Transfer service unavailable"));
    let after = workflow.snapshot().await;
    assert_eq!(after.error.as_deref(), Some("Transfer service unavailable"));
    assert_eq!(after.selection, before.selection);
    assert_eq!(after.portfolios, before.portfolios);
    assert!(after.last_transfer.is_none());
    assert!(!workflow.is_submitting());
}

#[tokio::test]
async fn test_history_lists_transfers_of_institution() {
    let (_portal, workflow) = ready_workflow().await;
    workflow.toggle_portfolio("pf-1").await.unwrap();
    workflow.commit().await.unwrap();

    let history = workflow.history().await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].portfolio_ids, vec!["pf-1".to_string()]);
}

#[tokio::test]
async fn test_closed_workflow_does_not_update_state() {
    let (portal, workflow) = signed_in_workflow().await;
    workflow.close();

    let err = workflow.select_institution("inst-1").await.unwrap_err();

    assert!(err.is_cancelled());
    assert!(workflow.is_closed());
    let state = workflow.snapshot().await;
    assert!(state.selection.institution_id().is_none());
    assert!(state.tablets.is_empty());
    assert!(state.error.is_none());
    assert_eq!(portal.request_count(), 0);
}

#[tokio::test]
async fn test_reselecting_institution_retries_failed_load() {
    let (portal, workflow) = signed_in_workflow().await;
    portal.set_offline(true);

    let err = workflow.select_institution("inst-1").await.unwrap_err();
    assert!(matches!(err, PortalError::Network(_)));
    assert!(workflow.snapshot().await.error.is_some());

    portal.set_offline(false);
    workflow.select_institution("inst-1").await.unwrap();

    let state = workflow.snapshot().await;
    assert_eq!(state.tablets.len(), 2);
    assert_eq!(state.parents.len(), 2);
    assert!(state.error.is_none());
}

#[tokio::test]
async fn test_reselecting_tablet_retries_failed_load() {
    let (portal, workflow) = signed_in_workflow().await;
    workflow.select_institution("inst-1").await.unwrap();
    portal.set_offline(true);
    assert!(workflow.select_tablet("t-1").await.is_err());

    portal.set_offline(false);
    workflow.select_tablet("t-1").await.unwrap();

    let state = workflow.snapshot().await;
    assert_eq!(state.portfolios.len(), 3);
    assert!(state.error.is_none());
    assert_eq!(portal.requests_to("/portal/profiles/prof-t1/portfolios").len(), 1);
}

#[tokio::test]
async fn test_unknown_portfolio_cannot_be_toggled() {
    let (_portal, workflow) = ready_workflow().await;

    let err = workflow.toggle_portfolio("pf-4").await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(workflow.snapshot().await.selection.selected_count(), 0);
    assert!(workflow.toggle_portfolio("pf-1").await.unwrap());
}

#[tokio::test]
async fn test_second_commit_while_submitting_is_rejected() {
    let (portal, workflow) = ready_workflow().await;
    workflow.toggle_portfolio("pf-1").await.unwrap();

    let (first, second) = tokio::join!(workflow.commit(), workflow.commit());

    assert!(first.is_ok());
    assert_eq!(second.unwrap_err(), PortalError::AlreadySubmitting);
    assert_eq!(portal.requests_to("/portal/portfolio-transfers").len(), 1);
    assert!(!workflow.is_submitting());
}

#[tokio::test]
async fn test_close_during_load_leaves_state_untouched() {
    let (portal, workflow) = signed_in_workflow().await;
    let workflow = Arc::new(workflow);
    let handle = Arc::downgrade(&workflow);
    portal.on_request_to("/portal/institutions/inst-1/shared-tablets", move || {
        if let Some(workflow) = handle.upgrade() {
            workflow.close();
        }
    });

    let err = workflow.select_institution("inst-1").await.unwrap_err();

    assert!(err.is_cancelled());
    let state = workflow.snapshot().await;
    assert!(state.tablets.is_empty());
    assert!(state.parents.is_empty());
    assert!(state.error.is_none());
}

#[tokio::test]
async fn test_close_during_refetch_keeps_selection() {
    let (portal, workflow) = ready_workflow().await;
    let workflow = Arc::new(workflow);
    workflow.toggle_portfolio("pf-2").await.unwrap();
    workflow.set_source_action(SourceAction::Delete).await;
    let before = workflow.snapshot().await;
    let handle = Arc::downgrade(&workflow);
    portal.on_request_to("/portal/profiles/prof-t1/portfolios", move || {
        if let Some(workflow) = handle.upgrade() {
            workflow.close();
        }
    });

    let outcome = workflow.commit().await.unwrap();

    assert_eq!(outcome.transfer.portfolio_ids, vec!["pf-2".to_string()]);
    assert_eq!(portal.portfolio_ids("prof-p1"), vec!["pf-2-copy"]);
    let after = workflow.snapshot().await;
    assert_eq!(after.portfolios, before.portfolios);
    assert_eq!(after.selection, before.selection);
    assert!(after.last_transfer.is_none());
    assert!(!workflow.is_submitting());
}
