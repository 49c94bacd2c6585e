use anyhow::{Context, Result, bail};
use ownabee_application::TransferWorkflow;
use ownabee_core::transfer::SourceAction;

use super::context::PortalContext;

pub struct TransferArgs {
    pub institution: String,
    pub tablet: String,
    pub parent: String,
    pub portfolios: Vec<String>,
    pub all: bool,
    pub action: SourceAction,
}

pub async fn run(ctx: &PortalContext, args: TransferArgs) -> Result<()> {
    ctx.require_session().await?;
    if !args.all && args.portfolios.is_empty() {
        bail!("Pass --portfolio <id> at least once, or --all");
    }

    let workflow = TransferWorkflow::new(ctx.api().clone());
    workflow.select_institution(&args.institution).await?;
    workflow.select_tablet(&args.tablet).await?;

    if args.all {
        workflow.toggle_all().await;
    } else {
        for id in &args.portfolios {
            workflow
                .toggle_portfolio(id)
                .await
                .with_context(|| format!("Portfolio {} is not on tablet {}", id, args.tablet))?;
        }
    }

    workflow.select_parent(&args.parent).await?;
    workflow.set_source_action(args.action).await;

    let outcome = workflow.commit().await?;
    println!(
        "✓ Transfer {} ({}): {} portfolios",
        outcome.transfer.id,
        outcome.transfer.source_action,
        outcome.transfer.portfolio_ids.len()
    );
    if !outcome.unreconciled_ids.is_empty() {
        println!(
            "⚠ Still listed on the tablet: {}",
            outcome.unreconciled_ids.join(", ")
        );
    }
    workflow.close();
    Ok(())
}
