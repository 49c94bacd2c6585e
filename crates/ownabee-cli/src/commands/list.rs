use anyhow::Result;

use super::context::PortalContext;

pub async fn institutions(ctx: &PortalContext) -> Result<()> {
    ctx.require_session().await?;
    let institutions = ctx.api().list_institutions().await?;
    if institutions.is_empty() {
        println!("No institutions.");
    }
    for institution in institutions {
        println!("{}\t{}", institution.id, institution.name);
    }
    Ok(())
}

pub async fn tablets(ctx: &PortalContext, institution_id: &str) -> Result<()> {
    ctx.require_session().await?;
    for tablet in ctx.api().list_shared_tablets(institution_id).await? {
        println!(
            "{}\t{}\tprofile={}\tclass={}",
            tablet.id,
            tablet.name,
            tablet.profile_id,
            tablet.class_id.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

pub async fn parents(ctx: &PortalContext, institution_id: &str) -> Result<()> {
    ctx.require_session().await?;
    for parent in ctx.api().list_parents(institution_id).await? {
        println!(
            "{}\t{}\t{}\t{}",
            parent.id,
            parent.email,
            parent.name.as_deref().unwrap_or("-"),
            parent.status
        );
    }
    Ok(())
}

pub async fn portfolios(ctx: &PortalContext, profile_id: &str) -> Result<()> {
    ctx.require_session().await?;
    for portfolio in ctx.api().list_portfolios(profile_id).await? {
        println!(
            "{}\t{}\t{} items",
            portfolio.id,
            portfolio.title,
            portfolio.content_items.len()
        );
    }
    Ok(())
}
