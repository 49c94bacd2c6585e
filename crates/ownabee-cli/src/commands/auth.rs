use anyhow::Result;
use ownabee_core::session;

use super::context::PortalContext;

pub async fn login(ctx: &PortalContext, email: &str, pin: &str) -> Result<()> {
    let user = ctx.store.login_with_pin(email, pin).await?;
    println!("✓ Signed in as {}", user.email);
    Ok(())
}

pub async fn login_google(ctx: &PortalContext, credential: &str) -> Result<()> {
    let user = ctx.store.login_with_google(credential).await?;
    println!("✓ Signed in as {}", user.email);
    Ok(())
}

pub async fn whoami(ctx: &PortalContext) -> Result<()> {
    ctx.require_session().await?;
    let snapshot = ctx.store.snapshot().await;

    if let Some(user) = &snapshot.user {
        match &user.name {
            Some(name) => println!("{} <{}>", name, user.email),
            None => println!("{}", user.email),
        }
    }
    if session::is_operator(&snapshot) {
        println!("Role: operator");
    }
    if let Some(info) = &snapshot.portal_info {
        for membership in &info.institutions {
            println!(
                "  {} {} ({})",
                membership.institution_id,
                membership.institution_name.as_deref().unwrap_or("-"),
                membership.role
            );
        }
    }
    if !session::has_institution_access(&snapshot) {
        println!("No institution access.");
    }
    Ok(())
}

pub async fn logout(ctx: &PortalContext) -> Result<()> {
    ctx.store.logout().await;
    println!("✓ Signed out");
    Ok(())
}
