//! # Draft Journal Commands
//!
//! Drafts land here when a save could not reach the backend. `show` prints
//! the draft as a file `po save` accepts.

use anyhow::{Context, Result};

use crate::context::AppContext;
use crate::render;
use po_core::PurchaseOrderPayload;

pub async fn list(ctx: &AppContext) -> Result<()> {
    let db = ctx.journal().await?;
    let drafts = db.drafts().list().await.context("Could not read draft journal")?;

    if drafts.is_empty() {
        eprintln!("No journaled drafts");
    } else {
        print!("{}", render::drafts_table(&drafts));
    }
    Ok(())
}

pub async fn show(ctx: &AppContext, key: &str) -> Result<()> {
    let db = ctx.journal().await?;
    let stored = db
        .drafts()
        .get(key)
        .await?
        .with_context(|| format!("No journaled draft '{}'", key))?;

    let draft = stored.to_draft()?;
    let payload = PurchaseOrderPayload::from_draft(&draft);
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

pub async fn discard(ctx: &AppContext, key: &str) -> Result<()> {
    let db = ctx.journal().await?;
    if db.drafts().discard(key).await? {
        eprintln!("Discarded draft '{}'", key);
        Ok(())
    } else {
        anyhow::bail!("No journaled draft '{}'", key)
    }
}
