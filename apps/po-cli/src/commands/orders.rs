//! # Order Commands
//!
//! `totals`, `list`, `show`, `save` and `delete`.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info};

use super::{read_draft, report};
use crate::context::AppContext;
use crate::render;
use po_client::{Confirmation, SessionError};
use po_core::PurchaseOrderPayload;

/// Computes totals locally; never touches the backend.
pub fn totals(file: &Path, json: bool) -> Result<()> {
    let draft = read_draft(file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(draft.totals())?);
    } else {
        print!("{}", render::totals_table(&draft));
    }
    Ok(())
}

pub async fn list(ctx: &AppContext, json: bool) -> Result<()> {
    let session = ctx.session().await?;
    let orders = session.list().await.context("Could not list orders")?;
    debug!(count = orders.len(), "Fetched order summaries");

    if json {
        println!("{}", serde_json::to_string_pretty(&orders)?);
    } else if orders.is_empty() {
        eprintln!("No saved orders");
    } else {
        print!("{}", render::summaries_table(&orders));
    }
    Ok(())
}

/// Shows one order with its update history and GRN records. `--json` prints
/// the backend shape with recomputed totals, ready to edit and pass to
/// `po save --update`.
pub async fn show(ctx: &AppContext, po_no: &str, json: bool) -> Result<()> {
    let mut session = ctx.session().await?;
    session
        .open(po_no)
        .await
        .with_context(|| format!("Could not open order {}", po_no))?;
    let draft = session.draft();
    let history = session.history();

    if json {
        let payload = PurchaseOrderPayload::from_draft(draft).with_history(history.clone());
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        print!("{}", render::header_block(draft));
        println!();
        print!("{}", render::items_table(draft));
        println!();
        print!("{}", render::totals_table(draft));
        println!();
        println!("Update History");
        print!("{}", render::updates_table(&history.update_entries()));
        println!();
        println!("GRN Details");
        print!("{}", render::grn_table(&history.grn_entries()));
    }
    Ok(())
}

/// Creates an order, or with `update` replaces the stored one under its
/// original PO number.
pub async fn save(ctx: &AppContext, file: &Path, update: Option<&str>) -> Result<()> {
    let draft = read_draft(file)?;
    let mut session = ctx.session().await?;

    match update {
        Some(po_no) => {
            session
                .open(po_no)
                .await
                .with_context(|| format!("Cannot update {}", po_no))?;
            session.begin_edit()?;
            session.edit(|_| Ok(draft))?;
        }
        None => session = session.with_draft(draft, None),
    }

    for warning in session.warnings() {
        report(warning)?;
    }

    let notification = session.save().await?;
    info!(po_no = ?session.mode().po_no(), "Save finished");
    report(notification)
}

/// Deletes an order; without `--yes` no request is made.
pub async fn delete(ctx: &AppContext, po_no: &str, yes: bool) -> Result<()> {
    let mut session = ctx.session().await?;

    match session.delete(po_no, Confirmation::from_answer(yes)).await {
        Err(SessionError::ConfirmationRequired(_)) => {
            anyhow::bail!("Refusing to delete {} without --yes", po_no)
        }
        other => report(other?),
    }
}
