//! # Document Commands
//!
//! `print` renders HTML for a browser's print dialog; `export` writes the
//! CSV file a buyer mails to the supplier.

use anyhow::{Context, Result};
use chrono::Local;
use std::path::Path;
use tracing::info;

use super::read_draft;
use crate::context::AppContext;
use crate::PrintArgs;
use po_core::document::{export_file_name, render_export_csv, render_print_html, PrintContext};

pub async fn print(ctx: &AppContext, args: PrintArgs) -> Result<()> {
    let draft = match (&args.file, &args.po_no) {
        (Some(file), _) => read_draft(file)?,
        (None, Some(po_no)) => {
            let mut session = ctx.session().await?;
            session
                .open(po_no)
                .await
                .with_context(|| format!("Could not open order {}", po_no))?
                .clone()
        }
        (None, None) => anyhow::bail!("Nothing to print: pass a draft file or --po"),
    };

    let html = render_print_html(&PrintContext::new(&ctx.config.company, &draft))?;

    match &args.out {
        Some(path) => {
            std::fs::write(path, html)
                .with_context(|| format!("Could not write {}", path.display()))?;
            info!(path = %path.display(), "Wrote printable order");
            eprintln!("Wrote {}", path.display());
        }
        None => print!("{}", html),
    }
    Ok(())
}

/// Exports a stored order to `PO_<po_no>_<today>.csv` in `out_dir`.
pub async fn export(ctx: &AppContext, po_no: &str, out_dir: Option<&Path>) -> Result<()> {
    let mut session = ctx.session().await?;
    let draft = session
        .open(po_no)
        .await
        .with_context(|| format!("Could not open order {}", po_no))?;

    let csv = render_export_csv(&PrintContext::new(&ctx.config.company, draft))?;

    let dir = out_dir.unwrap_or_else(|| Path::new("."));
    let path = dir.join(export_file_name(po_no, Local::now().date_naive()));
    std::fs::write(&path, csv).with_context(|| format!("Could not write {}", path.display()))?;

    info!(path = %path.display(), net_amount = draft.totals().net_amount, "Exported order");
    eprintln!("Exported {}", path.display());
    Ok(())
}
