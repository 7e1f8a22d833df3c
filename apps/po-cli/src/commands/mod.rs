//! # Commands
//!
//! One function per subcommand, grouped by what they touch.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (dispatch, shared helpers)
//! ├── orders.rs     ◄─── totals, list, show, save, delete
//! ├── documents.rs  ◄─── print, export
//! └── drafts.rs     ◄─── drafts list / show / discard
//! ```
//!
//! ## Draft Files
//! Draft files use the backend's order JSON, so `po show --json` output can
//! be edited and fed back to `po save`. Numbers may be strings or blank;
//! they are coerced the same way the backend payload is.

pub mod documents;
pub mod drafts;
pub mod orders;

use anyhow::{bail, Context, Result};
use std::io::Read;
use std::path::Path;

use crate::context::AppContext;
use crate::{Command, DraftsCommand};
use po_client::{Notification, NotificationLevel};
use po_core::{OrderDraft, PurchaseOrderPayload};

pub async fn run(ctx: &AppContext, command: Command) -> Result<()> {
    match command {
        Command::Totals { file, json } => orders::totals(&file, json),
        Command::List { json } => orders::list(ctx, json).await,
        Command::Show { po_no, json } => orders::show(ctx, &po_no, json).await,
        Command::Save { file, update } => orders::save(ctx, &file, update.as_deref()).await,
        Command::Delete { po_no, yes } => orders::delete(ctx, &po_no, yes).await,
        Command::Print(args) => documents::print(ctx, args).await,
        Command::Export { po_no, out } => documents::export(ctx, &po_no, out.as_deref()).await,
        Command::Drafts { command } => match command.unwrap_or(DraftsCommand::List) {
            DraftsCommand::List => drafts::list(ctx).await,
            DraftsCommand::Show { key } => drafts::show(ctx, &key).await,
            DraftsCommand::Discard { key } => drafts::discard(ctx, &key).await,
        },
    }
}

/// Reads a draft file (`-` for stdin) and recomputes its totals.
pub fn read_draft(path: &Path) -> Result<OrderDraft> {
    let contents = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Could not read draft from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()))?
    };

    parse_draft(&contents).with_context(|| format!("{} is not an order draft", path.display()))
}

fn parse_draft(contents: &str) -> Result<OrderDraft> {
    let payload: PurchaseOrderPayload = serde_json::from_str(contents)?;
    Ok(payload.into_draft())
}

/// Prints a notification to stderr; failures become the command's error.
pub fn report(notification: Notification) -> Result<()> {
    match notification.level {
        NotificationLevel::Success => {
            eprintln!("{}", notification);
            Ok(())
        }
        NotificationLevel::Warning => {
            eprintln!("warning: {}", notification);
            Ok(())
        }
        NotificationLevel::Failure => bail!("{}", notification),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_draft_coerces_and_recomputes() {
        let draft = parse_draft(
            r#"{
                "po_no": "PO/1",
                "discount": "10",
                "freight_amt": "20",
                "add_less": -5,
                "items": [
                    { "qty": "2", "rate": "100", "amount": 999 },
                    { "qty": 1, "rate": 50 }
                ],
                "net_amount": 1
            }"#,
        )
        .unwrap();

        assert_eq!(draft.items()[0].amount, 200.0);
        assert_eq!(draft.totals().net_amount, 280.5);
    }

    #[test]
    fn test_parse_draft_blank_numbers_are_zero() {
        let draft = parse_draft(r#"{ "items": [{ "qty": "", "rate": 10 }] }"#).unwrap();
        assert_eq!(draft.items()[0].amount, 0.0);
        assert_eq!(draft.totals().gross_amount, 0.0);
    }

    #[test]
    fn test_read_draft_reports_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(read_draft(&missing).is_err());

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "[1, 2, 3]").unwrap();
        let err = read_draft(&bad).unwrap_err();
        assert!(err.to_string().contains("is not an order draft"));
    }

    #[test]
    fn test_report_failure_is_error() {
        assert!(report(Notification::success("saved")).is_ok());
        assert!(report(Notification::warning("Row 1: negative quantity")).is_ok());
        assert!(report(Notification::failure("Backend unavailable")).is_err());
    }
}
